#![no_main]
use libfuzzer_sys::fuzz_target;
use tipjar_profile::{extract_payment_options, normalize, score, RawEvent, KIND_METADATA};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let event = RawEvent {
            id: "fuzz".to_string(),
            author_key: "fuzz".to_string(),
            kind: KIND_METADATA,
            created_at: 0,
            content: s.to_string(),
        };
        // Decoding arbitrary content must never panic.
        if let Some(profile) = normalize(&event) {
            let _ = score(&profile, s);
            let _ = extract_payment_options(&profile);
        }
    }
});
