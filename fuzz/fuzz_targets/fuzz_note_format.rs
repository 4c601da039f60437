#![no_main]
use libfuzzer_sys::fuzz_target;
use tipjar_profile::{format_note_content, NOTE_DISPLAY_CAP};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let formatted = format_note_content(s);
        assert!(formatted.chars().count() <= NOTE_DISPLAY_CAP + 3);
    }
});
