//! Tip address extraction from profile metadata.

use crate::types::{non_empty, CandidateProfile, PaymentOptions};
use regex::Regex;
use std::sync::LazyLock;

/// Nano account address: `nano_`, a `1` or `3`, then 59 base32 characters.
///
/// No checksum verification, so a look-alike string in the about text is
/// reported as an address.
static NANO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"nano_[13][13456789abcdefghijkmnopqrstuwxyz]{59}").expect("valid nano regex")
});

/// Collect tip destinations from a profile.
///
/// Lightning entries come from `lud16` then `lud06`, verbatim. Nano
/// addresses are every regex hit in `about`, left to right, duplicates kept.
pub fn extract(candidate: &CandidateProfile) -> PaymentOptions {
    let lightning = [&candidate.lud16, &candidate.lud06]
        .into_iter()
        .filter_map(non_empty)
        .map(str::to_string)
        .collect();

    let altcoin = non_empty(&candidate.about)
        .map(|about| {
            NANO_RE
                .find_iter(about)
                .map(|m| m.as_str().to_string())
                .collect()
        })
        .unwrap_or_default();

    let options = PaymentOptions { lightning, altcoin };
    tracing::debug!(
        author = %candidate.author_key,
        lightning = options.lightning.len(),
        nano = options.altcoin.len(),
        "extracted tip options"
    );
    options
}
