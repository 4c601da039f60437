//! NIP-19 key codec.

use crate::error::{ResolveError, Result};
use nostr_sdk::{FromBech32, PublicKey, ToBech32};

/// Decode an `npub1...` into its 64-char hex form.
pub fn decode_npub(npub: &str) -> Result<String> {
    PublicKey::from_bech32(npub)
        .map(|pk| pk.to_hex())
        .map_err(|e| ResolveError::InvalidKey(format!("{npub}: {e}")))
}

/// Encode a hex pubkey as `npub1...` for display.
pub fn encode_npub(hex: &str) -> Result<String> {
    let pk = PublicKey::from_hex(hex).map_err(|e| ResolveError::InvalidKey(format!("{hex}: {e}")))?;
    pk.to_bech32()
        .map_err(|e| ResolveError::InvalidKey(format!("{hex}: {e}")))
}

/// Shorten an npub for compact listings: `npub1abcd...wxyz`.
pub fn truncate_npub(npub: &str) -> String {
    let chars: Vec<char> = npub.chars().collect();
    if chars.len() <= 18 {
        return npub.to_string();
    }
    let head: String = chars[..10].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
