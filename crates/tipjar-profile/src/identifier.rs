//! Classification of a lookup query into key or name.

use serde::{Deserialize, Serialize};

/// Prefix of a bech32-encoded public key (NIP-19).
pub const NPUB_PREFIX: &str = "npub";

/// What the user typed, sorted by how it should be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Identifier {
    /// 64-char lowercase hex pubkey.
    Hex(String),
    /// `npub1...` key, still encoded.
    Encoded(String),
    /// Anything else: a free-text name search.
    Name(String),
}

impl Identifier {
    /// Classify raw input. Surrounding whitespace is ignored.
    pub fn classify(input: &str) -> Self {
        let input = input.trim();
        if is_hex_pubkey(input) {
            Identifier::Hex(input.to_string())
        } else if input.starts_with(NPUB_PREFIX) {
            Identifier::Encoded(input.to_string())
        } else {
            Identifier::Name(input.to_string())
        }
    }

    /// Whether this resolves by key rather than by search.
    pub fn is_direct(&self) -> bool {
        !matches!(self, Identifier::Name(_))
    }
}

/// Exactly 64 lowercase hex characters. Uppercase hex goes to name search.
pub fn is_hex_pubkey(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
