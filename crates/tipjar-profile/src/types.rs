//! Core types for profile resolution.

use serde::{Deserialize, Serialize};

/// A kind 0 profile parsed from relay metadata, plus its match score.
///
/// Every metadata field is optional: relays hand back whatever the author
/// published, and a missing field stays `None` rather than being defaulted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CandidateProfile {
    /// Author pubkey (hex).
    pub author_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// NIP-05 verified handle (`local@domain`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nip05: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Lightning address (`user@domain`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lud16: Option<String>,
    /// LNURL-pay string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lud06: Option<String>,
    /// Relevance against the query that produced this candidate. Zero until scored.
    #[serde(default)]
    pub score: u32,
}

impl CandidateProfile {
    /// Name to show in listings: `name`, then `display_name`, then "Anonymous".
    pub fn label(&self) -> &str {
        non_empty(&self.name)
            .or_else(|| non_empty(&self.display_name))
            .unwrap_or("Anonymous")
    }

    /// Whether the profile carries a non-empty NIP-05 handle.
    pub fn is_verified(&self) -> bool {
        non_empty(&self.nip05).is_some()
    }
}

/// Borrow an optional field only when it holds something other than "".
pub(crate) fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Tip destinations found in a profile, in discovery order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentOptions {
    pub lightning: Vec<String>,
    /// Nano addresses scraped from the about text.
    pub altcoin: Vec<String>,
}

impl PaymentOptions {
    pub fn is_empty(&self) -> bool {
        self.lightning.is_empty() && self.altcoin.is_empty()
    }
}

/// A short, display-ready summary of one of the author's kind 1 notes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecentNote {
    pub content: String,
    /// Unix timestamp of the note.
    pub created_at: u64,
    /// Note event id (hex).
    pub id: String,
}

/// The single profile a lookup settles on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedProfile {
    #[serde(flatten)]
    pub profile: CandidateProfile,
    pub payment_options: PaymentOptions,
    /// Only populated on the direct-key path.
    #[serde(default)]
    pub recent_notes: Vec<RecentNote>,
}

/// One entry of a type-ahead suggestion list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Suggestion {
    #[serde(flatten)]
    pub profile: CandidateProfile,
    pub payment_options: PaymentOptions,
}
