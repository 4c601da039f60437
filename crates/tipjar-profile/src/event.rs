//! Raw relay events and decoding of kind 0 metadata into candidate profiles.
//!
//! This module works with a plain event representation rather than
//! depending on nostr-sdk directly, keeping the crate usable from wasm.
//! The relay layer maps its concrete event type into [`RawEvent`].

use crate::types::CandidateProfile;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind 0 for metadata/profile.
pub const KIND_METADATA: u16 = 0;
/// Kind 1 for short text notes.
pub const KIND_TEXT_NOTE: u16 = 1;

/// A relay event reduced to the fields profile resolution reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawEvent {
    /// Event id (hex).
    pub id: String,
    /// Author pubkey (hex).
    #[serde(rename = "pubkey")]
    pub author_key: String,
    pub kind: u16,
    pub created_at: u64,
    pub content: String,
}

/// Why an event's content could not be read as profile metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedPayload {
    WrongKind(u16),
    InvalidJson(String),
    NotAnObject,
}

impl std::fmt::Display for MalformedPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedPayload::WrongKind(k) => {
                write!(f, "wrong event kind: {}, expected {}", k, KIND_METADATA)
            }
            MalformedPayload::InvalidJson(e) => write!(f, "invalid metadata JSON: {}", e),
            MalformedPayload::NotAnObject => write!(f, "metadata content is not a JSON object"),
        }
    }
}

impl std::error::Error for MalformedPayload {}

fn string_field(meta: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| meta.get(*k).and_then(Value::as_str))
        .map(str::to_string)
}

/// Decode a kind 0 event into a candidate profile.
///
/// Non-string values are treated as absent, and `displayName` is accepted
/// for clients that publish camelCase metadata.
pub fn decode_profile(event: &RawEvent) -> Result<CandidateProfile, MalformedPayload> {
    if event.kind != KIND_METADATA {
        return Err(MalformedPayload::WrongKind(event.kind));
    }

    let value: Value = serde_json::from_str(&event.content)
        .map_err(|e| MalformedPayload::InvalidJson(e.to_string()))?;
    let Value::Object(meta) = value else {
        return Err(MalformedPayload::NotAnObject);
    };

    Ok(CandidateProfile {
        author_key: event.author_key.clone(),
        name: string_field(&meta, &["name"]),
        display_name: string_field(&meta, &["display_name", "displayName"]),
        nip05: string_field(&meta, &["nip05"]),
        about: string_field(&meta, &["about"]),
        picture: string_field(&meta, &["picture"]),
        banner: string_field(&meta, &["banner"]),
        website: string_field(&meta, &["website"]),
        lud16: string_field(&meta, &["lud16"]),
        lud06: string_field(&meta, &["lud06"]),
        score: 0,
    })
}

/// Decode a kind 0 event, dropping it quietly when the payload is malformed.
pub fn normalize(event: &RawEvent) -> Option<CandidateProfile> {
    match decode_profile(event) {
        Ok(profile) => Some(profile),
        Err(e) => {
            tracing::debug!(event_id = %event.id, author = %event.author_key, "dropping profile: {e}");
            None
        }
    }
}
