//! WASM bindings for the tipjar popup.
//!
//! Exposes tipjar-profile functions to JavaScript via wasm-bindgen, so
//! the popup classifies input, scores search results, and pulls tip
//! addresses with the same logic as the CLI. Relay I/O stays on the JS
//! side; these functions only see event and profile JSON.

use wasm_bindgen::prelude::*;

use tipjar_profile::{
    decode_profile, rank_candidates, CandidateProfile, Identifier, PaymentOptions, RawEvent,
};

/// Classify user input as a hex key, npub, or name.
///
/// Returns: `{type, value}` as JsValue.
#[wasm_bindgen]
pub fn classify_identifier(input: &str) -> Result<JsValue, JsError> {
    to_js(&Identifier::classify(input))
}

/// Parse a kind 0 event JSON string into a profile.
///
/// Input: JSON string with `id`, `pubkey`, `kind`, `created_at`, `content`.
/// Returns: serialized `CandidateProfile`, or throws when the event is not
/// readable profile metadata.
#[wasm_bindgen]
pub fn parse_profile_event(json: &str) -> Result<JsValue, JsError> {
    let profile = parse_event(json).map_err(|e| JsError::new(&e))?;
    to_js(&profile)
}

/// Score one profile against a query. Zero means "not a match".
#[wasm_bindgen]
pub fn score_profile(profile_json: &str, query: &str) -> Result<u32, JsError> {
    let profile = parse_profile(profile_json).map_err(|e| JsError::new(&e))?;
    Ok(tipjar_profile::score(&profile, query))
}

/// Score, filter, and sort profiles, keeping at most `limit`.
///
/// Input: JSON array of profiles. `limit` of 0 keeps everything.
/// Returns: ranked profile array with `score` filled in.
#[wasm_bindgen]
pub fn rank_profiles(profiles_json: &str, query: &str, limit: usize) -> Result<JsValue, JsError> {
    let ranked = rank(profiles_json, query, limit).map_err(|e| JsError::new(&e))?;
    to_js(&ranked)
}

/// Lightning and Nano addresses advertised by a profile.
#[wasm_bindgen]
pub fn extract_payment_options(profile_json: &str) -> Result<JsValue, JsError> {
    let options = payment_options(profile_json).map_err(|e| JsError::new(&e))?;
    to_js(&options)
}

/// Strip links and nostr URIs from a note and cap its length.
#[wasm_bindgen]
pub fn format_note_content(text: &str) -> String {
    tipjar_profile::format_note_content(text)
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn parse_event(json: &str) -> Result<CandidateProfile, String> {
    let event: RawEvent =
        serde_json::from_str(json).map_err(|e| format!("invalid event JSON: {e}"))?;
    decode_profile(&event).map_err(|e| format!("event conversion failed: {e}"))
}

fn parse_profile(json: &str) -> Result<CandidateProfile, String> {
    serde_json::from_str(json).map_err(|e| format!("invalid profile JSON: {e}"))
}

fn rank(profiles_json: &str, query: &str, limit: usize) -> Result<Vec<CandidateProfile>, String> {
    let profiles: Vec<CandidateProfile> =
        serde_json::from_str(profiles_json).map_err(|e| format!("invalid profiles JSON: {e}"))?;
    let mut ranked = rank_candidates(profiles, query);
    if limit > 0 {
        ranked.truncate(limit);
    }
    Ok(ranked)
}

fn payment_options(profile_json: &str) -> Result<PaymentOptions, String> {
    parse_profile(profile_json).map(|p| tipjar_profile::extract_payment_options(&p))
}
