//! Error types for profile resolution.

use thiserror::Error;
use tipjar_profile::MalformedPayload;

/// Why a resolution step did not produce a profile.
///
/// None of these reach callers of [`crate::Resolver::resolve`]; they are
/// logged at the boundary and surface as "not found".
#[derive(Error, Debug)]
pub enum ResolveError {
    /// A relay could not be reached, failed its query, or timed out.
    #[error("source {address} unavailable: {reason}")]
    SourceUnavailable { address: String, reason: String },

    /// Event content could not be decoded as profile metadata.
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] MalformedPayload),

    /// Resolution finished without a qualifying candidate.
    #[error("no matching profile")]
    NoMatch,

    /// An `npub` that does not decode to a public key.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Anything else, including a panic caught at the boundary.
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl ResolveError {
    pub fn unavailable(address: &str, reason: impl std::fmt::Display) -> Self {
        ResolveError::SourceUnavailable {
            address: address.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for ResolveError.
pub type Result<T> = std::result::Result<T, ResolveError>;
