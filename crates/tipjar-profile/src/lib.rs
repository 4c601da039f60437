//! Profile types, normalization, ranking, and tip extraction for tipjar.
//!
//! Everything here is synchronous and free of network or runtime
//! dependencies, so the same logic runs in the CLI and, through
//! `tipjar-wasm`, in a browser popup.

pub mod event;
pub mod identifier;
pub mod notes;
pub mod payment;
pub mod ranking;
pub mod types;

pub use event::{decode_profile, normalize, MalformedPayload, RawEvent, KIND_METADATA, KIND_TEXT_NOTE};
pub use identifier::{is_hex_pubkey, Identifier};
pub use notes::{format_note_content, summarize_note, NOTE_DISPLAY_CAP};
pub use payment::extract as extract_payment_options;
pub use ranking::{dedup_by_author, rank_candidates, score};
pub use types::{CandidateProfile, PaymentOptions, RecentNote, ResolvedProfile, Suggestion};
