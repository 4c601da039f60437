//! tipjar: find a Nostr profile and the tip addresses it advertises.

pub mod config;
pub mod lookup_cli;
pub mod render;
pub mod saved;

pub use config::Config;
pub use saved::{SavedProfile, SavedStore};
