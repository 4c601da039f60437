//! Relay access and profile resolution for tipjar.
//!
//! [`Resolver`] turns a hex key, `npub`, or name into a profile with its
//! tip options. Relays sit behind the [`SourceConnector`] seam so the
//! resolution logic can run against in-memory sources in tests.

pub mod error;
pub mod fanout;
pub mod keys;
pub mod relay;
pub mod resolver;
pub mod source;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{ResolveError, Result};
pub use fanout::{query_all, FanOutReport, SourceOutcome, SourceReport};
pub use keys::{decode_npub, encode_npub, truncate_npub};
pub use relay::{RelayConnector, RelaySession};
pub use resolver::{Resolver, ResolverConfig, MAX_SUGGESTIONS, MIN_SUGGEST_QUERY_LEN};
pub use source::{ProfileFilter, SourceConnector, SourceSession};

// Re-export so downstream crates use the same nostr-sdk version.
pub use nostr_sdk;
pub use tipjar_profile;
