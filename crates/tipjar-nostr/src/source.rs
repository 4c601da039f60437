//! The data-source seam: one session per relay, filter in, raw events out.

use anyhow::Result;
use async_trait::async_trait;
use tipjar_profile::{RawEvent, KIND_METADATA, KIND_TEXT_NOTE};

/// Subset of a NIP-01 filter used for profile and note lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFilter {
    pub kinds: Vec<u16>,
    /// Author pubkeys (hex).
    pub authors: Vec<String>,
    pub limit: Option<usize>,
    /// NIP-50 search hint. Relays without search support ignore it.
    pub search: Option<String>,
}

impl ProfileFilter {
    /// Kind 0 metadata.
    pub fn profiles() -> Self {
        Self {
            kinds: vec![KIND_METADATA],
            ..Default::default()
        }
    }

    /// Kind 1 text notes.
    pub fn notes() -> Self {
        Self {
            kinds: vec![KIND_TEXT_NOTE],
            ..Default::default()
        }
    }

    pub fn author(mut self, hex: &str) -> Self {
        self.authors.push(hex.to_string());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn search(mut self, query: &str) -> Self {
        self.search = Some(query.to_string());
        self
    }
}

/// An open connection to one data source.
#[async_trait]
pub trait SourceSession: Send + Sync {
    /// Address this session is connected to.
    fn address(&self) -> &str;

    /// Run a one-shot query and return whatever the source sends back.
    async fn query(&self, filter: &ProfileFilter) -> Result<Vec<RawEvent>>;

    /// Release the connection.
    async fn close(&self);
}

/// Opens sessions against source addresses.
#[async_trait]
pub trait SourceConnector: Send + Sync {
    async fn connect(&self, address: &str) -> Result<Box<dyn SourceSession>>;
}
