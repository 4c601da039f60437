//! nostr-sdk backed relay sessions.

use crate::source::{ProfileFilter, SourceConnector, SourceSession};
use anyhow::{Context, Result};
use async_trait::async_trait;
use nostr_sdk::prelude::*;
use std::time::Duration;
use tipjar_profile::RawEvent;
use tracing::debug;

/// Opens one read-only nostr-sdk client per relay.
#[derive(Debug, Clone)]
pub struct RelayConnector {
    connect_timeout: Duration,
    query_timeout: Duration,
}

impl RelayConnector {
    pub fn new(connect_timeout: Duration, query_timeout: Duration) -> Self {
        Self {
            connect_timeout,
            query_timeout,
        }
    }
}

impl Default for RelayConnector {
    fn default() -> Self {
        Self::new(Duration::from_secs(5), Duration::from_secs(5))
    }
}

#[async_trait]
impl SourceConnector for RelayConnector {
    async fn connect(&self, address: &str) -> Result<Box<dyn SourceSession>> {
        // No signer: lookups only read.
        let client = Client::default();

        client
            .add_relay(address)
            .await
            .with_context(|| format!("Failed to add relay: {}", address))?;
        client
            .try_connect_relay(address, self.connect_timeout)
            .await
            .with_context(|| format!("Failed to connect to relay: {}", address))?;
        debug!(relay = %address, "connected");

        Ok(Box::new(RelaySession {
            client,
            address: address.to_string(),
            query_timeout: self.query_timeout,
        }))
    }
}

/// A client bound to a single relay.
pub struct RelaySession {
    client: Client,
    address: String,
    query_timeout: Duration,
}

/// Translate the lookup filter into a nostr-sdk filter.
fn to_nostr_filter(filter: &ProfileFilter) -> Result<Filter> {
    let mut out = Filter::new().kinds(filter.kinds.iter().map(|k| Kind::from(*k)));

    if !filter.authors.is_empty() {
        let authors = filter
            .authors
            .iter()
            .map(|hex| PublicKey::from_hex(hex).with_context(|| format!("Invalid author key: {hex}")))
            .collect::<Result<Vec<_>>>()?;
        out = out.authors(authors);
    }
    if let Some(limit) = filter.limit {
        out = out.limit(limit);
    }
    if let Some(search) = &filter.search {
        out = out.search(search.as_str());
    }
    Ok(out)
}

fn to_raw_event(event: &Event) -> RawEvent {
    RawEvent {
        id: event.id.to_hex(),
        author_key: event.pubkey.to_hex(),
        kind: event.kind.as_u16(),
        created_at: event.created_at.as_secs(),
        content: event.content.clone(),
    }
}

#[async_trait]
impl SourceSession for RelaySession {
    fn address(&self) -> &str {
        &self.address
    }

    async fn query(&self, filter: &ProfileFilter) -> Result<Vec<RawEvent>> {
        let nostr_filter = to_nostr_filter(filter)?;
        let events = self
            .client
            .fetch_events(nostr_filter, self.query_timeout)
            .await
            .with_context(|| format!("Failed to fetch events from {}", self.address))?;

        let raw: Vec<RawEvent> = events.into_iter().map(|e| to_raw_event(&e)).collect();
        debug!(relay = %self.address, events = raw.len(), "query complete");
        Ok(raw)
    }

    async fn close(&self) {
        self.client.disconnect().await;
    }
}
