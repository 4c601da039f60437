//! In-memory sources for exercising fan-out and resolution without relays.

use crate::source::{ProfileFilter, SourceConnector, SourceSession};
use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tipjar_profile::{RawEvent, KIND_METADATA, KIND_TEXT_NOTE};

pub fn metadata_event(id: &str, author: &str, content: &str) -> RawEvent {
    RawEvent {
        id: id.to_string(),
        author_key: author.to_string(),
        kind: KIND_METADATA,
        created_at: 1_700_000_000,
        content: content.to_string(),
    }
}

pub fn note_event(id: &str, author: &str, created_at: u64, content: &str) -> RawEvent {
    RawEvent {
        id: id.to_string(),
        author_key: author.to_string(),
        kind: KIND_TEXT_NOTE,
        created_at,
        content: content.to_string(),
    }
}

#[derive(Clone, Default)]
pub struct FakeRelay {
    events: Vec<RawEvent>,
    unreachable: bool,
    failing_queries: bool,
    panics: bool,
    delay: Option<Duration>,
}

impl FakeRelay {
    pub fn with_events(events: Vec<RawEvent>) -> Self {
        Self {
            events,
            ..Default::default()
        }
    }

    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Default::default()
        }
    }

    pub fn failing_queries() -> Self {
        Self {
            failing_queries: true,
            ..Default::default()
        }
    }

    pub fn panicking() -> Self {
        Self {
            panics: true,
            ..Default::default()
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Apply kinds, authors and limit the way a relay would. The search
    /// hint is ignored, like a relay without NIP-50.
    fn matching(&self, filter: &ProfileFilter) -> Vec<RawEvent> {
        let hits = self
            .events
            .iter()
            .filter(|e| filter.kinds.is_empty() || filter.kinds.contains(&e.kind))
            .filter(|e| filter.authors.is_empty() || filter.authors.contains(&e.author_key))
            .cloned();
        match filter.limit {
            Some(limit) => hits.take(limit).collect(),
            None => hits.collect(),
        }
    }
}

/// A set of named fake relays plus counters the tests can inspect.
#[derive(Clone, Default)]
pub struct FakeNetwork {
    relays: Vec<(String, FakeRelay)>,
    connects: Arc<Mutex<HashMap<String, usize>>>,
    filters: Arc<Mutex<Vec<ProfileFilter>>>,
    closed: Arc<AtomicUsize>,
}

impl FakeNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn relay(mut self, address: &str, relay: FakeRelay) -> Self {
        self.relays.push((address.to_string(), relay));
        self
    }

    pub fn addresses(&self) -> Vec<String> {
        self.relays.iter().map(|(a, _)| a.clone()).collect()
    }

    pub fn connects_to(&self, address: &str) -> usize {
        self.connects.lock().unwrap().get(address).copied().unwrap_or(0)
    }

    pub fn filters_seen(&self) -> Vec<ProfileFilter> {
        self.filters.lock().unwrap().clone()
    }

    pub fn closed_sessions(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SourceConnector for FakeNetwork {
    async fn connect(&self, address: &str) -> Result<Box<dyn SourceSession>> {
        *self.connects.lock().unwrap().entry(address.to_string()).or_default() += 1;

        let Some((_, relay)) = self.relays.iter().find(|(a, _)| a == address) else {
            bail!("unknown relay {address}");
        };
        if relay.unreachable {
            bail!("connection refused: {address}");
        }

        Ok(Box::new(FakeSession {
            address: address.to_string(),
            relay: relay.clone(),
            filters: Arc::clone(&self.filters),
            closed: Arc::clone(&self.closed),
        }))
    }
}

struct FakeSession {
    address: String,
    relay: FakeRelay,
    filters: Arc<Mutex<Vec<ProfileFilter>>>,
    closed: Arc<AtomicUsize>,
}

#[async_trait]
impl SourceSession for FakeSession {
    fn address(&self) -> &str {
        &self.address
    }

    async fn query(&self, filter: &ProfileFilter) -> Result<Vec<RawEvent>> {
        self.filters.lock().unwrap().push(filter.clone());
        if let Some(delay) = self.relay.delay {
            tokio::time::sleep(delay).await;
        }
        if self.relay.panics {
            panic!("fake relay {} blew up", self.address);
        }
        if self.relay.failing_queries {
            bail!("query rejected by {}", self.address);
        }
        Ok(self.relay.matching(filter))
    }

    async fn close(&self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}
