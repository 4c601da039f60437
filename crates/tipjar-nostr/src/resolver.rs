//! Profile resolution: identifier in, best profile with tip options out.
//!
//! A hex or `npub` key is looked up directly on the first relay that
//! accepts a connection, and the author's latest notes are attached. A
//! name is searched across every configured relay, scored locally, and
//! the top candidate wins. Errors and panics stop at this boundary and
//! come out as "not found".

use crate::error::{ResolveError, Result};
use crate::fanout;
use crate::keys;
use crate::relay::RelayConnector;
use crate::source::{ProfileFilter, SourceConnector, SourceSession};
use futures_util::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tipjar_profile::{
    dedup_by_author, decode_profile, extract_payment_options, normalize, rank_candidates,
    summarize_note, CandidateProfile, Identifier, RecentNote, ResolvedProfile, Suggestion,
};
use tracing::{debug, error, info, warn};

/// Suggestions never exceed this many entries.
pub const MAX_SUGGESTIONS: usize = 5;
/// Shorter queries get no suggestions.
pub const MIN_SUGGEST_QUERY_LEN: usize = 2;

/// Tunables for a [`Resolver`].
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Relay URLs, in preference order.
    pub sources: Vec<String>,
    /// Upper bound for each source during a fan-out.
    pub fanout_timeout: Duration,
    /// Upper bound for connect and each query on the direct path.
    pub query_timeout: Duration,
    /// Event limit for a full name search.
    pub search_limit: usize,
    /// Event limit for a suggestion search.
    pub suggest_limit: usize,
    /// Recent notes attached on the direct path.
    pub notes_limit: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            fanout_timeout: Duration::from_secs(5),
            query_timeout: Duration::from_secs(5),
            search_limit: 50,
            suggest_limit: 20,
            notes_limit: 5,
        }
    }
}

/// Resolves identifiers against a set of sources. Holds no per-call state.
#[derive(Clone)]
pub struct Resolver {
    connector: Arc<dyn SourceConnector>,
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(connector: Arc<dyn SourceConnector>, config: ResolverConfig) -> Self {
        Self { connector, config }
    }

    /// Resolver backed by live nostr-sdk relay sessions.
    pub fn with_relays(config: ResolverConfig) -> Self {
        let connector = RelayConnector::new(config.query_timeout, config.query_timeout);
        Self::new(Arc::new(connector), config)
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve a hex key, `npub`, or name to a single profile.
    pub async fn resolve(&self, input: &str) -> Option<ResolvedProfile> {
        let outcome = AssertUnwindSafe(self.try_resolve(input)).catch_unwind().await;
        match flatten_panic(outcome) {
            Ok(profile) => {
                info!(author = %profile.profile.author_key, "resolved profile");
                Some(profile)
            }
            Err(ResolveError::NoMatch) => {
                info!(query = %input, "no profile found");
                None
            }
            Err(e) => {
                error!(query = %input, "profile resolution failed: {e}");
                None
            }
        }
    }

    /// Up to [`MAX_SUGGESTIONS`] ranked profiles for a partial name, without notes.
    pub async fn suggest(&self, query: &str) -> Vec<Suggestion> {
        let query = query.trim();
        if query.chars().count() < MIN_SUGGEST_QUERY_LEN {
            return Vec::new();
        }

        let outcome = AssertUnwindSafe(self.try_suggest(query)).catch_unwind().await;
        match flatten_panic(outcome) {
            Ok(suggestions) => suggestions,
            Err(e) => {
                error!(query = %query, "suggestion search failed: {e}");
                Vec::new()
            }
        }
    }

    pub(crate) async fn try_resolve(&self, input: &str) -> Result<ResolvedProfile> {
        match Identifier::classify(input) {
            Identifier::Hex(hex) => self.resolve_direct(&hex).await,
            Identifier::Encoded(npub) => {
                let hex = keys::decode_npub(&npub)?;
                self.resolve_direct(&hex).await
            }
            Identifier::Name(name) if name.is_empty() => Err(ResolveError::NoMatch),
            Identifier::Name(name) => self.resolve_by_name(&name).await,
        }
    }

    async fn try_suggest(&self, query: &str) -> Result<Vec<Suggestion>> {
        let ranked = self.search(query, self.config.suggest_limit).await;
        Ok(dedup_by_author(ranked)
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|profile| Suggestion {
                payment_options: extract_payment_options(&profile),
                profile,
            })
            .collect())
    }

    async fn resolve_direct(&self, hex: &str) -> Result<ResolvedProfile> {
        let session = self.open_primary().await?;
        let result = self.lookup_on(session.as_ref(), hex).await;
        session.close().await;
        result
    }

    async fn resolve_by_name(&self, name: &str) -> Result<ResolvedProfile> {
        let best = self
            .search(name, self.config.search_limit)
            .await
            .into_iter()
            .next()
            .ok_or(ResolveError::NoMatch)?;

        Ok(ResolvedProfile {
            payment_options: extract_payment_options(&best),
            profile: best,
            recent_notes: Vec::new(),
        })
    }

    /// Connect to sources in order and keep the first that answers.
    async fn open_primary(&self) -> Result<Box<dyn SourceSession>> {
        for address in &self.config.sources {
            debug!(relay = %address, "trying relay");
            match tokio::time::timeout(self.config.query_timeout, self.connector.connect(address)).await {
                Ok(Ok(session)) => return Ok(session),
                Ok(Err(e)) => warn!(relay = %address, "failed to connect: {e:#}"),
                Err(_) => warn!(relay = %address, "connect timed out"),
            }
        }
        Err(ResolveError::unavailable(
            &self.config.sources.join(", "),
            "no relay accepted a connection",
        ))
    }

    async fn lookup_on(&self, session: &dyn SourceSession, hex: &str) -> Result<ResolvedProfile> {
        let filter = ProfileFilter::profiles().author(hex);
        let events = tokio::time::timeout(self.config.query_timeout, session.query(&filter))
            .await
            .map_err(|_| ResolveError::unavailable(session.address(), "profile query timed out"))?
            .map_err(|e| ResolveError::unavailable(session.address(), format!("{e:#}")))?;

        let first = events.into_iter().next().ok_or(ResolveError::NoMatch)?;
        let profile = decode_profile(&first)?;
        let recent_notes = self.recent_notes(session, hex).await;

        Ok(ResolvedProfile {
            payment_options: extract_payment_options(&profile),
            profile,
            recent_notes,
        })
    }

    /// The author's latest notes, newest first. Failure yields an empty list.
    async fn recent_notes(&self, session: &dyn SourceSession, hex: &str) -> Vec<RecentNote> {
        let limit = self.config.notes_limit;
        let filter = ProfileFilter::notes().author(hex).limit(limit);

        let mut events = match tokio::time::timeout(self.config.query_timeout, session.query(&filter)).await {
            Ok(Ok(events)) => events,
            Ok(Err(e)) => {
                warn!(relay = %session.address(), "failed to fetch recent notes: {e:#}");
                return Vec::new();
            }
            Err(_) => {
                warn!(relay = %session.address(), "recent notes query timed out");
                return Vec::new();
            }
        };

        events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        events.iter().take(limit).map(summarize_note).collect()
    }

    /// Fan out a name search, then normalize and rank what comes back.
    async fn search(&self, query: &str, limit: usize) -> Vec<CandidateProfile> {
        let filter = ProfileFilter::profiles().search(query).limit(limit);
        let report = fanout::query_all(
            self.connector.as_ref(),
            &self.config.sources,
            &filter,
            self.config.fanout_timeout,
        )
        .await;

        if report.responded() == 0 {
            warn!(query = %query, "no relay responded to search");
        }

        let candidates: Vec<CandidateProfile> = report.events.iter().filter_map(normalize).collect();
        let ranked = rank_candidates(candidates, query);
        debug!(
            query = %query,
            events = report.events.len(),
            matches = ranked.len(),
            "ranked search results"
        );
        ranked
    }
}

fn flatten_panic<T>(outcome: std::thread::Result<Result<T>>) -> Result<T> {
    outcome.unwrap_or_else(|panic| {
        let msg = panic
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| panic.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panic".to_string());
        Err(ResolveError::Unexpected(msg))
    })
}
