//! Concurrent fan-out of one filter across many sources.
//!
//! Every source gets its own connect-query-close task bounded by the
//! fan-out timeout. A task that fails or runs out of time is recorded in
//! the report and contributes no events; it never fails the whole call.

use crate::source::{ProfileFilter, SourceConnector};
use futures_util::future::join_all;
use std::time::Duration;
use tipjar_profile::RawEvent;
use tracing::{debug, warn};

/// How a single source fared during a fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    Responded { events: usize },
    Failed(String),
    TimedOut,
}

#[derive(Debug, Clone)]
pub struct SourceReport {
    pub address: String,
    pub outcome: SourceOutcome,
}

/// Aggregated result of a fan-out.
#[derive(Debug, Clone, Default)]
pub struct FanOutReport {
    /// Events from every responding source, in configured source order.
    pub events: Vec<RawEvent>,
    /// One entry per configured source, in the same order.
    pub sources: Vec<SourceReport>,
}

impl FanOutReport {
    /// Number of sources that answered.
    pub fn responded(&self) -> usize {
        self.sources
            .iter()
            .filter(|s| matches!(s.outcome, SourceOutcome::Responded { .. }))
            .count()
    }
}

async fn query_one(
    connector: &dyn SourceConnector,
    address: &str,
    filter: &ProfileFilter,
) -> anyhow::Result<Vec<RawEvent>> {
    let session = connector.connect(address).await?;
    let result = session.query(filter).await;
    session.close().await;
    result
}

/// Send `filter` to every source concurrently and collect what comes back.
///
/// No deduplication happens here: the same profile may arrive from
/// several relays. If every source fails the event list is simply empty.
pub async fn query_all(
    connector: &dyn SourceConnector,
    sources: &[String],
    filter: &ProfileFilter,
    timeout: Duration,
) -> FanOutReport {
    let tasks = sources.iter().map(|address| async move {
        let outcome = tokio::time::timeout(timeout, query_one(connector, address, filter)).await;
        (address, outcome)
    });

    let mut report = FanOutReport::default();
    for (address, outcome) in join_all(tasks).await {
        let outcome = match outcome {
            Ok(Ok(events)) => {
                debug!(source = %address, events = events.len(), "source responded");
                let count = events.len();
                report.events.extend(events);
                SourceOutcome::Responded { events: count }
            }
            Ok(Err(e)) => {
                warn!(source = %address, "source failed: {e:#}");
                SourceOutcome::Failed(format!("{e:#}"))
            }
            Err(_) => {
                warn!(source = %address, timeout_ms = timeout.as_millis() as u64, "source timed out");
                SourceOutcome::TimedOut
            }
        };
        report.sources.push(SourceReport {
            address: address.clone(),
            outcome,
        });
    }

    report
}
