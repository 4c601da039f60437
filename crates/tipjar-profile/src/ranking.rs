//! Match scoring and ranking of candidate profiles against a name query.

use crate::types::{non_empty, CandidateProfile};
use std::collections::HashSet;

/// Points for each match criterion. Criteria are additive.
const EXACT_NAME: u32 = 100;
const EXACT_DISPLAY_NAME: u32 = 90;
const EXACT_NIP05_LOCAL: u32 = 80;
const PARTIAL_NAME: u32 = 50;
const PARTIAL_DISPLAY_NAME: u32 = 40;
const PARTIAL_NIP05: u32 = 30;
/// Flat bonus for carrying a NIP-05 handle, independent of the query.
const VERIFIED_BONUS: u32 = 20;

/// Local part of a NIP-05 handle: everything before the first `@`.
fn nip05_local(nip05: &str) -> &str {
    nip05.split('@').next().unwrap_or(nip05)
}

/// Score a candidate against a free-text query. Case-insensitive.
///
/// Zero means "not a match" and the candidate must not be shown. A blank
/// query matches nothing.
pub fn score(candidate: &CandidateProfile, query: &str) -> u32 {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return 0;
    }
    let name = non_empty(&candidate.name).map(str::to_lowercase);
    let display_name = non_empty(&candidate.display_name).map(str::to_lowercase);
    let nip05 = non_empty(&candidate.nip05).map(str::to_lowercase);

    let mut total = 0;

    if name.as_deref() == Some(needle.as_str()) {
        total += EXACT_NAME;
    }
    if display_name.as_deref() == Some(needle.as_str()) {
        total += EXACT_DISPLAY_NAME;
    }
    if nip05.as_deref().map(nip05_local) == Some(needle.as_str()) {
        total += EXACT_NIP05_LOCAL;
    }

    if name.as_deref().is_some_and(|n| n.contains(&needle)) {
        total += PARTIAL_NAME;
    }
    if display_name.as_deref().is_some_and(|n| n.contains(&needle)) {
        total += PARTIAL_DISPLAY_NAME;
    }
    if nip05.as_deref().is_some_and(|n| n.contains(&needle)) {
        total += PARTIAL_NIP05;
    }

    if nip05.is_some() {
        total += VERIFIED_BONUS;
    }

    total
}

/// Score every candidate, drop the zero scores, and sort by score descending.
///
/// The sort is stable, so candidates with equal scores keep the order the
/// relays returned them in.
pub fn rank_candidates(candidates: Vec<CandidateProfile>, query: &str) -> Vec<CandidateProfile> {
    let mut ranked: Vec<CandidateProfile> = candidates
        .into_iter()
        .map(|mut c| {
            c.score = score(&c, query);
            c
        })
        .filter(|c| c.score > 0)
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// Keep only the first occurrence of each author, preserving order.
///
/// Applied after ranking, so the surviving copy is the best-ranked one.
pub fn dedup_by_author(ranked: Vec<CandidateProfile>) -> Vec<CandidateProfile> {
    let mut seen = HashSet::new();
    ranked
        .into_iter()
        .filter(|c| seen.insert(c.author_key.clone()))
        .collect()
}
