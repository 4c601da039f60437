//! Display formatting for an author's recent notes.

use crate::event::RawEvent;
use crate::types::RecentNote;
use regex::Regex;
use std::sync::LazyLock;

/// Maximum note length shown, in characters.
pub const NOTE_DISPLAY_CAP: usize = 280;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("valid url regex"));
static NOSTR_URI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"nostr:\S+").expect("valid nostr uri regex"));

/// Strip links and `nostr:` references, trim, and cap the length.
///
/// Text over [`NOTE_DISPLAY_CAP`] characters is cut at the cap and gets a
/// `...` suffix. Shorter text is returned as-is after stripping.
pub fn format_note_content(content: &str) -> String {
    let without_urls = URL_RE.replace_all(content, "");
    let stripped = NOSTR_URI_RE.replace_all(&without_urls, "");
    let trimmed = stripped.trim();

    match trimmed.char_indices().nth(NOTE_DISPLAY_CAP) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

/// Turn a kind 1 event into a display summary.
pub fn summarize_note(event: &RawEvent) -> RecentNote {
    RecentNote {
        content: format_note_content(&event.content),
        created_at: event.created_at,
        id: event.id.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_links_and_trims() {
        let out = format_note_content("  gm https://example.com/a?b=c nostr:note1xyz frens  ");
        assert_eq!(out, "gm   frens");
    }

    #[test]
    fn only_links_becomes_empty() {
        assert_eq!(format_note_content("https://example.com nostr:npub1abc"), "");
    }

    #[test]
    fn at_cap_unchanged() {
        let text = "a".repeat(NOTE_DISPLAY_CAP);
        assert_eq!(format_note_content(&text), text);
    }

    #[test]
    fn over_cap_truncated_with_ellipsis() {
        let text = "b".repeat(NOTE_DISPLAY_CAP + 20);
        let out = format_note_content(&text);
        assert_eq!(out, format!("{}...", "b".repeat(NOTE_DISPLAY_CAP)));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let text = "é".repeat(NOTE_DISPLAY_CAP + 1);
        let out = format_note_content(&text);
        assert_eq!(out.chars().count(), NOTE_DISPLAY_CAP + 3);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn summarize_keeps_id_and_timestamp() {
        let ev = RawEvent {
            id: "n1".into(),
            author_key: "ab".into(),
            kind: crate::event::KIND_TEXT_NOTE,
            created_at: 42,
            content: " hello ".into(),
        };
        let note = summarize_note(&ev);
        assert_eq!(note.content, "hello");
        assert_eq!(note.created_at, 42);
        assert_eq!(note.id, "n1");
    }
}
