//! Terminal rendering for lookups, suggestions and saved lists.

use anyhow::Result;
use qrcode::render::unicode::Dense1x2;
use qrcode::QrCode;
use std::fmt::Write as _;
use tipjar_nostr::keys::{encode_npub, truncate_npub};
use tipjar_profile::{ResolvedProfile, Suggestion};
use tracing::warn;

use crate::saved::SavedProfile;

/// npub for display, falling back to hex for keys that do not encode.
pub fn display_npub(hex: &str) -> String {
    encode_npub(hex).unwrap_or_else(|_| hex.to_string())
}

/// Note timestamp in the local timezone.
pub fn format_note_date(created_at: u64) -> String {
    i64::try_from(created_at)
        .ok()
        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

/// Scannable QR block made of half-height unicode cells.
pub fn qr_block(data: &str) -> Result<String> {
    let code = QrCode::new(data.as_bytes())?;
    Ok(code
        .render::<Dense1x2>()
        .dark_color(Dense1x2::Light)
        .light_color(Dense1x2::Dark)
        .quiet_zone(true)
        .build())
}

pub fn render_profile(resolved: &ResolvedProfile, favorite: bool, with_qr: bool) -> String {
    let profile = &resolved.profile;
    let mut out = String::new();

    let star = if favorite { " ★" } else { "" };
    let _ = writeln!(out, "👤 {}{star}", profile.label());
    let _ = writeln!(out, "   {}", display_npub(&profile.author_key));
    if let Some(nip05) = profile.nip05.as_deref().filter(|s| !s.is_empty()) {
        let _ = writeln!(out, "   ✓ {nip05}");
    }
    if let Some(about) = profile.about.as_deref().filter(|s| !s.is_empty()) {
        let _ = writeln!(out, "\n{about}");
    }

    if !resolved.recent_notes.is_empty() {
        let _ = writeln!(out, "\n📝 Recent notes:");
        for note in &resolved.recent_notes {
            let _ = writeln!(out, "  [{}] {}", format_note_date(note.created_at), note.content);
        }
    }

    let options = &resolved.payment_options;
    if options.is_empty() {
        let _ = writeln!(out, "\nNo payment options published.");
        return out;
    }
    render_addresses(&mut out, "⚡ Lightning", &options.lightning, with_qr);
    render_addresses(&mut out, "Ӿ Nano", &options.altcoin, with_qr);
    out
}

fn render_addresses(out: &mut String, title: &str, addresses: &[String], with_qr: bool) {
    if addresses.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{title}:");
    for address in addresses {
        let _ = writeln!(out, "  {address}");
        if with_qr {
            match qr_block(address) {
                Ok(block) => {
                    let _ = writeln!(out, "{block}");
                }
                Err(e) => warn!(address = %address, "failed to render QR code: {e}"),
            }
        }
    }
}

pub fn render_suggestions(suggestions: &[Suggestion]) -> String {
    if suggestions.is_empty() {
        return "No suggestions.\n".to_string();
    }
    let mut out = String::new();
    for s in suggestions {
        let _ = writeln!(out, "  {} ({})", s.profile.label(), display_npub(&s.profile.author_key));
    }
    out
}

pub fn render_saved(title: &str, empty_hint: &str, profiles: &[SavedProfile]) -> String {
    if profiles.is_empty() {
        return format!("{empty_hint}\n");
    }
    let mut out = format!("{title} ({}):\n", profiles.len());
    for p in profiles {
        let name = p.name.as_deref().unwrap_or("Anonymous");
        let _ = writeln!(out, "  {name} ({})", truncate_npub(&display_npub(&p.pubkey)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tipjar_profile::{CandidateProfile, PaymentOptions, RecentNote};

    const HEX: &str = "3bf0c63fcb93463407af97a5e5ee64fa883d107ef9e558472c4eb9aaaefa459d";

    fn resolved(options: PaymentOptions) -> ResolvedProfile {
        ResolvedProfile {
            profile: CandidateProfile {
                author_key: HEX.into(),
                name: Some("fiatjaf".into()),
                about: Some("nostr guy".into()),
                ..Default::default()
            },
            payment_options: options,
            recent_notes: vec![RecentNote {
                id: "n1".into(),
                content: "gm".into(),
                created_at: 1_700_000_000,
            }],
        }
    }

    #[test]
    fn profile_shows_sections() {
        let text = render_profile(
            &resolved(PaymentOptions {
                lightning: vec!["fiatjaf@zbd.gg".into()],
                altcoin: vec![],
            }),
            true,
            false,
        );
        assert!(text.contains("fiatjaf ★"));
        assert!(text.contains("npub1"));
        assert!(text.contains("nostr guy"));
        assert!(text.contains("] gm"));
        assert!(text.contains("Lightning:\n  fiatjaf@zbd.gg"));
        assert!(!text.contains("Nano"));
    }

    #[test]
    fn profile_without_payments_says_so() {
        let text = render_profile(&resolved(PaymentOptions::default()), false, false);
        assert!(text.contains("No payment options published."));
        assert!(!text.contains('★'));
    }

    #[test]
    fn qr_is_rendered_per_address() {
        let plain = render_profile(
            &resolved(PaymentOptions {
                lightning: vec!["a@b.c".into()],
                altcoin: vec![],
            }),
            false,
            false,
        );
        let with_qr = render_profile(
            &resolved(PaymentOptions {
                lightning: vec!["a@b.c".into()],
                altcoin: vec![],
            }),
            false,
            true,
        );
        assert!(with_qr.len() > plain.len());
        assert!(with_qr.contains('█') || with_qr.contains('▀') || with_qr.contains('▄'));
    }

    #[test]
    fn note_date_is_formatted() {
        let date = format_note_date(1_700_000_000);
        assert_eq!(date.len(), "2023-11-14 22:13".len());
        assert!(date.starts_with("2023-11-1"));
    }

    #[test]
    fn invalid_hex_falls_back_in_display() {
        assert_eq!(display_npub("zz"), "zz");
        assert!(display_npub(HEX).starts_with("npub1"));
    }

    #[test]
    fn saved_list_truncates_npubs() {
        let text = render_saved(
            "Recent",
            "No recent lookups.",
            &[SavedProfile {
                pubkey: HEX.into(),
                name: Some("fiatjaf".into()),
                picture: None,
            }],
        );
        assert!(text.starts_with("Recent (1):"));
        assert!(text.contains("fiatjaf (npub1"));
        assert!(text.contains("..."));
        assert_eq!(render_saved("Recent", "No recent lookups.", &[]), "No recent lookups.\n");
    }
}
