//! Direct lookup against a local relay.
//!
//! Requires the `nak` binary (available at `/run/current-system/sw/bin/nak`).
//! Run with: `cargo test -p tipjar-nostr -- --ignored live_relay`

use nostr_sdk::prelude::*;
use std::time::Duration;
use tipjar_nostr::{Resolver, ResolverConfig};

const NAK_BIN: &str = "/run/current-system/sw/bin/nak";
const RELAY_PORT: u16 = 19848;
const RELAY_URL: &str = "ws://127.0.0.1:19848";
const NANO: &str = "nano_1abcdefghijkmnopqrstuwxyz13456789abcdefghijkmnopqrstuwxyz134";

/// Start `nak serve` as a background process, returning the child handle.
fn start_nak_relay() -> std::process::Child {
    std::process::Command::new(NAK_BIN)
        .args(["serve", "--port", &RELAY_PORT.to_string(), "--quiet"])
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::inherit())
        .stderr(std::process::Stdio::inherit())
        .spawn()
        .expect("Failed to start nak serve, is nak installed?")
}

/// Wait for the relay to accept TCP connections.
async fn wait_for_relay() {
    for _ in 0..50 {
        if tokio::net::TcpStream::connect(format!("127.0.0.1:{RELAY_PORT}"))
            .await
            .is_ok()
        {
            return;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    panic!("Relay did not start within 5 seconds");
}

#[tokio::test]
#[ignore] // requires nak binary
async fn live_relay_direct_lookup() {
    let mut nak = start_nak_relay();
    wait_for_relay().await;

    // --- Publish a profile and two notes ---
    let keys = Keys::generate();
    let client = Client::new(keys.clone());
    client.add_relay(RELAY_URL).await.expect("add relay");
    client.connect().await;
    tokio::time::sleep(Duration::from_millis(300)).await;

    let metadata = Metadata::new()
        .name("alice")
        .about(format!("tips welcome {NANO}"))
        .lud16("alice@getalby.com");
    client
        .send_event_builder(EventBuilder::metadata(&metadata))
        .await
        .expect("Failed to publish metadata");
    for text in ["first note https://example.com", "second note"] {
        client
            .send_event_builder(EventBuilder::text_note(text))
            .await
            .expect("Failed to publish note");
    }
    tokio::time::sleep(Duration::from_millis(300)).await;

    // --- Resolve by hex and npub ---
    let resolver = Resolver::with_relays(ResolverConfig {
        sources: vec!["ws://127.0.0.1:1".to_string(), RELAY_URL.to_string()],
        ..Default::default()
    });

    let hex = keys.public_key().to_hex();
    let resolved = resolver.resolve(&hex).await.expect("profile by hex");
    assert_eq!(resolved.profile.name.as_deref(), Some("alice"));
    assert_eq!(resolved.payment_options.lightning, vec!["alice@getalby.com"]);
    assert_eq!(resolved.payment_options.altcoin, vec![NANO]);
    assert_eq!(resolved.recent_notes.len(), 2);
    assert!(resolved
        .recent_notes
        .iter()
        .any(|n| n.content == "first note"));

    let npub = keys.public_key().to_bech32().expect("npub");
    let by_npub = resolver.resolve(&npub).await.expect("profile by npub");
    assert_eq!(by_npub.profile, resolved.profile);

    // --- Unknown key resolves to nothing ---
    let stranger = Keys::generate().public_key().to_hex();
    assert!(resolver.resolve(&stranger).await.is_none());

    client.disconnect().await;
    nak.kill().expect("Failed to kill nak");
}
