//! Saved lookups: recent and favorite profiles stored in SQLite.
//!
//! Recents are most-recent-first and capped; favorites keep the order
//! they were added in. Both are keyed by hex pubkey.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tipjar_profile::CandidateProfile;
use tracing::debug;

/// The slice of a profile kept for saved lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedProfile {
    pub pubkey: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

impl From<&CandidateProfile> for SavedProfile {
    fn from(profile: &CandidateProfile) -> Self {
        Self {
            pubkey: profile.author_key.clone(),
            name: Some(profile.label().to_string()),
            picture: profile.picture.clone().filter(|p| !p.is_empty()),
        }
    }
}

pub struct SavedStore {
    conn: Connection,
    recent_capacity: usize,
}

// ── Schema ───────────────────────────────────────────────────────

fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS recents (
            pubkey TEXT PRIMARY KEY,
            name TEXT,
            picture TEXT,
            seq INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS favorites (
            pubkey TEXT PRIMARY KEY,
            name TEXT,
            picture TEXT,
            seq INTEGER NOT NULL
        );",
    )
    .context("failed to create saved lookup tables")?;
    Ok(())
}

fn row_to_profile(row: &rusqlite::Row<'_>) -> rusqlite::Result<SavedProfile> {
    Ok(SavedProfile {
        pubkey: row.get(0)?,
        name: row.get(1)?,
        picture: row.get(2)?,
    })
}

impl SavedStore {
    /// Open (creating if needed) the store at `path`.
    pub fn open(path: &Path, recent_capacity: usize) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        Self::with_connection(conn, recent_capacity)
    }

    pub fn open_in_memory(recent_capacity: usize) -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?, recent_capacity)
    }

    fn with_connection(conn: Connection, recent_capacity: usize) -> Result<Self> {
        create_tables(&conn)?;
        Ok(Self {
            conn,
            recent_capacity,
        })
    }

    // ── Recents ──────────────────────────────────────────────────

    /// Move `profile` to the front of the recents, evicting past capacity.
    pub fn record_recent(&mut self, profile: &SavedProfile) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO recents (pubkey, name, picture, seq)
             VALUES (?1, ?2, ?3, (SELECT COALESCE(MAX(seq), 0) + 1 FROM recents))
             ON CONFLICT(pubkey) DO UPDATE SET
                name = excluded.name,
                picture = excluded.picture,
                seq = excluded.seq",
            params![profile.pubkey, profile.name, profile.picture],
        )
        .context("failed to record recent lookup")?;
        let evicted = tx.execute(
            "DELETE FROM recents WHERE pubkey NOT IN (
                SELECT pubkey FROM recents ORDER BY seq DESC LIMIT ?1
             )",
            params![self.recent_capacity as i64],
        )?;
        tx.commit()?;

        debug!(pubkey = %profile.pubkey, evicted, "recorded recent lookup");
        Ok(())
    }

    /// Newest first.
    pub fn list_recent(&self) -> Result<Vec<SavedProfile>> {
        let mut stmt = self
            .conn
            .prepare("SELECT pubkey, name, picture FROM recents ORDER BY seq DESC")?;
        let rows = stmt.query_map([], row_to_profile)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("failed to list recent lookups")
    }

    // ── Favorites ────────────────────────────────────────────────

    /// Add `profile` if absent, remove it if present. Returns the new state.
    pub fn toggle_favorite(&mut self, profile: &SavedProfile) -> Result<bool> {
        let tx = self.conn.transaction()?;
        let removed = tx.execute(
            "DELETE FROM favorites WHERE pubkey = ?1",
            params![profile.pubkey],
        )?;
        if removed == 0 {
            tx.execute(
                "INSERT INTO favorites (pubkey, name, picture, seq)
                 VALUES (?1, ?2, ?3, (SELECT COALESCE(MAX(seq), 0) + 1 FROM favorites))",
                params![profile.pubkey, profile.name, profile.picture],
            )
            .context("failed to add favorite")?;
        }
        tx.commit()?;

        let now_favorite = removed == 0;
        debug!(pubkey = %profile.pubkey, favorite = now_favorite, "toggled favorite");
        Ok(now_favorite)
    }

    pub fn is_favorite(&self, pubkey: &str) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM favorites WHERE pubkey = ?1",
                params![pubkey],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// In the order they were added.
    pub fn list_favorites(&self) -> Result<Vec<SavedProfile>> {
        let mut stmt = self
            .conn
            .prepare("SELECT pubkey, name, picture FROM favorites ORDER BY seq ASC")?;
        let rows = stmt.query_map([], row_to_profile)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("failed to list favorites")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saved(pubkey: &str) -> SavedProfile {
        SavedProfile {
            pubkey: pubkey.to_string(),
            name: Some(format!("name-{pubkey}")),
            picture: None,
        }
    }

    fn pubkeys(list: &[SavedProfile]) -> Vec<&str> {
        list.iter().map(|p| p.pubkey.as_str()).collect()
    }

    #[test]
    fn recents_are_newest_first_and_capped() {
        let mut store = SavedStore::open_in_memory(5).unwrap();
        for key in ["a", "b", "c", "d", "e", "f"] {
            store.record_recent(&saved(key)).unwrap();
        }
        assert_eq!(pubkeys(&store.list_recent().unwrap()), vec!["f", "e", "d", "c", "b"]);
    }

    #[test]
    fn rerecording_moves_to_front_without_duplicates() {
        let mut store = SavedStore::open_in_memory(5).unwrap();
        for key in ["a", "b", "c"] {
            store.record_recent(&saved(key)).unwrap();
        }
        let mut renamed = saved("a");
        renamed.name = Some("alice".into());
        store.record_recent(&renamed).unwrap();

        let recents = store.list_recent().unwrap();
        assert_eq!(pubkeys(&recents), vec!["a", "c", "b"]);
        assert_eq!(recents[0].name.as_deref(), Some("alice"));
    }

    #[test]
    fn favorites_toggle_and_keep_insertion_order() {
        let mut store = SavedStore::open_in_memory(5).unwrap();
        assert!(store.toggle_favorite(&saved("a")).unwrap());
        assert!(store.toggle_favorite(&saved("b")).unwrap());
        assert!(store.toggle_favorite(&saved("c")).unwrap());
        assert!(store.is_favorite("b").unwrap());

        assert!(!store.toggle_favorite(&saved("b")).unwrap());
        assert!(!store.is_favorite("b").unwrap());
        assert_eq!(pubkeys(&store.list_favorites().unwrap()), vec!["a", "c"]);

        // Re-adding appends at the end.
        assert!(store.toggle_favorite(&saved("b")).unwrap());
        assert_eq!(pubkeys(&store.list_favorites().unwrap()), vec!["a", "c", "b"]);
    }

    #[test]
    fn from_candidate_uses_label() {
        let profile = CandidateProfile {
            author_key: "abc".into(),
            display_name: Some("Jack D".into()),
            picture: Some(String::new()),
            ..Default::default()
        };
        let saved = SavedProfile::from(&profile);
        assert_eq!(saved.name.as_deref(), Some("Jack D"));
        assert_eq!(saved.picture, None);
    }

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tipjar.db");
        {
            let mut store = SavedStore::open(&path, 5).unwrap();
            store.record_recent(&saved("a")).unwrap();
            store.toggle_favorite(&saved("a")).unwrap();
        }
        let store = SavedStore::open(&path, 5).unwrap();
        assert_eq!(pubkeys(&store.list_recent().unwrap()), vec!["a"]);
        assert!(store.is_favorite("a").unwrap());
    }
}
