use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::Path;
use tipjar_nostr::Resolver;

use crate::config::Config;
use crate::render;
use crate::saved::{SavedProfile, SavedStore};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up a profile and show its tip addresses
    Lookup {
        /// Hex pubkey, npub1..., or a name to search for
        identifier: String,
        /// Print a QR code for each address
        #[clap(long)]
        qr: bool,
        /// Print the resolved profile as JSON
        #[clap(long)]
        json: bool,
    },
    /// Suggest profiles matching a partial name
    Suggest {
        /// At least two characters
        query: String,
        /// Print suggestions as JSON
        #[clap(long)]
        json: bool,
    },
    /// List recent lookups
    Recent,
    /// Manage favorite profiles
    Favorites {
        #[clap(subcommand)]
        action: FavoritesAction,
    },
    /// List configured relays
    Relays,
}

#[derive(Subcommand, Debug)]
pub enum FavoritesAction {
    /// List favorites in the order they were added
    List,
    /// Add or remove a profile from favorites
    Toggle {
        /// Hex pubkey, npub1..., or a name to search for
        identifier: String,
    },
}

pub async fn handle_command(cmd: Commands, config: &Config) -> Result<()> {
    match cmd {
        Commands::Lookup { identifier, qr, json } => cmd_lookup(&identifier, qr, json, config).await,
        Commands::Suggest { query, json } => cmd_suggest(&query, json, config).await,
        Commands::Recent => cmd_recent(config),
        Commands::Favorites { action } => cmd_favorites(action, config).await,
        Commands::Relays => cmd_relays(config),
    }
}

fn open_store(config: &Config) -> Result<SavedStore> {
    SavedStore::open(Path::new(&config.storage.db_path), config.storage.recent_capacity)
        .with_context(|| "Failed to open saved lookups")
}

fn resolver(config: &Config) -> Resolver {
    Resolver::with_relays(config.resolver_config())
}

async fn cmd_lookup(identifier: &str, qr: bool, json: bool, config: &Config) -> Result<()> {
    if !json {
        println!("🔍 Searching...");
    }

    let Some(resolved) = resolver(config).resolve(identifier).await else {
        if json {
            println!("null");
        } else {
            println!("User not found");
        }
        return Ok(());
    };

    let mut store = open_store(config)?;
    store.record_recent(&SavedProfile::from(&resolved.profile))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
    } else {
        let favorite = store.is_favorite(&resolved.profile.author_key)?;
        print!("{}", render::render_profile(&resolved, favorite, qr));
    }
    Ok(())
}

async fn cmd_suggest(query: &str, json: bool, config: &Config) -> Result<()> {
    let suggestions = resolver(config).suggest(query).await;
    if json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
    } else {
        print!("{}", render::render_suggestions(&suggestions));
    }
    Ok(())
}

fn cmd_recent(config: &Config) -> Result<()> {
    let recents = open_store(config)?.list_recent()?;
    print!("{}", render::render_saved("🕘 Recent lookups", "No recent lookups yet.", &recents));
    Ok(())
}

async fn cmd_favorites(action: FavoritesAction, config: &Config) -> Result<()> {
    let mut store = open_store(config)?;
    match action {
        FavoritesAction::List => {
            let favorites = store.list_favorites()?;
            print!("{}", render::render_saved("★ Favorites", "No favorites yet.", &favorites));
        }
        FavoritesAction::Toggle { identifier } => {
            let Some(resolved) = resolver(config).resolve(&identifier).await else {
                println!("User not found");
                return Ok(());
            };
            let saved = SavedProfile::from(&resolved.profile);
            let name = saved.name.clone().unwrap_or_default();
            if store.toggle_favorite(&saved)? {
                println!("★ Added {name} to favorites");
            } else {
                println!("☆ Removed {name} from favorites");
            }
        }
    }
    Ok(())
}

fn cmd_relays(config: &Config) -> Result<()> {
    if config.sources.relays.is_empty() {
        println!("No relays configured.");
        println!("Add relays to [sources] relays in config.toml or set TIPJAR_RELAYS");
        return Ok(());
    }
    println!("📡 Configured relays:\n");
    for relay in &config.sources.relays {
        println!("  {relay}");
    }
    Ok(())
}
