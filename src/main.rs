use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tipjar::config::Config;
use tipjar::lookup_cli::{self, Commands};

#[derive(Parser)]
#[command(name = "tipjar")]
#[command(about = "Find a Nostr profile and the tip addresses it advertises")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).with_context(|| "Failed to load config")?;
    config.expand_paths()
        .with_context(|| "Failed to expand paths in config")?;
    config.validate()
        .with_context(|| "Configuration validation failed")?;

    init_logging(&config.logging.directive(cli.verbose))?;

    lookup_cli::handle_command(cli.command, &config).await
}

/// `RUST_LOG` wins over the configured level. Output goes to stderr so
/// `--json` stays machine-readable.
fn init_logging(directive: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(directive)
            .with_context(|| format!("Invalid log level: {directive}"))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}
