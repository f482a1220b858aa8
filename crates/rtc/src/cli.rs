//! Command line interface
//!
//! Free-form key/value operations against the configured cache store:
//!
//! ```text
//! rtc [--config PATH] get <key>
//! rtc [--config PATH] set <key> <json> [--ttl SECS]
//! rtc [--config PATH] delete <key>
//! rtc [--config PATH] stats
//! rtc [--config PATH] config
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use rtc_application::ReadThroughCache;
use rtc_infrastructure::bootstrap::build_read_through_cache;
use rtc_infrastructure::config::{AppConfig, ConfigLoader};
use rtc_infrastructure::logging::init_logging;
use serde_json::Value;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// Command line interface for rtc
#[derive(Parser, Debug)]
#[command(name = "rtc")]
#[command(about = "Read-through cache - inspect and edit cached values")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the JSON value stored under a key
    Get {
        /// Cache key (the configured prefix is added)
        key: String,
    },
    /// Store a JSON value under a key
    Set {
        /// Cache key (the configured prefix is added)
        key: String,
        /// Value as JSON text
        value: String,
        /// Time to live in seconds (defaults to the configured TTL)
        #[arg(long)]
        ttl: Option<u64>,
    },
    /// Remove a key
    Delete {
        /// Cache key (the configured prefix is added)
        key: String,
    },
    /// Print cache store statistics
    Stats,
    /// Print the resolved configuration as TOML
    Config,
}

/// Load configuration, install logging and run the command
pub async fn run(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load().context("Failed to load configuration")?;
    init_logging(&config.logging).context("Failed to initialize logging")?;

    match cli.command {
        Command::Config => print_config(&config, out),
        command => {
            let cache = build_read_through_cache(&config).context("Failed to create cache")?;
            execute(&cache, command, out).await
        }
    }
}

/// Run one cache command and write its output
pub async fn execute(
    cache: &ReadThroughCache,
    command: Command,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::Get { key } => match cache.get::<Value>(&key).await {
            Some(value) => writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?,
            None => writeln!(out, "(nil)")?,
        },
        Command::Set { key, value, ttl } => {
            let value: Value = serde_json::from_str(&value)
                .with_context(|| format!("Value for '{key}' is not valid JSON"))?;
            cache
                .set(&key, &value, ttl.map(Duration::from_secs))
                .await
                .with_context(|| format!("Failed to set '{key}'"))?;
            writeln!(out, "OK")?;
        }
        Command::Delete { key } => {
            cache
                .delete(&key)
                .await
                .with_context(|| format!("Failed to delete '{key}'"))?;
            writeln!(out, "OK")?;
        }
        Command::Stats => {
            let stats = cache
                .provider()
                .stats()
                .await
                .context("Failed to read cache statistics")?;
            writeln!(out, "provider: {}", cache.provider().provider_name())?;
            writeln!(out, "entries:  {}", stats.entries)?;
            writeln!(out, "hits:     {}", stats.hits)?;
            writeln!(out, "misses:   {}", stats.misses)?;
            writeln!(out, "hit rate: {:.2}", stats.hit_rate)?;
        }
        Command::Config => anyhow::bail!("`config` does not operate on the cache"),
    }
    Ok(())
}

fn print_config(config: &AppConfig, out: &mut impl Write) -> anyhow::Result<()> {
    let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
    write!(out, "{rendered}")?;
    Ok(())
}
