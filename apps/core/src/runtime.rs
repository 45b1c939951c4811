use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;
use tracing::info;

use crate::config::{self, Config, ConfigError, StoreBackend};
use crate::discovery::{discover_all, DesktopEntryProvider, DiscoveryError, DiscoveryProvider};
use crate::session::LauncherSession;
use crate::sqlite_store::SqliteStore;
use crate::transport;
use crate::usage_store::{self, KeyValueStore, StoreError, TextFileStore};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("discovery error: {0}")]
    Discovery(#[from] DiscoveryError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "keyfind-core", version, about = "Application index and ranking core")]
pub struct CliOptions {
    /// Path to config.toml (defaults to $XDG_CONFIG_HOME/keyfind/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Rank applications for this query, print them and exit
    #[arg(long, conflicts_with = "json")]
    pub query: Option<String>,

    /// Read JSON session requests from stdin, one per line
    #[arg(long)]
    pub json: bool,

    /// Skip file logging
    #[arg(long)]
    pub no_log: bool,
}

pub fn open_store(cfg: &Config) -> Result<Box<dyn KeyValueStore>, StoreError> {
    let store: Box<dyn KeyValueStore> = match cfg.store_backend {
        StoreBackend::Text => Box::new(TextFileStore::new(&cfg.usage_path)),
        StoreBackend::Sqlite => Box::new(SqliteStore::open_file(&cfg.sqlite_path)?),
    };
    Ok(store)
}

/// Discovers, indexes and seeds a session from the configured sources.
pub fn build_session(
    cfg: &Config,
    store: &dyn KeyValueStore,
) -> Result<LauncherSession, RuntimeError> {
    let providers: Vec<Box<dyn DiscoveryProvider>> = vec![Box::new(DesktopEntryProvider::new(
        cfg.app_dirs.clone(),
        cfg.scan_depth,
    ))];
    let records = discover_all(&providers)?;
    let preferences = usage_store::load(store)?;
    info!(records = records.len(), counts = preferences.counts.len(), "loaded launcher data");
    Ok(LauncherSession::from_records(records, preferences))
}

pub fn run_with_options(options: CliOptions) -> Result<(), RuntimeError> {
    let cfg = config::load(options.config.as_deref())?;
    if !cfg.config_path.exists() {
        config::save(&cfg)?;
    }
    if !options.no_log {
        crate::logging::init(&cfg.log_dir)?;
    }
    info!(
        config_path = %cfg.config_path.display(),
        usage_path = %cfg.usage_path.display(),
        backend = ?cfg.store_backend,
        "startup"
    );

    let mut store = open_store(&cfg)?;
    let mut session = build_session(&cfg, store.as_ref())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(query) = options.query {
        session.set_query(&query);
        for row in session.snapshot().results {
            writeln!(out, "{}\t{}\t{}\t{}", row.score, row.name, row.comment, row.id)?;
        }
        return Ok(());
    }

    if options.json {
        let working_dir = config::home_dir();
        for line in io::stdin().lock().lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let response =
                transport::handle_payload(&mut session, store.as_mut(), &working_dir, &line);
            writeln!(out, "{}", serde_json::to_string(&response)?)?;
            out.flush()?;
            if response.ends_session() {
                break;
            }
        }
        return Ok(());
    }

    writeln!(
        out,
        "indexed {} applications; use --query or --json",
        session.applications().len()
    )?;
    Ok(())
}
