//! Shared utilities for CLI commands

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::{Config, LifecycleEngine, Store};

/// Resolve the database path: `--db` (or FOIADESK_DB) wins over the config file
pub fn resolve_db_path(global: &GlobalOpts, config: &Config) -> PathBuf {
    global.db.clone().unwrap_or_else(|| config.db_path())
}

/// Open the request store for read-only commands
pub fn open_store(global: &GlobalOpts) -> Result<Store> {
    let config = Config::load();
    let path = resolve_db_path(global, &config);
    Store::open(&path).map_err(|e| miette::miette!("{}", e))
}

/// Open the store wrapped in a lifecycle engine for mutating commands
pub fn open_engine(global: &GlobalOpts) -> Result<LifecycleEngine> {
    let config = Config::load();
    let path = resolve_db_path(global, &config);
    let store = Store::open(&path).map_err(|e| miette::miette!("{}", e))?;
    Ok(LifecycleEngine::new(store, config.response_days()))
}

/// Actor name for audit fields: `--by` when given, else the configured actor
pub fn actor_or_default(by: Option<String>, config: &Config) -> String {
    by.unwrap_or_else(|| config.actor())
}

/// Write rendered content to a file, or to stdout when no path is given
pub fn write_output(content: &str, output_path: Option<PathBuf>) -> Result<()> {
    match output_path {
        Some(path) => {
            std::fs::write(&path, content).into_diagnostic()?;
            println!(
                "{} Written to {}",
                style("✓").green(),
                style(path.display()).cyan()
            );
        }
        None => {
            println!("{}", content.trim_end_matches('\n'));
        }
    }
    Ok(())
}
