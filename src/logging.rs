//! tracing subscriber setup
//!
//! The TUI owns stdout, so interactive sessions log to a file under the
//! user cache dir. CLI runs log to stderr.

use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Environment variable holding a filter directive; wins over the config
pub const LOG_ENV: &str = "POPCORNTUI_LOG";

/// Log file path (~/.cache/popcorntui/popcorntui.log)
pub fn log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join("popcorntui").join("popcorntui.log"))
}

fn filter(config: &Config, fallback: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        let directive = config.log_filter.as_deref().unwrap_or(fallback);
        EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(fallback))
    })
}

fn open_log_file() -> Option<File> {
    let path = log_path()?;
    std::fs::create_dir_all(path.parent()?).ok()?;
    OpenOptions::new().create(true).append(true).open(path).ok()
}

/// Log to the cache-dir file; silently skipped if it cannot be opened
pub fn init_tui(config: &Config) {
    let Some(file) = open_log_file() else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(config, "info"))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

/// Log to stderr, quiet by default so JSON output stays clean
pub fn init_cli(config: &Config) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(config, "warn"))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
