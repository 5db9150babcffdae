//! File logging.
//!
//! The terminal belongs to the UI, so log records go to a file.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use directories::ProjectDirs;
use log::LevelFilter;

const LOG_FILE: &str = "folio.log";

/// Default log location in the platform data directory.
pub fn default_log_path() -> PathBuf {
    ProjectDirs::from("", "", "folio")
        .map(|dirs| dirs.data_local_dir().join(LOG_FILE))
        .unwrap_or_else(|| std::env::temp_dir().join(LOG_FILE))
}

/// Install the global logger writing to `path` (or the default location).
///
/// `RUST_LOG`, when set, takes precedence over `level`.
pub fn init(level: LevelFilter, path: Option<PathBuf>) -> color_eyre::Result<PathBuf> {
    let path = path.unwrap_or_else(default_log_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(path)
}
