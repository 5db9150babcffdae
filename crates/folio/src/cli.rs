//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use folio_config::Config;
use log::LevelFilter;

/// A profile page for the terminal.
#[derive(Parser, Debug, Clone)]
#[command(name = "folio", version, about)]
pub struct Cli {
    /// Read configuration from this file instead of the default location.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Search keyword for the news feed.
    #[arg(long)]
    pub keyword: Option<String>,
    /// Do not draw the particle network.
    #[arg(long)]
    pub no_particles: bool,
    /// Do not fetch news.
    #[arg(long)]
    pub offline: bool,
    /// Log level (overridden by RUST_LOG).
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
    /// Write the log here instead of the default data directory.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply command-line overrides to a loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(keyword) = &self.keyword {
            config.news.keyword = keyword.clone();
        }
        if self.no_particles {
            config.display.particles = false;
        }
    }
}
