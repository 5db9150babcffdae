//! Configuration for the folio page.
//!
//! The configuration lives in `config.toml` inside the platform config
//! directory. Every field has a default, so a missing file or a partial file
//! both load cleanly.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use folio_core::{CellMetrics, ColorTheme};
use serde::{Deserialize, Serialize};

/// File name of the configuration inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Errors that can occur while loading or saving the configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// No home directory could be determined for this platform.
    NoConfigDir,
    /// Failed to read or write the file.
    Io(io::Error),
    /// The file is not valid TOML for [`Config`].
    Parse(toml::de::Error),
    /// The configuration could not be serialized.
    Serialize(toml::ser::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoConfigDir => write!(f, "Could not determine a configuration directory"),
            ConfigError::Io(e) => write!(f, "Failed to access config file: {}", e),
            ConfigError::Parse(e) => write!(f, "Invalid config file: {}", e),
            ConfigError::Serialize(e) => write!(f, "Failed to serialize config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Serialize(e) => Some(e),
            ConfigError::NoConfigDir => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub news: NewsConfig,
    pub page: PageConfig,
}

/// Rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Logical pixels per terminal cell, horizontally.
    pub cell_width_px: u16,
    /// Logical pixels per terminal cell, vertically.
    pub cell_height_px: u16,
    /// Delay between animation frames.
    pub frame_interval_ms: u64,
    /// Draw the particle network behind the page.
    pub particles: bool,
    /// Accent colour for headings and links.
    pub theme: ColorTheme,
    /// Page background colour as RGB.
    pub background: [u8; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let cells = CellMetrics::default();
        Self {
            cell_width_px: cells.width_px,
            cell_height_px: cells.height_px,
            frame_interval_ms: 33,
            particles: true,
            theme: ColorTheme::default(),
            background: [14, 30, 66],
        }
    }
}

impl DisplayConfig {
    pub fn cells(&self) -> CellMetrics {
        CellMetrics {
            width_px: self.cell_width_px,
            height_px: self.cell_height_px,
        }
    }
}

/// News feed settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    /// Search keyword for the feed query.
    pub keyword: String,
    /// RSS search endpoint.
    pub feed_url: String,
    /// Interface language (`hl`).
    pub language: String,
    /// Country (`gl`).
    pub country: String,
    /// Edition identifier (`ceid`).
    pub edition: String,
    /// Relay prefix; the encoded feed URL is appended to it.
    pub proxy: String,
    /// Maximum number of items shown.
    pub max_items: usize,
    /// Seconds between refreshes.
    pub refresh_interval_secs: u64,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            keyword: "안영호 의원".to_string(),
            feed_url: "https://news.google.com/rss/search".to_string(),
            language: "ko".to_string(),
            country: "KR".to_string(),
            edition: "KR:ko".to_string(),
            proxy: "https://corsproxy.io/?".to_string(),
            max_items: 5,
            refresh_interval_secs: 60,
            timeout_secs: 10,
        }
    }
}

/// Text content of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub title: String,
    pub subtitle: String,
    pub intro: Vec<String>,
    pub account_label: String,
    pub account_number: String,
    pub news_heading: String,
    pub profile: Vec<ProfileEntry>,
}

/// One collapsible block of the profile section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileEntry {
    pub title: String,
    #[serde(default)]
    pub lines: Vec<String>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "Member Profile".to_string(),
            subtitle: "Working for the district".to_string(),
            intro: vec![
                "Welcome. This page collects the profile, contact details".to_string(),
                "and recent news coverage in one place.".to_string(),
            ],
            profile: vec![
                ProfileEntry {
                    title: "Education".to_string(),
                    lines: vec!["Add entries under [[page.profile]] in config.toml".to_string()],
                },
                ProfileEntry {
                    title: "Career".to_string(),
                    lines: vec!["Add entries under [[page.profile]] in config.toml".to_string()],
                },
                ProfileEntry {
                    title: "Committees".to_string(),
                    lines: vec!["Add entries under [[page.profile]] in config.toml".to_string()],
                },
            ],
            account_label: "Support account".to_string(),
            account_number: "000-0000-0000-00".to_string(),
            news_heading: "Related News".to_string(),
        }
    }
}

impl Config {
    /// Default location of the config file.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        ProjectDirs::from("", "", "folio")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from the default location, falling back to defaults if the file
    /// does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`, falling back to defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [display]
            particles = false
            theme = "magenta"

            [news]
            keyword = "rust"
            "#,
        )
        .unwrap();

        assert!(!config.display.particles);
        assert_eq!(config.display.theme, ColorTheme::Magenta);
        assert_eq!(config.display.frame_interval_ms, 33);
        assert_eq!(config.news.keyword, "rust");
        assert_eq!(config.news.max_items, 5);
        assert_eq!(config.news.refresh_interval_secs, 60);
        assert_eq!(config.page, PageConfig::default());
    }

    #[test]
    fn test_profile_entries() {
        let config = Config::from_toml(
            r#"
            [[page.profile]]
            title = "Career"
            lines = ["one", "two"]

            [[page.profile]]
            title = "Empty"
            "#,
        )
        .unwrap();

        assert_eq!(config.page.profile.len(), 2);
        assert_eq!(config.page.profile[0].lines, vec!["one", "two"]);
        assert!(config.page.profile[1].lines.is_empty());
    }

    #[test]
    fn test_invalid_file_is_parse_error() {
        let err = Config::from_toml("[display]\nparticles = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let path = std::env::temp_dir().join("folio-config-test-missing/none.toml");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("folio-config-test-{}", std::process::id()));
        let path = dir.join(CONFIG_FILE);
        let mut config = Config::default();
        config.news.keyword = "terminal".to_string();
        config.display.cell_height_px = 20;

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        let _ = fs::remove_dir_all(&dir);

        assert_eq!(loaded, config);
        assert_eq!(loaded.display.cells().height_px, 20);
    }
}
