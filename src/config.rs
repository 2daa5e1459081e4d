//! Engine configuration and board files.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::game::{Card, CardColor, Rules};

/// Environment variable overriding [`EngineConfig::database_url`].
pub const DATABASE_URL_ENV: &str = "CODENAMES_DATABASE_URL";

/// Configuration of the rules engine.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Path of the SQLite database.
    #[serde(default = "default_database_url")]
    database_url: String,

    /// Milliseconds a connection waits on a locked database.
    #[serde(default = "default_busy_timeout_ms")]
    busy_timeout_ms: u64,

    /// Game rules.
    #[serde(default)]
    rules: Rules,
}

#[instrument]
fn default_database_url() -> String {
    "codenames.db".to_string()
}

#[instrument]
fn default_busy_timeout_ms() -> u64 {
    5000
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            busy_timeout_ms: default_busy_timeout_ms(),
            rules: Rules::default(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(database_url = %config.database_url, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Applies the [`DATABASE_URL_ENV`] environment override, if set.
    #[instrument(skip(self))]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
            debug!(%url, "Database URL overridden from environment");
            self.database_url = url;
        }
        self
    }

    /// Replaces the database path.
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = url.into();
        self
    }

    /// Busy timeout as a [`Duration`].
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

/// One card of a board file.
#[derive(Debug, Clone, Deserialize)]
struct BoardEntry {
    word: String,
    color: CardColor,
}

#[derive(Debug, Clone, Deserialize)]
struct BoardFile {
    cards: Vec<BoardEntry>,
}

/// Loads a board key from a TOML file of `[[cards]]` entries.
///
/// Cards are numbered in file order starting at 0.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_board(path: impl AsRef<Path>) -> Result<Vec<Card>, ConfigError> {
    let content = std::fs::read_to_string(path.as_ref())
        .map_err(|e| ConfigError::new(format!("Failed to read board file: {}", e)))?;
    parse_board(&content)
}

/// Parses a board key from TOML text.
#[instrument(skip(content))]
pub fn parse_board(content: &str) -> Result<Vec<Card>, ConfigError> {
    let file: BoardFile = toml::from_str(content)
        .map_err(|e| ConfigError::new(format!("Failed to parse board: {}", e)))?;
    let cards = file
        .cards
        .into_iter()
        .enumerate()
        .map(|(position, entry)| Card::new(position, entry.word, entry.color))
        .collect::<Vec<_>>();
    info!(count = cards.len(), "Board loaded");
    Ok(cards)
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
