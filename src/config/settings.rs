//! Bot settings loaded from `config.toml`.
//!
//! Every setting is optional. A missing file yields the defaults so the bot can start
//! with nothing but a token; a file that exists but does not parse is an error.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default location of the settings file
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Settings structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BotConfig {
    /// Channel that receives console reports of unexpected failures
    pub error_channel: Option<u64>,
    /// Register commands in this guild only (instant updates while developing)
    pub dev_guild_id: Option<u64>,
    /// Presence text set once the bot is ready
    pub presence: Option<String>,
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A field has the wrong type
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<BotConfig> {
    let path = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path);
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path.display()),
    })
}

/// Loads settings from `CONFIG_PATH` (or ./config.toml), falling back to defaults when absent.
pub fn load_default_config() -> Result<BotConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    if !Path::new(&path).exists() {
        tracing::info!("No configuration file at {path}, using defaults");
        return Ok(BotConfig::default());
    }
    load_config(path)
}
