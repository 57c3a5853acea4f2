//! Configuration for the pokedex console.
//!
//! Loads settings from `pokedex.toml` (or an explicit path) and `POKEDEX_*`
//! environment variables. Uses figment for layered configuration with
//! provenance tracking.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::DEFAULT_CATALOG_LIMIT;
use crate::fetch::DEFAULT_API_URL;
use crate::fuzzy::DEFAULT_MAX_SUGGESTIONS;
use crate::history::{DEFAULT_HISTORY_MAX_ENTRIES, HISTORY_FILE_NAME};

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "pokedex.toml";

/// Prefix for environment overrides, e.g. `POKEDEX_API_URL`.
pub const ENV_PREFIX: &str = "POKEDEX_";

/// Pokedex configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Base URL of the catalog service.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Page size for the one-shot catalog fetch (default: 2000).
    #[serde(default = "default_catalog_limit")]
    pub catalog_limit: usize,

    /// Where search history is persisted.
    #[serde(default = "default_history_file")]
    pub history_file: PathBuf,

    /// Maximum number of history entries kept (default: 10).
    #[serde(default = "default_history_max_entries")]
    pub history_max_entries: usize,

    /// Suggestions offered after a failed lookup (default: 3).
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            catalog_limit: default_catalog_limit(),
            history_file: default_history_file(),
            history_max_entries: default_history_max_entries(),
            max_suggestions: default_max_suggestions(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_catalog_limit() -> usize {
    DEFAULT_CATALOG_LIMIT
}

/// `<data dir>/pokedex/history.json`, or `history.json` in the working directory.
fn default_history_file() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("pokedex").join(HISTORY_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(HISTORY_FILE_NAME))
}

fn default_history_max_entries() -> usize {
    DEFAULT_HISTORY_MAX_ENTRIES
}

fn default_max_suggestions() -> usize {
    DEFAULT_MAX_SUGGESTIONS
}

impl Config {
    /// Load configuration from `pokedex.toml` in the given root directory.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load(root: &Path) -> Self {
        Self::load_file(&root.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from an explicit file path.
    ///
    /// Layers: defaults <- toml file (if present) <- `POKEDEX_*` env vars.
    /// Reports parse errors with file and key information, then falls back
    /// to defaults.
    pub fn load_file(config_path: &Path) -> Self {
        let figment = Figment::from(Serialized::defaults(Config::default()));

        // Only add TOML provider if file exists
        let figment = if config_path.exists() {
            figment.merge(Toml::file(config_path))
        } else {
            figment
        };
        let figment = figment.merge(Env::prefixed(ENV_PREFIX));

        match figment.extract() {
            Ok(config) => {
                if config_path.exists() {
                    tracing::info!("Loaded config from {:?}", config_path);
                }
                config
            }
            Err(e) => {
                tracing::warn!("Config error: {}", e);
                Self::default()
            }
        }
    }
}
