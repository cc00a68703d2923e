//! Core runtime configuration.
//!
//! # Responsibility
//! - Describe where the database, plot images and logs live.
//! - Load that description from a JSON file.
//!
//! # Invariants
//! - Missing JSON fields fall back to `CoreConfig::default()`.

use crate::db::Database;
use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_DB_FILE_NAME: &str = "decaysim.sqlite3";
const DEFAULT_PLOT_DIR: &str = "plots";

/// Paths and log settings of one core instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub database_path: PathBuf,
    /// Directory receiving static plot images for reports.
    pub plot_dir: PathBuf,
    pub log_level: String,
    /// Absolute directory for rolling log files; logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            plot_dir: PathBuf::from(DEFAULT_PLOT_DIR),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Parses a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|err| format!("invalid config JSON: {err}"))
    }

    /// Reads and parses a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|err| format!("failed to read config `{}`: {err}", path.display()))?;
        Self::from_json_str(&raw)
    }

    pub fn database(&self) -> Database {
        Database::new(&self.database_path)
    }
}
