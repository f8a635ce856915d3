//! Configuration and file locations
//!
//! Each location is resolved independently, first match wins:
//!
//! 1. CLI override (`--catalog`, `--tracking-file`)
//! 2. Environment (`AIRDROP_HUNTER_CATALOG`, `AIRDROP_HUNTER_TRACKING`)
//! 3. Optional `config.yml` in the platform config directory
//! 4. Built-in default
//!
//! A missing config file is normal; a config file that exists but does not
//! parse is an error, since the user wrote it.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::tracking::DEFAULT_TRACK_STATUS;

pub const CATALOG_ENV: &str = "AIRDROP_HUNTER_CATALOG";
pub const TRACKING_ENV: &str = "AIRDROP_HUNTER_TRACKING";
/// Overrides the config file location
pub const CONFIG_ENV: &str = "AIRDROP_HUNTER_CONFIG";

/// Catalog location relative to the workspace root
pub const DEFAULT_CATALOG_FILE: &str = "references/airdrops.json";

/// Ledger file name, placed in the user's home directory
pub const TRACKING_FILE_NAME: &str = ".airdrop-hunter-tracking.json";

const CONFIG_FILE_NAME: &str = "config.yml";

/// Contents of `config.yml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HunterConfig {
    pub catalog_file: Option<PathBuf>,
    pub tracking_file: Option<PathBuf>,
    /// Status given to newly tracked airdrops
    pub default_status: Option<String>,
}

impl HunterConfig {
    /// Load from `$AIRDROP_HUNTER_CONFIG` or the platform config directory
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from_path(&path),
            None => {
                debug!("No config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from a specific path, or defaults if it does not exist
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = serde_yaml_ng::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Where the config file is looked up
    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = env_path(CONFIG_ENV) {
            return Some(path);
        }

        ProjectDirs::from("", "", "airdrop-hunter")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    pub fn default_status(&self) -> &str {
        self.default_status
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_TRACK_STATUS)
    }
}

/// Paths given explicitly on the command line
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
    pub catalog_file: Option<PathBuf>,
    pub tracking_file: Option<PathBuf>,
}

/// Resolved locations of the catalog and the tracking ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HunterPaths {
    pub catalog_file: PathBuf,
    pub tracking_file: PathBuf,
}

impl HunterPaths {
    /// Resolve both paths (overrides, then environment, then config, then defaults)
    pub fn resolve(overrides: &PathOverrides, config: &HunterConfig) -> Self {
        let catalog_file = overrides
            .catalog_file
            .clone()
            .or_else(|| env_path(CATALOG_ENV))
            .or_else(|| config.catalog_file.clone())
            .unwrap_or_else(Self::default_catalog_file);

        let tracking_file = overrides
            .tracking_file
            .clone()
            .or_else(|| env_path(TRACKING_ENV))
            .or_else(|| config.tracking_file.clone())
            .unwrap_or_else(Self::default_tracking_file);

        debug!(
            catalog = %catalog_file.display(),
            tracking = %tracking_file.display(),
            "Resolved data paths"
        );

        Self {
            catalog_file,
            tracking_file,
        }
    }

    /// `references/airdrops.json` at the workspace root, fixed at build time
    /// so the result does not depend on where the binary is run from
    pub fn default_catalog_file() -> PathBuf {
        let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
        manifest_dir
            .parent()
            .unwrap_or(manifest_dir)
            .join(DEFAULT_CATALOG_FILE)
    }

    /// `~/.airdrop-hunter-tracking.json`, or the temp directory without a home
    pub fn default_tracking_file() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(TRACKING_FILE_NAME)
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
