//! Catalog file loading (`airdrops.json`)
//!
//! The catalog is a JSON document with an `airdrops` array. Loading never
//! fails hard: a missing or corrupt file yields an empty catalog plus the
//! error, and the caller decides how loudly to report it.

use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::PathBuf;

use super::{AirdropRecord, Catalog};
use crate::error::LoadError;

/// On-disk shape of the catalog file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub airdrops: Vec<AirdropRecord>,
}

/// Result of a soft-failing catalog load
#[derive(Debug, Default)]
pub struct CatalogLoad {
    pub catalog: Catalog,
    /// Set when the file was missing or unreadable; `catalog` is then empty
    pub error: Option<LoadError>,
}

/// Read-only handle on the catalog file
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the catalog, degrading to an empty one on any error
    pub fn load(&self) -> CatalogLoad {
        match self.try_load() {
            Ok(catalog) => {
                tracing::debug!(
                    path = %self.path.display(),
                    count = catalog.len(),
                    "Loaded airdrop catalog"
                );
                CatalogLoad {
                    catalog,
                    error: None,
                }
            }
            Err(error) => {
                tracing::warn!("{}", error);
                CatalogLoad {
                    catalog: Catalog::default(),
                    error: Some(error),
                }
            }
        }
    }

    /// Load the catalog, surfacing the error
    pub fn try_load(&self) -> Result<Catalog, LoadError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                LoadError::Missing {
                    path: self.path.clone(),
                }
            } else {
                LoadError::Read {
                    resource: "airdrop catalog",
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        let file: CatalogFile =
            serde_json::from_str(&content).map_err(|source| LoadError::Parse {
                resource: "airdrop catalog",
                path: self.path.clone(),
                source,
            })?;

        Ok(Catalog::new(file.airdrops))
    }
}
