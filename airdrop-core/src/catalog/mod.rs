//! Airdrop catalog - loading, lookup and listing
//!
//! # Overview
//!
//! The catalog is the static, read-only list of known airdrop opportunities.
//! It is loaded once per invocation and never written back.
//!
//! ```text
//! references/airdrops.json
//!            │
//!            ▼
//!      CatalogStore::load ──► Catalog
//!                               ├── resolve(query)      ← fuzzy project lookup
//!                               └── list(filter, sort)  ← query engine
//! ```

mod query;
mod record;
mod resolve;
mod store;

pub use query::{filter, sort, DifficultyBand, FilterSpec, SortKey};
pub use record::{AirdropRecord, AirdropStatus, AirdropType, EstimatedValue, Requirement};
pub use resolve::{resolve, resolve_match, MatchKind, Resolved};
pub use store::{CatalogFile, CatalogLoad, CatalogStore};

/// The loaded catalog, in file order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<AirdropRecord>,
}

impl Catalog {
    pub fn new(records: Vec<AirdropRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[AirdropRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by its exact id
    pub fn get(&self, id: &str) -> Option<&AirdropRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Resolve a free-text query to one record (see [`resolve`])
    pub fn resolve(&self, query: &str) -> Option<&AirdropRecord> {
        resolve(query, &self.records)
    }

    /// Filter, then sort
    pub fn list(
        &self,
        filter_spec: Option<&FilterSpec>,
        sort_key: Option<&SortKey>,
    ) -> Vec<&AirdropRecord> {
        sort(filter(&self.records, filter_spec), sort_key)
    }
}
