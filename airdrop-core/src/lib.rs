//! Airdrop Hunter core library
//!
//! Catalog loading, fuzzy project resolution, catalog filtering/sorting and
//! the persisted tracking ledger. The `airdrops` binary in `airdrop-cli` is a
//! thin shell over the types exported here.

pub mod catalog;
pub mod config;
pub mod error;
pub mod tracking;

pub use catalog::{AirdropRecord, AirdropStatus, AirdropType, Catalog, CatalogStore};
pub use error::{LoadError, StoreError, TrackError};
pub use tracking::{
    FileTrackingStore, MemoryTrackingStore, TrackingEngine, TrackingRecord, TrackingStore,
};
