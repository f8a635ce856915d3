//! Command handlers
//!
//! Every invocation loads the catalog once and builds a fresh engine over the
//! ledger file; engine failures bubble up to `main` and end the process with a
//! non-zero status.

use anyhow::Result;
use chrono::Utc;
use tracing::debug;

use airdrop_core::catalog::{Catalog, CatalogStore, FilterSpec, SortKey};
use airdrop_core::config::{HunterConfig, HunterPaths};
use airdrop_core::tracking::{FileTrackingStore, TrackingEngine, TrackingUpdate};
use airdrop_core::TrackError;

use crate::render;

pub struct App {
    paths: HunterPaths,
    config: HunterConfig,
}

impl App {
    pub fn new(paths: HunterPaths, config: HunterConfig) -> Self {
        Self { paths, config }
    }

    fn catalog(&self) -> Catalog {
        // Load errors are already logged; an empty catalog is the fallback
        CatalogStore::new(&self.paths.catalog_file).load().catalog
    }

    fn engine(&self) -> TrackingEngine<FileTrackingStore> {
        TrackingEngine::new(
            self.catalog(),
            FileTrackingStore::new(&self.paths.tracking_file),
        )
    }

    pub fn list(&self, filter: Option<&str>, sort: Option<&str>, json: bool) -> Result<()> {
        let catalog = self.catalog();
        let filter_spec = filter.map(FilterSpec::parse);
        let sort_key = sort.map(SortKey::parse);
        let records = catalog.list(filter_spec.as_ref(), sort_key.as_ref());
        debug!(shown = records.len(), total = catalog.len(), "Listing airdrops");

        if json {
            println!("{}", serde_json::to_string_pretty(&records)?);
        } else {
            print!("{}", render::airdrop_list(&records));
        }
        Ok(())
    }

    pub fn show(&self, project: &str, json: bool) -> Result<()> {
        let catalog = self.catalog();
        let airdrop = catalog.resolve(project).ok_or_else(|| TrackError::NotFound {
            query: project.to_string(),
        })?;

        if json {
            println!("{}", serde_json::to_string_pretty(airdrop)?);
        } else {
            print!("{}", render::airdrop_detail(airdrop));
        }
        Ok(())
    }

    pub fn track(&self, project: &str, status: Option<&str>) -> Result<()> {
        let status = status.unwrap_or_else(|| self.config.default_status());
        debug!(ledger = %self.paths.tracking_file.display(), "Tracking with status {status}");
        let outcome = self.engine().track(project, status)?;

        println!("✅ {}", outcome.message());
        println!(
            "   Use \"airdrops show {}\" for the task list",
            outcome.airdrop.id
        );
        Ok(())
    }

    pub fn untrack(&self, project: &str) -> Result<()> {
        let outcome = self.engine().untrack(project)?;
        println!("✅ {}", outcome.message());
        Ok(())
    }

    pub fn update(
        &self,
        project: &str,
        progress: Option<u8>,
        status: Option<String>,
    ) -> Result<()> {
        let update = TrackingUpdate { progress, status };
        let outcome = self.engine().update(project, &update)?;

        println!(
            "✅ {}: {} {}",
            outcome.message(),
            render::tracking_status_icon(&outcome.record.status),
            render::progress_bar(outcome.record.progress, 20)
        );
        Ok(())
    }

    pub fn status(&self, json: bool) -> Result<()> {
        let engine = self.engine();
        let portfolio = engine.portfolio(Utc::now().date_naive());

        if json {
            println!("{}", serde_json::to_string_pretty(&portfolio)?);
        } else {
            print!("{}", render::portfolio(&portfolio));
        }
        Ok(())
    }
}
