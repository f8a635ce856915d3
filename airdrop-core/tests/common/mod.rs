//! Shared fixtures for airdrop-core integration tests

#![allow(dead_code)]

use airdrop_core::catalog::{AirdropRecord, AirdropStatus, AirdropType, Catalog, EstimatedValue};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests (only once per test run)
pub fn init_test_logging() {
    INIT.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_target(true),
            )
            .with(tracing_subscriber::filter::EnvFilter::from_default_env())
            .try_init();
    });
}

pub fn airdrop(id: &str, name: &str) -> AirdropRecord {
    AirdropRecord {
        id: id.to_string(),
        name: name.to_string(),
        status: AirdropStatus::Likely,
        kind: AirdropType::Mainnet,
        chain: None,
        funding_raised: None,
        estimated_value: EstimatedValue {
            min: 0.0,
            max: 0.0,
        },
        deadline: None,
        deadline_date: None,
        difficulty: 3,
        confidence: 50,
        requirements: vec![],
        tips: vec![],
        links: Default::default(),
    }
}

/// The single-record Polymarket catalog
pub fn polymarket_catalog() -> Catalog {
    let mut poly = airdrop("poly", "Polymarket");
    poly.status = AirdropStatus::Likely;
    poly.kind = AirdropType::Usage;
    poly.estimated_value = EstimatedValue {
        min: 100.0,
        max: 500.0,
    };
    poly.difficulty = 2;
    Catalog::new(vec![poly])
}

/// `count` distinct airdrops with ids `project-00`, `project-01`, ...
pub fn numbered_catalog(count: usize) -> Catalog {
    Catalog::new(
        (0..count)
            .map(|i| airdrop(&format!("project-{i:02}"), &format!("Project {i:02}")))
            .collect(),
    )
}
