//! Free-text project lookup
//!
//! A query is matched against the catalog in a fixed priority order and the
//! first hit wins:
//!
//! 1. exact id
//! 2. exact name
//! 3. name contains the query (first in catalog order)
//! 4. id contains the query (first in catalog order)
//!
//! All comparisons are case-insensitive. Precise identity always beats
//! fuzzy recall, so "monad" picks a record *named* Monad over one whose name
//! merely starts with it.

use super::AirdropRecord;

/// Which rule of the priority chain produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    ExactId,
    ExactName,
    PartialName,
    PartialId,
}

/// A resolved record together with the rule that found it
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    pub record: &'a AirdropRecord,
    pub matched_by: MatchKind,
}

/// Resolve `query` to a single record, or `None`
pub fn resolve<'a>(query: &str, records: &'a [AirdropRecord]) -> Option<&'a AirdropRecord> {
    resolve_match(query, records).map(|resolved| resolved.record)
}

/// Like [`resolve`], but also reports which rule matched.
///
/// Surrounding whitespace in `query` is ignored, so `" poly "` finds `poly`.
pub fn resolve_match<'a>(query: &str, records: &'a [AirdropRecord]) -> Option<Resolved<'a>> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return None;
    }

    let found = records
        .iter()
        .find(|r| r.id.to_lowercase() == q)
        .map(|record| (record, MatchKind::ExactId))
        .or_else(|| {
            records
                .iter()
                .find(|r| r.name.to_lowercase() == q)
                .map(|record| (record, MatchKind::ExactName))
        })
        .or_else(|| {
            records
                .iter()
                .find(|r| r.name.to_lowercase().contains(&q))
                .map(|record| (record, MatchKind::PartialName))
        })
        .or_else(|| {
            records
                .iter()
                .find(|r| r.id.to_lowercase().contains(&q))
                .map(|record| (record, MatchKind::PartialId))
        });

    match found {
        Some((record, matched_by)) => {
            tracing::debug!(query, id = %record.id, ?matched_by, "Resolved airdrop");
            Some(Resolved { record, matched_by })
        }
        None => {
            tracing::debug!(query, "No airdrop matched query");
            None
        }
    }
}
