//! Re-processing of previously captured rows.
//!
//! Applies the current catalog rules to rows captured by an earlier run:
//! rows with an unknown category are skipped, the filter is re-applied to
//! each title, rows whose fields no longer parse or whose price falls
//! outside the configured range are skipped, and the survivors are
//! deduplicated.

use icmarket_core::config::FilterConfig;
use icmarket_core::{catalog, Listing, ListingRow};
use serde::Serialize;
use tracing::{info, warn};

use crate::dedup::Deduplicator;
use crate::filter::accept;

/// Counters for one re-processing run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReprocessStats {
    /// Rows read.
    pub loaded: u64,
    /// Rows whose category is no longer in the catalog.
    pub unknown_category: u64,
    /// Rows rejected by the current filter.
    pub filtered: u64,
    /// Rows with a price or date that does not parse.
    pub malformed: u64,
    /// Rows priced outside the configured range.
    pub out_of_range: u64,
    /// Rows passing all checks, before dedup.
    pub kept: u64,
    /// Rows remaining after dedup.
    pub unique: u64,
}

/// Result of re-processing captured rows.
#[derive(Debug, Clone)]
pub struct Reprocessed {
    /// Accepted, deduplicated listings in input order.
    pub listings: Vec<Listing>,
    /// Run statistics.
    pub stats: ReprocessStats,
}

/// Re-apply the current filter and dedup to captured rows.
pub fn reprocess(rows: impl IntoIterator<Item = ListingRow>, filter: &FilterConfig) -> Reprocessed {
    let mut stats = ReprocessStats::default();
    let mut dedup = Deduplicator::new();
    let mut listings = Vec::new();

    for row in rows {
        stats.loaded += 1;

        let Some(category) = catalog::category(&row.chip_family) else {
            stats.unknown_category += 1;
            continue;
        };
        if !accept(&row.title, category) {
            stats.filtered += 1;
            continue;
        }

        let listing = match Listing::try_from(row) {
            Ok(listing) => listing,
            Err(e) => {
                warn!(row = stats.loaded, "skipping row: {}", e);
                stats.malformed += 1;
                continue;
            }
        };
        if !filter.price_in_range(listing.price) {
            stats.out_of_range += 1;
            continue;
        }

        stats.kept += 1;
        if dedup.admit(&listing) {
            listings.push(listing);
        }
    }

    stats.unique = listings.len() as u64;
    info!(
        loaded = stats.loaded,
        kept = stats.kept,
        unique = stats.unique,
        "re-processed captured rows"
    );

    Reprocessed { listings, stats }
}
