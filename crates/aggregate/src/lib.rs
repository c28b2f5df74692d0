//! Price aggregation and reporting for the ic-market system.
//!
//! This crate handles:
//! - Descriptive price statistics (count, mean, nearest-rank quartiles)
//! - Grouping listings by site, category or variant
//! - The summary report handed to rendering layers

pub mod group;
pub mod report;
pub mod stats;

pub use group::{
    aggregate, by_category, by_site, by_variant, partition, Aggregation, GroupSummary, VariantKey,
};
pub use report::MarketReport;
pub use stats::PriceStats;
