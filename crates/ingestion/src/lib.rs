//! Listing ingestion and normalization for the ic-market system.
//!
//! This crate handles:
//! - Price, date and title normalization
//! - Relevance and exclusion filtering
//! - Variant classification
//! - Deduplication of listings seen more than once
//! - Re-processing of previously captured rows

pub mod classifier;
pub mod date;
pub mod dedup;
pub mod filter;
pub mod ingest;
pub mod price;
pub mod reprocess;
pub mod title;

pub use classifier::{classify, classify_listing};
pub use date::{normalize_date, parse_date};
pub use dedup::{dedup, Deduplicator};
pub use filter::{accept, is_excluded, is_relevant};
pub use ingest::{IngestStats, Ingestor, Rejection};
pub use price::parse_price;
pub use reprocess::{reprocess, ReprocessStats, Reprocessed};
pub use title::clean_title;
