//! Raw listing ingestion.
//!
//! Turns raw extracted text into accepted [`Listing`]s: title cleanup,
//! placeholder check, relevance/exclusion filter, price parse and range
//! check, then date parse. A listing without a parseable date is kept with
//! an empty date; every other failure rejects it.

use icmarket_core::{catalog, Category, Config, FoldedText, Listing, RawListing};
use icmarket_core::config::FilterConfig;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::date::parse_date;
use crate::filter::{exclusion_hit, relevant_folded};
use crate::price::parse_price;
use crate::title::{clean_title, is_placeholder};

/// Why a raw listing was not accepted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Category identifier not in the catalog.
    #[error("unknown category")]
    UnknownCategory,
    /// Empty title or marketplace filler card.
    #[error("placeholder title")]
    Placeholder,
    /// Title hit an exclusion keyword.
    #[error("excluded by {0:?}")]
    Excluded(&'static str),
    /// Title hit none of the category's must-match keywords.
    #[error("not relevant")]
    Irrelevant,
    /// No currency+amount pair in the price text.
    #[error("no price")]
    NoPrice,
    /// Price outside the accepted range.
    #[error("price out of range")]
    PriceOutOfRange,
}

/// Counters for one ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    /// Raw listings seen.
    pub total: u64,
    /// Listings accepted.
    pub accepted: u64,
    /// Accepted listings without a sold date.
    pub undated: u64,
    pub unknown_category: u64,
    pub placeholder: u64,
    pub excluded: u64,
    pub irrelevant: u64,
    pub no_price: u64,
    pub price_out_of_range: u64,
}

impl IngestStats {
    /// Total rejected listings.
    pub fn rejected(&self) -> u64 {
        self.total - self.accepted
    }

    /// Fraction of raw listings accepted.
    pub fn acceptance_rate(&self) -> f64 {
        if self.total > 0 {
            self.accepted as f64 / self.total as f64
        } else {
            0.0
        }
    }

    fn record(&mut self, outcome: &Result<Listing, Rejection>) {
        self.total += 1;
        match outcome {
            Ok(listing) => {
                self.accepted += 1;
                if listing.date_sold.is_none() {
                    self.undated += 1;
                }
            }
            Err(Rejection::UnknownCategory) => self.unknown_category += 1,
            Err(Rejection::Placeholder) => self.placeholder += 1,
            Err(Rejection::Excluded(_)) => self.excluded += 1,
            Err(Rejection::Irrelevant) => self.irrelevant += 1,
            Err(Rejection::NoPrice) => self.no_price += 1,
            Err(Rejection::PriceOutOfRange) => self.price_out_of_range += 1,
        }
    }

    /// Reset statistics.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Normalize and filter one raw listing against a known category.
pub fn ingest_one(
    raw: &RawListing,
    category: &Category,
    filter: &FilterConfig,
) -> Result<Listing, Rejection> {
    let title = clean_title(&raw.title);
    if is_placeholder(&title) {
        return Err(Rejection::Placeholder);
    }

    let folded = FoldedText::new(&title);
    if let Some(keyword) = exclusion_hit(&folded, category) {
        return Err(Rejection::Excluded(keyword));
    }
    if !relevant_folded(&folded, category) {
        return Err(Rejection::Irrelevant);
    }

    let price = parse_price(&raw.price_text).ok_or(Rejection::NoPrice)?;
    if !filter.price_in_range(price.amount) {
        return Err(Rejection::PriceOutOfRange);
    }

    Ok(Listing {
        category: category.id.to_string(),
        title,
        price: price.amount,
        currency: price.currency,
        date_sold: parse_date(&raw.date_text),
        site: raw.site.clone(),
        query: raw.query.clone(),
    })
}

/// Stateful ingestor that tracks rejection statistics.
#[derive(Debug, Clone)]
pub struct Ingestor {
    /// Price range and related settings.
    filter: FilterConfig,
    /// Ingestion statistics.
    stats: IngestStats,
}

impl Ingestor {
    /// Create a new ingestor.
    pub fn new(filter: FilterConfig) -> Self {
        Self {
            filter,
            stats: IngestStats::default(),
        }
    }

    /// Create an ingestor from the full configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.filter.clone())
    }

    /// Ingest a single raw listing.
    pub fn ingest(&mut self, raw: &RawListing) -> Result<Listing, Rejection> {
        let outcome = match catalog::category(&raw.category) {
            Some(category) => ingest_one(raw, category, &self.filter),
            None => Err(Rejection::UnknownCategory),
        };

        if let Err(reason) = &outcome {
            debug!(
                category = %raw.category,
                %reason,
                "rejected: {}",
                truncate(&raw.title, 80)
            );
        }

        self.stats.record(&outcome);
        outcome
    }

    /// Ingest a batch, returning accepted listings in input order.
    pub fn ingest_batch<'a>(&mut self, raws: impl IntoIterator<Item = &'a RawListing>) -> Vec<Listing> {
        let before = self.stats.clone();
        let accepted: Vec<Listing> = raws
            .into_iter()
            .filter_map(|raw| self.ingest(raw).ok())
            .collect();

        info!(
            raw = self.stats.total - before.total,
            accepted = accepted.len(),
            "ingested batch"
        );
        accepted
    }

    /// Get ingestion statistics.
    pub fn stats(&self) -> &IngestStats {
        &self.stats
    }

    /// Reset statistics.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }
}

impl Default for Ingestor {
    fn default() -> Self {
        Self::new(FilterConfig::default())
    }
}

/// Shorten text for log lines without splitting a character.
fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn make_raw(category: &str, title: &str, price: &str, date: &str) -> RawListing {
        RawListing {
            category: category.to_string(),
            title: title.to_string(),
            price_text: price.to_string(),
            date_text: date.to_string(),
            site: "com".to_string(),
            query: "MOS 6581 SID".to_string(),
        }
    }

    #[test]
    fn test_accepts_and_normalizes() {
        let mut ingestor = Ingestor::default();
        let raw = make_raw(
            "sid",
            "New listing MOS 6581 SID  chip",
            "$1,045.50",
            "Sold Jan 5, 2024",
        );

        let listing = ingestor.ingest(&raw).unwrap();
        assert_eq!(listing.category, "sid");
        assert_eq!(listing.title, "MOS 6581 SID chip");
        assert_eq!(listing.price, Decimal::new(104550, 2));
        assert_eq!(listing.currency, "USD");
        assert_eq!(listing.date_sold, NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(listing.site, "com");
        assert_eq!(listing.query, "MOS 6581 SID");
    }

    #[test]
    fn test_missing_date_is_kept() {
        let mut ingestor = Ingestor::default();
        let listing = ingestor
            .ingest(&make_raw("sid", "MOS 8580 SID", "\u{a3}30.00", "Buy now"))
            .unwrap();
        assert!(listing.date_sold.is_none());
        assert_eq!(listing.date_iso(), "");
        assert_eq!(ingestor.stats().undated, 1);
    }

    #[test]
    fn test_rejections() {
        let mut ingestor = Ingestor::default();
        let cases = [
            (make_raw("z80", "Zilog Z80", "$5.00", ""), Rejection::UnknownCategory),
            (make_raw("sid", "Shop on eBay", "$20.00", ""), Rejection::Placeholder),
            (make_raw("sid", "New listing  ", "$20.00", ""), Rejection::Placeholder),
            (
                make_raw("sid", "FPGASID replacement board", "$20.00", ""),
                Rejection::Excluded("replacement"),
            ),
            (make_raw("sid", "Yamaha motorcycle part", "$20.00", ""), Rejection::Irrelevant),
            (make_raw("sid", "MOS 6581 SID", "Best offer", ""), Rejection::NoPrice),
            (make_raw("sid", "MOS 6581 SID", "$0.50", ""), Rejection::PriceOutOfRange),
            (make_raw("sid", "MOS 6581 SID", "$5,000.01", ""), Rejection::PriceOutOfRange),
        ];

        for (raw, expected) in &cases {
            assert_eq!(ingestor.ingest(raw).unwrap_err(), *expected, "{}", raw.title);
        }

        let stats = ingestor.stats();
        assert_eq!(stats.total, 8);
        assert_eq!(stats.accepted, 0);
        assert_eq!(stats.rejected(), 8);
        assert_eq!(stats.unknown_category, 1);
        assert_eq!(stats.placeholder, 2);
        assert_eq!(stats.excluded, 1);
        assert_eq!(stats.irrelevant, 1);
        assert_eq!(stats.no_price, 1);
        assert_eq!(stats.price_out_of_range, 2);
    }

    #[test]
    fn test_price_range_bounds_inclusive() {
        let mut ingestor = Ingestor::default();
        assert!(ingestor.ingest(&make_raw("sid", "SID 6581", "$1.00", "")).is_ok());
        assert!(ingestor.ingest(&make_raw("sid", "SID 6581", "$5,000.00", "")).is_ok());
    }

    #[test]
    fn test_custom_min_price() {
        let filter = FilterConfig {
            min_price: Decimal::new(20, 0),
            ..FilterConfig::default()
        };
        let mut ingestor = Ingestor::new(filter);
        let outcome = ingestor.ingest(&make_raw("discover", "Vintage sound chip", "$19.99", ""));
        assert_eq!(outcome.unwrap_err(), Rejection::PriceOutOfRange);
    }

    #[test]
    fn test_batch_keeps_order_and_counts() {
        let mut ingestor = Ingestor::default();
        let raws = vec![
            make_raw("sid", "MOS 6581 SID", "$40.00", ""),
            make_raw("sid", "SwinSID nano", "$25.00", ""),
            make_raw("sid", "MOS 8580 SID", "$35.00", ""),
        ];
        let accepted = ingestor.ingest_batch(&raws);
        let titles: Vec<_> = accepted.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["MOS 6581 SID", "MOS 8580 SID"]);
        assert_eq!(ingestor.stats().total, 3);
        assert!((ingestor.stats().acceptance_rate() - 2.0 / 3.0).abs() < 1e-10);

        ingestor.reset_stats();
        assert_eq!(ingestor.stats(), &IngestStats::default());
    }

    #[test]
    fn test_truncate_on_char_boundary() {
        assert_eq!(truncate("\u{20ac}\u{20ac}\u{20ac}", 2), "\u{20ac}\u{20ac}");
        assert_eq!(truncate("short", 80), "short");
    }
}
