//! Deduplication of listings surfaced by overlapping queries and pages.
//!
//! Identity is exact equality on (category, title, price, date sold, site).
//! The search query and currency are not part of the key.

use std::collections::HashSet;

use chrono::NaiveDate;
use icmarket_core::{Listing, Price};

/// Identity of a listing for deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DedupKey {
    category: String,
    title: String,
    price: Price,
    date_sold: Option<NaiveDate>,
    site: String,
}

impl From<&Listing> for DedupKey {
    fn from(listing: &Listing) -> Self {
        Self {
            category: listing.category.clone(),
            title: listing.title.clone(),
            price: listing.price,
            date_sold: listing.date_sold,
            site: listing.site.clone(),
        }
    }
}

/// Streaming deduplicator that keeps the first occurrence of each key.
#[derive(Debug, Default)]
pub struct Deduplicator {
    /// Keys admitted so far.
    seen: HashSet<DedupKey>,
    /// Listings rejected as duplicates.
    dropped: u64,
}

impl Deduplicator {
    /// Create an empty deduplicator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a listing if its key has not been seen yet.
    pub fn admit(&mut self, listing: &Listing) -> bool {
        let fresh = self.seen.insert(DedupKey::from(listing));
        if !fresh {
            self.dropped += 1;
        }
        fresh
    }

    /// Number of distinct listings admitted.
    pub fn unique(&self) -> usize {
        self.seen.len()
    }

    /// Number of duplicates dropped.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Forget all keys.
    pub fn clear(&mut self) {
        self.seen.clear();
        self.dropped = 0;
    }
}

/// Remove duplicate listings, keeping first occurrences in input order.
pub fn dedup(listings: impl IntoIterator<Item = Listing>) -> Vec<Listing> {
    let mut dedup = Deduplicator::new();
    listings
        .into_iter()
        .filter(|listing| dedup.admit(listing))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn make_listing(title: &str, price: i64, query: &str) -> Listing {
        Listing {
            category: "sid".to_string(),
            title: title.to_string(),
            price: Decimal::new(price, 2),
            currency: "USD".to_string(),
            date_sold: NaiveDate::from_ymd_opt(2024, 1, 5),
            site: "com".to_string(),
            query: query.to_string(),
        }
    }

    #[test]
    fn test_query_not_in_key() {
        let listings = vec![
            make_listing("MOS 6581 SID", 4500, "MOS 6581 SID"),
            make_listing("MOS 6581 SID", 4500, "6581 sound chip"),
        ];
        let unique = dedup(listings);
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].query, "MOS 6581 SID");
    }

    #[test]
    fn test_currency_not_in_key() {
        let mut other = make_listing("MOS 6581 SID", 4500, "q");
        other.currency = "GBP".to_string();
        let unique = dedup(vec![make_listing("MOS 6581 SID", 4500, "q"), other]);
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].currency, "USD");
    }

    #[test]
    fn test_key_fields_distinguish() {
        let base = make_listing("MOS 6581 SID", 4500, "q");

        let mut by_site = base.clone();
        by_site.site = "co.uk".to_string();
        let mut by_date = base.clone();
        by_date.date_sold = None;
        let mut by_category = base.clone();
        by_category.category = "discover".to_string();
        let by_price = make_listing("MOS 6581 SID", 4501, "q");
        let by_title = make_listing("MOS 6581 SID chip", 4500, "q");

        let unique = dedup(vec![base, by_site, by_date, by_category, by_price, by_title]);
        assert_eq!(unique.len(), 6);
    }

    #[test]
    fn test_price_scale_irrelevant() {
        let a = make_listing("MOS 6581 SID", 4500, "q");
        let mut b = a.clone();
        b.price = Decimal::new(45, 0);
        assert_eq!(dedup(vec![a, b]).len(), 1);
    }

    #[test]
    fn test_order_preserved() {
        let listings = vec![
            make_listing("c", 100, "q"),
            make_listing("a", 100, "q"),
            make_listing("c", 100, "q2"),
            make_listing("b", 100, "q"),
        ];
        let titles: Vec<_> = dedup(listings).into_iter().map(|l| l.title).collect();
        assert_eq!(titles, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_idempotent() {
        let listings = vec![
            make_listing("a", 100, "q1"),
            make_listing("a", 100, "q2"),
            make_listing("b", 200, "q1"),
            make_listing("a", 300, "q1"),
        ];
        let once = dedup(listings);
        let twice = dedup(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_streaming_counts() {
        let mut dedup = Deduplicator::new();
        let a = make_listing("a", 100, "q");
        assert!(dedup.admit(&a));
        assert!(!dedup.admit(&a));
        assert!(!dedup.admit(&a));
        assert!(dedup.admit(&make_listing("b", 100, "q")));
        assert_eq!(dedup.unique(), 2);
        assert_eq!(dedup.dropped(), 2);

        dedup.clear();
        assert!(dedup.admit(&a));
    }
}
