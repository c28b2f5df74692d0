//! Keyed grouping of listings.
//!
//! Listings are partitioned by an arbitrary key function; every partition
//! and the whole set get the same statistics. Currencies are never
//! converted, so each summary records which currencies it mixes.

use std::collections::{BTreeMap, BTreeSet};

use icmarket_core::{catalog, Error, Listing, Result, Variant};
use icmarket_ingestion::classify_listing;
use serde::Serialize;

use crate::stats::PriceStats;

/// Statistics for one group plus the currencies it contains.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    /// Price statistics over the group.
    pub stats: PriceStats,
    /// Currency codes present in the group.
    pub currencies: BTreeSet<String>,
}

impl GroupSummary {
    /// Summarize a non-empty group of listings.
    pub fn from_listings<'a>(listings: impl IntoIterator<Item = &'a Listing> + Clone) -> Result<Self> {
        let stats = PriceStats::from_listings(listings.clone())?;
        let currencies = listings.into_iter().map(|l| l.currency.clone()).collect();
        Ok(Self { stats, currencies })
    }

    /// Whether the statistics mix more than one currency.
    pub fn mixed_currency(&self) -> bool {
        self.currencies.len() > 1
    }
}

/// Grouped statistics with a grand total over all listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation<K: Ord> {
    /// One summary per distinct key, in key order.
    pub groups: BTreeMap<K, GroupSummary>,
    /// Summary over every listing.
    pub total: GroupSummary,
}

/// Key for per-variant grouping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VariantKey {
    pub category: String,
    pub variant: Variant,
}

/// Group by source site.
pub fn by_site(listing: &Listing) -> String {
    listing.site.clone()
}

/// Group by category identifier.
pub fn by_category(listing: &Listing) -> String {
    listing.category.clone()
}

/// Group by category, then by classified variant.
///
/// A category missing from the catalog has no rules, so all of its
/// listings share the undivided bucket.
pub fn by_variant(listing: &Listing) -> VariantKey {
    let variant = catalog::category(&listing.category)
        .map(|category| classify_listing(listing, category))
        .unwrap_or(Variant::Undivided);
    VariantKey {
        category: listing.category.clone(),
        variant,
    }
}

/// Partition listings by key, keeping input order inside each partition.
pub fn partition<'a, K, F>(listings: &'a [Listing], key_fn: F) -> BTreeMap<K, Vec<&'a Listing>>
where
    K: Ord,
    F: Fn(&Listing) -> K,
{
    let mut groups: BTreeMap<K, Vec<&'a Listing>> = BTreeMap::new();
    for listing in listings {
        groups.entry(key_fn(listing)).or_default().push(listing);
    }
    groups
}

/// Compute statistics per key and over the whole set.
///
/// The set must be non-empty.
pub fn aggregate<K, F>(listings: &[Listing], key_fn: F) -> Result<Aggregation<K>>
where
    K: Ord,
    F: Fn(&Listing) -> K,
{
    if listings.is_empty() {
        return Err(Error::insufficient_data("no listings to aggregate"));
    }

    let groups = partition(listings, key_fn)
        .into_iter()
        .map(|(key, members)| -> Result<(K, GroupSummary)> {
            Ok((key, GroupSummary::from_listings(members.iter().copied())?))
        })
        .collect::<Result<BTreeMap<_, _>>>()?;

    Ok(Aggregation {
        groups,
        total: GroupSummary::from_listings(listings)?,
    })
}
