//! Descriptive price statistics.
//!
//! Quartiles use nearest-rank indexing into the sorted prices:
//! `median = sorted[n / 2]`, `q1 = sorted[n / 4]`, `q3 = sorted[3n / 4]`.
//! For even `n` the median is the upper-middle element, not an average.
//! Downstream reports depend on these exact figures.

use icmarket_core::{Error, Listing, Price, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

/// Statistics over the prices of a non-empty group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceStats {
    /// Number of prices.
    pub count: usize,
    /// Arithmetic mean of raw prices (no currency conversion).
    pub mean: f64,
    /// Upper-middle element for even counts.
    pub median: Price,
    /// First quartile (nearest rank).
    pub q1: Price,
    /// Third quartile (nearest rank).
    pub q3: Price,
    /// Lowest price.
    pub min: Price,
    /// Highest price.
    pub max: Price,
}

impl PriceStats {
    /// Compute statistics over a set of prices.
    ///
    /// Returns `InsufficientData` for an empty set; callers are expected to
    /// drop empty groups before asking.
    pub fn from_prices(prices: impl IntoIterator<Item = Price>) -> Result<Self> {
        let mut sorted: Vec<Price> = prices.into_iter().collect();
        if sorted.is_empty() {
            return Err(Error::insufficient_data("no prices in group"));
        }
        sorted.sort_unstable();

        let n = sorted.len();
        let sum = sorted
            .iter()
            .try_fold(Decimal::ZERO, |acc, &p| acc.checked_add(p))
            .ok_or_else(|| Error::data(format!("price sum overflows over {} prices", n)))?;
        let mean = sum
            .to_f64()
            .ok_or_else(|| Error::data(format!("price sum {} not representable", sum)))?
            / n as f64;

        Ok(Self {
            count: n,
            mean,
            median: sorted[n / 2],
            q1: sorted[n / 4],
            q3: sorted[3 * n / 4],
            min: sorted[0],
            max: sorted[n - 1],
        })
    }

    /// Compute statistics over the prices of a set of listings.
    pub fn from_listings<'a>(listings: impl IntoIterator<Item = &'a Listing>) -> Result<Self> {
        Self::from_prices(listings.into_iter().map(|l| l.price))
    }
}
