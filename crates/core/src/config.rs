//! Configuration structures for the ic-market system.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main configuration for the processing pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Listing acceptance configuration.
    pub filter: FilterConfig,
    /// Report configuration.
    pub report: ReportConfig,
}

impl Config {
    /// Load configuration from a JSON document.
    ///
    /// Missing sections and fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        self.filter.validate()
    }
}

/// Listing acceptance configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Lowest accepted price (inclusive).
    pub min_price: Decimal,
    /// Highest accepted price (inclusive).
    pub price_ceiling: Decimal,
}

impl FilterConfig {
    /// Check whether a price lies in the accepted range.
    #[inline]
    pub fn price_in_range(&self, price: Decimal) -> bool {
        price >= self.min_price && price <= self.price_ceiling
    }

    fn validate(&self) -> Result<()> {
        if self.min_price.is_sign_negative() {
            return Err(Error::config(format!(
                "min_price must be non-negative, got {}",
                self.min_price
            )));
        }
        if self.min_price > self.price_ceiling {
            return Err(Error::config(format!(
                "min_price {} exceeds price_ceiling {}",
                self.min_price, self.price_ceiling
            )));
        }
        Ok(())
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_price: Decimal::ONE,
            price_ceiling: Decimal::new(5000, 0),
        }
    }
}

/// Report configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Include the per-variant breakdown under each category.
    pub variant_breakdown: bool,
    /// Include the catch-all category in the per-category section.
    pub include_catch_all: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            variant_breakdown: true,
            include_catch_all: true,
        }
    }
}
