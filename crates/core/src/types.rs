//! Core data types for the ic-market system.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Error, Result};

/// Price type: fixed point, held at [`PRICE_SCALE`] fractional digits.
pub type Price = Decimal;

/// Fractional digits every stored price carries.
pub const PRICE_SCALE: u32 = 2;

/// ISO 8601 calendar date format used everywhere dates are rendered.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// A candidate listing as handed over by the extraction layer.
///
/// All fields are raw text; nothing has been cleaned or parsed yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawListing {
    /// Category identifier the listing was searched under.
    pub category: String,
    /// Title text, including any site decoration.
    pub title: String,
    /// Price text (e.g. "$1,234.56", "£12.00").
    pub price_text: String,
    /// Date caption text (e.g. "Sold Jan 5, 2024").
    pub date_text: String,
    /// Source site identifier (e.g. "com", "co.uk").
    pub site: String,
    /// Search query that surfaced the listing.
    pub query: String,
}

/// A price parsed out of free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPrice {
    /// Amount, non-negative.
    pub amount: Price,
    /// Currency code, or the original symbol if it has no mapping.
    pub currency: String,
}

/// A normalized, accepted listing.
///
/// Created once by ingestion and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Category identifier.
    pub category: String,
    /// Cleaned title.
    pub title: String,
    /// Sold price.
    pub price: Price,
    /// Currency code.
    pub currency: String,
    /// Sold date, if the caption could be parsed.
    pub date_sold: Option<NaiveDate>,
    /// Source site identifier.
    pub site: String,
    /// Search query that surfaced the listing (provenance only).
    pub query: String,
}

impl Listing {
    /// Sold date as `YYYY-MM-DD`, or an empty string when unknown.
    pub fn date_iso(&self) -> String {
        self.date_sold
            .map(|d| d.format(ISO_DATE_FORMAT).to_string())
            .unwrap_or_default()
    }
}

/// A listing in its persisted flat-table form.
///
/// Field names are the column headers of the captured data files. Every
/// value is text so that a CSV writer/reader can pass rows through as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRow {
    pub chip_family: String,
    pub title: String,
    /// Price with exactly two decimals.
    pub price: String,
    pub currency: String,
    /// ISO date or empty.
    pub date_sold: String,
    pub ebay_site: String,
    pub search_query: String,
}

impl ListingRow {
    /// Column headers, in table order.
    pub const COLUMNS: [&'static str; 7] = [
        "chip_family",
        "title",
        "price",
        "currency",
        "date_sold",
        "ebay_site",
        "search_query",
    ];
}

impl From<&Listing> for ListingRow {
    fn from(listing: &Listing) -> Self {
        ListingRow {
            chip_family: listing.category.clone(),
            title: listing.title.clone(),
            price: format!("{:.2}", listing.price),
            currency: listing.currency.clone(),
            date_sold: listing.date_iso(),
            ebay_site: listing.site.clone(),
            search_query: listing.query.clone(),
        }
    }
}

impl TryFrom<ListingRow> for Listing {
    type Error = Error;

    fn try_from(row: ListingRow) -> Result<Self> {
        let mut price = Decimal::from_str(row.price.trim())
            .map_err(|e| Error::data(format!("bad price {:?}: {}", row.price, e)))?;
        price.rescale(PRICE_SCALE);
        if price.is_sign_negative() {
            return Err(Error::data(format!("negative price {:?}", row.price)));
        }

        let date_text = row.date_sold.trim();
        let date_sold = if date_text.is_empty() {
            None
        } else {
            let date = NaiveDate::parse_from_str(date_text, ISO_DATE_FORMAT)
                .map_err(|e| Error::data(format!("bad date {:?}: {}", row.date_sold, e)))?;
            Some(date)
        };

        Ok(Listing {
            category: row.chip_family,
            title: row.title,
            price,
            currency: row.currency,
            date_sold,
            site: row.ebay_site,
            query: row.search_query,
        })
    }
}

/// Variant assigned to a listing by the classifier.
///
/// Not stored on the listing; recomputed from the title whenever needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variant {
    /// First matching rule's label.
    Named(&'static str),
    /// The category has rules but none matched.
    Other,
    /// The category has no rules; all matches share one bucket.
    Undivided,
}

impl Variant {
    /// Label of the no-rule-matched bucket.
    pub const OTHER_LABEL: &'static str = "other/mixed";
    /// Label of the single bucket for categories without rules.
    pub const UNDIVIDED_LABEL: &'static str = "all";

    /// Get the display label.
    pub fn label(self) -> &'static str {
        match self {
            Variant::Named(label) => label,
            Variant::Other => Self::OTHER_LABEL,
            Variant::Undivided => Self::UNDIVIDED_LABEL,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Variant {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
