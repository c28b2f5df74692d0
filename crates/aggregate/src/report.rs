//! Summary report over a deduplicated listing set.
//!
//! The report is plain data; rendering it is left to the caller.

use chrono::NaiveDate;
use icmarket_core::config::ReportConfig;
use icmarket_core::{Listing, Result, Variant, CATALOG};
use icmarket_ingestion::classifier::variants_of;
use serde::Serialize;
use tracing::debug;

use crate::group::{aggregate, by_category, by_site, by_variant, GroupSummary, VariantKey};

/// Summary for one source site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteSummary {
    pub site: String,
    pub summary: GroupSummary,
}

/// Summary for one variant within a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantSummary {
    pub variant: Variant,
    pub summary: GroupSummary,
}

/// Summary for one category, with its variant breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
    pub summary: GroupSummary,
    /// Non-empty variants in rule order, `other/mixed` last.
    pub variants: Vec<VariantSummary>,
}

/// Span of known sold dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
    /// Listings that carry a sold date.
    pub dated: usize,
}

impl DateRange {
    /// Span of sold dates, or `None` if no listing has one.
    pub fn of(listings: &[Listing]) -> Option<Self> {
        let mut dates = listings.iter().filter_map(|l| l.date_sold);
        let first = dates.next()?;
        let (earliest, latest, dated) = dates.fold((first, first, 1), |(lo, hi, n), d| {
            (lo.min(d), hi.max(d), n + 1)
        });
        Some(Self {
            earliest,
            latest,
            dated,
        })
    }
}

/// Market summary: per site, per category and variant, dates and prices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketReport {
    /// Number of listings summarized.
    pub total: usize,
    /// Per-site summaries, ordered by site.
    pub by_site: Vec<SiteSummary>,
    /// Per-category summaries in catalog order. Categories outside the
    /// catalog are counted in the totals only.
    pub by_category: Vec<CategorySummary>,
    /// Sold date span, absent when no dates were extracted.
    pub date_range: Option<DateRange>,
    /// Price distribution over all listings, currencies mixed.
    pub distribution: Option<GroupSummary>,
}

impl MarketReport {
    /// Build the report over a deduplicated listing set.
    pub fn build(listings: &[Listing], config: &ReportConfig) -> Result<Self> {
        if listings.is_empty() {
            return Ok(Self {
                total: 0,
                by_site: Vec::new(),
                by_category: Vec::new(),
                date_range: None,
                distribution: None,
            });
        }

        let sites = aggregate(listings, by_site)?;
        let by_site: Vec<SiteSummary> = sites
            .groups
            .into_iter()
            .map(|(site, summary)| SiteSummary { site, summary })
            .collect();

        let categories = aggregate(listings, by_category)?;
        let variants = if config.variant_breakdown {
            Some(aggregate(listings, by_variant)?.groups)
        } else {
            None
        };

        let mut by_category = Vec::new();
        for category in CATALOG {
            if category.is_catch_all() && !config.include_catch_all {
                continue;
            }
            let Some(summary) = categories.groups.get(category.id) else {
                continue;
            };

            let breakdown = match &variants {
                Some(groups) if category.has_variants() => variants_of(category)
                    .into_iter()
                    .filter_map(|variant| {
                        let key = VariantKey {
                            category: category.id.to_string(),
                            variant,
                        };
                        groups.get(&key).map(|summary| VariantSummary {
                            variant,
                            summary: summary.clone(),
                        })
                    })
                    .collect(),
                _ => Vec::new(),
            };

            by_category.push(CategorySummary {
                id: category.id.to_string(),
                name: category.name.to_string(),
                summary: summary.clone(),
                variants: breakdown,
            });
        }

        debug!(
            total = listings.len(),
            sites = by_site.len(),
            categories = by_category.len(),
            "built market report"
        );

        Ok(Self {
            total: listings.len(),
            by_site,
            by_category,
            date_range: DateRange::of(listings),
            distribution: Some(categories.total),
        })
    }
}
