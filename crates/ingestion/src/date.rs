//! Sold-date caption normalization.

use std::sync::LazyLock;

use chrono::NaiveDate;
use icmarket_core::ISO_DATE_FORMAT;
use regex::Regex;

/// Extraction patterns, marker-prefixed forms first.
static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"Sold\s+(\w{3}\s+\d{1,2},?\s+\d{4})",
        r"Sold\s+(\d{1,2}\s+\w{3}\s+\d{4})",
        r"(\d{1,2}\s+\w{3}\s+\d{4})",
        r"(\w{3}\s+\d{1,2},?\s+\d{4})",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Calendar formats tried on each captured date, after commas are removed.
const DATE_FORMATS: &[&str] = &["%b %d %Y", "%d %b %Y"];

/// Parse a sold date out of caption text.
///
/// Each pattern's first match is tried against every format in turn; the
/// first combination that yields a valid calendar date wins.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    for pattern in DATE_PATTERNS.iter() {
        let Some(caps) = pattern.captures(text) else {
            continue;
        };
        let raw = caps[1]
            .replace(',', "")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        for fmt in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(&raw, fmt) {
                return Some(date);
            }
        }
    }
    None
}

/// Parse a sold date and render it as `YYYY-MM-DD`, or empty if unparseable.
pub fn normalize_date(text: &str) -> String {
    parse_date(text)
        .map(|d| d.format(ISO_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_orderings() {
        for text in ["Sold Jan 5, 2024", "Sold 5 Jan 2024", "5 Jan 2024", "Jan 5 2024"] {
            assert_eq!(normalize_date(text), "2024-01-05", "{}", text);
        }
    }

    #[test]
    fn test_sold_marker_beats_earlier_bare_date() {
        assert_eq!(normalize_date("Listed 5 Jan 2024 Sold Feb 3, 2024"), "2024-02-03");
        assert_eq!(normalize_date("Jan 9 2024 Sold 3 Feb 2024"), "2024-02-03");
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(normalize_date("Buy now"), "");
        assert_eq!(normalize_date(""), "");
        assert!(parse_date("Sold yesterday").is_none());
    }

    #[test]
    fn test_invalid_calendar_date() {
        assert_eq!(normalize_date("Sold Feb 30, 2024"), "");
        assert_eq!(normalize_date("Sold Feb 29, 2024"), "2024-02-29");
    }

    #[test]
    fn test_extra_whitespace_and_padding() {
        assert_eq!(normalize_date("Sold  Mar  07,  2023"), "2023-03-07");
        assert_eq!(normalize_date("Sold 07 Mar 2023"), "2023-03-07");
    }

    #[test]
    fn test_embedded_in_card_text() {
        let text = "MOS 6581 SID chip Pre-owned Sold Dec 24, 2023 $45.00 Free postage";
        assert_eq!(parse_date(text), NaiveDate::from_ymd_opt(2023, 12, 24));
    }

    #[test]
    fn test_month_case_insensitive() {
        assert_eq!(normalize_date("Sold 12 MAR 2023"), "2023-03-12");
    }
}
