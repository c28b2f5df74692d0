//! Listing title cleanup.

use std::sync::LazyLock;

use icmarket_core::FoldedText;
use regex::Regex;

static TITLE_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(^New listing|Opens in a new window or tab$)").unwrap());
static MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

/// Marketplace filler cards that are not real listings.
const PLACEHOLDER_MARKERS: &[&str] = &["shop on ebay"];

/// Remove site decoration from a title and collapse whitespace runs.
pub fn clean_title(raw: &str) -> String {
    let stripped = TITLE_NOISE.replace_all(raw.trim(), "");
    let collapsed = MULTI_SPACE.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}

/// Check whether a cleaned title is empty or a placeholder card.
pub fn is_placeholder(title: &str) -> bool {
    title.is_empty() || FoldedText::new(title).contains_any(PLACEHOLDER_MARKERS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_listing_marker() {
        assert_eq!(clean_title("New listing MOS 6581 SID  chip"), "MOS 6581 SID chip");
        assert_eq!(clean_title("NEW LISTINGMOS 8580"), "MOS 8580");
    }

    #[test]
    fn test_trailing_boilerplate() {
        assert_eq!(
            clean_title("Amiga Paula 8364 Opens in a new window or tab"),
            "Amiga Paula 8364"
        );
        assert_eq!(
            clean_title("New listing Amiga Paula 8364Opens in a new window or tab  "),
            "Amiga Paula 8364"
        );
    }

    #[test]
    fn test_marker_only_at_edges() {
        assert_eq!(
            clean_title("Sealed new listing lot of 6581"),
            "Sealed new listing lot of 6581"
        );
    }

    #[test]
    fn test_whitespace_collapse() {
        assert_eq!(clean_title("  YM2151 \t\n OPM   chip "), "YM2151 OPM chip");
        assert_eq!(clean_title("   "), "");
    }

    #[test]
    fn test_placeholder() {
        assert!(is_placeholder(""));
        assert!(is_placeholder("Shop on eBay"));
        assert!(!is_placeholder("MOS 6581 SID chip"));
    }
}
