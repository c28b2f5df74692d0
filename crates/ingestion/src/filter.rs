//! Relevance and exclusion filtering.
//!
//! A listing is accepted for a category only if it is relevant (hits a
//! must-match keyword, or the category has none) and not excluded (hits
//! no global or category exclusion keyword). Exclusion always wins.

use icmarket_core::{Category, FoldedText, GLOBAL_EXCLUSIONS};

/// Find the first exclusion keyword present in a folded title.
///
/// Global exclusions are checked before the category's own list.
pub fn exclusion_hit(title: &FoldedText, category: &Category) -> Option<&'static str> {
    GLOBAL_EXCLUSIONS
        .iter()
        .chain(category.exclude.iter())
        .copied()
        .find(|kw| title.contains(kw))
}

/// Check whether a folded title passes the category's must-match gate.
pub fn relevant_folded(title: &FoldedText, category: &Category) -> bool {
    category.is_catch_all() || title.contains_any(category.must_match)
}

/// Check whether a title hits any global or category exclusion keyword.
pub fn is_excluded(title: &str, category: &Category) -> bool {
    exclusion_hit(&FoldedText::new(title), category).is_some()
}

/// Check whether a title is relevant to a category.
pub fn is_relevant(title: &str, category: &Category) -> bool {
    relevant_folded(&FoldedText::new(title), category)
}

/// Check whether a title is accepted for a category.
pub fn accept(title: &str, category: &Category) -> bool {
    let folded = FoldedText::new(title);
    relevant_folded(&folded, category) && exclusion_hit(&folded, category).is_none()
}
