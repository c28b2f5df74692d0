//! Variant classification using ordered rules.
//!
//! Rules are evaluated in declaration order and the first match wins.

use icmarket_core::{Category, FoldedText, Listing, Variant, VariantRule};

/// Classify a title against an ordered rule list.
///
/// An empty rule list yields [`Variant::Undivided`]; a non-empty list with
/// no matching rule yields [`Variant::Other`].
pub fn classify(title: &str, rules: &[VariantRule]) -> Variant {
    classify_folded(&FoldedText::new(title), rules)
}

/// Classify an already folded title.
pub fn classify_folded(title: &FoldedText, rules: &[VariantRule]) -> Variant {
    if rules.is_empty() {
        return Variant::Undivided;
    }
    rules
        .iter()
        .find(|rule| rule.matches(title))
        .map(|rule| Variant::Named(rule.label))
        .unwrap_or(Variant::Other)
}

/// Classify a listing under its category's rules.
pub fn classify_listing(listing: &Listing, category: &Category) -> Variant {
    classify(&listing.title, category.variants)
}

/// All variants a category can produce, in report order.
pub fn variants_of(category: &Category) -> Vec<Variant> {
    if !category.has_variants() {
        return vec![Variant::Undivided];
    }
    let mut variants: Vec<Variant> = category
        .variants
        .iter()
        .map(|rule| Variant::Named(rule.label))
        .collect();
    variants.push(Variant::Other);
    variants
}
