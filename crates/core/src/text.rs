//! Case-insensitive substring matching.
//!
//! Both the relevance filter and the variant classifier go through
//! [`FoldedText`] so that they lowercase titles and keywords identically.

/// Lowercased copy of a title, built once and matched against many keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldedText(String);

impl FoldedText {
    /// Fold a title for matching.
    pub fn new(text: &str) -> Self {
        Self(fold(text))
    }

    /// Check whether a keyword occurs anywhere in the text.
    ///
    /// The keyword is folded the same way as the text. An empty keyword
    /// never matches.
    pub fn contains(&self, keyword: &str) -> bool {
        if keyword.is_empty() {
            return false;
        }
        self.0.contains(fold(keyword).as_str())
    }

    /// Check whether at least one keyword occurs in the text.
    pub fn contains_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|kw| self.contains(kw))
    }

    /// Get the folded text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Fold text to its matching form.
#[inline]
fn fold(text: &str) -> String {
    text.to_lowercase()
}
