//! Deduplicated autocomplete suggestions.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A set of composite autocomplete strings such as `"Lyon Rhône France"`.
///
/// Deduplication is intrinsic: adding a string twice keeps one copy. Ordering
/// is lexicographic so that the serialized form is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuggestionSet(BTreeSet<String>);

impl SuggestionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the space-joined, non-empty `parts` as one suggestion.
    ///
    /// Nothing is added when every part is empty.
    pub fn add(&mut self, parts: &[&str]) {
        let suggestion = compose(parts);
        if !suggestion.is_empty() {
            self.0.insert(suggestion);
        }
    }

    pub fn contains(&self, suggestion: &str) -> bool {
        self.0.contains(suggestion)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Join the non-empty, trimmed parts with single spaces.
pub fn compose(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
