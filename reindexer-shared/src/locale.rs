//! Per-language display names for one entity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mapping from language code to display name.
///
/// The first name stored for a language wins; later names for the same
/// language are ignored. Rows are expected to arrive preferred-name first, so
/// first-write-wins keeps the best name. An empty language code never becomes
/// a key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleMap(BTreeMap<String, String>);

impl LocaleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `name` for `lang` unless the slot is already taken.
    ///
    /// Returns `true` if the name was stored.
    pub fn insert_first(&mut self, lang: &str, name: &str) -> bool {
        if lang.is_empty() || name.is_empty() || self.0.contains_key(lang) {
            return false;
        }
        self.0.insert(lang.to_string(), name.to_string());
        true
    }

    /// Fold `other` into this map, keeping names already present.
    pub fn merge_first(&mut self, other: &LocaleMap) {
        for (lang, name) in other.iter() {
            self.insert_first(lang, name);
        }
    }

    pub fn get(&self, lang: &str) -> Option<&str> {
        self.0.get(lang).map(String::as_str)
    }

    pub fn contains(&self, lang: &str) -> bool {
        self.0.contains_key(lang)
    }

    /// Languages and names in language-code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(lang, name)| (lang.as_str(), name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<L: Into<String>, N: Into<String>> FromIterator<(L, N)> for LocaleMap {
    fn from_iter<T: IntoIterator<Item = (L, N)>>(iter: T) -> Self {
        let mut map = LocaleMap::new();
        for (lang, name) in iter {
            let (lang, name) = (lang.into(), name.into());
            map.insert_first(&lang, &name);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_write_wins() {
        let mut names = LocaleMap::new();

        assert!(names.insert_first("fr", "Paris-Ville"));
        assert!(!names.insert_first("fr", "Paris"));

        assert_eq!(names.get("fr"), Some("Paris-Ville"));
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_empty_language_is_ignored() {
        let mut names = LocaleMap::new();

        assert!(!names.insert_first("", "Nowhere"));
        assert!(!names.insert_first("de", ""));
        assert!(names.is_empty());
    }

    #[test]
    fn test_merge_keeps_existing_names() {
        let mut names: LocaleMap = [("en", "Germany")].into_iter().collect();
        let other: LocaleMap = [("en", "Federal Republic"), ("de", "Deutschland")]
            .into_iter()
            .collect();

        names.merge_first(&other);

        assert_eq!(names.get("en"), Some("Germany"));
        assert_eq!(names.get("de"), Some("Deutschland"));
    }
}
