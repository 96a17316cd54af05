//! The favourites list.

use serde::{Deserialize, Serialize};

/// Ordered set of favourite dish titles.
///
/// Titles act as natural keys and insertion order is what the views render,
/// so this is a `Vec` with membership checks rather than a set. Compared and
/// persisted by exact title; the catalog owns canonical spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favourites {
    titles: Vec<String>,
}

impl Favourites {
    /// Add `title` to the list. Returns `false` when it was already there.
    pub fn add(&mut self, title: &str) -> bool {
        if self.contains(title) {
            return false;
        }
        self.titles.push(title.to_owned());
        true
    }

    /// Remove `title` from the list. Returns `false` when it was not there.
    pub fn remove(&mut self, title: &str) -> bool {
        let before = self.titles.len();
        self.titles.retain(|t| t != title);
        self.titles.len() != before
    }

    /// Add when absent, remove when present. Returns whether the title is a
    /// favourite afterwards.
    pub fn toggle(&mut self, title: &str) -> bool {
        if self.remove(title) {
            false
        } else {
            self.titles.push(title.to_owned());
            true
        }
    }

    #[must_use]
    pub fn contains(&self, title: &str) -> bool {
        self.titles.iter().any(|t| t == title)
    }

    /// Titles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.titles.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_idempotent() {
        let mut favourites = Favourites::default();
        assert!(favourites.add("Overnight Oats"));
        assert!(!favourites.add("Overnight Oats"));
        assert_eq!(favourites.len(), 1);
    }

    #[test]
    fn test_remove_missing_title_is_noop() {
        let mut favourites = Favourites::default();
        favourites.add("Overnight Oats");
        assert!(!favourites.remove("Berry Smoothie"));
        assert_eq!(favourites.len(), 1);
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut favourites = Favourites::default();
        assert!(favourites.toggle("Chicken Wrap"));
        assert!(favourites.contains("Chicken Wrap"));
        assert!(!favourites.toggle("Chicken Wrap"));
        assert!(favourites.is_empty());
    }

    #[test]
    fn test_preserves_insertion_order() {
        let mut favourites = Favourites::default();
        favourites.add("B");
        favourites.add("A");
        favourites.add("C");
        favourites.remove("A");
        let titles: Vec<_> = favourites.iter().collect();
        assert_eq!(titles, vec!["B", "C"]);
    }

    #[test]
    fn test_serializes_as_bare_array() {
        let mut favourites = Favourites::default();
        favourites.add("Overnight Oats");
        let json = serde_json::to_string(&favourites).unwrap();
        assert_eq!(json, r#"["Overnight Oats"]"#);

        let restored: Favourites = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, favourites);
    }
}
