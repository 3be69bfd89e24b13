//! Recursive key selection
//!
//! Computes the subset of a listing snapshot logically nested under a root
//! path. Selection is a pure string computation over a point-in-time
//! snapshot: objects created after the listing are never selected, and
//! objects deleted after it surface later as per-key store errors.

use crate::store::ObjectSummary;

/// The keys selected under a root path, in listing order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkSelection {
    root: String,
    keys: Vec<String>,
}

impl BulkSelection {
    /// Select every key logically under `root` from a listing snapshot.
    ///
    /// At most one trailing `/` is stripped from the root. A key matches
    /// iff it equals the root or begins with the root followed by a `/`
    /// delimiter, so `logs` selects `logs` and `logs/a` but never
    /// `logs2024`. An empty root selects the whole snapshot. Listing order
    /// is preserved.
    pub fn select(root: &str, listing: &[ObjectSummary]) -> Self {
        let root = root.strip_suffix('/').unwrap_or(root);
        let keys = listing
            .iter()
            .filter(|object| Self::matches(root, &object.key))
            .map(|object| object.key.clone())
            .collect();
        Self {
            root: root.to_string(),
            keys,
        }
    }

    fn matches(root: &str, key: &str) -> bool {
        if root.is_empty() {
            return true;
        }
        match key.strip_prefix(root) {
            Some("") => true,
            Some(rest) => rest.starts_with('/'),
            None => false,
        }
    }

    /// The normalized root this selection was computed from
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The selected keys, in the listing's original order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(keys: &[&str]) -> Vec<ObjectSummary> {
        keys.iter().map(|k| ObjectSummary::key(*k)).collect()
    }

    #[test]
    fn test_select_under_root() {
        let snapshot = listing(&["archive", "archive/a", "archive/b", "archived/c"]);
        let selection = BulkSelection::select("archive", &snapshot);
        assert_eq!(selection.keys(), ["archive", "archive/a", "archive/b"]);
    }

    #[test]
    fn test_bare_prefix_without_delimiter_is_not_selected() {
        let snapshot = listing(&["logs", "logs/app.log", "logs2024", "logs2024/app.log"]);
        let selection = BulkSelection::select("logs", &snapshot);
        assert_eq!(selection.keys(), ["logs", "logs/app.log"]);
    }

    #[test]
    fn test_trailing_slash_stripped_once() {
        let snapshot = listing(&["logs", "logs/app.log"]);
        let selection = BulkSelection::select("logs/", &snapshot);
        assert_eq!(selection.root(), "logs");
        assert_eq!(selection.keys(), ["logs", "logs/app.log"]);
    }

    #[test]
    fn test_empty_root_selects_everything() {
        let snapshot = listing(&["a", "b/c", "d/e/f"]);
        let selection = BulkSelection::select("", &snapshot);
        assert_eq!(selection.len(), 3);
    }

    #[test]
    fn test_listing_order_preserved() {
        let snapshot = listing(&["p/z", "p/a", "p", "p/m"]);
        let selection = BulkSelection::select("p", &snapshot);
        assert_eq!(selection.keys(), ["p/z", "p/a", "p", "p/m"]);
    }

    #[test]
    fn test_nothing_matches() {
        let snapshot = listing(&["alpha", "beta"]);
        let selection = BulkSelection::select("gamma", &snapshot);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_nested_root() {
        let snapshot = listing(&["a/b", "a/b/c", "a/bc", "a"]);
        let selection = BulkSelection::select("a/b", &snapshot);
        assert_eq!(selection.keys(), ["a/b", "a/b/c"]);
    }
}
