use serde::Serialize;
use tracing::debug;

use crate::models::Recommendation;

/// Maximum number of recommendations kept at once
pub const STORE_CAPACITY: usize = 5;

/// Result of inserting into a [`RecommendationStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Appended without exceeding capacity
    Inserted,
    /// Appended and the oldest entry was evicted
    InsertedWithEviction(Recommendation),
    /// An entry with the same title exists, nothing changed
    Duplicate,
}

/// Bounded, insertion-ordered recommendation history keyed by title
///
/// A duplicate title is dropped without refreshing the existing entry. Once
/// more than [`STORE_CAPACITY`] entries are held the oldest one is evicted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecommendationStore {
    entries: Vec<Recommendation>,
}

impl RecommendationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a recommendation unless its title is already present
    pub fn insert(&mut self, recommendation: Recommendation) -> InsertOutcome {
        if self.contains_title(&recommendation.title) {
            debug!(title = %recommendation.title, "Skipping duplicate recommendation");
            return InsertOutcome::Duplicate;
        }

        self.entries.push(recommendation);

        if self.entries.len() > STORE_CAPACITY {
            let evicted = self.entries.remove(0);
            debug!(title = %evicted.title, "Evicted oldest recommendation");
            InsertOutcome::InsertedWithEviction(evicted)
        } else {
            InsertOutcome::Inserted
        }
    }

    /// Insert each recommendation in order
    pub fn extend<I>(&mut self, recommendations: I) -> Vec<InsertOutcome>
    where
        I: IntoIterator<Item = Recommendation>,
    {
        recommendations.into_iter().map(|rec| self.insert(rec)).collect()
    }

    /// Entries oldest first
    pub fn list(&self) -> &[Recommendation] {
        &self.entries
    }

    pub fn contains_title(&self, title: &str) -> bool {
        self.entries.iter().any(|r| r.title == title)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Priority};

    fn rec(title: &str) -> Recommendation {
        Recommendation::new(Category::General, title, format!("about {}", title), Priority::Low)
    }

    fn titles(store: &RecommendationStore) -> Vec<&str> {
        store.list().iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_sixth_insert_evicts_oldest() {
        let mut store = RecommendationStore::new();
        for title in ["A", "B", "C", "D", "E"] {
            assert_eq!(store.insert(rec(title)), InsertOutcome::Inserted);
        }

        match store.insert(rec("F")) {
            InsertOutcome::InsertedWithEviction(evicted) => assert_eq!(evicted.title, "A"),
            other => panic!("expected eviction, got {:?}", other),
        }
        assert_eq!(titles(&store), vec!["B", "C", "D", "E", "F"]);
    }

    #[test]
    fn test_duplicate_title_keeps_first() {
        let mut store = RecommendationStore::new();
        let first = rec("A");
        let first_id = first.id.clone();

        store.insert(first);
        let mut second = rec("A");
        second.description = "different text".to_string();
        assert_eq!(store.insert(second), InsertOutcome::Duplicate);

        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].id, first_id);
        assert_eq!(store.list()[0].description, "about A");
    }

    #[test]
    fn test_title_match_is_case_sensitive() {
        let mut store = RecommendationStore::new();
        store.insert(rec("Great work!"));
        store.insert(rec("great work!"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_duplicate_on_full_store_evicts_nothing() {
        let mut store = RecommendationStore::new();
        store.extend(["A", "B", "C", "D", "E"].into_iter().map(rec));
        assert_eq!(store.insert(rec("C")), InsertOutcome::Duplicate);
        assert_eq!(titles(&store), vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_evicted_title_can_return() {
        let mut store = RecommendationStore::new();
        store.extend(["A", "B", "C", "D", "E", "F"].into_iter().map(rec));
        assert!(!store.contains_title("A"));

        store.insert(rec("A"));
        assert_eq!(titles(&store), vec!["C", "D", "E", "F", "A"]);
    }

    #[test]
    fn test_clear() {
        let mut store = RecommendationStore::new();
        store.insert(rec("A"));
        store.clear();
        assert!(store.is_empty());
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_store_invariants(titles in prop::collection::vec("[a-d]{1,2}", 0..40)) {
            let mut store = RecommendationStore::new();
            for title in &titles {
                let before = store.len();
                store.insert(rec(title));
                prop_assert!(store.len() <= STORE_CAPACITY);
                prop_assert!(store.len() >= before);
            }

            let mut seen: Vec<&str> = store.list().iter().map(|r| r.title.as_str()).collect();
            seen.sort();
            let total = seen.len();
            seen.dedup();
            prop_assert_eq!(seen.len(), total);
        }
    }
}
