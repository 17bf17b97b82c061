//! Per-run term resolution cache.
use std::collections::HashMap;

use super::TermQuery;

/// Normalized term → resolved sentence (or known absence).
///
/// Grows during a run and is never invalidated.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: HashMap<String, Option<String>>,
    hits: usize,
}

impl ResultCache {
    /// Cached resolution for `term`.
    ///
    /// The outer [Option] tells whether the term was already resolved,
    /// the inner one whether a sentence was found.
    pub fn get(&mut self, term: &str) -> Option<Option<&str>> {
        let entry = self.entries.get(&TermQuery::normalize(term))?;
        self.hits += 1;
        Some(entry.as_deref())
    }

    pub fn insert(&mut self, term: &str, sentence: Option<String>) {
        self.entries.insert(TermQuery::normalize(term), sentence);
    }

    /// Number of resolved terms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of lookups answered from the cache.
    pub fn hits(&self) -> usize {
        self.hits
    }
}

#[cfg(test)]
mod tests {
    use super::ResultCache;

    #[test]
    fn normalized_keys() {
        let mut cache = ResultCache::default();
        assert!(cache.get("Market").is_none());

        cache.insert(" Market ", Some("The market is open.".to_string()));
        cache.insert("xenon", None);

        assert_eq!(cache.get("market"), Some(Some("The market is open.")));
        assert_eq!(cache.get("MARKET"), Some(Some("The market is open.")));
        assert_eq!(cache.get("Xenon"), Some(None));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.hits(), 3);
    }
}
