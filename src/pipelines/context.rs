//! Run context: everything built once and used for every term.
use std::path::Path;

use crate::corpus::Corpus;
use crate::error::Error;
use crate::filtering::QualityFilter;
use crate::index::{InvertedIndex, ResultCache, Retriever, Selection, TermQuery};
use crate::remote::Fallback;
use crate::text::Segmenter;

/// Where a resolved sentence came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Cache,
    Local,
    Remote,
}

/// Preloaded corpus, its index, the quality filter, the result cache and the optional remote fallback.
pub struct Context<'s> {
    corpus: Corpus,
    index: InvertedIndex,
    filter: QualityFilter,
    selection: Selection,
    cache: ResultCache,
    fallback: Option<Fallback<'s>>,
}

impl<'s> Context<'s> {
    pub fn new(corpus: Corpus, filter: QualityFilter, selection: Selection) -> Self {
        let index = InvertedIndex::build(&corpus);
        Self {
            corpus,
            index,
            filter,
            selection,
            cache: ResultCache::default(),
            fallback: None,
        }
    }

    /// Load and segment every source file of `sources_dir`, then index them.
    pub fn load(
        sources_dir: &Path,
        filter: QualityFilter,
        selection: Selection,
    ) -> Result<Self, Error> {
        let corpus = Corpus::from_dir(sources_dir, &Segmenter::default())?;
        Ok(Self::new(corpus, filter, selection))
    }

    pub fn with_fallback(mut self, fallback: Fallback<'s>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Resolve `term`: cache first, then local corpus, then remote fallback.
    ///
    /// The outcome is cached, absence included.
    pub fn resolve(&mut self, term: &str) -> Result<Option<(String, Origin)>, Error> {
        if let Some(cached) = self.cache.get(term) {
            return Ok(cached.map(|s| (s.to_string(), Origin::Cache)));
        }

        let query = TermQuery::new(term)?;
        let retriever =
            Retriever::new(&self.corpus, &self.filter, self.selection).with_index(&self.index);

        let found = match retriever.retrieve(&query) {
            Some(sentence) => Some((sentence.to_string(), Origin::Local)),
            None => self
                .fallback
                .as_mut()
                .and_then(|fallback| fallback.find(&query))
                .map(|sentence| (sentence, Origin::Remote)),
        };

        self.cache
            .insert(term, found.as_ref().map(|(sentence, _)| sentence.clone()));
        Ok(found)
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Number of lookups answered by the cache.
    pub fn cache_hits(&self) -> usize {
        self.cache.hits()
    }

    /// Number of remote requests issued.
    pub fn remote_requests(&self) -> usize {
        self.fallback.as_ref().map_or(0, Fallback::nb_requests)
    }
}
