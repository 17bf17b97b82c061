//! Best sentence selection for a term.
use log::debug;

use super::{InvertedIndex, TermQuery};
use crate::corpus::Corpus;
use crate::filtering::{Filter, QualityFilter};
use crate::text::{strip_outer_quotes, word_count};

/// Which qualifying sentence wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// First qualifying sentence, in corpus order. Stops at the first hit.
    #[default]
    First,
    /// Qualifying sentence with the fewest words. Ties keep the first one seen.
    Shortest,
}

/// Pick a sentence among `candidates`: it has to match the query and pass the filter.
pub fn select<'s, I>(
    candidates: I,
    query: &TermQuery,
    filter: &QualityFilter,
    selection: Selection,
) -> Option<&'s str>
where
    I: IntoIterator<Item = &'s str>,
{
    let mut best: Option<(&'s str, usize)> = None;

    for candidate in candidates {
        if !query.matches(candidate) || filter.rejects(candidate) {
            continue;
        }

        match selection {
            Selection::First => return Some(candidate),
            Selection::Shortest => {
                let nb_words = word_count(candidate);
                if best.map_or(true, |(_, best_words)| nb_words < best_words) {
                    best = Some((candidate, nb_words));
                }
            }
        }
    }

    best.map(|(sentence, _)| sentence)
}

/// Resolves terms against a corpus, through the index when one is provided.
pub struct Retriever<'a> {
    corpus: &'a Corpus,
    index: Option<&'a InvertedIndex>,
    filter: &'a QualityFilter,
    selection: Selection,
}

impl<'a> Retriever<'a> {
    /// Retriever doing linear scans only.
    pub fn new(corpus: &'a Corpus, filter: &'a QualityFilter, selection: Selection) -> Self {
        Self {
            corpus,
            index: None,
            filter,
            selection,
        }
    }

    /// Use `index` to narrow down candidates.
    pub fn with_index(mut self, index: &'a InvertedIndex) -> Self {
        self.index = Some(index);
        self
    }

    /// Get the best sentence for `query`.
    ///
    /// Terms the index cannot answer (phrases, hyphenated or non-ascii terms) and terms without
    /// postings for any variant are resolved by scanning every sentence of the corpus.
    pub fn retrieve(&self, query: &TermQuery) -> Option<&'a str> {
        let corpus = self.corpus;
        if let Some(index) = self.index.filter(|_| query.is_indexable()) {
            let candidates = index.lookup(query);
            if !candidates.is_empty() {
                return select(
                    candidates
                        .iter()
                        .filter_map(|posting| corpus.sentence(*posting))
                        .map(strip_outer_quotes),
                    query,
                    self.filter,
                    self.selection,
                );
            }
            debug!("{:?}: no postings, scanning corpus", query.term());
        }

        self.scan(query)
    }

    /// Linear scan over the whole corpus.
    pub fn scan(&self, query: &TermQuery) -> Option<&'a str> {
        let corpus = self.corpus;
        select(
            corpus.sentences().map(|(_, s)| strip_outer_quotes(s)),
            query,
            self.filter,
            self.selection,
        )
    }
}
