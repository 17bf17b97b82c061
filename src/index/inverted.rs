//! Token to sentence inverted index.
use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use log::{debug, info};

use super::{Posting, TermQuery};
use crate::corpus::Corpus;
use crate::text::tokenize;

/// Read-only mapping from lowercased word tokens to the sentences containing them.
///
/// Besides the token itself, each word is indexed under every piece that starts and ends at an
/// apostrophe or at a token end (`cats'` → `cats`, `give'em` → `give`, `give'`, `'em`, `em`),
/// so that every sentence an [indexable](TermQuery::is_indexable) term matches is reachable
/// through one of its variants.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, Vec<Posting>>,
}

impl InvertedIndex {
    /// Index every sentence of the corpus.
    ///
    /// Tokens are recorded once per sentence, and postings end up sorted in corpus order.
    pub fn build(corpus: &Corpus) -> Self {
        info!("Building inverted index");
        let mut postings: HashMap<String, Vec<Posting>> = HashMap::new();
        let mut forms = HashSet::new();

        for (posting, sentence) in corpus.sentences() {
            forms.clear();
            for token in tokenize(sentence).filter(|t| is_word(t)) {
                forms.extend(index_forms(token));
            }

            for form in forms.drain() {
                postings.entry(form).or_default().push(posting);
            }
        }

        let index = Self { postings };
        info!("Indexed {} unique tokens", index.nb_tokens());
        index
    }

    /// Postings of a single (already lowercased) token.
    pub fn postings(&self, token: &str) -> &[Posting] {
        self.postings.get(token).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Union of the postings of every query variant, deduplicated and in corpus order.
    pub fn lookup(&self, query: &TermQuery) -> Vec<Posting> {
        let candidates: Vec<Posting> = query
            .variants()
            .iter()
            .map(|variant| self.postings(variant).iter().copied())
            .kmerge()
            .dedup()
            .collect();

        debug!(
            "{:?}: {} candidate sentences from index",
            query.term(),
            candidates.len()
        );
        candidates
    }

    /// Number of distinct indexed forms.
    pub fn nb_tokens(&self) -> usize {
        self.postings.len()
    }
}

/// Word tokens are made of ascii letters and apostrophes, with at least one letter.
pub(super) fn is_word(token: &str) -> bool {
    token.chars().all(|c| c.is_ascii_alphabetic() || c == '\'')
        && token.chars().any(|c| c.is_ascii_alphabetic())
}

/// Lowercased pieces of `token` bounded by apostrophes or token ends, the whole token included.
fn index_forms(token: &str) -> Vec<String> {
    let lowered = token.to_ascii_lowercase();
    let bytes = lowered.as_bytes();
    let bounds: Vec<usize> = (0..=bytes.len())
        .filter(|&i| {
            i == 0
                || i == bytes.len()
                || bytes[i] == b'\''
                || bytes[i - 1] == b'\''
        })
        .collect();

    bounds
        .iter()
        .tuple_combinations()
        .map(|(&start, &end)| &lowered[start..end])
        .filter(|piece| piece.bytes().any(|b| b.is_ascii_alphabetic()))
        .map(str::to_string)
        .collect()
}
