/*! Term to sentence retrieval.

- [InvertedIndex] maps lowercased tokens to the sentences containing them.
- [TermQuery] holds the match pattern and lookup variants of a vocabulary term.
- [Retriever] resolves a term to its best qualifying sentence, with or without index.
- [ResultCache] remembers resolutions for repeated terms.
!*/
mod cache;
mod inverted;
mod query;
mod retriever;

pub use cache::ResultCache;
pub use inverted::InvertedIndex;
pub use query::TermQuery;
pub use retriever::{select, Retriever, Selection};

/// Reference to a sentence: document index in the corpus, sentence index in the document.
///
/// Ordering follows the corpus iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Posting {
    pub doc: usize,
    pub sentence: usize,
}
