//! Vocabulary term queries.
use itertools::Itertools;
use regex::Regex;

use super::inverted::is_word;
use crate::error::Error;

/// A vocabulary term, with its match pattern and index lookup variants.
///
/// The pattern matches the term as a whole word, or followed by `'s`, `s` or `es`
/// (case-insensitive): `cat` matches `cats` and `cat's`, not `category`.
/// Ascii terms only fold ascii case: `kat` does not match a word spelled with the Kelvin sign.
#[derive(Debug, Clone)]
pub struct TermQuery {
    term: String,
    key: String,
    pattern: Regex,
    variants: Vec<String>,
}

impl TermQuery {
    pub fn new(term: &str) -> Result<Self, Error> {
        let term = term.trim();
        let escaped = regex::escape(term);
        let flags = if term.is_ascii() { "i-u" } else { "i" };
        let pattern = Regex::new(&format!(
            r"\b(?{1}:{0})\b|\b(?{1}:{0}(?:'s|s|es))\b",
            escaped, flags
        ))?;

        let key = Self::normalize(term);
        let variants = [
            key.clone(),
            format!("{}'s", key),
            format!("{}s", key),
            format!("{}es", key),
        ]
        .into_iter()
        .unique()
        .collect();

        Ok(Self {
            term: term.to_string(),
            key,
            pattern,
            variants,
        })
    }

    /// Normalized form of a term, used for caching.
    pub fn normalize(term: &str) -> String {
        term.trim().to_lowercase()
    }

    /// Get a reference to the trimmed term, original casing.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Get a reference to the normalized term.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Lowercased surface forms looked up in the index: plain, possessive, plural `-s`, plural `-es`.
    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    /// Whether the index holds every sentence this query matches.
    ///
    /// Only single words made of ascii letters and apostrophes are. Phrases, hyphenated
    /// and non-ascii terms have to be resolved by scanning.
    pub fn is_indexable(&self) -> bool {
        is_word(&self.key)
    }

    pub fn matches(&self, sentence: &str) -> bool {
        self.pattern.is_match(sentence)
    }
}
