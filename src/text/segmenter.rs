//! Sentence segmentation.
//!
//! Text is split after `.`, `!` or `?` (optionally followed by closing quotes/brackets) and whitespace.
//! Fragments whose last token looks like an abbreviation are merged back with the following one,
//! so that `Dr. Smith arrived.` stays in one piece.
use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use super::normalize_ws;

lazy_static! {
    static ref BOUNDARY_RE: Regex = Regex::new(r#"[.!?]["'”’)\]]*\s+"#).unwrap();
    static ref ABBREV_TOKEN_RE: Regex = Regex::new(r"[A-Za-z]+\.?|[0-9]+|[^\sA-Za-z0-9]").unwrap();
    static ref SHORT_ABBREV_RE: Regex = Regex::new(r"\b[A-Za-z]{1,3}\.$").unwrap();
}

/// Abbreviations that end with a period but should not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    // titles
    "mr.", "mrs.", "ms.", "dr.", "prof.", "sr.", "jr.", "st.", "mt.", "rev.", "fr.",
    // references
    "no.", "vol.", "fig.", "ch.", "pp.", "pg.", "dept.", "dept", "inc.", "co.", "corp.",
    // months
    "jan.", "feb.", "mar.", "apr.", "jun.", "jul.", "aug.", "sep.", "sept.", "oct.", "nov.", "dec.",
    "vs.",
];

/// Abbreviation-aware sentence splitter.
pub struct Segmenter {
    abbreviations: HashSet<&'static str>,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self {
            abbreviations: ABBREVIATIONS.iter().copied().collect(),
        }
    }
}

impl Segmenter {
    /// Split `text` into sentences.
    ///
    /// Whitespace is collapsed first. Empty input yields no sentence,
    /// and a trailing fragment without terminator is kept as is.
    pub fn segment(&self, text: &str) -> Vec<String> {
        let text = normalize_ws(text);
        if text.is_empty() {
            return Vec::new();
        }

        let mut parts = Self::split_raw(&text);
        let first = match parts.next() {
            Some(first) => first,
            None => return Vec::new(),
        };

        let mut merged = Vec::new();
        let mut buffer = first.to_string();
        // the last token of the buffer always belongs to the last appended piece
        let mut last_piece_abbrev = self.ends_with_abbreviation(first);

        for piece in parts {
            if last_piece_abbrev {
                buffer.push(' ');
                buffer.push_str(piece);
            } else {
                merged.push(std::mem::replace(&mut buffer, piece.to_string()));
            }
            last_piece_abbrev = self.ends_with_abbreviation(piece);
        }
        merged.push(buffer);

        merged
    }

    /// First pass: cut at every boundary, keeping the terminator on the left side.
    /// Closing quotes/brackets and whitespace belong to the boundary.
    fn split_raw(text: &str) -> impl Iterator<Item = &str> {
        let mut pieces = Vec::new();
        let mut start = 0;
        for boundary in BOUNDARY_RE.find_iter(text) {
            // terminators are ascii, so +1 stays on a char boundary
            pieces.push(&text[start..boundary.start() + 1]);
            start = boundary.end();
        }
        pieces.push(&text[start..]);

        pieces.into_iter().map(str::trim).filter(|p| !p.is_empty())
    }

    /// Checks whether the last token of `fragment` is a known or generic (1 to 3 letters) abbreviation.
    fn ends_with_abbreviation(&self, fragment: &str) -> bool {
        let last = match ABBREV_TOKEN_RE.find_iter(fragment).last() {
            Some(token) => token.as_str().to_lowercase(),
            None => return false,
        };

        self.abbreviations.contains(last.as_str()) || SHORT_ABBREV_RE.is_match(&last)
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::Segmenter;

    #[test]
    fn abbreviation_not_split() {
        let s = Segmenter::default();
        assert_eq!(
            s.segment("Dr. Smith arrived. He left."),
            vec!["Dr. Smith arrived.", "He left."]
        );
    }

    #[test]
    fn months_and_references() {
        let s = Segmenter::default();
        let sentences = s.segment("It opened on Sept. 4 last year. See fig. 2 for details!");
        assert_eq!(
            sentences,
            vec!["It opened on Sept. 4 last year.", "See fig. 2 for details!"]
        );
    }

    #[test]
    fn closing_quotes_belong_to_boundary() {
        let s = Segmenter::default();
        let sentences = s.segment("She said \"Come inside.\" Then she waited (quietly.) Done?");
        assert_eq!(
            sentences,
            vec!["She said \"Come inside.", "Then she waited (quietly.", "Done?"]
        );
    }

    #[test]
    fn newlines_collapsed() {
        let s = Segmenter::default();
        let sentences = s.segment("The river\nwas wide.\n\nThe boat\twas small!");
        assert_eq!(sentences, vec!["The river was wide.", "The boat was small!"]);
    }

    #[test]
    fn empty_and_unterminated() {
        let s = Segmenter::default();
        assert!(s.segment("").is_empty());
        assert!(s.segment("   \n\t").is_empty());
        assert_eq!(s.segment("no terminator at all"), vec!["no terminator at all"]);
        assert_eq!(
            s.segment("Complete sentence here. trailing bit"),
            vec!["Complete sentence here.", "trailing bit"]
        );
    }

    #[test]
    fn idempotent() {
        let s = Segmenter::default();
        let texts = [
            "Dr. Smith arrived. He left.",
            "Mr. and Mrs. Brown live on Baker St. near the park. They have a dog!",
            "\"Where?\" he asked. \"There,\" she said. It was Jan. 5 and cold. Was it?",
            "I saw him. He saw me. We left at noon.",
            "A. B. Jones wrote it... Then nothing happened?! Really.",
            "no punctuation whatsoever",
        ];
        for text in texts {
            let first = s.segment(text);
            let second = s.segment(&first.iter().join(" "));
            assert_eq!(first, second, "not idempotent on {:?}", text);
        }
    }
}
