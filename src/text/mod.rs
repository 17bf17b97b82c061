/*! Text normalization utilities.

Small, allocation-light helpers shared by the extractor, the segmenter, the
filters and the retriever. All of them operate on already decoded text.
!*/
mod segmenter;

pub use segmenter::Segmenter;

use std::borrow::Cow;

use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TAG_RE: Regex = Regex::new(r"<[^>]+>").unwrap();
    static ref TOKEN_RE: Regex = Regex::new(r"[A-Za-z']+|[0-9]+|[^\sA-Za-z0-9]").unwrap();
    static ref FIRST_SENTENCE_RE: Regex =
        Regex::new(r#"^(?s)(.*?[.!?])["'”’)\]]*(?:\s|$)"#).unwrap();
}

/// Characters stripped from both ends of a candidate sentence.
const OUTER_QUOTES: &[char] = &[' ', '\'', '"', '“', '”', '‘', '’'];

/// Collapse every whitespace run into a single space and trim.
pub fn normalize_ws(text: &str) -> String {
    text.split_whitespace().join(" ")
}

/// Remove leading and trailing quotes (straight or curly) and spaces.
pub fn strip_outer_quotes(s: &str) -> &str {
    s.trim_matches(OUTER_QUOTES)
}

/// Unescape entities first (so that `&lt;b&gt;` becomes a tag), then replace tags with spaces.
pub fn strip_html(text: &str) -> String {
    let unescaped = html_escape::decode_html_entities(text);
    let untagged = TAG_RE.replace_all(&unescaped, " ");
    normalize_ws(&untagged)
}

/// Keep only the first sentence of `text`.
///
/// A closing quote or bracket may follow the terminator; it is dropped.
/// Text without any terminator is returned whole (normalized).
pub fn first_sentence(text: &str) -> Cow<'_, str> {
    let text = normalize_ws(text);
    match FIRST_SENTENCE_RE.captures(&text) {
        Some(caps) => Cow::Owned(caps[1].trim().to_string()),
        None => Cow::Owned(text),
    }
}

/// Split a sentence into words (letters and apostrophes), digit runs and single other characters.
pub fn tokenize(s: &str) -> impl Iterator<Item = &str> {
    TOKEN_RE.find_iter(s).map(|m| m.as_str())
}

/// Whitespace-separated word count.
#[inline]
pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize() {
        assert_eq!(normalize_ws("  foo\n\tbar   baz \r\n"), "foo bar baz");
        assert_eq!(normalize_ws(" \n "), "");
    }

    #[test]
    fn outer_quotes() {
        assert_eq!(strip_outer_quotes("“Come here.”"), "Come here.");
        assert_eq!(strip_outer_quotes(" 'It is late.' "), "It is late.");
        assert_eq!(strip_outer_quotes("Plain."), "Plain.");
    }

    #[test]
    fn html() {
        let text = "<p>Fish &amp; chips</p>\n<p>are &lt;b&gt;good&lt;/b&gt;.</p>";
        assert_eq!(strip_html(text), "Fish & chips are good .");
    }

    #[test]
    fn first_sentence_only() {
        assert_eq!(first_sentence("He ran. She walked."), "He ran.");
        assert_eq!(first_sentence("\"Stop!\" she said."), "\"Stop!");
        assert_eq!(first_sentence("no terminator here"), "no terminator here");
        assert_eq!(first_sentence("Ends here."), "Ends here.");
    }

    #[test]
    fn tokens() {
        let toks: Vec<&str> = tokenize("The cat's 42 toys, rock-solid.").collect();
        assert_eq!(
            toks,
            vec!["The", "cat's", "42", "toys", ",", "rock", "-", "solid", "."]
        );
    }

    #[test]
    fn words() {
        assert_eq!(word_count("one two  three\nfour"), 4);
        assert_eq!(word_count(""), 0);
    }
}
