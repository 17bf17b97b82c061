//! sentence-level filtering
//!
//! Each filter checks a single property of a candidate sentence.
//! They are chained by [super::QualityFilter], but can be used on their own.
use lazy_static::lazy_static;
use regex::Regex;
use unic_ucd::GeneralCategory;

use super::lexicon::{FUNCTION_WORDS_SET, VERB_LIKE_SET};
use super::Filter;
use crate::text::word_count;

lazy_static! {
    static ref LETTER_RUN_RE: Regex = Regex::new(r"[A-Za-z]+").unwrap();
    static ref ABBREVIATION_RE: Regex = Regex::new(r"\b[A-Za-z]{1,3}\.\b").unwrap();
    static ref WORD_RE: Regex = Regex::new(r"[A-Za-z']+").unwrap();
}

#[inline]
fn is_letter(c: char) -> bool {
    GeneralCategory::of(c).is_letter()
}

/// `true` if there is at least one cased character and none of them is lowercase.
fn is_all_caps(s: &str) -> bool {
    s.chars().any(char::is_uppercase) && !s.chars().any(char::is_lowercase)
}

/// Inclusive bounds on the number of whitespace-separated words.
///
/// Default bounds are `[6, 28]`.
pub struct WordBounds {
    min: usize,
    max: usize,
}

impl WordBounds {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }
}

impl Default for WordBounds {
    fn default() -> Self {
        Self { min: 6, max: 28 }
    }
}

impl Filter<&str> for WordBounds {
    fn detect(&self, sentence: &str) -> bool {
        (self.min..=self.max).contains(&word_count(sentence))
    }
}

/// Sentence must end with `.`, `!` or `?`.
#[derive(Default)]
pub struct Terminated;

impl Filter<&str> for Terminated {
    fn detect(&self, sentence: &str) -> bool {
        sentence.ends_with(&['.', '!', '?'][..])
    }
}

/// The first letter of the sentence must be uppercase.
#[derive(Default)]
pub struct Capitalized;

impl Filter<&str> for Capitalized {
    fn detect(&self, sentence: &str) -> bool {
        sentence
            .chars()
            .find(|c| is_letter(*c))
            .map_or(false, char::is_uppercase)
    }
}

/// Licensing/website noise (case-insensitive substrings).
pub struct Boilerplate {
    markers: Vec<String>,
}

impl Boilerplate {
    /// Markers are lowercased.
    pub fn new(markers: &[String]) -> Self {
        Self {
            markers: markers.iter().map(|m| m.to_lowercase()).collect(),
        }
    }
}

pub(crate) fn default_boilerplate_markers() -> Vec<String> {
    [
        "project gutenberg",
        "all rights reserved",
        "copyright",
        "ebook",
        "http://",
        "https://",
    ]
    .iter()
    .map(|m| m.to_string())
    .collect()
}

impl Default for Boilerplate {
    fn default() -> Self {
        Self::new(&default_boilerplate_markers())
    }
}

impl Filter<&str> for Boilerplate {
    fn detect(&self, sentence: &str) -> bool {
        let lowered = sentence.to_lowercase();
        !self.markers.iter().any(|m| lowered.contains(m.as_str()))
    }
}

/// Shouting and odd punctuation: all caps text, repeated ellipses, too many `!`/`?`.
pub struct Shouting {
    max_ellipses: usize,
    max_exclamations: usize,
    max_questions: usize,
}

impl Shouting {
    pub fn new(max_ellipses: usize, max_exclamations: usize, max_questions: usize) -> Self {
        Self {
            max_ellipses,
            max_exclamations,
            max_questions,
        }
    }
}

impl Default for Shouting {
    fn default() -> Self {
        Self::new(1, 2, 2)
    }
}

impl Filter<&str> for Shouting {
    fn detect(&self, sentence: &str) -> bool {
        !(is_all_caps(sentence)
            || sentence.matches("...").count() > self.max_ellipses
            || sentence.matches('!').count() > self.max_exclamations
            || sentence.matches('?').count() > self.max_questions)
    }
}

/// Headings and metadata that look like prose at first sight.
///
/// Rejects when the letter ratio is too low, or when structural glyphs,
/// digits, ALL-CAPS tokens or short abbreviations are too frequent.
pub struct Prose {
    min_alpha_ratio: f64,
    glyphs: Vec<char>,
    digit_limit: usize,
    caps_token_limit: usize,
    abbreviation_limit: usize,
}

impl Prose {
    /// Limits are exclusive: a sentence with `digit_limit` digits is rejected.
    pub fn new(
        min_alpha_ratio: f64,
        glyphs: Vec<char>,
        digit_limit: usize,
        caps_token_limit: usize,
        abbreviation_limit: usize,
    ) -> Self {
        Self {
            min_alpha_ratio,
            glyphs,
            digit_limit,
            caps_token_limit,
            abbreviation_limit,
        }
    }

    fn alpha_ratio(sentence: &str) -> f64 {
        let (letters, total) = sentence
            .chars()
            .fold((0usize, 0usize), |(l, t), c| (l + is_letter(c) as usize, t + 1));
        letters as f64 / total.max(1) as f64
    }
}

impl Default for Prose {
    fn default() -> Self {
        Self::new(0.7, vec!['_', '•', '§', '¶'], 3, 2, 2)
    }
}

impl Filter<&str> for Prose {
    fn detect(&self, sentence: &str) -> bool {
        if Self::alpha_ratio(sentence) < self.min_alpha_ratio {
            return false;
        }

        if sentence.contains(self.glyphs.as_slice()) {
            return false;
        }

        let digits = sentence
            .chars()
            .filter(|c| GeneralCategory::of(*c) == GeneralCategory::DecimalNumber)
            .count();
        if digits >= self.digit_limit {
            return false;
        }

        let caps_tokens = LETTER_RUN_RE
            .find_iter(sentence)
            .filter(|t| t.as_str().len() > 2 && is_all_caps(t.as_str()))
            .count();
        if caps_tokens >= self.caps_token_limit {
            return false;
        }

        ABBREVIATION_RE.find_iter(sentence).count() < self.abbreviation_limit
    }
}

/// Lexical plausibility: keeps sentences with enough function words or a verb-like token.
///
/// Only sentences lacking both are rejected.
pub struct Lexical {
    min_function_words: usize,
}

impl Lexical {
    pub fn new(min_function_words: usize) -> Self {
        Self { min_function_words }
    }
}

impl Default for Lexical {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Filter<&str> for Lexical {
    fn detect(&self, sentence: &str) -> bool {
        let mut function_words = 0;
        let mut verb = false;
        for word in WORD_RE.find_iter(sentence) {
            let word = word.as_str().to_lowercase();
            if FUNCTION_WORDS_SET.contains(word.as_str()) {
                function_words += 1;
            }
            verb |= VERB_LIKE_SET.contains(word.as_str());
        }

        function_words >= self.min_function_words || verb
    }
}
