//! Composite sentence quality filter.
use log::debug;

use super::sentence::{
    default_boilerplate_markers, Boilerplate, Capitalized, Lexical, Prose, Shouting, Terminated,
    WordBounds,
};
use super::Filter;

/// Thresholds of the quality filter.
///
/// The defaults are tuned on English fiction; they are heuristics, not rules.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityConfig {
    pub min_words: usize,
    pub max_words: usize,
    pub boilerplate_markers: Vec<String>,
    pub max_ellipses: usize,
    pub max_exclamations: usize,
    pub max_questions: usize,
    pub min_alpha_ratio: f64,
    pub structural_glyphs: Vec<char>,
    /// sentences with this many digits (or more) are rejected
    pub digit_limit: usize,
    /// sentences with this many ALL-CAPS tokens (or more) are rejected
    pub caps_token_limit: usize,
    /// sentences with this many short abbreviations (or more) are rejected
    pub abbreviation_limit: usize,
    pub min_function_words: usize,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            min_words: 6,
            max_words: 28,
            boilerplate_markers: default_boilerplate_markers(),
            max_ellipses: 1,
            max_exclamations: 2,
            max_questions: 2,
            min_alpha_ratio: 0.7,
            structural_glyphs: vec!['_', '•', '§', '¶'],
            digit_limit: 3,
            caps_token_limit: 2,
            abbreviation_limit: 2,
            min_function_words: 2,
        }
    }
}

impl QualityConfig {
    /// Same thresholds, other word bounds.
    pub fn with_bounds(&self, min_words: usize, max_words: usize) -> Self {
        Self {
            min_words,
            max_words,
            ..self.clone()
        }
    }
}

/// Accepts a sentence only if every component filter does.
///
/// Checks run from the cheapest to the most expensive one and stop at the first rejection.
pub struct QualityFilter {
    bounds: WordBounds,
    terminated: Terminated,
    capitalized: Capitalized,
    boilerplate: Boilerplate,
    shouting: Shouting,
    prose: Prose,
    lexical: Lexical,
}

impl QualityFilter {
    pub fn new(config: &QualityConfig) -> Self {
        Self {
            bounds: WordBounds::new(config.min_words, config.max_words),
            terminated: Terminated,
            capitalized: Capitalized,
            boilerplate: Boilerplate::new(&config.boilerplate_markers),
            shouting: Shouting::new(
                config.max_ellipses,
                config.max_exclamations,
                config.max_questions,
            ),
            prose: Prose::new(
                config.min_alpha_ratio,
                config.structural_glyphs.clone(),
                config.digit_limit,
                config.caps_token_limit,
                config.abbreviation_limit,
            ),
            lexical: Lexical::new(config.min_function_words),
        }
    }
}

impl Default for QualityFilter {
    fn default() -> Self {
        Self::new(&QualityConfig::default())
    }
}

impl Filter<&str> for QualityFilter {
    fn detect(&self, sentence: &str) -> bool {
        let rejected_by = if self.bounds.rejects(sentence) {
            Some("word bounds")
        } else if self.terminated.rejects(sentence) {
            Some("terminator")
        } else if self.capitalized.rejects(sentence) {
            Some("capitalization")
        } else if self.boilerplate.rejects(sentence) {
            Some("boilerplate")
        } else if self.shouting.rejects(sentence) {
            Some("punctuation")
        } else if self.prose.rejects(sentence) {
            Some("prose")
        } else if self.lexical.rejects(sentence) {
            Some("lexical")
        } else {
            None
        };

        match rejected_by {
            Some(reason) => {
                debug!("rejected ({}): {:?}", reason, sentence);
                false
            }
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::text::word_count;

    use super::*;

    #[test]
    fn accepts_plain_prose() {
        let f = QualityFilter::new(&QualityConfig::default().with_bounds(6, 22));
        assert!(f.detect("The old market sells fresh bread every morning."));
        assert!(f.detect("She went to the station before the rain started."));
    }

    #[test]
    fn rejects() {
        let f = QualityFilter::default();
        let rejected = [
            // too short
            "He went home.",
            // no terminator
            "She went to the station before the rain started",
            // lowercase start
            "she went to the station before the rain started.",
            // boilerplate
            "This eBook is for the use of anyone anywhere at no cost.",
            // shouting
            "SHE WENT TO THE STATION BEFORE THE RAIN STARTED.",
            // heading
            "CHAPTER ONE in which THE hero is born and raised.",
            // fragment
            "Green fields, blue skies, quiet mornings, long evenings.",
        ];
        for sentence in rejected {
            assert!(f.rejects(sentence), "should reject {:?}", sentence);
        }
    }

    #[test]
    fn accepted_sentences_hold_invariants() {
        let config = QualityConfig::default().with_bounds(5, 12);
        let f = QualityFilter::new(&config);
        let candidates = [
            "The cat sat on the mat by the door.",
            "Is it raining in the city today?",
            "what a day it has been for all of us.",
            "They said it was over!",
            "A very long sentence that keeps going and going and going until it is far too long.",
            "Nothing here",
            "We were late, but we had a good time at the party.",
        ];
        let accepted: Vec<&str> = candidates.iter().copied().filter(|s| f.detect(s)).collect();
        assert!(!accepted.is_empty());
        for s in accepted {
            let n = word_count(s);
            assert!((5..=12).contains(&n));
            assert!(s.ends_with(&['.', '!', '?'][..]));
            let first = s.chars().find(|c| c.is_alphabetic()).unwrap();
            assert!(first.is_uppercase());
        }
    }

    #[test]
    fn bounds_override() {
        let base = QualityConfig::default();
        let other = base.with_bounds(2, 4);
        assert_eq!(other.min_words, 2);
        assert_eq!(other.max_words, 4);
        assert_eq!(other.min_alpha_ratio, base.min_alpha_ratio);
    }
}
