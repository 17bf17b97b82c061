//! Closed word lists used to tell prose from fragments and headings.
use std::collections::HashSet;

use lazy_static::lazy_static;

/// Articles, determiners, prepositions, conjunctions, pronouns and auxiliaries.
const FUNCTION_WORDS: &str = "
the a an to and of in that for with on at as by from is are was were be been being
have has had do does did can could will would shall should may might must
i you he she we they it this these those
my your his her its our their every each some any all no
";

/// Auxiliaries and the most frequent irregular verbs with their inflections.
const VERB_LIKE: &str = "
is are was were be been being have has had do does did can could will would shall should may might must
go goes went gone make makes made say says said see sees saw seen know knows knew known think thinks thought
come comes came take takes took taken give gives gave given tell tells told ask asks asked want wants wanted
";

lazy_static! {
    pub static ref FUNCTION_WORDS_SET: HashSet<&'static str> =
        FUNCTION_WORDS.split_whitespace().collect();
    pub static ref VERB_LIKE_SET: HashSet<&'static str> = VERB_LIKE.split_whitespace().collect();
}
