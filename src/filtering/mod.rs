/*! Filtering utilities

Sentence candidates go through a set of small filters before being proposed as an example sentence.

Each filter implements [filter::Filter] and checks one thing (word bounds, casing, punctuation density, boilerplate…).
[quality::QualityFilter] chains all of them with the thresholds of a [quality::QualityConfig].
!*/
mod filter;
mod lexicon;
mod quality;
pub mod sentence;

pub use filter::Filter;
pub use quality::{QualityConfig, QualityFilter};
