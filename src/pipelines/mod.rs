//! Pipelines.
//!
//! [SentenceFill] fills a vocabulary table with example sentences,
//! [TermSearch] prints the sentence selected for a few terms.
//! Both share a [Context] and implement the light [pipeline::Pipeline] trait.
mod context;
mod fill;
#[allow(clippy::module_inception)]
pub mod pipeline;
mod search;

pub use context::{Context, Origin};
pub use fill::{FallbackOptions, FillOptions, FillReport, Overwrite, SentenceFill};
pub use pipeline::Pipeline;
pub use search::TermSearch;
