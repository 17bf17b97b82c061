//! Pipeline trait.
use crate::error::Error;

/// Implemented by each pipeline.
///
/// Generic over the return type, so that pipelines can hand back a report or their results.
pub trait Pipeline<T> {
    fn run(&self) -> Result<T, Error>;
}
