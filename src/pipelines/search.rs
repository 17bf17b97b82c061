//! Term lookup pipeline, for inspecting what the fill pipeline would select.
use std::path::PathBuf;

use super::context::Context;
use super::pipeline::Pipeline;
use crate::error::Error;
use crate::filtering::{QualityConfig, QualityFilter};
use crate::index::Selection;

pub struct TermSearch {
    sources_dir: PathBuf,
    terms: Vec<String>,
    quality: QualityConfig,
    selection: Selection,
}

impl TermSearch {
    pub fn new(
        sources_dir: PathBuf,
        terms: Vec<String>,
        quality: QualityConfig,
        selection: Selection,
    ) -> Self {
        Self {
            sources_dir,
            terms,
            quality,
            selection,
        }
    }
}

impl Pipeline<Vec<(String, Option<String>)>> for TermSearch {
    /// Selected local sentence for each term, in order.
    fn run(&self) -> Result<Vec<(String, Option<String>)>, Error> {
        if !self.sources_dir.is_dir() {
            return Err(Error::Config(format!(
                "sources directory not found: {:?}",
                self.sources_dir
            )));
        }
        if self.quality.min_words > self.quality.max_words {
            return Err(Error::Config(format!(
                "min words ({}) is greater than max words ({})",
                self.quality.min_words, self.quality.max_words
            )));
        }

        let mut ctx = Context::load(
            &self.sources_dir,
            QualityFilter::new(&self.quality),
            self.selection,
        )?;

        self.terms
            .iter()
            .map(|term| {
                let found = ctx.resolve(term)?.map(|(sentence, _)| sentence);
                Ok((term.clone(), found))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn search_terms() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("book.txt"),
            "The old market sells fresh bread every morning. Then it rains.",
        )
        .unwrap();

        let search = TermSearch::new(
            dir.path().to_path_buf(),
            vec!["market".to_string(), "xenon".to_string()],
            QualityConfig::default(),
            Selection::First,
        );
        let results = search.run().unwrap();
        assert_eq!(
            results,
            vec![
                (
                    "market".to_string(),
                    Some("The old market sells fresh bread every morning.".to_string())
                ),
                ("xenon".to_string(), None),
            ]
        );
    }

    #[test]
    fn bad_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let search = TermSearch::new(
            dir.path().to_path_buf(),
            vec![],
            QualityConfig::default().with_bounds(9, 3),
            Selection::First,
        );
        assert!(matches!(search.run(), Err(Error::Config(_))));
    }
}
