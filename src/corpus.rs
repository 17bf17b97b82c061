/*! In-memory sentence corpus.

The corpus is fully preloaded: every source file is extracted and segmented once,
and only the resulting sentences are kept. Documents are ordered by path,
which makes retrieval results independent of the file system listing order.
!*/
use std::path::{Path, PathBuf};

use glob::Pattern;
use log::{error, info, warn};

use crate::error::Error;
use crate::index::Posting;
use crate::io::reader::{extract_text, SourceKind};
use crate::text::Segmenter;

/// Ordered sentences of a source document.
#[derive(Debug, Clone)]
pub struct SentenceRecord {
    path: PathBuf,
    sentences: Vec<String>,
}

impl SentenceRecord {
    pub fn new(path: PathBuf, sentences: Vec<String>) -> Self {
        Self { path, sentences }
    }

    /// Get a reference to the source path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get a reference to the sentences.
    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }
}

#[derive(Debug, Default)]
pub struct Corpus {
    documents: Vec<SentenceRecord>,
}

impl Corpus {
    /// Build a corpus from already extracted texts. Documents keep the provided order.
    pub fn from_texts<I>(texts: I, segmenter: &Segmenter) -> Self
    where
        I: IntoIterator<Item = (PathBuf, String)>,
    {
        let documents = texts
            .into_iter()
            .map(|(path, text)| {
                let sentences = segmenter.segment(&text);
                SentenceRecord::new(path, sentences)
            })
            .collect();

        Self { documents }
    }

    /// Recursively load every `.txt` and `.epub` file from `dir`.
    pub fn from_dir(dir: &Path, segmenter: &Segmenter) -> Result<Self, Error> {
        let files = source_files(dir)?;
        if files.is_empty() {
            warn!("No .txt or .epub files found in {:?}", dir);
        }

        info!("Preloading {} files", files.len());
        let corpus = Self::from_texts(
            files.into_iter().map(|path| {
                let text = extract_text(&path);
                (path, text)
            }),
            segmenter,
        );
        info!(
            "Ready. {} sentences across {} files",
            corpus.nb_sentences(),
            corpus.documents.len()
        );

        Ok(corpus)
    }

    /// Get a reference to the documents.
    pub fn documents(&self) -> &[SentenceRecord] {
        &self.documents
    }

    pub fn nb_sentences(&self) -> usize {
        self.documents.iter().map(|d| d.sentences.len()).sum()
    }

    /// Get the sentence pointed by a posting, if it exists.
    pub fn sentence(&self, posting: Posting) -> Option<&str> {
        self.documents
            .get(posting.doc)?
            .sentences
            .get(posting.sentence)
            .map(String::as_str)
    }

    /// Iterate over every sentence, in document then sentence order.
    pub fn sentences(&self) -> impl Iterator<Item = (Posting, &str)> {
        self.documents.iter().enumerate().flat_map(|(doc, record)| {
            record
                .sentences
                .iter()
                .enumerate()
                .map(move |(sentence, s)| (Posting { doc, sentence }, s.as_str()))
        })
    }
}

/// List supported source files under `dir` (recursively), sorted by path.
///
/// Unreadable directory entries are logged and skipped.
pub fn source_files(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let dir_str = dir
        .to_str()
        .ok_or_else(|| Error::Config(format!("non UTF-8 sources directory: {:?}", dir)))?;
    let pattern = format!("{}/**/*", Pattern::escape(dir_str));

    let mut files: Vec<PathBuf> = glob::glob(&pattern)?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                error!("error reading sources directory: {}", e);
                None
            }
        })
        .filter(|path| path.is_file() && SourceKind::from_path(path).is_some())
        .collect();
    files.sort();

    Ok(files)
}
