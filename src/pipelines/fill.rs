//! Vocabulary table filling pipeline.
//!
//! Rows are read from the input table and written, one at a time and in order, to the output table.
//! Rows that need a sentence get one from the local corpus, or from the remote fallback if enabled.
//!
//! # Resuming
//! If the output table already holds `n` data rows (and the same header), the first `n` input rows
//! are skipped and the run continues from there. Since every row is written (updated or not),
//! the output row count always matches the number of input rows processed.
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use log::{debug, info};
use url::Url;

use super::context::{Context, Origin};
use super::pipeline::Pipeline;
use crate::error::Error;
use crate::filtering::{QualityConfig, QualityFilter};
use crate::index::Selection;
use crate::io::reader::Table;
use crate::io::writer::{inspect, ResumableWriter};
use crate::remote::{Fallback, RemoteSearch, RetryPolicy, TatoebaClient, DEFAULT_ENDPOINT};

const PROGRESS_INTERVAL: usize = 200;
const PREVIEW_LEN: usize = 100;

/// Whether already filled sentences get replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overwrite {
    Yes,
    #[default]
    No,
}

impl FromStr for Overwrite {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            other => Err(Error::Config(format!(
                "overwrite must be yes or no, got {:?}",
                other
            ))),
        }
    }
}

impl fmt::Display for Overwrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yes => write!(f, "yes"),
            Self::No => write!(f, "no"),
        }
    }
}

/// Remote fallback settings.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackOptions {
    pub lang: String,
    /// Minimum delay between two requests.
    pub interval: Duration,
    /// Word limit for remote sentences. Defaults to the local one.
    pub max_words: Option<usize>,
    pub endpoint: String,
    pub user_agent: Option<String>,
    pub retry: RetryPolicy,
}

impl Default for FallbackOptions {
    fn default() -> Self {
        Self {
            lang: "eng".to_string(),
            interval: Duration::from_secs(1),
            max_words: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: None,
            retry: RetryPolicy::default(),
        }
    }
}

impl FallbackOptions {
    fn validate(&self) -> Result<Url, Error> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| Error::Config(format!("invalid endpoint {:?}: {}", self.endpoint, e)))?;

        match self.user_agent.as_deref().map(str::trim) {
            Some(ua) if !ua.is_empty() => Ok(url),
            _ => Err(Error::Config(
                "remote fallback requires a user agent (--user-agent or TATOEBA_USER_AGENT)"
                    .to_string(),
            )),
        }
    }
}

/// Fill run settings.
#[derive(Debug, Clone, PartialEq)]
pub struct FillOptions {
    pub sources_dir: PathBuf,
    pub input: PathBuf,
    pub output: PathBuf,
    pub quality: QualityConfig,
    pub selection: Selection,
    pub overwrite: Overwrite,
    /// Rows before this index are passed through untouched.
    pub start_index: usize,
    /// Maximum number of rows written by this run.
    pub max_rows: Option<usize>,
    /// Resolve and log, without writing anything.
    pub dry_run: bool,
    pub term_column: String,
    pub sentence_column: String,
    pub fallback: Option<FallbackOptions>,
}

impl FillOptions {
    pub fn new(sources_dir: PathBuf, input: PathBuf, output: PathBuf) -> Self {
        Self {
            sources_dir,
            input,
            output,
            quality: QualityConfig::default(),
            selection: Selection::default(),
            overwrite: Overwrite::default(),
            start_index: 0,
            max_rows: None,
            dry_run: false,
            term_column: "English_Term".to_string(),
            sentence_column: "English_Sentence".to_string(),
            fallback: None,
        }
    }

    /// Check paths, bounds and fallback settings.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.sources_dir.is_dir() {
            return Err(Error::Config(format!(
                "sources directory not found: {:?}",
                self.sources_dir
            )));
        }
        if !self.input.is_file() {
            return Err(Error::Config(format!(
                "input table not found: {:?}",
                self.input
            )));
        }
        if self.quality.min_words > self.quality.max_words {
            return Err(Error::Config(format!(
                "min words ({}) is greater than max words ({})",
                self.quality.min_words, self.quality.max_words
            )));
        }
        if let Some(fallback) = &self.fallback {
            fallback.validate()?;
        }
        Ok(())
    }
}

/// Outcome of a fill run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillReport {
    /// Input rows.
    pub total_rows: usize,
    /// Rows skipped because already present in the output.
    pub resumed: usize,
    /// Rows written (or that would have been, on dry runs) by this run.
    pub written: usize,
    /// Rows that got a new sentence, overwrites included.
    pub updated: usize,
    pub overwritten: usize,
    /// Rows passed through untouched: before start index, no term, already filled.
    pub skipped: usize,
    /// Rows for which no sentence was found.
    pub missed: usize,
    /// Sentences first found by the remote fallback.
    pub remote_hits: usize,
    pub cache_hits: usize,
    pub remote_requests: usize,
}

/// What to do with a row.
enum Decision {
    PassThrough,
    Fill {
        sentence: String,
        origin: Origin,
        overwrite: bool,
    },
    Miss,
}

/// Fills the sentence column of a vocabulary table.
pub struct SentenceFill<'s> {
    options: FillOptions,
    searcher: Option<&'s dyn RemoteSearch>,
}

impl<'s> SentenceFill<'s> {
    pub fn new(options: FillOptions) -> Self {
        Self {
            options,
            searcher: None,
        }
    }

    /// Use `searcher` instead of the HTTP client when the fallback is enabled.
    pub fn with_searcher(mut self, searcher: &'s dyn RemoteSearch) -> Self {
        self.searcher = Some(searcher);
        self
    }

    fn decide(
        &self,
        ctx: &mut Context<'_>,
        row: &[String],
        term_col: usize,
        sentence_col: usize,
    ) -> Result<Decision, Error> {
        let term = row[term_col].trim();
        if term.is_empty() {
            debug!("empty term, passing row through");
            return Ok(Decision::PassThrough);
        }

        let filled = !row[sentence_col].trim().is_empty();
        if filled && self.options.overwrite == Overwrite::No {
            debug!("{:?} already has a sentence", term);
            return Ok(Decision::PassThrough);
        }

        match ctx.resolve(term)? {
            Some((sentence, origin)) => Ok(Decision::Fill {
                sentence,
                origin,
                overwrite: filled,
            }),
            None => Ok(Decision::Miss),
        }
    }
}

impl<'s> Pipeline<FillReport> for SentenceFill<'s> {
    fn run(&self) -> Result<FillReport, Error> {
        let options = &self.options;
        options.validate()?;

        let table = Table::from_path(&options.input)?;
        let term_col = table.column(&options.term_column)?;
        let sentence_col = table.column(&options.sentence_column)?;

        // dry runs only look at the output
        let mut writer = None;
        let already_written = if options.dry_run {
            inspect(&options.output, table.headers())?.unwrap_or(0)
        } else {
            let w = ResumableWriter::open(&options.output, table.headers())?;
            let n = w.already_written();
            writer = Some(w);
            n
        };

        let client;
        let filter = QualityFilter::new(&options.quality);
        let mut ctx = Context::load(&options.sources_dir, filter, options.selection)?;

        if let Some(fallback_options) = &options.fallback {
            let searcher: &dyn RemoteSearch = match self.searcher {
                Some(searcher) => searcher,
                None => {
                    let endpoint = fallback_options.validate()?;
                    client = TatoebaClient::new(
                        endpoint,
                        &fallback_options.lang,
                        fallback_options.user_agent.as_deref().unwrap_or_default(),
                        fallback_options.retry.clone(),
                    )?;
                    &client
                }
            };

            let max_words = fallback_options
                .max_words
                .unwrap_or(options.quality.max_words);
            let remote_filter = QualityFilter::new(
                &options
                    .quality
                    .with_bounds(options.quality.min_words, max_words),
            );
            ctx = ctx.with_fallback(Fallback::new(
                searcher,
                remote_filter,
                fallback_options.interval,
            ));
        }

        let mut report = FillReport {
            total_rows: table.len(),
            ..Default::default()
        };

        for (i, input_row) in table.rows().iter().enumerate() {
            if i < already_written {
                report.resumed += 1;
                continue;
            }
            if options.max_rows.map_or(false, |cap| report.written >= cap) {
                info!("Row cap reached, stopping at row {}", i);
                break;
            }
            if i % PROGRESS_INTERVAL == 0 {
                info!(
                    "[PROGRESS] row {}/{} (updated={}, skipped={})",
                    i,
                    table.len(),
                    report.updated,
                    report.skipped
                );
            }

            let mut row = input_row.clone();
            let decision = if i < options.start_index {
                Decision::PassThrough
            } else {
                self.decide(&mut ctx, &row, term_col, sentence_col)?
            };

            match decision {
                Decision::PassThrough => report.skipped += 1,
                Decision::Fill {
                    sentence,
                    origin,
                    overwrite,
                } => {
                    if origin == Origin::Remote {
                        report.remote_hits += 1;
                    }
                    let action = if overwrite { "OVERWRITE" } else { "OK" };
                    info!("[{}] {:?} → {}", action, row[term_col].trim(), preview(&sentence));
                    report.updated += 1;
                    if overwrite {
                        report.overwritten += 1;
                    }
                    row[sentence_col] = sentence;
                }
                Decision::Miss => {
                    let scope = if ctx.has_fallback() {
                        "locally or remotely"
                    } else {
                        "locally"
                    };
                    info!(
                        "[MISS] {:?} (no acceptable sentence found {})",
                        row[term_col].trim(),
                        scope
                    );
                    report.missed += 1;
                }
            }

            if let Some(w) = writer.as_mut() {
                w.write_row(&row)?;
            }
            report.written += 1;
        }

        report.cache_hits = ctx.cache_hits();
        report.remote_requests = ctx.remote_requests();

        if options.dry_run {
            info!(
                "[DRY RUN] Would update {} rows; skipped {}.",
                report.updated, report.skipped
            );
        } else {
            info!(
                "[DONE] Updated {} rows; skipped {}; missed {}. Output: {:?}",
                report.updated, report.skipped, report.missed, options.output
            );
        }

        Ok(report)
    }
}

/// First characters of a sentence, for logs.
fn preview(sentence: &str) -> String {
    if sentence.chars().count() > PREVIEW_LEN {
        let head: String = sentence.chars().take(PREVIEW_LEN).collect();
        format!("{}...", head)
    } else {
        sentence.to_string()
    }
}
