//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;
use std::time::Duration;

use sentence_miner::error::Error;
use sentence_miner::filtering::QualityConfig;
use sentence_miner::index::Selection;
use sentence_miner::pipelines::{FallbackOptions, FillOptions, Overwrite, TermSearch};
use sentence_miner::remote::RetryPolicy;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "sentence-miner",
    about = "Example sentence mining for vocabulary tables."
)]
/// Holds every command that is callable by the `sentence-miner` command.
pub enum SentenceMiner {
    #[structopt(about = "Fill the sentence column of a vocabulary table")]
    Fill(Fill),
    #[structopt(about = "Print the sentence selected for each term")]
    Search(Search),
}

#[derive(Debug, StructOpt)]
/// Sentence acceptance and selection parameters, shared by subcommands.
pub struct Selecting {
    #[structopt(long = "min-words", default_value = "6", help = "minimum words per sentence")]
    pub min_words: usize,
    #[structopt(long = "max-words", default_value = "28", help = "maximum words per sentence")]
    pub max_words: usize,
    #[structopt(
        long = "prefer-shorter",
        help = "pick the shortest acceptable sentence instead of the first one"
    )]
    pub prefer_shorter: bool,
}

impl Selecting {
    fn quality(&self) -> QualityConfig {
        QualityConfig::default().with_bounds(self.min_words, self.max_words)
    }

    fn selection(&self) -> Selection {
        if self.prefer_shorter {
            Selection::Shortest
        } else {
            Selection::First
        }
    }
}

#[derive(Debug, StructOpt)]
/// Fill command and parameters.
///
/// ```sh
/// sentence-miner fill --sources-dir books/ --input-csv vocab.csv --output-csv vocab.filled.csv
/// ```
pub struct Fill {
    #[structopt(
        parse(from_os_str),
        long = "sources-dir",
        help = "directory containing .txt/.epub sources (searched recursively)"
    )]
    pub sources_dir: PathBuf,
    #[structopt(parse(from_os_str), long = "input-csv", help = "input vocabulary table")]
    pub input_csv: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "output-csv",
        help = "output table, resumed if it already exists"
    )]
    pub output_csv: PathBuf,
    #[structopt(flatten)]
    pub selecting: Selecting,
    #[structopt(
        long = "overwrite",
        default_value = "no",
        possible_values = &["yes", "no"],
        help = "overwrite existing sentences"
    )]
    pub overwrite: Overwrite,
    #[structopt(
        long = "start-index",
        default_value = "0",
        help = "row index to start from (0-based, after header). Earlier rows are copied as is."
    )]
    pub start_index: usize,
    #[structopt(long = "max-rows", help = "write at most this many rows in this run")]
    pub max_rows: Option<usize>,
    #[structopt(long = "dry-run", help = "report matches without writing the output")]
    pub dry_run: bool,
    #[structopt(long = "term-column", default_value = "English_Term")]
    pub term_column: String,
    #[structopt(long = "sentence-column", default_value = "English_Sentence")]
    pub sentence_column: String,
    #[structopt(
        long = "tatoeba-fallback",
        help = "query Tatoeba when no local sentence is found"
    )]
    pub tatoeba_fallback: bool,
    #[structopt(long = "tatoeba-lang", default_value = "eng", help = "Tatoeba source language code")]
    pub tatoeba_lang: String,
    #[structopt(
        long = "tatoeba-interval",
        default_value = "1.0",
        help = "minimum seconds between two Tatoeba requests"
    )]
    pub tatoeba_interval: f64,
    #[structopt(
        long = "tatoeba-max-words",
        help = "maximum words for Tatoeba sentences. Default is --max-words."
    )]
    pub tatoeba_max_words: Option<usize>,
    #[structopt(
        long = "tatoeba-url",
        default_value = "https://tatoeba.org/en/api_v0/search"
    )]
    pub tatoeba_url: String,
    #[structopt(
        long = "tatoeba-retries",
        default_value = "0",
        help = "retries on network errors, 429 and 5xx responses"
    )]
    pub tatoeba_retries: u32,
    #[structopt(
        long = "tatoeba-backoff",
        default_value = "1.0",
        help = "initial retry delay in seconds, doubled on each retry"
    )]
    pub tatoeba_backoff: f64,
    #[structopt(
        long = "user-agent",
        env = "TATOEBA_USER_AGENT",
        help = "User-Agent header for API requests. Required with --tatoeba-fallback."
    )]
    pub user_agent: Option<String>,
}

fn seconds(value: f64, name: &str) -> Result<Duration, Error> {
    Duration::try_from_secs_f64(value).map_err(|e| {
        Error::Config(format!(
            "{} must be a non-negative number of seconds, got {} ({})",
            name, value, e
        ))
    })
}

impl TryFrom<Fill> for FillOptions {
    type Error = Error;

    fn try_from(f: Fill) -> Result<Self, Self::Error> {
        let fallback = if f.tatoeba_fallback {
            Some(FallbackOptions {
                lang: f.tatoeba_lang,
                interval: seconds(f.tatoeba_interval, "--tatoeba-interval")?,
                max_words: f.tatoeba_max_words,
                endpoint: f.tatoeba_url,
                user_agent: f.user_agent,
                retry: RetryPolicy {
                    max_attempts: f.tatoeba_retries + 1,
                    initial_delay: seconds(f.tatoeba_backoff, "--tatoeba-backoff")?,
                    ..Default::default()
                },
            })
        } else {
            None
        };

        Ok(FillOptions {
            quality: f.selecting.quality(),
            selection: f.selecting.selection(),
            overwrite: f.overwrite,
            start_index: f.start_index,
            max_rows: f.max_rows,
            dry_run: f.dry_run,
            term_column: f.term_column,
            sentence_column: f.sentence_column,
            fallback,
            ..FillOptions::new(f.sources_dir, f.input_csv, f.output_csv)
        })
    }
}

#[derive(Debug, StructOpt)]
/// Search command and parameters.
pub struct Search {
    #[structopt(
        parse(from_os_str),
        long = "sources-dir",
        help = "directory containing .txt/.epub sources (searched recursively)"
    )]
    pub sources_dir: PathBuf,
    #[structopt(flatten)]
    pub selecting: Selecting,
    #[structopt(required = true, help = "terms to look up")]
    pub terms: Vec<String>,
}

impl From<Search> for TermSearch {
    fn from(s: Search) -> Self {
        TermSearch::new(
            s.sources_dir,
            s.terms,
            s.selecting.quality(),
            s.selecting.selection(),
        )
    }
}
