//! # sentence-miner
//!
//! Fills vocabulary tables with example sentences mined from a local collection of books
//! (plain text and EPUB), with an optional fallback on the Tatoeba sentence database.
//!
//! ```sh
//! sentence-miner 0.1.0
//! Example sentence mining for vocabulary tables.
//!
//! USAGE:
//!     sentence-miner <SUBCOMMAND>
//!
//! SUBCOMMANDS:
//!     fill      Fill the sentence column of a vocabulary table
//!     help      Prints this message or the help of the given subcommand(s)
//!     search    Print the sentence selected for each term
//! ```
//!
//! Verbosity is controlled by `RUST_LOG` (default: `info`).
use std::process;

use env_logger::Env;
use log::{debug, error};
use structopt::StructOpt;

use sentence_miner::error::Error;
use sentence_miner::pipelines::{FillOptions, Pipeline, SentenceFill, TermSearch};

mod cli;

fn run(opt: cli::SentenceMiner) -> Result<(), Error> {
    match opt {
        cli::SentenceMiner::Fill(f) => {
            let options = FillOptions::try_from(f)?;
            let report = SentenceFill::new(options).run()?;
            debug!("{:#?}", report);
        }

        cli::SentenceMiner::Search(s) => {
            let search = TermSearch::from(s);
            for (term, sentence) in search.run()? {
                println!("{}\t{}", term, sentence.unwrap_or_default());
            }
        }
    };
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let opt = cli::SentenceMiner::from_args();
    debug!("cli args\n{:#?}", opt);

    if let Err(e) = run(opt) {
        error!("{}", e);
        process::exit(1);
    }
}
