//! Decisions are logged per row.
//!
//! Kept in its own test binary: the capturing logger is process-wide.
use std::fs;
use std::sync::Mutex;

use lazy_static::lazy_static;
use log::{LevelFilter, Log, Metadata, Record};
use sentence_miner::pipelines::{FillOptions, Pipeline, SentenceFill};

lazy_static! {
    static ref RECORDS: Mutex<Vec<String>> = Mutex::new(Vec::new());
}

struct Capture;

impl Log for Capture {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS.lock().unwrap().push(record.args().to_string());
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture;

#[test]
fn hits_and_misses_are_logged() {
    log::set_logger(&CAPTURE).unwrap();
    log::set_max_level(LevelFilter::Info);

    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("books")).unwrap();
    fs::write(
        dir.path().join("books").join("book.txt"),
        "The old market sells fresh bread every morning.",
    )
    .unwrap();
    fs::write(
        dir.path().join("in.csv"),
        "English_Term,English_Sentence\nmarket,\nxenon,\n",
    )
    .unwrap();

    let mut options = FillOptions::new(
        dir.path().join("books"),
        dir.path().join("in.csv"),
        dir.path().join("out.csv"),
    );
    options.quality = options.quality.with_bounds(6, 22);
    let report = SentenceFill::new(options).run().unwrap();
    assert_eq!(report.missed, 1);

    let records = RECORDS.lock().unwrap();
    assert!(
        records
            .iter()
            .any(|r| r.starts_with("[OK] \"market\" → The old market")),
        "{:#?}",
        records
    );
    assert_eq!(
        records
            .iter()
            .filter(|r| r.starts_with("[MISS]"))
            .collect::<Vec<_>>(),
        vec!["[MISS] \"xenon\" (no acceptable sentence found locally)"]
    );
}
