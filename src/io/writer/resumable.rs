//! Append-only table writer that picks up where a previous run stopped.
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Terminator, Writer, WriterBuilder};
use log::{debug, info};

use crate::error::Error;
use crate::io::reader::normalize_header_cell;

/// Look at an existing output table without modifying it.
///
/// Returns `None` if `path` does not exist or is empty, and the number of data records otherwise.
/// Fails with [Error::HeaderMismatch] if the header differs from `headers`
/// (cells are compared trimmed and without BOM).
pub fn inspect(path: &Path, headers: &[String]) -> Result<Option<usize>, Error> {
    if !path.exists() || std::fs::metadata(path)?.len() == 0 {
        return Ok(None);
    }

    let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;
    let found: Vec<String> = reader
        .headers()?
        .iter()
        .map(normalize_header_cell)
        .collect();
    let expected: Vec<String> = headers.iter().map(|h| normalize_header_cell(h)).collect();

    if found != expected {
        return Err(Error::HeaderMismatch { expected, found });
    }

    let mut nb_records = 0;
    for record in reader.records() {
        record?;
        nb_records += 1;
    }
    Ok(Some(nb_records))
}

/// Output table writer.
///
/// A new (or empty) destination gets the header first.
/// An existing destination with a matching header is appended to.
pub struct ResumableWriter {
    path: PathBuf,
    writer: Writer<File>,
    already_written: usize,
    nb_written: usize,
}

impl ResumableWriter {
    pub fn open(path: &Path, headers: &[String]) -> Result<Self, Error> {
        let (writer, already_written) = match inspect(path, headers)? {
            None => {
                debug!("creating {:?}", path);
                let mut writer = writer_builder().from_path(path)?;
                writer.write_record(headers)?;
                writer.flush()?;
                (writer, 0)
            }
            Some(nb_records) => {
                info!(
                    "Resuming {:?}: {} rows already written",
                    path, nb_records
                );
                let mut file = OpenOptions::new().read(true).append(true).open(path)?;
                ensure_trailing_newline(&mut file)?;
                (writer_builder().from_writer(file), nb_records)
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            writer,
            already_written,
            nb_written: 0,
        })
    }

    /// Write a single row and flush it.
    pub fn write_row(&mut self, row: &[String]) -> Result<(), Error> {
        self.writer.write_record(row)?;
        self.writer.flush()?;
        self.nb_written += 1;
        Ok(())
    }

    /// Number of data rows present before this writer was opened.
    pub fn already_written(&self) -> usize {
        self.already_written
    }

    /// Number of rows written through this writer.
    pub fn nb_written(&self) -> usize {
        self.nb_written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn writer_builder() -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder.terminator(Terminator::Any(b'\n'));
    builder
}

/// Add a record terminator if the file does not end with one.
fn ensure_trailing_newline(file: &mut File) -> Result<(), Error> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(());
    }

    file.seek(SeekFrom::Start(len - 1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    if last[0] != b'\n' {
        file.write_all(b"\n")?;
    }
    Ok(())
}
