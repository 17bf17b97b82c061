//! Vocabulary table loading.
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use log::{info, warn};

use crate::error::Error;

const UTF8_BOM: char = '\u{feff}';

/// Header cell as compared against expected column names: trimmed, without leading BOM.
pub fn normalize_header_cell(cell: &str) -> String {
    cell.trim_start_matches(UTF8_BOM).trim().to_string()
}

/// In-memory CSV table.
///
/// Every row has exactly as many cells as the header: longer rows are truncated,
/// shorter ones padded with empty cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        info!("Loading table {:?}", path);
        let reader = ReaderBuilder::new().flexible(true).from_path(path)?;
        Self::from_csv(reader)
    }

    pub fn from_reader<R: Read>(rdr: R) -> Result<Self, Error> {
        let reader = ReaderBuilder::new().flexible(true).from_reader(rdr);
        Self::from_csv(reader)
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, Error> {
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(normalize_header_cell)
            .collect();

        let mut truncated = 0;
        let mut rows = Vec::new();
        for record in reader.records() {
            let record: StringRecord = record?;
            if record.len() > headers.len() {
                truncated += 1;
            }

            let mut row: Vec<String> = record
                .iter()
                .take(headers.len())
                .map(str::to_string)
                .collect();
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        if truncated > 0 {
            warn!(
                "{} rows had more fields than the header and were truncated",
                truncated
            );
        }

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of column `name`.
    pub fn column(&self, name: &str) -> Result<usize, Error> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_normalization() {
        assert_eq!(normalize_header_cell("\u{feff}English_Term "), "English_Term");
        assert_eq!(normalize_header_cell("  Notes"), "Notes");
    }

    #[test]
    fn ragged_rows() {
        let data = "\u{feff}English_Term, English_Sentence ,Notes\n\
                    cat,,n1\n\
                    dog\n\
                    bird,,n3,extra,more\n";
        let table = Table::from_reader(data.as_bytes()).unwrap();

        assert_eq!(
            table.headers(),
            &["English_Term", "English_Sentence", "Notes"]
        );
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows()[1], vec!["dog", "", ""]);
        assert_eq!(table.rows()[2], vec!["bird", "", "n3"]);
    }

    #[test]
    fn quoted_cells() {
        let data = "English_Term,English_Sentence\n\"ice cream\",\"She said, \"\"hi\"\".\"\n";
        let table = Table::from_reader(data.as_bytes()).unwrap();
        assert_eq!(table.rows()[0], vec!["ice cream", "She said, \"hi\"."]);
    }

    #[test]
    fn columns() {
        let table = Table::from_reader("English_Term,English_Sentence\n".as_bytes()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.column("English_Sentence").unwrap(), 1);
        match table.column("Term") {
            Err(Error::MissingColumn(c)) => assert_eq!(c, "Term"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
