/*! Source documents and text extraction.

Corpus files are either plain text or EPUB archives (zipped XHTML).
The kind is detected from the extension, and dispatch is done on [SourceKind].

Extraction never fails: unreadable, undecodable or corrupt files yield an empty string
and a warning, so that a single bad file does not stop a corpus load.
!*/
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use zip::ZipArchive;

use crate::error::Error;
use crate::text::{normalize_ws, strip_html};

/// HTML-family entries read from EPUB archives.
const HTML_EXTS: [&str; 3] = [".xhtml", ".html", ".htm"];

const UTF8_BOM: char = '\u{feff}';

/// Supported corpus file kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    PlainText,
    Epub,
}

impl SourceKind {
    /// Detect kind from the (case-insensitive) extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Some(Self::PlainText),
            "epub" => Some(Self::Epub),
            _ => None,
        }
    }
}

/// Encoding that successfully decoded a byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Utf8Bom,
    Latin1,
}

/// Decode bytes trying UTF-8, UTF-8 with BOM, then Latin-1.
///
/// Latin-1 maps every byte to a code point, so decoding always succeeds.
pub fn decode(bytes: &[u8]) -> (String, Encoding) {
    match std::str::from_utf8(bytes) {
        Ok(text) => match text.strip_prefix(UTF8_BOM) {
            Some(stripped) => (stripped.to_string(), Encoding::Utf8Bom),
            None => (text.to_string(), Encoding::Utf8),
        },
        Err(_) => (bytes.iter().map(|b| *b as char).collect(), Encoding::Latin1),
    }
}

/// Raw corpus file, read once and dropped after extraction.
#[derive(Debug)]
pub struct SourceDocument {
    path: PathBuf,
    kind: SourceKind,
    content: Vec<u8>,
}

impl SourceDocument {
    /// Read the whole file. Fails if the extension is not supported.
    pub fn read(path: &Path) -> Result<Self, Error> {
        let kind = SourceKind::from_path(path)
            .ok_or_else(|| Error::Custom(format!("unsupported source file {:?}", path)))?;
        let content = std::fs::read(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            kind,
            content,
        })
    }

    /// Get a reference to the document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Encoding of a plain text document. EPUB entries are decoded one by one, hence [None].
    pub fn encoding(&self) -> Option<Encoding> {
        match self.kind {
            SourceKind::PlainText => Some(decode(&self.content).1),
            SourceKind::Epub => None,
        }
    }

    /// Consume the document and get its normalized text.
    pub fn into_text(self) -> String {
        match self.kind {
            SourceKind::PlainText => {
                let (text, encoding) = decode(&self.content);
                debug!("{:?} decoded as {:?}", self.path, encoding);
                normalize_ws(&text)
            }
            SourceKind::Epub => match Self::epub_text(&self.content) {
                Ok(text) => text,
                Err(e) => {
                    warn!("could not read epub {:?}: {}", self.path, e);
                    String::new()
                }
            },
        }
    }

    /// Concatenate the stripped text of every HTML entry, in archive order.
    fn epub_text(content: &[u8]) -> Result<String, Error> {
        let mut archive = ZipArchive::new(Cursor::new(content))?;
        let mut parts = Vec::new();

        for idx in 0..archive.len() {
            let mut entry = match archive.by_index(idx) {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("skipping epub entry {}: {}", idx, e);
                    continue;
                }
            };

            let name = entry.name().to_lowercase();
            if !HTML_EXTS.iter().any(|ext| name.ends_with(ext)) {
                continue;
            }

            let mut raw = Vec::new();
            if let Err(e) = entry.read_to_end(&mut raw) {
                debug!("skipping epub entry {}: {}", name, e);
                continue;
            }
            let (chunk, _) = decode(&raw);
            parts.push(strip_html(&chunk));
        }

        Ok(normalize_ws(&parts.join(" ")))
    }
}

/// Get the normalized text of a corpus file.
///
/// Unsupported or unreadable files yield an empty string.
pub fn extract_text(path: &Path) -> String {
    if SourceKind::from_path(path).is_none() {
        return String::new();
    }

    match SourceDocument::read(path) {
        Ok(doc) => doc.into_text(),
        Err(e) => {
            warn!("could not read {:?}: {}", path, e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use zip::write::FileOptions;

    use super::*;

    fn write_epub(path: &Path, entries: &[(&str, &str)]) {
        let file = std::fs::File::create(path).unwrap();
        let mut zw = zip::ZipWriter::new(file);
        for (name, content) in entries {
            zw.start_file(*name, FileOptions::default()).unwrap();
            zw.write_all(content.as_bytes()).unwrap();
        }
        zw.finish().unwrap();
    }

    #[test]
    fn kind_detection() {
        assert_eq!(
            SourceKind::from_path(Path::new("a/b.TXT")),
            Some(SourceKind::PlainText)
        );
        assert_eq!(
            SourceKind::from_path(Path::new("book.epub")),
            Some(SourceKind::Epub)
        );
        assert_eq!(SourceKind::from_path(Path::new("book.pdf")), None);
        assert_eq!(SourceKind::from_path(Path::new("README")), None);
    }

    #[test]
    fn decoding_chain() {
        assert_eq!(decode("héllo".as_bytes()), ("héllo".to_string(), Encoding::Utf8));
        assert_eq!(
            decode("\u{feff}hello".as_bytes()),
            ("hello".to_string(), Encoding::Utf8Bom)
        );
        // "café" in latin-1
        assert_eq!(
            decode(&[0x63, 0x61, 0x66, 0xe9]),
            ("café".to_string(), Encoding::Latin1)
        );
    }

    #[test]
    fn plain_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("story.txt");
        std::fs::write(&path, [0x43, 0x61, 0x66, 0xe9, b'\n', b'\n', b'o', b'k', b'.']).unwrap();

        let doc = SourceDocument::read(&path).unwrap();
        assert_eq!(doc.kind(), SourceKind::PlainText);
        assert_eq!(doc.encoding(), Some(Encoding::Latin1));
        assert_eq!(doc.into_text(), "Café ok.");
    }

    #[test]
    fn epub() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.epub");
        write_epub(
            &path,
            &[
                ("mimetype", "application/epub+zip"),
                ("OEBPS/content.opf", "<package>metadata</package>"),
                (
                    "OEBPS/ch1.xhtml",
                    "<html><body><p>The night was &quot;cold&quot;.</p></body></html>",
                ),
                ("OEBPS/ch2.HTML", "<p>Morning\n came.</p>"),
            ],
        );

        assert_eq!(extract_text(&path), "The night was \"cold\". Morning came.");
    }

    #[test]
    fn corrupt_and_unsupported() {
        let dir = tempfile::tempdir().unwrap();

        let corrupt = dir.path().join("broken.epub");
        std::fs::write(&corrupt, b"definitely not a zip archive").unwrap();
        assert_eq!(extract_text(&corrupt), "");

        let pdf = dir.path().join("paper.pdf");
        std::fs::write(&pdf, b"%PDF-1.4").unwrap();
        assert_eq!(extract_text(&pdf), "");

        let missing = dir.path().join("missing.txt");
        assert_eq!(extract_text(&missing), "");
    }
}
