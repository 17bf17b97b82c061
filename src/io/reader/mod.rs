/*! Input reading utilities

Corpus source files ([SourceDocument], plain text or EPUB) and the vocabulary [Table].
!*/
mod source;
mod table;

pub use source::{decode, extract_text, Encoding, SourceDocument, SourceKind};
pub use table::{normalize_header_cell, Table};
