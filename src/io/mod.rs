/*!
# IO utilities

Corpus and vocabulary table loading, and resumable table saving.
!*/
pub mod reader;
pub mod writer;
