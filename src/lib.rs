//! # sentence-miner
//!
//! Example sentence mining: source files are loaded ([io::reader]), split into sentences ([text]),
//! indexed ([index]) and searched for vocabulary terms, keeping only sentences that pass
//! a set of quality heuristics ([filtering]). Terms missing from the local corpus can be looked up
//! on a remote service ([remote]).
//!
//! [pipelines::SentenceFill] ties everything together to fill a vocabulary table,
//! writing rows as they are decided so that interrupted runs can be resumed.
pub mod corpus;
pub mod error;
pub mod filtering;
pub mod index;
pub mod io;
pub mod pipelines;
pub mod remote;
pub mod text;
