//! Corpus-driven conformance checks for the JSON codec.
//!
//! A corpus is a JSON file of recorded test vectors (input text plus the
//! expected canonical output, error position or numeric representation).
//! Running it against the codec catches behavioural drift in parsing,
//! number classification and canonical writing.

pub mod corpus;

pub use corpus::{Corpus, CorpusManifest, CorpusResults, CorpusRunner, TestResult, TestVector};

use thiserror::Error;

/// Result type for conformance operations.
pub type ConformanceResult<T> = Result<T, ConformanceError>;

/// Errors that can occur while loading a corpus.
#[derive(Debug, Error)]
pub enum ConformanceError {
    /// The corpus file could not be read
    #[error("failed to read corpus file: {0}")]
    Io(#[from] std::io::Error),

    /// The corpus file is not a valid corpus document
    #[error("failed to parse corpus JSON: {0}")]
    Corpus(#[from] serde_json::Error),
}
