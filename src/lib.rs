//! json-tree - a JSON codec built around an editable value tree.
//!
//! Text is parsed into a [`Value`] tree, written back out in a single
//! canonical compact form, or projected onto native Rust types.
//!
//! # Architecture
//!
//! - [`json`] - Parser, value model, canonical writer and type projection
//! - [`error`] - Syntax and conversion error types
//! - [`conformance`] - Corpus runner for checking codec behaviour against
//!   recorded test vectors
//!
//! # Numbers
//!
//! Every number keeps the representation picked at parse time (`i32`, `i64`,
//! `u64`, 128-bit decimal or `f64`) and is written back without widening.
//!
//! # Concurrency
//!
//! Parsing and writing are synchronous and share no state between calls, so
//! independent trees may be processed on different threads freely.

// Library code propagates errors instead of panicking.
// Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod conformance;
pub mod error;
pub mod json;

// Re-export commonly used types
pub use conformance::{CorpusResults, CorpusRunner, TestResult};
pub use error::{ConversionError, Error, Result, SyntaxError, SyntaxErrorKind};
pub use json::{parse, to_string, FromValue, Number, Object, Value};
