//! JSON parsing, canonical writing and typed projection.
//!
//! # Architecture
//!
//! The JSON subsystem is organized into focused modules, leaves first:
//!
//! - [`number`] - Numeric representations and literal classification
//! - [`value`] - Editable value tree
//! - [`cursor`] - Character cursor with line/column tracking
//! - [`limits`] - Resource limits for untrusted input
//! - [`parser`] - Recursive descent parser
//! - [`writer`] - Canonical compact writer
//! - [`project`] - Projection onto native types
//!
//! # Example
//!
//! ```
//! use json_tree::json::{parse, to_string, Number, Value};
//!
//! let value = parse(r#"{"b": 2, "a": [1.5, null]}"#).unwrap();
//! assert_eq!(value.get("b"), Some(&Value::Number(Number::I32(2))));
//!
//! // Canonical form keeps key order and uses ", " / ": " separators.
//! assert_eq!(to_string(&value), r#"{"b": 2, "a": [1.5, null]}"#);
//! ```

pub mod cursor;
pub mod limits;
pub mod number;
pub mod parser;
pub mod project;
pub mod value;
pub mod writer;

pub use limits::Limits;
pub use number::{Number, NumberKind};
pub use parser::{from_reader, from_reader_with_limits, parse, parse_with_limits, Parser};
pub use project::{enumeration, Enumeration, FromValue};
pub use value::{Object, Value};
pub use writer::{to_string, to_vec, write, write_opt};
