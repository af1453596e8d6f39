//! Error types for the JSON codec.
//!
//! Parsing and projection fail fast: the first malformed token or the first
//! unsatisfiable projection aborts the call, and no partial tree is returned.
//!
//! - [`SyntaxError`] - malformed input, always carrying a 1-based position
//! - [`ConversionError`] - a value tree cannot be projected onto a native type
//! - [`Error`] - umbrella type for the reader/writer entry points

use thiserror::Error;

/// What went wrong while reading JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    /// A character that cannot start or continue the current production
    #[error("unexpected character '{}'", .0.escape_debug())]
    UnexpectedCharacter(char),

    /// Input ended in the middle of a value
    #[error("unexpected end of input")]
    UnexpectedEnd,

    /// A specific token was required
    #[error("expected {expected}, found '{}'", .found.escape_debug())]
    Expected {
        /// Description of the required token
        expected: &'static str,
        /// Character actually found
        found: char,
    },

    /// Integer part with a redundant leading zero, e.g. `01`
    #[error("leading zeros are not allowed in numbers")]
    LeadingZero,

    /// Sign, fraction dot or exponent marker without digits after it
    #[error("expected digit after '{}'", .0.escape_debug())]
    MissingDigits(char),

    /// Backslash followed by an unknown escape character
    #[error("invalid escape sequence '\\{}'", .0.escape_debug())]
    InvalidEscape(char),

    /// Non-hex character inside a `\u` escape
    #[error("invalid hex digit '{}' in unicode escape", .0.escape_debug())]
    InvalidHexDigit(char),

    /// UTF-16 surrogate escape that does not form a valid pair
    #[error("unpaired surrogate \\u{0:04X}")]
    LoneSurrogate(u16),

    /// Numeric literal that matched the grammar but no representation
    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    /// Non-whitespace content after the document
    #[error("trailing characters after JSON document, found '{}'", .0.escape_debug())]
    TrailingContent(char),

    /// Nesting deeper than the configured limit
    #[error("nesting depth exceeds limit of {0}")]
    NestingTooDeep(usize),

    /// String literal longer than the configured limit
    #[error("string literal exceeds limit of {0} characters")]
    StringTooLong(usize),

    /// Input longer than the configured limit
    #[error("input of {size} bytes exceeds limit of {limit} bytes")]
    InputTooLarge {
        /// Input length in bytes
        size: usize,
        /// Configured maximum
        limit: usize,
    },
}

/// Malformed JSON text, with the 1-based line and column where it was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at line {line}, column {column}")]
pub struct SyntaxError {
    /// The failure category
    pub kind: SyntaxErrorKind,
    /// 1-based line number
    pub line: usize,
    /// 1-based column of the offending character; errors raised before any
    /// character was read point at column 1
    pub column: usize,
}

impl SyntaxError {
    /// Create a syntax error at the given position.
    pub fn new(kind: SyntaxErrorKind, line: usize, column: usize) -> Self {
        Self { kind, line, column }
    }

    /// The `(line, column)` pair.
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }
}

/// A value tree could not be projected onto the requested native type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// The value has the wrong JSON type for the target
    #[error("cannot convert {found} to {target}")]
    TypeMismatch {
        /// Requested native type
        target: &'static str,
        /// JSON type of the value
        found: &'static str,
    },

    /// A number does not fit the target type
    #[error("value {value} is out of range for {target}")]
    OutOfRange {
        /// Requested native type
        target: &'static str,
        /// Textual form of the value
        value: String,
    },

    /// A string could not be read as the target type
    #[error("'{value}' is not a valid {target}")]
    InvalidLiteral {
        /// Requested native type
        target: &'static str,
        /// The string that failed to convert
        value: String,
    },

    /// No enumerator matches the name
    #[error("'{value}' does not name a variant of {target}")]
    UnknownVariant {
        /// Requested enumeration type
        target: &'static str,
        /// The unmatched name
        value: String,
    },

    /// Fixed-size target with a different element count
    #[error("expected {expected} elements for {target}, found {found}")]
    LengthMismatch {
        /// Requested native type
        target: &'static str,
        /// Required element count
        expected: usize,
        /// Element count of the array
        found: usize,
    },

    /// Failure while converting one element of an array
    #[error("element {index}: {source}")]
    Element {
        /// Index of the failing element
        index: usize,
        /// Underlying conversion failure
        #[source]
        source: Box<ConversionError>,
    },
}

/// Any error produced by the codec entry points.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed JSON text
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// Projection onto a native type failed
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Reading the input or writing the output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display() {
        let err = SyntaxError::new(SyntaxErrorKind::UnexpectedCharacter('x'), 2, 7);
        assert_eq!(
            err.to_string(),
            "unexpected character 'x' at line 2, column 7"
        );
        assert_eq!(err.position(), (2, 7));
    }

    #[test]
    fn test_syntax_error_escapes_control_characters() {
        let err = SyntaxError::new(SyntaxErrorKind::TrailingContent('\n'), 1, 3);
        assert_eq!(
            err.to_string(),
            "trailing characters after JSON document, found '\\n' at line 1, column 3"
        );
    }

    #[test]
    fn test_lone_surrogate_display() {
        let kind = SyntaxErrorKind::LoneSurrogate(0xD800);
        assert_eq!(kind.to_string(), "unpaired surrogate \\uD800");
    }

    #[test]
    fn test_conversion_error_display() {
        let err = ConversionError::Element {
            index: 2,
            source: Box::new(ConversionError::TypeMismatch {
                target: "i32",
                found: "string",
            }),
        };
        assert_eq!(err.to_string(), "element 2: cannot convert string to i32");
    }

    #[test]
    fn test_error_from_conversions() {
        let err: Error = SyntaxError::new(SyntaxErrorKind::UnexpectedEnd, 1, 1).into();
        assert!(matches!(err, Error::Syntax(_)));
        assert_eq!(
            err.to_string(),
            "unexpected end of input at line 1, column 1"
        );

        let err: Error = ConversionError::UnknownVariant {
            target: "Color",
            value: "Purple".to_string(),
        }
        .into();
        assert!(matches!(err, Error::Conversion(_)));
    }
}
