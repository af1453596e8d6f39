//! Resource limits for JSON parsing.
//!
//! Parsing is not incremental and cannot be cancelled, so callers that accept
//! untrusted input bound it up front. Every limit violation is reported as a
//! positioned [`SyntaxError`](crate::error::SyntaxError).

/// Resource limits applied while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum input size in bytes, checked before parsing starts
    pub max_input_len: usize,
    /// Maximum nesting depth of arrays and objects
    pub max_depth: usize,
    /// Maximum length of a single string literal, in characters
    pub max_string_len: usize,
}

impl Limits {
    /// Limits for untrusted input such as network bodies.
    pub const fn strict() -> Self {
        Self {
            max_input_len: 1024 * 1024, // 1 MiB
            max_depth: 64,
            max_string_len: 64 * 1024,
        }
    }

    /// No limits beyond available memory and stack.
    pub const fn unbounded() -> Self {
        Self {
            max_input_len: usize::MAX,
            max_depth: usize::MAX,
            max_string_len: usize::MAX,
        }
    }
}

impl Default for Limits {
    /// Generous limits for local files.
    fn default() -> Self {
        Self {
            max_input_len: 64 * 1024 * 1024, // 64 MiB
            max_depth: 512,
            max_string_len: 16 * 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_is_tighter_than_default() {
        let strict = Limits::strict();
        let default = Limits::default();
        assert!(strict.max_input_len < default.max_input_len);
        assert!(strict.max_depth < default.max_depth);
        assert!(strict.max_string_len < default.max_string_len);
    }

    #[test]
    fn test_strict_limits() {
        let limits = Limits::strict();
        assert_eq!(limits.max_input_len, 1024 * 1024);
        assert_eq!(limits.max_depth, 64);
        assert_eq!(limits.max_string_len, 64 * 1024);
    }

    #[test]
    fn test_unbounded_limits() {
        assert_eq!(Limits::unbounded().max_depth, usize::MAX);
    }
}
