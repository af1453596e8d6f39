//! Character cursor with one character of lookahead.
//!
//! The parser decides which production to apply by peeking at the next
//! character, so it never backtracks. The cursor tracks 1-based line and
//! column numbers of the last consumed character for diagnostics.

use std::iter::Peekable;

use crate::error::{SyntaxError, SyntaxErrorKind};

/// Lookahead-of-one reader over a character source.
pub struct Cursor<I: Iterator<Item = char>> {
    chars: Peekable<I>,
    line: usize,
    column: usize,
    after_newline: bool,
}

impl<I: Iterator<Item = char>> Cursor<I> {
    /// Wrap a character source. Position starts at line 1, column 0.
    pub fn new(chars: I) -> Self {
        Self {
            chars: chars.peekable(),
            line: 1,
            column: 0,
            after_newline: false,
        }
    }

    /// Next character without consuming it, `None` at end of input.
    pub fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// Consume and return the next character.
    pub fn consume(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if self.after_newline {
            self.line += 1;
            self.column = 0;
        }
        self.column += 1;
        self.after_newline = c == '\n';
        Some(c)
    }

    /// Line of the last consumed character.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Column of the last consumed character.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Skip JSON whitespace (space, tab, CR, LF).
    pub fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\r' | '\n') = self.peek() {
            self.consume();
        }
    }

    /// Build a syntax error at the current position.
    ///
    /// Before anything is consumed the error points at column 1.
    pub fn error(&self, kind: SyntaxErrorKind) -> SyntaxError {
        SyntaxError::new(kind, self.line, self.column.max(1))
    }

    /// Consume the next character, failing at end of input.
    pub fn next_or_eof(&mut self) -> Result<char, SyntaxError> {
        self.consume()
            .ok_or_else(|| self.error(SyntaxErrorKind::UnexpectedEnd))
    }

    /// Consume the next character and require it to be `expected`.
    pub fn expect(&mut self, expected: char, what: &'static str) -> Result<(), SyntaxError> {
        match self.next_or_eof()? {
            c if c == expected => Ok(()),
            found => Err(self.error(SyntaxErrorKind::Expected {
                expected: what,
                found,
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_does_not_consume() {
        let mut cursor = Cursor::new("ab".chars());
        assert_eq!(cursor.peek(), Some('a'));
        assert_eq!(cursor.peek(), Some('a'));
        assert_eq!(cursor.column(), 0);
        assert_eq!(cursor.consume(), Some('a'));
        assert_eq!(cursor.peek(), Some('b'));
    }

    #[test]
    fn test_end_of_input() {
        let mut cursor = Cursor::new("x".chars());
        assert_eq!(cursor.consume(), Some('x'));
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.consume(), None);
        assert_eq!((cursor.line(), cursor.column()), (1, 1));
    }

    #[test]
    fn test_error_before_input_is_column_one() {
        let mut cursor = Cursor::new("".chars());
        let err = cursor.next_or_eof().unwrap_err();
        assert_eq!(err.position(), (1, 1));
        assert_eq!(cursor.column(), 0);
    }

    #[test]
    fn test_line_and_column_tracking() {
        let mut cursor = Cursor::new("ab\ncd".chars());
        cursor.consume();
        assert_eq!((cursor.line(), cursor.column()), (1, 1));
        cursor.consume();
        assert_eq!((cursor.line(), cursor.column()), (1, 2));
        // The newline itself is the last column of its line.
        cursor.consume();
        assert_eq!((cursor.line(), cursor.column()), (1, 3));
        cursor.consume();
        assert_eq!((cursor.line(), cursor.column()), (2, 1));
        cursor.consume();
        assert_eq!((cursor.line(), cursor.column()), (2, 2));
    }

    #[test]
    fn test_skip_whitespace() {
        let mut cursor = Cursor::new(" \t\r\n x".chars());
        cursor.skip_whitespace();
        assert_eq!(cursor.peek(), Some('x'));
        assert_eq!(cursor.line(), 2);
    }

    #[test]
    fn test_expect() {
        let mut cursor = Cursor::new(":,".chars());
        assert!(cursor.expect(':', "':'").is_ok());
        let err = cursor.expect(':', "':'").unwrap_err();
        assert_eq!(
            err.kind,
            SyntaxErrorKind::Expected {
                expected: "':'",
                found: ','
            }
        );
        assert_eq!(err.position(), (1, 2));
        let err = cursor.expect(':', "':'").unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::UnexpectedEnd);
    }
}
