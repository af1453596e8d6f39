//! Recursive descent JSON parser.
//!
//! Dispatches on one character of lookahead and builds a [`Value`] tree.
//! The first malformed token aborts the parse; there is no partial result.
//!
//! Deliberate choices where plain JSON grammars differ:
//!
//! - Repeated object keys are kept, in order.
//! - Raw control characters inside strings are accepted as-is.
//! - `\u` escapes must be four hex digits and surrogates must pair up, since a
//!   Rust string cannot hold a lone surrogate.
//! - A comma right before the closing `}` of an object is accepted; in
//!   arrays it is an error.

use std::io::Read;

use super::cursor::Cursor;
use super::limits::Limits;
use super::number::Number;
use super::value::{Object, Value};
use crate::error::{SyntaxError, SyntaxErrorKind};

type ParseResult<T> = Result<T, SyntaxError>;

/// Single-character escapes as (escape letter, decoded character).
///
/// The writer uses the same table in reverse. `\/` decodes too but is never
/// written, since `/` needs no escaping.
pub(crate) const ESCAPES: [(char, char); 7] = [
    ('"', '"'),
    ('\\', '\\'),
    ('b', '\u{08}'),
    ('f', '\u{0C}'),
    ('n', '\n'),
    ('r', '\r'),
    ('t', '\t'),
];

/// JSON parser over any character source.
pub struct Parser<I: Iterator<Item = char>> {
    cursor: Cursor<I>,
    limits: Limits,
    depth: usize,
    // Reused across string literals within one parse.
    scratch: String,
}

impl<I: Iterator<Item = char>> Parser<I> {
    /// Create a parser for the given characters.
    pub fn new(chars: I, limits: Limits) -> Self {
        Self {
            cursor: Cursor::new(chars),
            limits,
            depth: 0,
            scratch: String::new(),
        }
    }

    /// Parse exactly one document; only whitespace may follow it.
    pub fn parse(mut self) -> ParseResult<Value> {
        let result = self.parse_document();
        match &result {
            Ok(value) => tracing::trace!(root = value.type_name(), "parsed JSON document"),
            Err(err) => tracing::debug!(
                line = err.line,
                column = err.column,
                error = %err.kind,
                "JSON parse failed"
            ),
        }
        result
    }

    fn parse_document(&mut self) -> ParseResult<Value> {
        let value = self.parse_value()?;
        self.cursor.skip_whitespace();
        match self.cursor.consume() {
            None => Ok(value),
            Some(c) => Err(self.cursor.error(SyntaxErrorKind::TrailingContent(c))),
        }
    }

    fn parse_value(&mut self) -> ParseResult<Value> {
        self.cursor.skip_whitespace();
        match self.cursor.peek() {
            None => Err(self.cursor.error(SyntaxErrorKind::UnexpectedEnd)),
            Some('[') => self.parse_array(),
            Some('{') => self.parse_object(),
            Some('"') => self.parse_string().map(Value::String),
            Some('t') => self.parse_keyword("true", Value::Bool(true)),
            Some('f') => self.parse_keyword("false", Value::Bool(false)),
            Some('n') => self.parse_keyword("null", Value::Null),
            Some('-' | '0'..='9') => self.parse_number().map(Value::Number),
            Some(c) => {
                self.cursor.consume();
                Err(self.cursor.error(SyntaxErrorKind::UnexpectedCharacter(c)))
            }
        }
    }

    fn enter_nested(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > self.limits.max_depth {
            return Err(self
                .cursor
                .error(SyntaxErrorKind::NestingTooDeep(self.limits.max_depth)));
        }
        Ok(())
    }

    fn parse_array(&mut self) -> ParseResult<Value> {
        self.cursor.consume();
        self.enter_nested()?;

        let mut items = Vec::new();
        self.cursor.skip_whitespace();
        if self.cursor.peek() == Some(']') {
            self.cursor.consume();
            self.depth -= 1;
            return Ok(Value::Array(items));
        }

        loop {
            items.push(self.parse_value()?);
            self.cursor.skip_whitespace();
            match self.cursor.next_or_eof()? {
                ',' => continue,
                ']' => break,
                found => {
                    return Err(self.cursor.error(SyntaxErrorKind::Expected {
                        expected: "',' or ']'",
                        found,
                    }))
                }
            }
        }

        self.depth -= 1;
        Ok(Value::Array(items))
    }

    fn parse_object(&mut self) -> ParseResult<Value> {
        self.cursor.consume();
        self.enter_nested()?;

        let mut object = Object::new();
        loop {
            // Covers both the empty object and a comma right before '}'.
            self.cursor.skip_whitespace();
            let key = match self.cursor.peek() {
                Some('}') => {
                    self.cursor.consume();
                    break;
                }
                Some('"') => self.parse_string()?,
                Some(found) => {
                    self.cursor.consume();
                    return Err(self.cursor.error(SyntaxErrorKind::Expected {
                        expected: "string key",
                        found,
                    }));
                }
                None => return Err(self.cursor.error(SyntaxErrorKind::UnexpectedEnd)),
            };

            self.cursor.skip_whitespace();
            self.cursor.expect(':', "':'")?;
            let value = self.parse_value()?;
            object.push(key, value);

            self.cursor.skip_whitespace();
            match self.cursor.next_or_eof()? {
                ',' => continue,
                '}' => break,
                found => {
                    return Err(self.cursor.error(SyntaxErrorKind::Expected {
                        expected: "',' or '}'",
                        found,
                    }))
                }
            }
        }

        self.depth -= 1;
        Ok(Value::Object(object))
    }

    fn parse_keyword(&mut self, keyword: &'static str, value: Value) -> ParseResult<Value> {
        for expected in keyword.chars() {
            let c = self.cursor.next_or_eof()?;
            if c != expected {
                return Err(self.cursor.error(SyntaxErrorKind::UnexpectedCharacter(c)));
            }
        }
        Ok(value)
    }

    fn parse_string(&mut self) -> ParseResult<String> {
        self.cursor.consume();
        self.scratch.clear();
        let mut len = 0usize;

        loop {
            let c = match self.cursor.next_or_eof()? {
                '"' => break,
                '\\' => self.parse_escape()?,
                c => c,
            };
            len += 1;
            if len > self.limits.max_string_len {
                return Err(self
                    .cursor
                    .error(SyntaxErrorKind::StringTooLong(self.limits.max_string_len)));
            }
            self.scratch.push(c);
        }

        Ok(self.scratch.as_str().to_owned())
    }

    fn parse_escape(&mut self) -> ParseResult<char> {
        match self.cursor.next_or_eof()? {
            'u' => self.parse_unicode_escape(),
            '/' => Ok('/'),
            c => ESCAPES
                .iter()
                .find(|(letter, _)| *letter == c)
                .map(|(_, decoded)| *decoded)
                .ok_or_else(|| self.cursor.error(SyntaxErrorKind::InvalidEscape(c))),
        }
    }

    fn parse_unicode_escape(&mut self) -> ParseResult<char> {
        let unit = self.parse_hex4()?;

        if (0xD800..=0xDBFF).contains(&unit) {
            let lone = SyntaxErrorKind::LoneSurrogate(unit);
            if self.cursor.peek() != Some('\\') {
                return Err(self.cursor.error(lone));
            }
            self.cursor.consume();
            if self.cursor.next_or_eof()? != 'u' {
                return Err(self.cursor.error(lone));
            }
            let low = self.parse_hex4()?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(self.cursor.error(lone));
            }
            let combined = 0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
            return char::from_u32(combined).ok_or_else(|| self.cursor.error(lone));
        }

        char::from_u32(u32::from(unit))
            .ok_or_else(|| self.cursor.error(SyntaxErrorKind::LoneSurrogate(unit)))
    }

    fn parse_hex4(&mut self) -> ParseResult<u16> {
        let mut unit: u16 = 0;
        for _ in 0..4 {
            let c = self.cursor.next_or_eof()?;
            let digit = c
                .to_digit(16)
                .ok_or_else(|| self.cursor.error(SyntaxErrorKind::InvalidHexDigit(c)))?;
            unit = (unit << 4) | digit as u16;
        }
        Ok(unit)
    }

    fn parse_number(&mut self) -> ParseResult<Number> {
        let mut text = String::new();

        if self.cursor.peek() == Some('-') {
            self.push_consumed(&mut text);
        }

        match self.cursor.peek() {
            Some('0') => {
                self.push_consumed(&mut text);
                if matches!(self.cursor.peek(), Some('0'..='9')) {
                    self.cursor.consume();
                    return Err(self.cursor.error(SyntaxErrorKind::LeadingZero));
                }
            }
            Some('1'..='9') => {
                self.push_digits(&mut text);
            }
            _ => return Err(self.cursor.error(SyntaxErrorKind::MissingDigits('-'))),
        }

        let mut is_integer = true;

        if self.cursor.peek() == Some('.') {
            is_integer = false;
            self.push_consumed(&mut text);
            if self.push_digits(&mut text) == 0 {
                return Err(self.cursor.error(SyntaxErrorKind::MissingDigits('.')));
            }
        }

        if let Some(marker @ ('e' | 'E')) = self.cursor.peek() {
            is_integer = false;
            self.push_consumed(&mut text);
            if let Some('+' | '-') = self.cursor.peek() {
                self.push_consumed(&mut text);
            }
            if self.push_digits(&mut text) == 0 {
                return Err(self.cursor.error(SyntaxErrorKind::MissingDigits(marker)));
            }
        }

        match Number::from_literal(&text, is_integer) {
            Some(number) => Ok(number),
            None => Err(self.cursor.error(SyntaxErrorKind::InvalidNumber(text))),
        }
    }

    fn push_consumed(&mut self, text: &mut String) {
        if let Some(c) = self.cursor.consume() {
            text.push(c);
        }
    }

    fn push_digits(&mut self, text: &mut String) -> usize {
        let mut count = 0;
        while let Some(c @ '0'..='9') = self.cursor.peek() {
            self.cursor.consume();
            text.push(c);
            count += 1;
        }
        count
    }
}

/// Parse a JSON document with [`Limits::default`].
pub fn parse(text: &str) -> Result<Value, SyntaxError> {
    parse_with_limits(text, Limits::default())
}

/// Parse a JSON document with custom limits.
pub fn parse_with_limits(text: &str, limits: Limits) -> Result<Value, SyntaxError> {
    if text.len() > limits.max_input_len {
        return Err(SyntaxError::new(
            SyntaxErrorKind::InputTooLarge {
                size: text.len(),
                limit: limits.max_input_len,
            },
            1,
            1,
        ));
    }
    Parser::new(text.chars(), limits).parse()
}

/// Read a whole UTF-8 document from `reader` and parse it with [`Limits::default`].
pub fn from_reader<R: Read>(reader: R) -> crate::error::Result<Value> {
    from_reader_with_limits(reader, Limits::default())
}

/// Read a whole UTF-8 document from `reader` and parse it with custom limits.
///
/// A leading byte-order mark is skipped. Invalid UTF-8 is reported as an
/// I/O error of kind `InvalidData`.
pub fn from_reader_with_limits<R: Read>(reader: R, limits: Limits) -> crate::error::Result<Value> {
    let cap = (limits.max_input_len as u64).saturating_add(1);
    let mut bytes = Vec::new();
    reader.take(cap).read_to_end(&mut bytes)?;
    if bytes.len() > limits.max_input_len {
        return Err(SyntaxError::new(
            SyntaxErrorKind::InputTooLarge {
                size: bytes.len(),
                limit: limits.max_input_len,
            },
            1,
            1,
        )
        .into());
    }

    let text = String::from_utf8(bytes)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
    let body = text.strip_prefix('\u{FEFF}').unwrap_or(&text);
    Ok(parse_with_limits(body, limits)?)
}
