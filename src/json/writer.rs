//! Canonical JSON writer.
//!
//! Output is a single compact line: elements and pairs are separated by
//! `", "`, keys by `": "`, with no indentation and no trailing newline.
//! Object pairs are written in stored order, repeated keys included.
//!
//! Non-finite doubles have no JSON number token, so they are written as the
//! strings `"NaN"`, `"Infinity"` and `"-Infinity"`. The parser reads these
//! back as plain strings: this is a one-way escape hatch, not a round trip.

use std::fmt::Write as _;
use std::io;

use super::number::Number;
use super::parser::ESCAPES;
use super::value::Value;

/// Serialize a value to canonical JSON text.
pub fn to_string(value: &Value) -> String {
    let mut output = String::new();
    write_value(value, &mut output);
    output
}

/// Serialize a value to canonical JSON as UTF-8 bytes.
pub fn to_vec(value: &Value) -> Vec<u8> {
    to_string(value).into_bytes()
}

/// Append canonical JSON for `value` to `sink`.
///
/// Only the sink can fail; every value tree has a serialization.
pub fn write<W: io::Write>(value: &Value, mut sink: W) -> io::Result<()> {
    sink.write_all(to_string(value).as_bytes())
}

/// Like [`write`], writing `null` when there is no value.
pub fn write_opt<W: io::Write>(value: Option<&Value>, mut sink: W) -> io::Result<()> {
    match value {
        Some(value) => write(value, sink),
        None => sink.write_all(b"null"),
    }
}

fn write_value(value: &Value, output: &mut String) {
    match value {
        Value::Null => output.push_str("null"),
        Value::Bool(true) => output.push_str("true"),
        Value::Bool(false) => output.push_str("false"),
        Value::Number(n) => write_number(n, output),
        Value::String(s) => write_string(s, output),
        Value::Array(items) => {
            output.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    output.push_str(", ");
                }
                write_value(item, output);
            }
            output.push(']');
        }
        Value::Object(object) => {
            output.push('{');
            for (i, (key, item)) in object.iter().enumerate() {
                if i > 0 {
                    output.push_str(", ");
                }
                write_string(key, output);
                output.push_str(": ");
                write_value(item, output);
            }
            output.push('}');
        }
    }
}

fn write_number(n: &Number, output: &mut String) {
    match *n {
        Number::F64(f) if f.is_nan() => output.push_str("\"NaN\""),
        Number::F64(f) if f == f64::INFINITY => output.push_str("\"Infinity\""),
        Number::F64(f) if f == f64::NEG_INFINITY => output.push_str("\"-Infinity\""),
        _ => {
            // Writing into a String cannot fail.
            let _ = write!(output, "{n}");
        }
    }
}

fn write_string(s: &str, output: &mut String) {
    output.push('"');
    for c in s.chars() {
        if let Some((letter, _)) = ESCAPES.iter().find(|(_, decoded)| *decoded == c) {
            output.push('\\');
            output.push(*letter);
        } else if c < '\u{20}' {
            let _ = write!(output, "\\u{:04x}", c as u32);
        } else {
            output.push(c);
        }
    }
    output.push('"');
}
