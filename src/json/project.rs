//! Projection of value trees onto native Rust types.
//!
//! The target shape is chosen statically through [`FromValue`]; nothing is
//! inspected at runtime beyond the value itself. Objects have no built-in
//! projection: implement [`FromValue`] for your own types and read fields
//! with [`Value::get`].
//!
//! ```
//! use json_tree::json::parse;
//!
//! let value = parse("[1, 2, 3]").unwrap();
//! let numbers: Vec<i32> = value.to().unwrap();
//! assert_eq!(numbers, vec![1, 2, 3]);
//! ```

use std::collections::VecDeque;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::number::Number;
use super::value::{Object, Value};
use crate::error::ConversionError;

type ProjectResult<T> = Result<T, ConversionError>;

/// A native type that can be produced from a [`Value`].
pub trait FromValue: Sized {
    /// Convert `value`, or explain why it cannot be converted.
    fn from_value(value: &Value) -> ProjectResult<Self>;
}

impl Value {
    /// Project this value onto `T`.
    pub fn to<T: FromValue>(&self) -> ProjectResult<T> {
        T::from_value(self)
    }
}

/// A fieldless enum whose variants are matched by name.
///
/// Usually implemented through [`json_enum!`](crate::json_enum).
pub trait Enumeration: Sized + Copy + 'static {
    /// Type name used in error messages.
    const NAME: &'static str;
    /// Every variant with its name.
    const VARIANTS: &'static [(&'static str, Self)];
}

/// Match a primitive's string form against the variant names of `T`,
/// ignoring ASCII case.
pub fn enumeration<T: Enumeration>(value: &Value) -> ProjectResult<T> {
    let name = primitive_text(value, T::NAME)?;
    T::VARIANTS
        .iter()
        .find(|(variant, _)| variant.eq_ignore_ascii_case(&name))
        .map(|(_, v)| *v)
        .ok_or(ConversionError::UnknownVariant {
            target: T::NAME,
            value: name,
        })
}

/// Declare a fieldless enum that projects from JSON by variant name.
///
/// ```
/// use json_tree::json::parse;
/// use json_tree::json_enum;
///
/// json_enum! {
///     #[derive(Debug, PartialEq)]
///     pub enum Channel { Stable, Beta }
/// }
///
/// let channels: Vec<Channel> = parse(r#"["stable", "BETA"]"#).unwrap().to().unwrap();
/// assert_eq!(channels, vec![Channel::Stable, Channel::Beta]);
/// ```
#[macro_export]
macro_rules! json_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident { $($variant:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy)]
        $vis enum $name { $($variant),+ }

        impl $crate::json::Enumeration for $name {
            const NAME: &'static str = stringify!($name);
            const VARIANTS: &'static [(&'static str, Self)] =
                &[$((stringify!($variant), $name::$variant)),+];
        }

        impl $crate::json::FromValue for $name {
            fn from_value(
                value: &$crate::json::Value,
            ) -> ::std::result::Result<Self, $crate::error::ConversionError> {
                $crate::json::enumeration(value)
            }
        }
    };
}

fn mismatch(target: &'static str, value: &Value) -> ConversionError {
    ConversionError::TypeMismatch {
        target,
        found: value.type_name(),
    }
}

/// String form of a primitive: strings as-is, numbers and booleans as text.
fn primitive_text(value: &Value, target: &'static str) -> ProjectResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(mismatch(target, value)),
    }
}

fn parse_literal<T: FromStr>(s: &str, target: &'static str) -> ProjectResult<T> {
    s.trim().parse().map_err(|_| ConversionError::InvalidLiteral {
        target,
        value: s.to_string(),
    })
}

/// Integral value of a number as i128, wide enough for every integer target.
fn integral(n: &Number, target: &'static str) -> ProjectResult<i128> {
    let out_of_range = || ConversionError::OutOfRange {
        target,
        value: n.to_string(),
    };
    match *n {
        Number::I32(v) => Ok(i128::from(v)),
        Number::I64(v) => Ok(i128::from(v)),
        Number::U64(v) => Ok(i128::from(v)),
        Number::Decimal(d) if d.fract().is_zero() => d.to_i128().ok_or_else(out_of_range),
        Number::F64(f) if f.fract() == 0.0 && f.abs() < 1.7e38 => Ok(f as i128),
        _ => Err(out_of_range()),
    }
}

macro_rules! impl_from_value_for_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> ProjectResult<Self> {
                    const TARGET: &str = stringify!($ty);
                    match value {
                        Value::Number(n) => {
                            let wide = integral(n, TARGET)?;
                            <$ty>::try_from(wide).map_err(|_| ConversionError::OutOfRange {
                                target: TARGET,
                                value: n.to_string(),
                            })
                        }
                        Value::String(s) => parse_literal(s, TARGET),
                        Value::Bool(b) => Ok(<$ty>::from(*b)),
                        _ => Err(mismatch(TARGET, value)),
                    }
                }
            }
        )*
    };
}

impl_from_value_for_int! {
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> ProjectResult<Self> {
        match value {
            Value::Number(n) => Ok(n.as_f64()),
            Value::String(s) => parse_literal(s, "f64"),
            Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            _ => Err(mismatch("f64", value)),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> ProjectResult<Self> {
        let wide = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => parse_literal::<f64>(s, "f32")?,
            Value::Bool(b) => f64::from(u8::from(*b)),
            _ => return Err(mismatch("f32", value)),
        };
        let narrow = wide as f32;
        if wide.is_finite() && narrow.is_infinite() {
            return Err(ConversionError::OutOfRange {
                target: "f32",
                value: wide.to_string(),
            });
        }
        Ok(narrow)
    }
}

impl FromValue for Decimal {
    fn from_value(value: &Value) -> ProjectResult<Self> {
        match value {
            Value::Number(n) => n.as_decimal().ok_or_else(|| ConversionError::OutOfRange {
                target: "Decimal",
                value: n.to_string(),
            }),
            Value::String(s) => parse_literal(s, "Decimal"),
            Value::Bool(b) => Ok(Decimal::from(u8::from(*b))),
            _ => Err(mismatch("Decimal", value)),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> ProjectResult<Self> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::Number(n) => Ok(!n.is_zero()),
            Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Ok(true),
            Value::String(s) if s.trim().eq_ignore_ascii_case("false") => Ok(false),
            Value::String(s) => Err(ConversionError::InvalidLiteral {
                target: "bool",
                value: s.clone(),
            }),
            _ => Err(mismatch("bool", value)),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> ProjectResult<Self> {
        primitive_text(value, "String")
    }
}

impl FromValue for char {
    fn from_value(value: &Value) -> ProjectResult<Self> {
        let text = primitive_text(value, "char")?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ConversionError::InvalidLiteral {
                target: "char",
                value: text,
            }),
        }
    }
}

impl FromValue for Number {
    fn from_value(value: &Value) -> ProjectResult<Self> {
        value
            .as_number()
            .copied()
            .ok_or_else(|| mismatch("Number", value))
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> ProjectResult<Self> {
        Ok(value.clone())
    }
}

impl FromValue for Object {
    fn from_value(value: &Value) -> ProjectResult<Self> {
        value
            .as_object()
            .cloned()
            .ok_or_else(|| mismatch("Object", value))
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> ProjectResult<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

/// Convert each array element, tagging failures with their index.
fn elements<T: FromValue>(value: &Value, target: &'static str) -> ProjectResult<Vec<T>> {
    let items = value.as_array().ok_or_else(|| mismatch(target, value))?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            T::from_value(item).map_err(|err| ConversionError::Element {
                index,
                source: Box::new(err),
            })
        })
        .collect()
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> ProjectResult<Self> {
        elements(value, "Vec")
    }
}

impl<T: FromValue> FromValue for VecDeque<T> {
    fn from_value(value: &Value) -> ProjectResult<Self> {
        elements(value, "VecDeque").map(VecDeque::from)
    }
}

impl<T: FromValue> FromValue for Box<[T]> {
    fn from_value(value: &Value) -> ProjectResult<Self> {
        elements(value, "boxed slice").map(Vec::into_boxed_slice)
    }
}

impl<T: FromValue, const N: usize> FromValue for [T; N] {
    fn from_value(value: &Value) -> ProjectResult<Self> {
        let items: Vec<T> = elements(value, "array")?;
        let found = items.len();
        items.try_into().map_err(|_| ConversionError::LengthMismatch {
            target: "array",
            expected: N,
            found,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::parse;

    json_enum! {
        #[derive(Debug, PartialEq)]
        enum Letter { A, B }
    }

    #[test]
    fn test_int_sequence() {
        let value = parse("[1,2,3]").unwrap();
        assert_eq!(value.to::<Vec<i32>>().unwrap(), vec![1, 2, 3]);
        assert_eq!(value.to::<[u8; 3]>().unwrap(), [1, 2, 3]);
        assert_eq!(
            value.to::<VecDeque<i64>>().unwrap(),
            VecDeque::from(vec![1, 2, 3])
        );
        assert_eq!(&*value.to::<Box<[u64]>>().unwrap(), &[1, 2, 3]);
    }

    #[test]
    fn test_enum_array_case_insensitive() {
        let value = parse(r#"["A","b"]"#).unwrap();
        assert_eq!(
            value.to::<Vec<Letter>>().unwrap(),
            vec![Letter::A, Letter::B]
        );
    }

    #[test]
    fn test_unknown_enum_variant() {
        let err = parse(r#""C""#).unwrap().to::<Letter>().unwrap_err();
        assert_eq!(
            err,
            ConversionError::UnknownVariant {
                target: "Letter",
                value: "C".to_string()
            }
        );
    }

    #[test]
    fn test_null_slots() {
        let value = parse("[1, null, 3]").unwrap();
        assert_eq!(
            value.to::<Vec<Option<i32>>>().unwrap(),
            vec![Some(1), None, Some(3)]
        );

        let err = value.to::<Vec<i32>>().unwrap_err();
        assert_eq!(
            err,
            ConversionError::Element {
                index: 1,
                source: Box::new(ConversionError::TypeMismatch {
                    target: "i32",
                    found: "null"
                })
            }
        );
    }

    #[test]
    fn test_array_required() {
        let err = parse("5").unwrap().to::<Vec<i32>>().unwrap_err();
        assert_eq!(
            err,
            ConversionError::TypeMismatch {
                target: "Vec",
                found: "number"
            }
        );
    }

    #[test]
    fn test_fixed_array_length() {
        let err = parse("[1, 2]").unwrap().to::<[i32; 3]>().unwrap_err();
        assert_eq!(
            err,
            ConversionError::LengthMismatch {
                target: "array",
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_integer_conversions() {
        assert_eq!(parse("300").unwrap().to::<i16>().unwrap(), 300);
        assert!(matches!(
            parse("300").unwrap().to::<u8>(),
            Err(ConversionError::OutOfRange { target: "u8", .. })
        ));
        assert!(matches!(
            parse("-1").unwrap().to::<u32>(),
            Err(ConversionError::OutOfRange { .. })
        ));
        assert_eq!(parse("2.0").unwrap().to::<i32>().unwrap(), 2);
        assert_eq!(parse("1e2").unwrap().to::<u64>().unwrap(), 100);
        assert!(matches!(
            parse("2.5").unwrap().to::<i32>(),
            Err(ConversionError::OutOfRange { .. })
        ));
        assert_eq!(parse(r#""42""#).unwrap().to::<i32>().unwrap(), 42);
        assert_eq!(parse("true").unwrap().to::<u8>().unwrap(), 1);
        assert_eq!(
            parse("18446744073709551615").unwrap().to::<u64>().unwrap(),
            u64::MAX
        );
    }

    #[test]
    fn test_invalid_literal() {
        assert_eq!(
            parse(r#""4x""#).unwrap().to::<i32>().unwrap_err(),
            ConversionError::InvalidLiteral {
                target: "i32",
                value: "4x".to_string()
            }
        );
    }

    #[test]
    fn test_float_conversions() {
        assert_eq!(parse("0.5").unwrap().to::<f64>().unwrap(), 0.5);
        assert_eq!(parse("3").unwrap().to::<f32>().unwrap(), 3.0);
        assert_eq!(parse(r#""2.25""#).unwrap().to::<f64>().unwrap(), 2.25);
        assert!(matches!(
            parse("1e300").unwrap().to::<f32>(),
            Err(ConversionError::OutOfRange { target: "f32", .. })
        ));
        assert!(matches!(
            parse("[]").unwrap().to::<f32>(),
            Err(ConversionError::TypeMismatch { target: "f32", .. })
        ));
    }

    #[test]
    fn test_decimal_conversion() {
        assert_eq!(
            parse("1.25").unwrap().to::<Decimal>().unwrap(),
            Decimal::new(125, 2)
        );
        assert_eq!(
            parse("7").unwrap().to::<Decimal>().unwrap(),
            Decimal::from(7)
        );
    }

    #[test]
    fn test_bool_conversions() {
        assert!(parse("true").unwrap().to::<bool>().unwrap());
        assert!(parse(r#""TRUE""#).unwrap().to::<bool>().unwrap());
        assert!(!parse("0").unwrap().to::<bool>().unwrap());
        assert!(parse(r#""yes""#).unwrap().to::<bool>().is_err());
    }

    #[test]
    fn test_string_conversions() {
        assert_eq!(parse(r#""hi""#).unwrap().to::<String>().unwrap(), "hi");
        assert_eq!(parse("12").unwrap().to::<String>().unwrap(), "12");
        assert_eq!(parse("false").unwrap().to::<String>().unwrap(), "false");
        assert!(parse("null").unwrap().to::<String>().is_err());
        assert_eq!(parse(r#""x""#).unwrap().to::<char>().unwrap(), 'x');
        assert!(parse(r#""xy""#).unwrap().to::<char>().is_err());
    }

    #[test]
    fn test_any_fallback() {
        let value = parse(r#"[{"a": 1}, null]"#).unwrap();
        let items = value.to::<Vec<Value>>().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items[0].is_object());
        assert!(items[1].is_null());
        assert!(items[0].to::<Object>().is_ok());
    }

    #[test]
    fn test_nested_sequences() {
        let value = parse("[[1], [2, 3], []]").unwrap();
        assert_eq!(
            value.to::<Vec<Vec<u16>>>().unwrap(),
            vec![vec![1], vec![2, 3], vec![]]
        );
    }

    struct Endpoint {
        host: String,
        port: u16,
    }

    impl FromValue for Endpoint {
        fn from_value(value: &Value) -> ProjectResult<Self> {
            let field = |key: &str| value.get(key).cloned().unwrap_or_default();
            if !value.is_object() {
                return Err(mismatch("Endpoint", value));
            }
            Ok(Self {
                host: field("host").to()?,
                port: field("port").to()?,
            })
        }
    }

    #[test]
    fn test_object_extension_point() {
        let value = parse(r#"[{"host": "localhost", "port": 8080}]"#).unwrap();
        let endpoints: Vec<Endpoint> = value.to().unwrap();
        assert_eq!(endpoints[0].host, "localhost");
        assert_eq!(endpoints[0].port, 8080);
    }
}
