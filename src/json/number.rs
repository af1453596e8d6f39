//! Numeric representation for JSON numbers.
//!
//! A number keeps the representation chosen when it was parsed (or built);
//! nothing widens it afterwards, so it is written back in the same form.
//!
//! Classification of a literal follows a fixed ladder:
//!
//! 1. Plain integers try `i32`, then `i64`, then `u64`.
//! 2. Anything left (fraction, exponent, or too wide for `u64`) tries a
//!    128-bit [`Decimal`], accepted only when the decoded value is non-zero.
//! 3. Everything else becomes an `f64`.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

/// A JSON number in one of five fixed representations.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// 32-bit signed integer
    I32(i32),
    /// 64-bit signed integer
    I64(i64),
    /// 64-bit unsigned integer
    U64(u64),
    /// High-precision decimal (96-bit mantissa, scale up to 28)
    Decimal(Decimal),
    /// IEEE-754 double
    F64(f64),
}

/// Which representation a [`Number`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    /// [`Number::I32`]
    I32,
    /// [`Number::I64`]
    I64,
    /// [`Number::U64`]
    U64,
    /// [`Number::Decimal`]
    Decimal,
    /// [`Number::F64`]
    F64,
}

impl NumberKind {
    /// Short lowercase name, e.g. `"i64"`.
    pub fn name(self) -> &'static str {
        match self {
            NumberKind::I32 => "i32",
            NumberKind::I64 => "i64",
            NumberKind::U64 => "u64",
            NumberKind::Decimal => "decimal",
            NumberKind::F64 => "f64",
        }
    }
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Number {
    /// Classify the text of a syntactically valid JSON number literal.
    ///
    /// `is_integer` is true when the literal had neither a fraction nor an
    /// exponent. Returns `None` only if even the `f64` fallback rejects the
    /// text, which cannot happen for literals the parser accepted.
    pub fn from_literal(text: &str, is_integer: bool) -> Option<Number> {
        if is_integer {
            if let Ok(n) = text.parse::<i32>() {
                return Some(Number::I32(n));
            }
            if let Ok(n) = text.parse::<i64>() {
                return Some(Number::I64(n));
            }
            if let Ok(n) = text.parse::<u64>() {
                return Some(Number::U64(n));
            }
        }

        // Zero decimals fall through to f64, so `0.0` is a double.
        if let Some(d) = parse_decimal(text) {
            if !d.is_zero() {
                return Some(Number::Decimal(d));
            }
        }

        text.parse::<f64>().ok().map(Number::F64)
    }

    /// The representation held.
    pub fn kind(&self) -> NumberKind {
        match self {
            Number::I32(_) => NumberKind::I32,
            Number::I64(_) => NumberKind::I64,
            Number::U64(_) => NumberKind::U64,
            Number::Decimal(_) => NumberKind::Decimal,
            Number::F64(_) => NumberKind::F64,
        }
    }

    /// True for the three integer representations.
    pub fn is_integer(&self) -> bool {
        matches!(self, Number::I32(_) | Number::I64(_) | Number::U64(_))
    }

    /// Value as `i64` if it is an integral number in range.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Number::I32(n) => Some(i64::from(n)),
            Number::I64(n) => Some(n),
            Number::U64(n) => i64::try_from(n).ok(),
            Number::Decimal(d) if d.fract().is_zero() => d.to_i64(),
            Number::F64(f) => float_to_i64(f),
            Number::Decimal(_) => None,
        }
    }

    /// Value as `u64` if it is a non-negative integral number in range.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Number::I32(n) => u64::try_from(n).ok(),
            Number::I64(n) => u64::try_from(n).ok(),
            Number::U64(n) => Some(n),
            Number::Decimal(d) if d.fract().is_zero() => d.to_u64(),
            Number::F64(f) => float_to_u64(f),
            Number::Decimal(_) => None,
        }
    }

    /// Value as `f64`, rounding where the representation is wider.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::I32(n) => f64::from(n),
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::Decimal(d) => decimal_to_f64(d),
            Number::F64(f) => f,
        }
    }

    /// Value as a [`Decimal`], if representable.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match *self {
            Number::I32(n) => Some(Decimal::from(n)),
            Number::I64(n) => Some(Decimal::from(n)),
            Number::U64(n) => Some(Decimal::from(n)),
            Number::Decimal(d) => Some(d),
            Number::F64(f) => Decimal::from_f64(f),
        }
    }

    /// True when the value is zero in any representation.
    pub fn is_zero(&self) -> bool {
        match *self {
            Number::I32(n) => n == 0,
            Number::I64(n) => n == 0,
            Number::U64(n) => n == 0,
            Number::Decimal(d) => d.is_zero(),
            Number::F64(f) => f == 0.0,
        }
    }
}

/// Per-representation equality: `I32(1) != I64(1)`.
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::I32(a), Number::I32(b)) => a == b,
            (Number::I64(a), Number::I64(b)) => a == b,
            (Number::U64(a), Number::U64(b)) => a == b,
            (Number::Decimal(a), Number::Decimal(b)) => a == b,
            (Number::F64(a), Number::F64(b)) => a == b,
            _ => false,
        }
    }
}

/// Plain textual form. Doubles use the shortest round-trip form; the other
/// representations never use exponent notation.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I32(n) => write!(f, "{n}"),
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::Decimal(d) => write!(f, "{d}"),
            Number::F64(v) => write!(f, "{v:?}"),
        }
    }
}

macro_rules! impl_from_number {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Number {
                fn from(n: $ty) -> Self {
                    Number::$variant(n.into())
                }
            }
        )*
    };
}

impl_from_number! {
    i8 => I32,
    i16 => I32,
    i32 => I32,
    u8 => I32,
    u16 => I32,
    i64 => I64,
    u32 => I64,
    u64 => U64,
    f32 => F64,
    f64 => F64,
}

impl From<Decimal> for Number {
    fn from(d: Decimal) -> Self {
        Number::Decimal(d)
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    if text.contains(['e', 'E']) {
        Decimal::from_scientific(text).ok()
    } else {
        Decimal::from_str(text).ok()
    }
}

fn decimal_to_f64(d: Decimal) -> f64 {
    // The shortest decimal text always parses back to the nearest double.
    d.to_string().parse().unwrap_or(f64::NAN)
}

// 2^63 and 2^64 are exact as doubles, so the half-open bounds are precise.
const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

fn float_to_i64(f: f64) -> Option<i64> {
    if f.fract() == 0.0 && (-TWO_POW_63..TWO_POW_63).contains(&f) {
        Some(f as i64)
    } else {
        None
    }
}

fn float_to_u64(f: f64) -> Option<u64> {
    if f.fract() == 0.0 && (0.0..TWO_POW_64).contains(&f) {
        Some(f as u64)
    } else {
        None
    }
}
