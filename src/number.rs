//! Numeric values handled by the engine
//!
//! Upstream pipelines hand over a mix of integral and floating-point
//! measurements. [`Number`] keeps each one in its own representation so nothing
//! is narrowed on the way in, while equality and ordering are always numeric:
//! `Number::Integer(3) == Number::Float(3.0)`.

use crate::errors::{AggregateError, Result};
use ndarray::{ArrayBase, Data, Dimension};
use serde_json::Value as JsonValue;
use std::cmp::Ordering;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A single measurement
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit IEEE float
    Float(f64),
}

impl Number {
    /// Converts to `f64`, rounding integers beyond 2^53 to the nearest float
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(self) -> f64 {
        match self {
            Self::Integer(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    /// Whether the value is held in integral representation
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Integer(_))
    }

    /// Whether the value is a floating-point NaN
    #[must_use]
    pub fn is_nan(self) -> bool {
        matches!(self, Self::Float(f) if f.is_nan())
    }
}

/// Compares two numbers by value, regardless of representation.
///
/// The order is total: integer/float comparisons are exact even where the
/// integer has no exact `f64` counterpart, `-0.0` equals `0.0`, and NaN sorts
/// above every other value and equals itself.
#[must_use]
pub fn numeric_cmp(a: &Number, b: &Number) -> Ordering {
    match (*a, *b) {
        (Number::Integer(x), Number::Integer(y)) => x.cmp(&y),
        (Number::Float(x), Number::Float(y)) => float_cmp(x, y),
        (Number::Integer(x), Number::Float(y)) => int_float_cmp(x, y),
        (Number::Float(x), Number::Integer(y)) => int_float_cmp(y, x).reverse(),
    }
}

fn float_cmp(x: f64, y: f64) -> Ordering {
    match (x.is_nan(), y.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn int_float_cmp(i: i64, f: f64) -> Ordering {
    if f.is_nan() {
        return Ordering::Less;
    }
    match float_cmp(i as f64, f) {
        // Rounding is monotonic, so only a tie needs a closer look. A tie means
        // `f` is integral with magnitude at most 2^63, which i128 holds exactly.
        Ordering::Equal => i128::from(i).cmp(&(f as i128)),
        other => other,
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        numeric_cmp(self, other) == Ordering::Equal
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        numeric_cmp(self, other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Integer(i) => write!(f, "{i}"),
            // Keep a visible fraction so floats never read as integers
            Self::Float(x) if x.is_finite() && x.fract() == 0.0 => {
                write!(f, "{x:.1}")
            }
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}

impl FromStr for Number {
    type Err = AggregateError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(i) = trimmed.parse::<i64>() {
            return Ok(Self::Integer(i));
        }
        trimmed
            .parse::<f64>()
            .map(Self::Float)
            .map_err(|_| AggregateError::Parse {
                input: s.to_string(),
            })
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(value: $t) -> Self {
                    Self::Integer(i64::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Number {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Self::Float(value as f64), Self::Integer)
    }
}

impl From<usize> for Number {
    fn from(value: usize) -> Self {
        // usize is at most 64 bits on every supported target
        Self::from(value as u64)
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Number> for JsonValue {
    fn from(value: Number) -> Self {
        match value {
            Number::Integer(i) => JsonValue::from(i),
            // JSON has no NaN or infinity
            Number::Float(f) => serde_json::Number::from_f64(f).map_or(JsonValue::Null, JsonValue::Number),
        }
    }
}

/// Collects the elements of an `ndarray` array, in logical (row-major) order.
pub fn numbers_from_array<A, S, D>(array: &ArrayBase<S, D>) -> Vec<Number>
where
    A: Copy + Into<Number>,
    S: Data<Elem = A>,
    D: Dimension,
{
    array.iter().map(|&value| value.into()).collect()
}

/// Parses a list of numbers separated by commas and/or whitespace.
///
/// Blank tokens are skipped, so trailing separators and empty lines are fine.
///
/// # Errors
///
/// Returns [`AggregateError::Parse`] naming the first token that is not a number.
pub fn parse_values(text: &str) -> Result<Vec<Number>> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::parse::<Number>)
        .collect()
}

/// Reads and parses every number in a text file, see [`parse_values`].
///
/// # Errors
///
/// Returns [`AggregateError::Io`] if the file cannot be read, or
/// [`AggregateError::Parse`] for the first token that is not a number.
pub fn read_values(path: impl AsRef<Path>) -> Result<Vec<Number>> {
    let text = std::fs::read_to_string(path)?;
    parse_values(&text)
}
