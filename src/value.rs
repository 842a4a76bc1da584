//! The host value model shared with the embedding interpreter.

use alloc::string::{String, ToString};
use core::fmt;

use crate::error::CoercionError;

/// A boxed value as exchanged with guest code.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// The undefined value.
    #[default]
    Undefined,
    /// The null value.
    Null,
    /// A boolean value.
    Boolean(bool),
    /// A double precision number.
    Number(f64),
    /// A string value.
    String(String),
}

impl Value {
    /// Check whether this is the undefined value.
    #[inline]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Check whether this is the null value.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Convert this value to a number following the guest language rules.
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Undefined => f64::NAN,
            Self::Null => 0.0,
            Self::Boolean(b) => f64::from(u8::from(*b)),
            Self::Number(n) => *n,
            Self::String(s) => parse_number(s),
        }
    }

    /// Convert this value to a boolean following the guest language rules.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Boolean(b) => *b,
            Self::Number(n) => !(*n == 0.0 || n.is_nan()),
            Self::String(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Number(n) => fmt_number(*n, f),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u32> for Value {
    #[inline]
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Render a number the way guest code prints it.
pub(crate) fn fmt_number(value: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if value.is_nan() {
        f.write_str("NaN")
    } else if value.is_infinite() {
        f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" })
    } else if value == 0.0 {
        // negative zero prints without its sign
        f.write_str("0")
    } else if (1e-6..1e21).contains(&if value < 0.0 { -value } else { value }) {
        write!(f, "{}", value)
    } else {
        let rendered = alloc::format!("{:e}", value);
        match rendered.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                write!(f, "{}e+{}", mantissa, exponent)
            }
            _ => f.write_str(&rendered),
        }
    }
}

fn parse_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => (),
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16).map_or(f64::NAN, |n| n as f64);
    }
    match s.parse::<f64>() {
        // Rust accepts spellings such as "inf" and "nan" which guest code does not
        Ok(n) if n.is_finite() => n,
        _ => f64::NAN,
    }
}

/// The indexed-read protocol of host objects.
///
/// Conversion and splice read their input through this trait, so any host
/// object exposing a length and indexed reads may be used as a source.
pub trait Indexable {
    /// The number of indexed elements, or `None` if the object has no length.
    fn get_length(&self) -> Option<usize>;

    /// Read the element at `index`, producing `Value::Undefined` when absent.
    fn get_indexed(&self, index: usize) -> Value;
}

impl<T: Clone + Into<Value>> Indexable for [T] {
    #[inline]
    fn get_length(&self) -> Option<usize> {
        Some(self.len())
    }

    #[inline]
    fn get_indexed(&self, index: usize) -> Value {
        self.get(index).cloned().map_or(Value::Undefined, Into::into)
    }
}

impl<T: Clone + Into<Value>, const N: usize> Indexable for [T; N] {
    #[inline]
    fn get_length(&self) -> Option<usize> {
        Some(N)
    }

    #[inline]
    fn get_indexed(&self, index: usize) -> Value {
        self.as_slice().get_indexed(index)
    }
}

impl<T: Clone + Into<Value>> Indexable for alloc::vec::Vec<T> {
    #[inline]
    fn get_length(&self) -> Option<usize> {
        Some(self.len())
    }

    #[inline]
    fn get_indexed(&self, index: usize) -> Value {
        self.as_slice().get_indexed(index)
    }
}

/// The coercion capability of a vector element type.
pub trait ElementType: Clone + fmt::Debug {
    /// The value used to fill newly grown slots.
    fn default_value(&self) -> Value;

    /// Convert a value to the canonical representation of this type.
    fn coerce(&self, value: Value) -> Result<Value, CoercionError>;
}

/// The element type of vectors with no declared type.
///
/// Undefined values are stored as null, all others pass through unchanged.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Untyped;

impl ElementType for Untyped {
    #[inline]
    fn default_value(&self) -> Value {
        Value::Null
    }

    #[inline]
    fn coerce(&self, value: Value) -> Result<Value, CoercionError> {
        Ok(match value {
            Value::Undefined => Value::Null,
            value => value,
        })
    }
}

/// String elements. Null and undefined are stored as null.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct StringType;

impl ElementType for StringType {
    #[inline]
    fn default_value(&self) -> Value {
        Value::Null
    }

    fn coerce(&self, value: Value) -> Result<Value, CoercionError> {
        Ok(match value {
            Value::Undefined | Value::Null => Value::Null,
            value @ Value::String(_) => value,
            value => Value::String(value.to_string()),
        })
    }
}

/// Boolean elements, coerced by truthiness.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct BooleanType;

impl ElementType for BooleanType {
    #[inline]
    fn default_value(&self) -> Value {
        Value::Boolean(false)
    }

    #[inline]
    fn coerce(&self, value: Value) -> Result<Value, CoercionError> {
        Ok(Value::Boolean(value.is_truthy()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_conversion() {
        assert_eq!(Value::Null.to_number(), 0.0);
        assert!(Value::Undefined.to_number().is_nan());
        assert_eq!(Value::from(true).to_number(), 1.0);
        assert_eq!(Value::from(" 12.5 ").to_number(), 12.5);
        assert_eq!(Value::from("").to_number(), 0.0);
        assert_eq!(Value::from("0x1f").to_number(), 31.0);
        assert_eq!(Value::from("-Infinity").to_number(), f64::NEG_INFINITY);
        assert!(Value::from("inf").to_number().is_nan());
        assert!(Value::from("abc").to_number().is_nan());
    }

    #[test]
    fn display() {
        assert_eq!(Value::from(3.0).to_string(), "3");
        assert_eq!(Value::from(-0.0).to_string(), "0");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::from(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Undefined.to_string(), "undefined");
    }

    #[test]
    fn display_exponent_range() {
        assert_eq!(Value::from(1e21).to_string(), "1e+21");
        assert_eq!(Value::from(-1.5e300).to_string(), "-1.5e+300");
        assert_eq!(Value::from(1e20).to_string(), "100000000000000000000");
        assert_eq!(Value::from(1e-6).to_string(), "0.000001");
        assert_eq!(Value::from(1e-7).to_string(), "1e-7");
        assert_eq!(Value::from(1.25e-9).to_string(), "1.25e-9");
    }

    #[test]
    fn builtin_coercion() {
        assert_eq!(Untyped.coerce(Value::Undefined), Ok(Value::Null));
        assert_eq!(Untyped.coerce(Value::from(2)), Ok(Value::from(2)));
        assert_eq!(StringType.coerce(Value::from(2)), Ok(Value::from("2")));
        assert_eq!(StringType.coerce(Value::Undefined), Ok(Value::Null));
        assert_eq!(BooleanType.coerce(Value::from("x")), Ok(Value::from(true)));
        assert_eq!(BooleanType.coerce(Value::from(0)), Ok(Value::from(false)));
    }

    #[test]
    fn slice_indexable() {
        let items = [7, 8, 9];
        assert_eq!(items.get_length(), Some(3));
        assert_eq!(items.get_indexed(1), Value::from(8));
        assert_eq!(items.get_indexed(3), Value::Undefined);
    }
}
