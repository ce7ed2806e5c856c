//! Scalar values held by a [`FlatMap`](crate::FlatMap).
//!
//! Extraction reduces every field to one of a handful of scalars. Composite
//! values never reach this type: they are either skipped or unwrapped into
//! their own entries.
//!
//! ```rust
//! use serde_kvjoin::{Number, Value};
//!
//! let value = Value::from(42);
//! assert_eq!(value, Value::Number(Number::Integer(42)));
//! assert_eq!(value.to_string(), "42");
//! assert!(Value::from("").is_zero());
//! ```

use std::fmt;

/// A generic scalar value.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    Bool(bool),
    Number(Number),
    String(String),
    /// Zero-valued placeholder for unit structs. Formats as `""`.
    #[default]
    Empty,
}

/// A numeric value.
///
/// Unsigned integers are kept apart from signed ones so that every `u64`
/// formats exactly. `f32` keeps its own width: widening would change its
/// shortest text (`0.1f32` would print as `0.10000000149011612`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Unsigned(u64),
    Float32(f32),
    Float(f64),
}

impl Number {
    /// Returns `true` if this number is zero.
    ///
    /// Floats are zero only when every bit is clear, so `-0.0` is not zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_kvjoin::Number;
    ///
    /// assert!(Number::Integer(0).is_zero());
    /// assert!(Number::Float(0.0).is_zero());
    /// assert!(!Number::Unsigned(7).is_zero());
    /// assert!(!Number::Float(-0.0).is_zero());
    /// ```
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match *self {
            Number::Integer(n) => n == 0,
            Number::Unsigned(n) => n == 0,
            Number::Float32(f) => f.to_bits() == 0,
            Number::Float(f) => f.to_bits() == 0,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{}", n),
            Number::Unsigned(n) => write!(f, "{}", n),
            Number::Float32(n) => write!(f, "{}", n),
            Number::Float(n) => write!(f, "{}", n),
        }
    }
}

impl Value {
    /// Returns `true` for the zero value of each kind: `false`, `0`, `+0.0`, `""` and [`Value::Empty`].
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Bool(b) => !b,
            Value::Number(n) => n.is_zero(),
            Value::String(s) => s.is_empty(),
            Value::Empty => true,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
            Value::Empty => Ok(()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::Integer(i64::from(value)))
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::Unsigned(u64::from(value)))
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(Number::Float32(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::Float(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::String(value.to_string())
    }
}
