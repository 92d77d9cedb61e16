//! Top-level argument values

use indexmap::IndexMap;
use std::fmt;
use std::num::TryFromIntError;

/// Top-level arguments, rendered in insertion order
pub type Arguments = IndexMap<String, ArgumentValue>;

/// Value of a top-level query argument
///
/// Numbers render unquoted. Everything else renders as a double-quoted
/// string of its textual form. Embedded quotes are *not* escaped, so a
/// value containing `"` produces an invalid document.
///
/// Floats always keep a fractional part or exponent (`1.0`, not `1`).
/// Non-finite floats render as `NaN`/`inf`, which GraphQL does not accept.
///
/// `u64` and `usize` convert through `TryFrom`, failing above `i64::MAX`:
///
/// ```
/// use fragment_graphql::prelude::*;
///
/// let limit = ArgumentValue::try_from(3usize).unwrap();
/// assert_eq!(limit.to_string(), "3");
/// assert!(ArgumentValue::try_from(u64::MAX).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl ArgumentValue {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ArgumentValue::Int(_) | ArgumentValue::Float(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ArgumentValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ArgumentValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for ArgumentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentValue::Int(i) => write!(f, "{}", i),
            ArgumentValue::Float(x) => write!(f, "{:?}", x),
            ArgumentValue::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ArgumentValue {
                fn from(value: $t) -> Self {
                    ArgumentValue::Int(i64::from(value))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_try_from_int {
    ($($t:ty),*) => {
        $(
            impl TryFrom<$t> for ArgumentValue {
                type Error = TryFromIntError;

                fn try_from(value: $t) -> Result<Self, Self::Error> {
                    i64::try_from(value).map(ArgumentValue::Int)
                }
            }
        )*
    };
}

impl_try_from_int!(u64, usize);

impl From<f32> for ArgumentValue {
    fn from(value: f32) -> Self {
        ArgumentValue::Float(f64::from(value))
    }
}

impl From<f64> for ArgumentValue {
    fn from(value: f64) -> Self {
        ArgumentValue::Float(value)
    }
}

impl From<&str> for ArgumentValue {
    fn from(value: &str) -> Self {
        ArgumentValue::Text(value.to_string())
    }
}

impl From<String> for ArgumentValue {
    fn from(value: String) -> Self {
        ArgumentValue::Text(value)
    }
}

impl From<&String> for ArgumentValue {
    fn from(value: &String) -> Self {
        ArgumentValue::Text(value.clone())
    }
}

impl From<bool> for ArgumentValue {
    fn from(value: bool) -> Self {
        ArgumentValue::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_render_unquoted() {
        assert_eq!(ArgumentValue::from(10).to_string(), "10");
        assert_eq!(ArgumentValue::from(2.5).to_string(), "2.5");
        assert!(ArgumentValue::from(10u32).is_numeric());
    }

    #[test]
    fn test_whole_floats_keep_fractional_part() {
        assert_eq!(ArgumentValue::from(1.0).to_string(), "1.0");
        assert_eq!(ArgumentValue::from(-3.0f32).to_string(), "-3.0");
    }

    #[test]
    fn test_wide_unsigned_integers() {
        assert_eq!(
            ArgumentValue::try_from(42usize).unwrap(),
            ArgumentValue::Int(42)
        );
        assert_eq!(
            ArgumentValue::try_from(i64::MAX as u64).unwrap().to_string(),
            i64::MAX.to_string()
        );
        assert!(ArgumentValue::try_from(u64::MAX).is_err());
    }

    #[test]
    fn test_everything_else_renders_quoted() {
        assert_eq!(ArgumentValue::from("xyz").to_string(), "\"xyz\"");
        assert_eq!(ArgumentValue::from(true).to_string(), "\"true\"");
    }

    #[test]
    fn test_embedded_quotes_are_not_escaped() {
        assert_eq!(ArgumentValue::from("a\"b").to_string(), "\"a\"b\"");
    }
}
