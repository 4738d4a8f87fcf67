//! Conversion traits between wire values and host primitives.
//!
//! [`FromValue`] extracts a primitive from a [`Value`]; [`IntoValue`] builds
//! the wire value back. `FromValue` is deliberately lenient: a tag mismatch
//! yields `None` instead of an error, because native callers cannot observe
//! a typed failure across the marshaling boundary.
//!
//! Narrowing follows the wire contract: `Int` decodes to `i32` (truncating)
//! and `i64`; `UInt` to `u32` (truncating) and `u64`. There is no implicit
//! int↔float or int↔uint crossover.

use crate::value::Value;

/// Extract a primitive host value from a wire value.
pub trait FromValue: Sized {
    /// Returns `None` when the wire tag does not match this type.
    fn from_value(value: &Value) -> Option<Self>;
}

/// Convert a primitive host value into a wire value.
pub trait IntoValue {
    /// Build the wire representation of this value.
    fn into_value(self) -> Value;
}

macro_rules! impl_signed {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::Int(v) => Some(*v as $ty),
                        _ => None,
                    }
                }
            }

            impl IntoValue for $ty {
                fn into_value(self) -> Value {
                    Value::Int(self as i64)
                }
            }
        )*
    };
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::UInt(v) => Some(*v as $ty),
                        _ => None,
                    }
                }
            }

            impl IntoValue for $ty {
                fn into_value(self) -> Value {
                    Value::UInt(self as u64)
                }
            }
        )*
    };
}

impl_signed!(i32, i64);
impl_unsigned!(u32, u64);

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> Value {
        Value::Double(self)
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::String(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_value_i32_truncates() {
        assert_eq!(i32::from_value(&Value::Int(42)), Some(42));
        // Truncating cast, same as the native module's 32-bit slot read.
        assert_eq!(i32::from_value(&Value::Int(i64::from(u32::MAX) + 43)), Some(42));
        assert_eq!(i32::from_value(&Value::Bool(true)), None);
        assert_eq!(i32::from_value(&Value::UInt(1)), None);
    }

    #[test]
    fn from_value_i64() {
        assert_eq!(i64::from_value(&Value::Int(i64::MIN)), Some(i64::MIN));
        assert_eq!(i64::from_value(&Value::Double(1.0)), None);
    }

    #[test]
    fn from_value_u32_truncates() {
        assert_eq!(u32::from_value(&Value::UInt(u64::from(u32::MAX))), Some(u32::MAX));
        assert_eq!(u32::from_value(&Value::UInt(u64::from(u32::MAX) + 6)), Some(5));
        assert_eq!(u32::from_value(&Value::Int(1)), None);
    }

    #[test]
    fn from_value_u64() {
        assert_eq!(u64::from_value(&Value::UInt(u64::MAX)), Some(u64::MAX));
        assert_eq!(u64::from_value(&Value::Nil), None);
    }

    #[test]
    fn from_value_f64() {
        assert_eq!(f64::from_value(&Value::Double(0.25)), Some(0.25));
        // No implicit int-to-float widening on this wire.
        assert_eq!(f64::from_value(&Value::Int(1)), None);
    }

    #[test]
    fn from_value_bool() {
        assert_eq!(bool::from_value(&Value::Bool(true)), Some(true));
        assert_eq!(bool::from_value(&Value::Int(1)), None);
    }

    #[test]
    fn from_value_string() {
        assert_eq!(
            String::from_value(&Value::String("hey".into())),
            Some("hey".to_string())
        );
        assert_eq!(String::from_value(&Value::Nil), None);
    }

    #[test]
    fn primitive_round_trips() {
        assert_eq!(bool::from_value(&true.into_value()), Some(true));
        assert_eq!(i32::from_value(&(-7i32).into_value()), Some(-7));
        assert_eq!(i64::from_value(&i64::MAX.into_value()), Some(i64::MAX));
        assert_eq!(u32::from_value(&7u32.into_value()), Some(7));
        assert_eq!(u64::from_value(&u64::MAX.into_value()), Some(u64::MAX));
        assert_eq!(f64::from_value(&2.5f64.into_value()), Some(2.5));
        assert_eq!(
            String::from_value(&"abc".to_string().into_value()),
            Some("abc".to_string())
        );
    }
}
