//! Registration-time errors.
//!
//! Error handling in this crate has exactly two tiers. Hard rejection
//! happens only when a callback is compiled: an unmarshalable declared type
//! fails the whole registration with a [`SignatureError`]. Everything at
//! call time is soft: tag mismatches, capability mismatches and arity skew
//! all degrade to null values or a nil result, never to an error, because
//! the native side cannot observe a typed failure across the boundary.

use thiserror::Error;

/// Why a callback registration was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// A declared parameter type has no converter.
    #[error("parameter {index} has unsupported type '{type_name}'")]
    UnsupportedParameter {
        /// Zero-based parameter position
        index: usize,
        /// Declared type name
        type_name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_parameter() {
        let err = SignatureError::UnsupportedParameter {
            index: 2,
            type_name: "RawWindowHandle".into(),
        };
        assert_eq!(
            err.to_string(),
            "parameter 2 has unsupported type 'RawWindowHandle'"
        );
    }
}
