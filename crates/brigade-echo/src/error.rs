//! Error types for the named-parameter boundary.
//!
//! Signal processing itself never fails: out-of-range controls are clamped and
//! an unprepared engine passes audio through. The only fallible surface is
//! turning a host's flat `id -> value` set into an [`EngineParams`].
//!
//! [`EngineParams`]: crate::EngineParams

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::string::String;
use thiserror::Error;

/// Errors raised when applying named parameter values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    /// The id is not part of the parameter layout.
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    /// NaN or infinite value; rejected rather than clamped.
    #[error("parameter '{id}' must be finite, got {value}")]
    NonFinite {
        /// Id of the offending parameter.
        id: String,
        /// The rejected value.
        value: f32,
    },
}

impl ParamError {
    /// Create an unknown-parameter error.
    pub fn unknown(id: impl Into<String>) -> Self {
        ParamError::UnknownParameter(id.into())
    }

    /// Create a non-finite-value error.
    pub fn non_finite(id: impl Into<String>, value: f32) -> Self {
        ParamError::NonFinite {
            id: id.into(),
            value,
        }
    }
}
