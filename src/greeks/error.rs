//! Error types for the pricing engine.

use std::fmt;

/// Errors surfaced by the pricing API.
///
/// This is the only failure that crosses the pricing boundary; numeric
/// conditions inside the implied volatility solver are absorbed by returning
/// a best-effort estimate instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GreeksError {
    /// An input parameter failed validation.
    InvalidParameter {
        /// Description of the invalid parameter.
        message: String,
    },
}

impl fmt::Display for GreeksError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GreeksError::InvalidParameter { message } => {
                write!(f, "invalid parameter: {message}")
            }
        }
    }
}

impl std::error::Error for GreeksError {}
