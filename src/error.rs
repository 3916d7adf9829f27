// ============================================================================
// Simulation Errors
// Error taxonomy shared by matching, calculation and aggregation
// ============================================================================

use crate::numeric::{Money, NumericError};
use thiserror::Error;

/// How a boundary layer (HTTP handler, CLI) should classify an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The caller sent something the system cannot serve (4xx-like)
    ClientInput,
    /// The system failed on input it should have handled (5xx-like)
    ServerFault,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("No product found for principal {principal} over {term_months} months")]
    NoEligibleProduct { principal: Money, term_months: u32 },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Historical quote {id} could not be decoded: {reason}")]
    MalformedHistoricalRecord { id: u64, reason: String },

    #[error("Arithmetic error: {0}")]
    Arithmetic(#[from] NumericError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SimulationError {
    pub fn class(&self) -> ErrorClass {
        match self {
            SimulationError::NoEligibleProduct { .. } | SimulationError::InvalidRequest(_) => {
                ErrorClass::ClientInput
            }
            _ => ErrorClass::ServerFault,
        }
    }
}

pub type SimulationResult<T> = Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_classes() {
        let no_product = SimulationError::NoEligibleProduct {
            principal: dec!(100),
            term_months: 24,
        };
        assert_eq!(no_product.class(), ErrorClass::ClientInput);
        assert_eq!(
            SimulationError::InvalidRequest("x".to_string()).class(),
            ErrorClass::ClientInput
        );
        assert_eq!(
            SimulationError::from(NumericError::DivisionByZero).class(),
            ErrorClass::ServerFault
        );
    }

    #[test]
    fn test_error_display() {
        let err = SimulationError::NoEligibleProduct {
            principal: dec!(100),
            term_months: 24,
        };
        assert_eq!(
            err.to_string(),
            "No product found for principal 100 over 24 months"
        );
        assert_eq!(
            SimulationError::from(NumericError::DivisionByZero).to_string(),
            "Arithmetic error: division by zero"
        );
    }
}
