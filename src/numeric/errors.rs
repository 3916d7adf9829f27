// ============================================================================
// Numeric Errors
// Error types for decimal schedule arithmetic
// ============================================================================

use thiserror::Error;

/// Errors that can occur while computing amortization schedules.
///
/// These are contract violations (inputs the request validation should have
/// rejected), so callers surface them as faults rather than coercing a value.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Result exceeded the representable decimal range
    #[error("arithmetic overflow: result exceeded maximum value")]
    Overflow,
    /// Attempted division by zero (e.g. a zero periodic rate in the annuity factor)
    #[error("division by zero")]
    DivisionByZero,
    /// Input value is outside the domain of the operation (e.g. a negative rate)
    #[error("invalid input: value outside the domain of the operation")]
    InvalidInput,
    /// Requested scale exceeds what the decimal type can hold
    #[error("precision loss: requested scale is not representable")]
    PrecisionLoss,
}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_error_messages() {
        assert_eq!(
            NumericError::PrecisionLoss.to_string(),
            "precision loss: requested scale is not representable"
        );
        assert_eq!(
            NumericError::InvalidInput.to_string(),
            "invalid input: value outside the domain of the operation"
        );
    }

    #[test]
    fn test_converts_into_simulation_error() {
        let error: crate::error::SimulationError = NumericError::DivisionByZero.into();
        assert_eq!(error.to_string(), "Arithmetic error: division by zero");
        assert_eq!(error.class(), crate::error::ErrorClass::ServerFault);
    }
}
