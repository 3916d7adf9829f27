// ============================================================================
// Simulation Request
// ============================================================================

use crate::error::{SimulationError, SimulationResult};
use crate::numeric::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A loan the caller wants quoted: how much and over how many months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub principal: Money,
    pub term_months: u32,
}

impl SimulationRequest {
    pub fn new(principal: Money, term_months: u32) -> Self {
        Self {
            principal,
            term_months,
        }
    }

    /// Boundary validation applied before a request reaches matching.
    pub fn validate(&self) -> SimulationResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(SimulationError::InvalidRequest(
                "Principal must be positive".to_string(),
            ));
        }

        if self.term_months < 1 {
            return Err(SimulationError::InvalidRequest(
                "Term must be at least one month".to_string(),
            ));
        }

        Ok(())
    }
}
