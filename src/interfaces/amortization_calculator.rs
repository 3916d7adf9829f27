// ============================================================================
// Amortization Calculator Interface
// Defines the contract shared by the SAC and PRICE calculators
// ============================================================================

use crate::domain::{AmortizationSystem, Installment};
use crate::numeric::{Money, NumericResult, Rate};

/// Strategy interface for repayment schedules.
/// Implementations: SacCalculator, PriceCalculator. The set is closed; pick
/// one through [`crate::engine::calculator_for`].
pub trait AmortizationCalculator: Send + Sync {
    /// Produce the installments for a loan
    ///
    /// # Arguments
    /// * `principal` - Amount borrowed
    /// * `rate` - Interest rate per period (e.g. 0.01 for 1% a month)
    /// * `periods` - Number of installments; zero yields an empty schedule
    ///
    /// # Returns
    /// Exactly `periods` installments, numbered from 1
    fn calculate(&self, principal: Money, rate: Rate, periods: u32)
        -> NumericResult<Vec<Installment>>;

    /// The system this calculator implements
    fn system(&self) -> AmortizationSystem;

    /// Get the calculator name for logging/metrics
    fn name(&self) -> &str {
        self.system().as_str()
    }
}
