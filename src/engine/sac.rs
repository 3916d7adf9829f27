// ============================================================================
// Constant Amortization System (SAC)
// Equal principal portions; interest and payment decrease every period
// ============================================================================

use crate::domain::{AmortizationSystem, Installment};
use crate::interfaces::AmortizationCalculator;
use crate::numeric::{
    checked_div_half_up, round_money, Money, NumericError, NumericResult, Rate, MONEY_SCALE,
};
use rust_decimal::Decimal;

/// SAC calculator
///
/// The amortization `A = principal / n` is rounded once to cents and repaid
/// every period; interest is charged on the running balance.
///
/// # Example
/// ```text
/// principal 10000.00, rate 2.5%, n = 2
/// #1  amortization 5000.00  interest 250.00  payment 5250.00
/// #2  amortization 5000.00  interest 125.00  payment 5125.00
/// ```
pub struct SacCalculator;

impl SacCalculator {
    /// Lazy view of the schedule
    pub fn schedule(&self, principal: Money, rate: Rate, periods: u32) -> NumericResult<SacSchedule> {
        SacSchedule::new(principal, rate, periods)
    }
}

impl AmortizationCalculator for SacCalculator {
    fn calculate(
        &self,
        principal: Money,
        rate: Rate,
        periods: u32,
    ) -> NumericResult<Vec<Installment>> {
        Ok(self.schedule(principal, rate, periods)?.collect())
    }

    fn system(&self) -> AmortizationSystem {
        AmortizationSystem::Sac
    }
}

/// Finite, non-restartable sequence of SAC installments
#[derive(Debug, Clone)]
pub struct SacSchedule {
    amortization: Money,
    rate: Rate,
    balance: Decimal,
    next_index: u32,
    periods: u32,
}

impl SacSchedule {
    /// # Errors
    /// - `InvalidInput` for a negative rate
    /// - `Overflow` if the first period's interest or payment is not
    ///   representable (later periods run on a smaller balance)
    pub fn new(principal: Money, rate: Rate, periods: u32) -> NumericResult<Self> {
        if rate.is_sign_negative() {
            return Err(NumericError::InvalidInput);
        }

        let amortization = if periods == 0 {
            Decimal::ZERO
        } else {
            checked_div_half_up(principal, Decimal::from(periods), MONEY_SCALE)?
        };

        principal
            .checked_mul(rate)
            .and_then(|interest| interest.checked_add(amortization))
            .ok_or(NumericError::Overflow)?;

        Ok(Self {
            amortization,
            rate,
            balance: principal,
            next_index: 1,
            periods,
        })
    }

    /// The constant amortization repaid every period
    pub fn amortization(&self) -> Money {
        self.amortization
    }

    /// Balance still owed before the next installment
    pub fn balance(&self) -> Decimal {
        self.balance
    }
}

impl Iterator for SacSchedule {
    type Item = Installment;

    fn next(&mut self) -> Option<Installment> {
        if self.next_index > self.periods {
            return None;
        }

        let interest = round_money(self.balance * self.rate);
        let payment = round_money(self.amortization + interest);
        self.balance -= self.amortization;

        let installment = Installment::new(self.next_index, self.amortization, interest, payment);
        self.next_index += 1;
        Some(installment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.periods.saturating_sub(self.next_index - 1) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SacSchedule {}
