// ============================================================================
// French Amortization System (PRICE)
// Constant payment; the interest/principal split shifts every period
// ============================================================================

use crate::domain::{AmortizationSystem, Installment};
use crate::interfaces::AmortizationCalculator;
use crate::numeric::{
    checked_div_half_up, checked_pow, round_money, Money, NumericError, NumericResult, Rate,
    FACTOR_SCALE,
};
use rust_decimal::Decimal;

/// PRICE calculator
///
/// The constant payment is `principal * f` with the annuity factor
/// `f = r(1+r)^n / ((1+r)^n - 1)` held at 10 decimals, rounded once to cents.
/// Interest and amortization are then rounded every period, so the balance
/// left after the last installment can differ from zero by a few cents. No
/// balancing adjustment is applied to the final installment.
///
/// # Example
/// ```text
/// principal 10000.00, rate 2.5%, n = 2, factor 0.5188271605
/// #1  amortization 4938.27  interest 250.00  payment 5188.27
/// #2  amortization 5061.73  interest 126.54  payment 5188.27
/// ```
pub struct PriceCalculator;

impl PriceCalculator {
    /// Lazy view of the schedule
    pub fn schedule(&self, principal: Money, rate: Rate, periods: u32) -> NumericResult<PriceSchedule> {
        PriceSchedule::new(principal, rate, periods)
    }
}

impl AmortizationCalculator for PriceCalculator {
    fn calculate(
        &self,
        principal: Money,
        rate: Rate,
        periods: u32,
    ) -> NumericResult<Vec<Installment>> {
        Ok(self.schedule(principal, rate, periods)?.collect())
    }

    fn system(&self) -> AmortizationSystem {
        AmortizationSystem::Price
    }
}

/// Annuity factor `r(1+r)^n / ((1+r)^n - 1)` rounded HALF_UP to 10 decimals.
///
/// # Errors
/// - `InvalidInput` for a negative rate
/// - `DivisionByZero` for a zero rate or zero periods
/// - `Overflow` if `(1+r)^n` is not representable
pub fn annuity_factor(rate: Rate, periods: u32) -> NumericResult<Decimal> {
    if rate.is_sign_negative() {
        return Err(NumericError::InvalidInput);
    }
    let growth = checked_pow(Decimal::ONE + rate, periods)?;
    let numerator = growth.checked_mul(rate).ok_or(NumericError::Overflow)?;
    checked_div_half_up(numerator, growth - Decimal::ONE, FACTOR_SCALE)
}

/// Finite, non-restartable sequence of PRICE installments
#[derive(Debug, Clone)]
pub struct PriceSchedule {
    payment: Money,
    rate: Rate,
    balance: Decimal,
    next_index: u32,
    periods: u32,
}

impl PriceSchedule {
    /// # Errors
    /// Those of [`annuity_factor`], plus `Overflow` if the payment or the
    /// first period's interest is not representable (later periods run on a
    /// smaller balance)
    pub fn new(principal: Money, rate: Rate, periods: u32) -> NumericResult<Self> {
        if rate.is_sign_negative() {
            return Err(NumericError::InvalidInput);
        }

        let payment = if periods == 0 {
            Decimal::ZERO
        } else {
            let factor = annuity_factor(rate, periods)?;
            principal
                .checked_mul(factor)
                .map(round_money)
                .ok_or(NumericError::Overflow)?
        };

        principal
            .checked_mul(rate)
            .and_then(|interest| payment.checked_sub(interest))
            .ok_or(NumericError::Overflow)?;

        Ok(Self {
            payment,
            rate,
            balance: principal,
            next_index: 1,
            periods,
        })
    }

    /// The constant payment charged every period
    pub fn payment(&self) -> Money {
        self.payment
    }

    /// Balance still owed before the next installment
    pub fn balance(&self) -> Decimal {
        self.balance
    }
}

impl Iterator for PriceSchedule {
    type Item = Installment;

    fn next(&mut self) -> Option<Installment> {
        if self.next_index > self.periods {
            return None;
        }

        let interest = round_money(self.balance * self.rate);
        let amortization = round_money(self.payment - interest);
        self.balance -= amortization;

        let installment = Installment::new(self.next_index, amortization, interest, self.payment);
        self.next_index += 1;
        Some(installment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.periods.saturating_sub(self.next_index - 1) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PriceSchedule {}
