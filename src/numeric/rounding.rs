// ============================================================================
// Decimal Rounding
// The single HALF_UP scaling primitive shared by both amortization systems
// ============================================================================

use super::errors::{NumericError, NumericResult};
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};

/// Monetary amount (always reported at [`MONEY_SCALE`] decimals).
pub type Money = Decimal;

/// Periodic interest rate, e.g. `0.025` for 2.5% per month.
pub type Rate = Decimal;

/// Decimal places for every monetary value crossing the boundary.
pub const MONEY_SCALE: u32 = 2;

/// Decimal places for rates in reports (average rate of a daily volume).
pub const RATE_SCALE: u32 = 4;

/// Intermediate precision of the PRICE annuity factor.
pub const FACTOR_SCALE: u32 = 10;

/// Largest scale `rust_decimal` can carry.
const MAX_SCALE: u32 = 28;

/// Round `value` to `dp` decimals, ties away from zero (HALF_UP), and pad the
/// scale so the result always carries exactly `dp` decimals.
///
/// # Example
/// ```
/// use loan_simulator::numeric::round_half_up;
/// use rust_decimal::Decimal;
///
/// let x = Decimal::new(123455, 4); // 12.3455
/// assert_eq!(round_half_up(x, 3).to_string(), "12.346");
/// assert_eq!(round_half_up(Decimal::from(5), 2).to_string(), "5.00");
/// ```
#[inline]
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    let dp = dp.min(MAX_SCALE);
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    if rounded.scale() < dp {
        rounded.rescale(dp);
    }
    rounded
}

/// Round a monetary amount to 2 decimals, HALF_UP.
#[inline]
pub fn round_money(value: Decimal) -> Money {
    round_half_up(value, MONEY_SCALE)
}

/// Round a reported rate to 4 decimals, HALF_UP.
#[inline]
pub fn round_rate(value: Decimal) -> Rate {
    round_half_up(value, RATE_SCALE)
}

/// Divide and round the quotient to `dp` decimals, HALF_UP.
///
/// # Errors
/// - `DivisionByZero` if `divisor` is zero
/// - `Overflow` if the quotient is not representable
/// - `PrecisionLoss` if `dp` exceeds the decimal type's scale
pub fn checked_div_half_up(dividend: Decimal, divisor: Decimal, dp: u32) -> NumericResult<Decimal> {
    if dp > MAX_SCALE {
        return Err(NumericError::PrecisionLoss);
    }
    if divisor.is_zero() {
        return Err(NumericError::DivisionByZero);
    }
    dividend
        .checked_div(divisor)
        .map(|q| round_half_up(q, dp))
        .ok_or(NumericError::Overflow)
}

/// Raise `base` to a non-negative integer power.
///
/// # Errors
/// Returns `Overflow` if the power is not representable.
pub fn checked_pow(base: Decimal, exponent: u32) -> NumericResult<Decimal> {
    base.checked_powu(u64::from(exponent))
        .ok_or(NumericError::Overflow)
}
