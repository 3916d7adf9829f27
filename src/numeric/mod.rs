// ============================================================================
// Numeric Module
// Decimal rounding rules for reproducible repayment schedules
// ============================================================================
//
// This module provides:
// - round_half_up / round_money / round_rate: the one HALF_UP primitive
// - checked_div_half_up / checked_pow: fallible helpers for the annuity factor
// - NumericError: Error types for arithmetic operations
// - Money/Rate type aliases
//
// Design principles:
// - No floating-point operations on money or rates
// - Every monetary value leaves the core at exactly 2 decimals
// - Both amortization systems round through the same function

mod errors;
mod rounding;

pub use errors::{NumericError, NumericResult};
pub use rounding::{
    checked_div_half_up, checked_pow, round_half_up, round_money, round_rate, Money, Rate,
    FACTOR_SCALE, MONEY_SCALE, RATE_SCALE,
};
