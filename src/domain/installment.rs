// ============================================================================
// Installment and Schedule Domain Model
// ============================================================================

use crate::numeric::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Amortization System
// ============================================================================

/// The two repayment regimes a quote is produced under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AmortizationSystem {
    /// Constant amortization: equal principal portions, decreasing payment
    #[serde(rename = "SAC")]
    Sac,
    /// French system: equal payments, varying principal/interest split
    #[serde(rename = "PRICE")]
    Price,
}

impl AmortizationSystem {
    /// Every system, in the order schedules appear in a quote.
    pub const ALL: [AmortizationSystem; 2] = [AmortizationSystem::Sac, AmortizationSystem::Price];

    pub fn as_str(&self) -> &'static str {
        match self {
            AmortizationSystem::Sac => "SAC",
            AmortizationSystem::Price => "PRICE",
        }
    }
}

impl fmt::Display for AmortizationSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Installment
// ============================================================================

/// One period of a repayment schedule.
///
/// Invariant: `payment == amortization + interest`, exactly, at 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// 1-based period number
    pub index: u32,
    pub amortization: Money,
    pub interest: Money,
    pub payment: Money,
}

impl Installment {
    pub fn new(index: u32, amortization: Money, interest: Money, payment: Money) -> Self {
        Self {
            index,
            amortization,
            interest,
            payment,
        }
    }

    /// Whether payment equals amortization plus interest.
    pub fn is_balanced(&self) -> bool {
        self.payment == self.amortization + self.interest
    }
}

// ============================================================================
// Schedule
// ============================================================================

/// An installment sequence tagged with the system that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub system: AmortizationSystem,
    pub installments: Vec<Installment>,
}

impl Schedule {
    pub fn new(system: AmortizationSystem, installments: Vec<Installment>) -> Self {
        Self {
            system,
            installments,
        }
    }

    pub fn len(&self) -> usize {
        self.installments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.installments.is_empty()
    }

    /// Sum of every payment (the financed amount of the quote).
    pub fn total_payment(&self) -> Money {
        self.installments
            .iter()
            .map(|i| i.payment)
            .fold(Decimal::ZERO, |acc, p| acc + p)
    }

    /// Sum of every interest portion.
    pub fn total_interest(&self) -> Money {
        self.installments
            .iter()
            .map(|i| i.interest)
            .fold(Decimal::ZERO, |acc, p| acc + p)
    }

    /// Payment of the first period, if any.
    pub fn first_payment(&self) -> Option<Money> {
        self.installments.first().map(|i| i.payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> Schedule {
        Schedule::new(
            AmortizationSystem::Sac,
            vec![
                Installment::new(1, dec!(5000.00), dec!(250.00), dec!(5250.00)),
                Installment::new(2, dec!(5000.00), dec!(125.00), dec!(5125.00)),
            ],
        )
    }

    #[test]
    fn test_schedule_totals() {
        let schedule = sample();
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.total_payment(), dec!(10375.00));
        assert_eq!(schedule.total_interest(), dec!(375.00));
        assert_eq!(schedule.first_payment(), Some(dec!(5250.00)));
    }

    #[test]
    fn test_empty_schedule() {
        let schedule = Schedule::new(AmortizationSystem::Price, Vec::new());
        assert!(schedule.is_empty());
        assert_eq!(schedule.total_payment(), Decimal::ZERO);
        assert_eq!(schedule.first_payment(), None);
    }

    #[test]
    fn test_system_wire_names() {
        assert_eq!(
            serde_json::to_string(&AmortizationSystem::Sac).unwrap(),
            "\"SAC\""
        );
        let price: AmortizationSystem = serde_json::from_str("\"PRICE\"").unwrap();
        assert_eq!(price, AmortizationSystem::Price);
        assert_eq!(price.to_string(), "PRICE");
    }

    #[test]
    fn test_installment_balance() {
        assert!(Installment::new(1, dec!(4938.27), dec!(250.00), dec!(5188.27)).is_balanced());
        assert!(!Installment::new(1, dec!(4938.27), dec!(250.00), dec!(5188.28)).is_balanced());
    }
}
