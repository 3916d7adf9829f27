// ============================================================================
// Quote Domain Model
// ============================================================================

use crate::error::{SimulationError, SimulationResult};
use crate::numeric::{Money, Rate};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AmortizationSystem, Installment, Product, ProductCode, Schedule};

// ============================================================================
// Value Objects
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteId(Uuid);

impl QuoteId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for QuoteId {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Quote
// ============================================================================

/// The result of one successful simulation: the matched product and one
/// schedule per amortization system.
///
/// Immutable once built. The serialized form round-trips every decimal
/// exactly (decimals are written as strings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub product_code: ProductCode,
    pub product_description: String,
    pub periodic_rate: Rate,
    pub schedules: Vec<Schedule>,
    pub created_at: DateTime<Utc>,
}

impl Quote {
    pub fn new(product: &Product, sac: Vec<Installment>, price: Vec<Installment>) -> Self {
        Self {
            id: QuoteId::new(),
            product_code: product.code,
            product_description: product.description.clone(),
            periodic_rate: product.periodic_rate,
            schedules: vec![
                Schedule::new(AmortizationSystem::Sac, sac),
                Schedule::new(AmortizationSystem::Price, price),
            ],
            created_at: Utc::now(),
        }
    }

    /// The schedule produced under `system`, if present.
    pub fn schedule(&self, system: AmortizationSystem) -> Option<&Schedule> {
        self.schedules.iter().find(|s| s.system == system)
    }

    pub fn to_json(&self) -> SimulationResult<String> {
        serde_json::to_string(self).map_err(|e| SimulationError::Serialization(e.to_string()))
    }

    pub fn from_json(payload: &str) -> SimulationResult<Self> {
        serde_json::from_str(payload).map_err(|e| SimulationError::Serialization(e.to_string()))
    }
}

// ============================================================================
// Historical Records
// ============================================================================

/// A previously produced quote as a store keeps it: request metadata plus the
/// serialized quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalQuote {
    pub id: u64,
    pub reference_date: NaiveDate,
    pub requested_principal: Money,
    pub term_months: u32,
    pub product_code: ProductCode,
    pub payload: String,
}

impl HistoricalQuote {
    /// Decode the stored payload.
    ///
    /// # Errors
    /// `MalformedHistoricalRecord` if the payload is not a quote.
    pub fn decode(&self) -> SimulationResult<Quote> {
        serde_json::from_str(&self.payload).map_err(|e| SimulationError::MalformedHistoricalRecord {
            id: self.id,
            reason: e.to_string(),
        })
    }
}

/// Condensed view of a stored quote for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSummary {
    pub id: u64,
    pub requested_principal: Money,
    pub term_months: u32,
    pub total_sac_payments: Money,
    pub total_price_payments: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn product() -> Product {
        Product::new(1, "Personal credit", dec!(0.025), 1, dec!(200))
    }

    fn quote() -> Quote {
        Quote::new(
            &product(),
            vec![Installment::new(1, dec!(100.00), dec!(2.50), dec!(102.50))],
            vec![Installment::new(1, dec!(100.00), dec!(2.50), dec!(102.50))],
        )
    }

    #[test]
    fn test_quote_creation() {
        let quote = quote();
        assert_eq!(quote.product_code, ProductCode(1));
        assert_eq!(quote.schedules.len(), 2);
        assert_eq!(
            quote.schedule(AmortizationSystem::Sac).map(|s| s.system),
            Some(AmortizationSystem::Sac)
        );
        assert!(quote.schedule(AmortizationSystem::Price).is_some());
    }

    #[test]
    fn test_json_preserves_decimals() {
        let quote = quote();
        let json = quote.to_json().unwrap();
        assert!(json.contains("\"102.50\""));
        assert!(json.contains("\"PRICE\""));

        let decoded = Quote::from_json(&json).unwrap();
        assert_eq!(decoded, quote);
        assert_eq!(decoded.periodic_rate.to_string(), "0.025");
    }

    #[test]
    fn test_historical_decode_failure() {
        let record = HistoricalQuote {
            id: 7,
            reference_date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            requested_principal: dec!(1000),
            term_months: 12,
            product_code: ProductCode(1),
            payload: "{not json".to_string(),
        };

        match record.decode() {
            Err(SimulationError::MalformedHistoricalRecord { id, .. }) => assert_eq!(id, 7),
            other => panic!("expected malformed record, got {:?}", other),
        }
    }
}
