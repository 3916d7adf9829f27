// ============================================================================
// Product Domain Model
// ============================================================================

use crate::numeric::{Money, Rate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::SimulationRequest;

// ============================================================================
// Value Objects
// ============================================================================

/// Catalog identifier of a loan product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCode(pub i32);

impl ProductCode {
    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for ProductCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for ProductCode {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

// ============================================================================
// Product Entity
// ============================================================================

/// A catalog entry describing which loans a product may be offered for.
///
/// Owned by the catalog provider; the core only reads it. `min_principal` and
/// `min_term_months` are mandatory in a well-formed catalog, but entries
/// loaded with them missing are kept and simply never match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub code: ProductCode,
    pub description: String,
    pub periodic_rate: Rate,
    pub min_term_months: Option<u32>,
    pub max_term_months: Option<u32>,
    pub min_principal: Option<Money>,
    pub max_principal: Option<Money>,
}

impl Product {
    /// Create a product with mandatory lower bounds and open upper bounds.
    pub fn new(
        code: impl Into<ProductCode>,
        description: impl Into<String>,
        periodic_rate: Rate,
        min_term_months: u32,
        min_principal: Money,
    ) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            periodic_rate,
            min_term_months: Some(min_term_months),
            max_term_months: None,
            min_principal: Some(min_principal),
            max_principal: None,
        }
    }

    /// Builder method: cap the term
    pub fn with_max_term(mut self, months: u32) -> Self {
        self.max_term_months = Some(months);
        self
    }

    /// Builder method: cap the principal
    pub fn with_max_principal(mut self, principal: Money) -> Self {
        self.max_principal = Some(principal);
        self
    }

    /// Whether the request falls inside this product's eligibility window.
    ///
    /// Missing lower bounds make the product ineligible; missing upper bounds
    /// leave the window open.
    pub fn admits(&self, request: &SimulationRequest) -> bool {
        let (Some(min_principal), Some(min_term)) = (self.min_principal, self.min_term_months)
        else {
            return false;
        };

        request.principal >= min_principal
            && self.max_principal.is_none_or(|max| request.principal <= max)
            && request.term_months >= min_term
            && self.max_term_months.is_none_or(|max| request.term_months <= max)
    }
}
