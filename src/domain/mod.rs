// ============================================================================
// Domain Models Module
// Contains all core domain entities and value objects
// ============================================================================

pub mod config;
pub mod installment;
pub mod product;
pub mod quote;
pub mod request;

pub use config::{OperationNames, SimulatorConfig, TelemetryConfig};
pub use installment::{AmortizationSystem, Installment, Schedule};
pub use product::{Product, ProductCode};
pub use quote::{HistoricalQuote, Quote, QuoteId, QuoteSummary};
pub use request::SimulationRequest;
