// ============================================================================
// Loan Simulator Library
// Loan quotes under SAC and PRICE amortization with concurrent telemetry
// ============================================================================

//! # Loan Simulator
//!
//! Quotes loan repayment schedules and keeps per-operation telemetry.
//!
//! ## Features
//!
//! - **Product matching** against a catalog of value/term eligibility windows
//! - **SAC and PRICE schedules** with reproducible HALF_UP decimal rounding
//! - **Lock-free telemetry** of call volume, latency and success ratio
//! - **Daily volume rollups** per product over stored quotes
//!
//! ## Example
//!
//! ```rust
//! use loan_simulator::prelude::*;
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//!
//! let catalog = vec![
//!     Product::new(1, "Personal credit", Decimal::new(25, 3), 1, Decimal::from(200))
//!         .with_max_term(24),
//! ];
//!
//! // Core: pure quote
//! let quote = simulate(&SimulationRequest::new(Decimal::from(10000), 2), &catalog).unwrap();
//! let price = quote.schedule(AmortizationSystem::Price).unwrap();
//! assert_eq!(price.first_payment(), Some(Decimal::new(518827, 2)));
//!
//! // Service: quotes are stored and every call is measured
//! let store = Arc::new(InMemoryQuoteStore::new());
//! let simulator = SimulatorBuilder::http_endpoints()
//!     .with_products(catalog)
//!     .with_sink(store.clone())
//!     .build()
//!     .unwrap();
//!
//! let quote = simulator.simulate(&SimulationRequest::new(Decimal::from(5000), 12)).unwrap();
//! let volume = simulator
//!     .daily_volume(quote.created_at.date_naive(), store.as_ref())
//!     .unwrap();
//! assert_eq!(volume.products[0].count, 1);
//! ```

pub mod domain;
pub mod engine;
pub mod error;
pub mod interfaces;
pub mod numeric;
pub mod telemetry;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        AmortizationSystem, HistoricalQuote, Installment, Product, ProductCode, Quote, QuoteId,
        QuoteSummary, Schedule, SimulationRequest, SimulatorConfig, TelemetryConfig,
    };
    pub use crate::engine::{
        calculator_for, match_product, simulate, DailyVolumeReport, PriceCalculator,
        SacCalculator, Simulator, SimulatorBuilder,
    };
    pub use crate::error::{ErrorClass, SimulationError, SimulationResult};
    pub use crate::interfaces::{
        AmortizationCalculator, CatalogProvider, HistoricalQuoteReader, InMemoryQuoteStore,
        LoggingQuoteSink, NoOpQuoteSink, QuoteSink, StaticCatalog,
    };
    pub use crate::telemetry::{
        daily_volume_by_product, summarize_quote, DailyProductVolume, OperationStats,
        TelemetryAggregator, TelemetryReport,
    };
}
