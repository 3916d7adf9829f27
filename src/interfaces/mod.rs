// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod amortization_calculator;
mod catalog;
mod quote_history;
mod quote_sink;

pub use amortization_calculator::AmortizationCalculator;
pub use catalog::{CatalogProvider, StaticCatalog};
pub use quote_history::{HistoricalQuoteReader, InMemoryQuoteStore, MAX_PAGE_SIZE};
pub use quote_sink::{LoggingQuoteSink, NoOpQuoteSink, QuoteSink};
