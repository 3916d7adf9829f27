// ============================================================================
// Quote Sink Interface
// Receives every quote the simulator produces (store, bus, log)
// ============================================================================

use crate::domain::{AmortizationSystem, Quote, SimulationRequest};

/// Handler for produced quotes.
/// Implementations can persist, publish or log them. Sinks cannot fail the
/// simulation: delivery problems are the sink's to report.
pub trait QuoteSink: Send + Sync {
    /// Handle one quote together with the request that produced it
    fn on_quote(&self, request: &SimulationRequest, quote: &Quote);
}

/// No-op sink for testing
pub struct NoOpQuoteSink;

impl QuoteSink for NoOpQuoteSink {
    fn on_quote(&self, _request: &SimulationRequest, _quote: &Quote) {
        // Do nothing
    }
}

/// Logging sink
pub struct LoggingQuoteSink;

impl QuoteSink for LoggingQuoteSink {
    fn on_quote(&self, request: &SimulationRequest, quote: &Quote) {
        let first_price_payment = quote
            .schedule(AmortizationSystem::Price)
            .and_then(|s| s.first_payment());

        tracing::info!(
            quote_id = %quote.id.as_uuid(),
            product = %quote.product_code,
            principal = %request.principal,
            term_months = request.term_months,
            first_price_payment = ?first_price_payment,
            "Quote produced"
        );
    }
}
