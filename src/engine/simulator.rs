// ============================================================================
// Simulator
// Composes product matching and both calculators into a quote, and serves
// the volume and listing queries under telemetry
// ============================================================================

use crate::domain::{Product, Quote, QuoteSummary, SimulationRequest, SimulatorConfig};
use crate::engine::{match_product, PriceCalculator, SacCalculator};
use crate::error::{SimulationError, SimulationResult};
use crate::interfaces::{AmortizationCalculator, CatalogProvider, HistoricalQuoteReader, QuoteSink};
use crate::telemetry::{
    daily_volume_by_product, summarize_quote, ApplicationInfo, DailyProductVolume,
    TelemetryAggregator, TelemetryReport,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Quote `request` against `catalog`.
///
/// Matches the first admitting product, then runs the SAC and PRICE
/// calculators with its rate over the requested principal and term.
/// Pure: nothing is stored or published.
///
/// # Errors
/// - `NoEligibleProduct` if no catalog entry admits the request
/// - `Arithmetic` if a calculator fails (e.g. a zero-rate product)
pub fn simulate(request: &SimulationRequest, catalog: &[Product]) -> SimulationResult<Quote> {
    let product = match_product(request, catalog)?;

    let sac = SacCalculator.calculate(
        request.principal,
        product.periodic_rate,
        request.term_months,
    )?;
    let price = PriceCalculator.calculate(
        request.principal,
        product.periodic_rate,
        request.term_months,
    )?;

    Ok(Quote::new(product, sac, price))
}

/// Volume rollup for one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyVolumeReport {
    pub reference_date: NaiveDate,
    pub products: Vec<DailyProductVolume>,
}

/// Simulation service: catalog, quote sink and telemetry wired together.
///
/// Every public operation is measured under the operation name configured
/// for it.
pub struct Simulator {
    config: SimulatorConfig,

    /// Source of the product catalog, read on every simulation
    catalog: Arc<dyn CatalogProvider>,

    /// Receives every quote produced
    sink: Arc<dyn QuoteSink>,

    telemetry: Arc<TelemetryAggregator>,
}

impl Simulator {
    pub fn new(
        config: SimulatorConfig,
        catalog: Arc<dyn CatalogProvider>,
        sink: Arc<dyn QuoteSink>,
        telemetry: Arc<TelemetryAggregator>,
    ) -> Self {
        Self {
            config,
            catalog,
            sink,
            telemetry,
        }
    }

    /// Validate, quote and publish a request
    pub fn simulate(&self, request: &SimulationRequest) -> SimulationResult<Quote> {
        self.telemetry.measure(&self.config.operations.simulate, || -> SimulationResult<Quote> {
            request.validate()?;

            let products = self.catalog.products();
            let quote = simulate(request, &products)?;

            self.sink.on_quote(request, &quote);
            tracing::info!(
                quote_id = %quote.id.as_uuid(),
                product = %quote.product_code,
                "Simulation completed"
            );
            Ok(quote)
        })
    }

    /// Per-product volume of the quotes `reader` holds for `date`
    pub fn daily_volume(
        &self,
        date: NaiveDate,
        reader: &dyn HistoricalQuoteReader,
    ) -> SimulationResult<DailyVolumeReport> {
        self.telemetry
            .measure(&self.config.operations.daily_volume, || {
                let records = reader.quotes_on(date);
                Ok::<_, SimulationError>(DailyVolumeReport {
                    reference_date: date,
                    products: daily_volume_by_product(date, &records),
                })
            })
    }

    /// One page of quote summaries, ordered by record id
    pub fn list_summaries(
        &self,
        reader: &dyn HistoricalQuoteReader,
        page: usize,
        size: usize,
    ) -> SimulationResult<Vec<QuoteSummary>> {
        self.telemetry.measure(&self.config.operations.list, || -> SimulationResult<_> {
            if size == 0 {
                return Err(SimulationError::InvalidRequest(
                    "Page size must be positive".to_string(),
                ));
            }

            Ok(reader
                .page(page, size)
                .iter()
                .map(summarize_quote)
                .collect())
        })
    }

    /// Telemetry report for `reference_date`, under the configured
    /// application identity and endpoint labels (a shared aggregator's own
    /// labels do not apply)
    pub fn telemetry_report(&self, reference_date: NaiveDate) -> TelemetryReport {
        let application = ApplicationInfo {
            name: self.config.application_name.clone(),
            version: self.config.application_version.clone(),
        };
        self.telemetry.report_with_labels(
            reference_date,
            application,
            &self.config.telemetry.endpoint_labels,
        )
    }

    pub fn telemetry(&self) -> &Arc<TelemetryAggregator> {
        &self.telemetry
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }
}
