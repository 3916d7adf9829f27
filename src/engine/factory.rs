// ============================================================================
// Simulator Factory
// Creates calculators and simulators with proper configuration
// ============================================================================

use crate::domain::{AmortizationSystem, Product, SimulatorConfig};
use crate::engine::{PriceCalculator, SacCalculator, Simulator};
use crate::error::SimulationResult;
use crate::interfaces::{AmortizationCalculator, CatalogProvider, NoOpQuoteSink, QuoteSink, StaticCatalog};
use crate::telemetry::TelemetryAggregator;
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Calculator for an amortization system
///
/// # Example
/// ```
/// use loan_simulator::prelude::*;
/// use loan_simulator::engine::factory::calculator_for;
/// use rust_decimal::Decimal;
///
/// let calculator = calculator_for(AmortizationSystem::Sac);
/// let installments = calculator
///     .calculate(Decimal::from(1200), Decimal::new(1, 2), 12)
///     .unwrap();
/// assert_eq!(installments.len(), 12);
/// ```
pub fn calculator_for(system: AmortizationSystem) -> &'static dyn AmortizationCalculator {
    match system {
        AmortizationSystem::Sac => &SacCalculator,
        AmortizationSystem::Price => &PriceCalculator,
    }
}

// ============================================================================
// Builder Pattern
// ============================================================================

/// Builder for creating simulators with fluent API
///
/// # Example
/// ```
/// use loan_simulator::prelude::*;
/// use loan_simulator::engine::factory::SimulatorBuilder;
/// use rust_decimal::Decimal;
///
/// let simulator = SimulatorBuilder::http_endpoints()
///     .with_products(vec![Product::new(1, "Personal credit", Decimal::new(179, 4), 1, Decimal::from(200))])
///     .build()
///     .unwrap();
///
/// let quote = simulator.simulate(&SimulationRequest::new(Decimal::from(5000), 12)).unwrap();
/// assert_eq!(quote.product_code, ProductCode(1));
/// ```
pub struct SimulatorBuilder {
    config: SimulatorConfig,
    catalog: Option<Arc<dyn CatalogProvider>>,
    sink: Option<Arc<dyn QuoteSink>>,
    telemetry: Option<Arc<TelemetryAggregator>>,
}

impl SimulatorBuilder {
    /// Create a builder with the default configuration
    pub fn new() -> Self {
        Self {
            config: SimulatorConfig::default(),
            catalog: None,
            sink: None,
            telemetry: None,
        }
    }

    // ========================================================================
    // Collaborators
    // ========================================================================

    pub fn with_config(mut self, config: SimulatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_catalog(mut self, catalog: Arc<dyn CatalogProvider>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Use a fixed product list as the catalog
    pub fn with_products(self, products: Vec<Product>) -> Self {
        self.with_catalog(Arc::new(StaticCatalog::new(products)))
    }

    pub fn with_sink(mut self, sink: Arc<dyn QuoteSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Share an existing aggregator instead of creating one from the config
    pub fn with_telemetry(mut self, telemetry: Arc<TelemetryAggregator>) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    // ========================================================================
    // Preset Configurations
    // ========================================================================

    /// Apply the HTTP endpoint configuration
    pub fn http_endpoints() -> Self {
        Self::new().with_config(SimulatorConfig::http_endpoints())
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the simulator
    ///
    /// Missing collaborators default to an empty catalog, a no-op sink and a
    /// fresh aggregator.
    pub fn build(self) -> SimulationResult<Simulator> {
        self.config.validate()?;

        if let Some(shared) = &self.telemetry {
            if shared.config() != &self.config.telemetry {
                tracing::warn!(
                    "Shared telemetry aggregator is configured differently; \
                     reports use the simulator's endpoint labels"
                );
            }
        }

        let catalog = self
            .catalog
            .unwrap_or_else(|| Arc::new(StaticCatalog::default()));
        let sink = self.sink.unwrap_or_else(|| Arc::new(NoOpQuoteSink));
        let telemetry = self
            .telemetry
            .unwrap_or_else(|| Arc::new(TelemetryAggregator::new(self.config.telemetry.clone())));

        tracing::debug!(
            application = %self.config.application_name,
            version = %self.config.application_version,
            "Simulator built"
        );
        Ok(Simulator::new(self.config, catalog, sink, telemetry))
    }

    /// Get the configuration without building (for inspection)
    pub fn get_config(&self) -> &SimulatorConfig {
        &self.config
    }
}

impl Default for SimulatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SimulationRequest;
    use crate::error::SimulationError;
    use crate::interfaces::{HistoricalQuoteReader, InMemoryQuoteStore};
    use rust_decimal_macros::dec;

    fn products() -> Vec<Product> {
        vec![Product::new(1, "Personal credit", dec!(0.025), 1, dec!(200))]
    }

    #[test]
    fn test_calculator_for_each_system() {
        for system in AmortizationSystem::ALL {
            let calculator = calculator_for(system);
            assert_eq!(calculator.system(), system);
            assert_eq!(calculator.name(), system.as_str());
        }
    }

    #[test]
    fn test_default_build_has_empty_catalog() {
        let simulator = SimulatorBuilder::new().build().unwrap();
        let result = simulator.simulate(&SimulationRequest::new(dec!(1000), 12));
        assert!(matches!(result, Err(SimulationError::NoEligibleProduct { .. })));
    }

    #[test]
    fn test_builder_with_collaborators() {
        let store = Arc::new(InMemoryQuoteStore::new());
        let telemetry = Arc::new(TelemetryAggregator::default());

        let simulator = SimulatorBuilder::new()
            .with_products(products())
            .with_sink(store.clone())
            .with_telemetry(Arc::clone(&telemetry))
            .build()
            .unwrap();

        simulator
            .simulate(&SimulationRequest::new(dec!(1000), 12))
            .unwrap();

        assert_eq!(store.count(), 1);
        assert_eq!(telemetry.stats("POST /simulacoes").unwrap().call_count, 1);
    }

    #[test]
    fn test_shared_aggregator_keeps_configured_labels() {
        let simulator = SimulatorBuilder::http_endpoints()
            .with_products(products())
            .with_telemetry(Arc::new(TelemetryAggregator::default()))
            .build()
            .unwrap();

        simulator
            .simulate(&SimulationRequest::new(dec!(1000), 12))
            .unwrap();

        let date = chrono::NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let report = simulator.telemetry_report(date);
        assert!(report
            .endpoints
            .iter()
            .any(|e| e.name == "Simulacao - Criar"));
        assert!(report
            .endpoints
            .iter()
            .all(|e| e.name != "POST /simulacoes"));
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let result = SimulatorBuilder::new()
            .with_config(SimulatorConfig::default().with_sample_capacity(0))
            .build();
        assert!(matches!(result, Err(SimulationError::InvalidConfig(_))));
    }

    #[test]
    fn test_preset_builder() {
        let builder = SimulatorBuilder::http_endpoints();
        assert_eq!(builder.get_config().telemetry.endpoint_labels.len(), 3);

        let simulator = builder.with_products(products()).build().unwrap();
        assert_eq!(simulator.config(), &SimulatorConfig::http_endpoints());
    }
}
