// ============================================================================
// Simulator Configuration
// Application identity, telemetry operation names and sampling
// ============================================================================

use crate::error::{SimulationError, SimulationResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Operation names the simulator records telemetry under
pub const OPERATION_SIMULATE: &str = "POST /simulacoes";
pub const OPERATION_LIST: &str = "GET /simulacoes";
pub const OPERATION_DAILY_VOLUME: &str = "GET /simulacoes/dia";

/// Default number of recent duration samples kept per operation
pub const DEFAULT_SAMPLE_CAPACITY: usize = 1024;

// ============================================================================
// Telemetry Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Recent duration samples kept per operation (oldest evicted first)
    pub sample_capacity: usize,

    /// Display label per operation name for reports.
    /// Empty means every operation is reported under its own name.
    pub endpoint_labels: BTreeMap<String, String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            sample_capacity: DEFAULT_SAMPLE_CAPACITY,
            endpoint_labels: BTreeMap::new(),
        }
    }
}

// ============================================================================
// Operation Names
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationNames {
    pub simulate: String,
    pub list: String,
    pub daily_volume: String,
}

impl Default for OperationNames {
    fn default() -> Self {
        Self {
            simulate: OPERATION_SIMULATE.to_string(),
            list: OPERATION_LIST.to_string(),
            daily_volume: OPERATION_DAILY_VOLUME.to_string(),
        }
    }
}

// ============================================================================
// Complete Simulator Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub application_name: String,
    pub application_version: String,
    pub operations: OperationNames,
    pub telemetry: TelemetryConfig,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            application_name: env!("CARGO_PKG_NAME").to_string(),
            application_version: env!("CARGO_PKG_VERSION").to_string(),
            operations: OperationNames::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl SimulatorConfig {
    /// Load from a JSON document; absent fields keep their defaults.
    pub fn from_json(document: &str) -> SimulationResult<Self> {
        let config: Self = serde_json::from_str(document)
            .map_err(|e| SimulationError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Builder method: set application identity
    pub fn with_application(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.application_name = name.into();
        self.application_version = version.into();
        self
    }

    /// Builder method: set the recent sample capacity
    pub fn with_sample_capacity(mut self, capacity: usize) -> Self {
        self.telemetry.sample_capacity = capacity;
        self
    }

    /// Builder method: label an operation for reports
    pub fn with_endpoint_label(
        mut self,
        operation: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        self.telemetry
            .endpoint_labels
            .insert(operation.into(), label.into());
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> SimulationResult<()> {
        if self.application_name.is_empty() {
            return Err(SimulationError::InvalidConfig(
                "Application name cannot be empty".to_string(),
            ));
        }

        if self.telemetry.sample_capacity == 0 {
            return Err(SimulationError::InvalidConfig(
                "Sample capacity must be positive".to_string(),
            ));
        }

        let ops = &self.operations;
        for name in [&ops.simulate, &ops.list, &ops.daily_volume] {
            if name.is_empty() {
                return Err(SimulationError::InvalidConfig(
                    "Operation names cannot be empty".to_string(),
                ));
            }
        }

        if ops.simulate == ops.list
            || ops.simulate == ops.daily_volume
            || ops.list == ops.daily_volume
        {
            return Err(SimulationError::InvalidConfig(
                "Operation names must be distinct".to_string(),
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Preset Configurations
// ============================================================================

impl SimulatorConfig {
    /// HTTP front-end configuration
    /// - Reports only the three simulation endpoints, under display labels
    pub fn http_endpoints() -> Self {
        Self::default()
            .with_endpoint_label(OPERATION_SIMULATE, "Simulacao - Criar")
            .with_endpoint_label(OPERATION_LIST, "Simulacao - Listar")
            .with_endpoint_label(OPERATION_DAILY_VOLUME, "Simulacao - Volume por Dia")
    }
}
