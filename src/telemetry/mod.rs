// ============================================================================
// Telemetry Module
// Live call metrics per operation and volume rollups over stored quotes
// ============================================================================

mod aggregator;
mod volume;

pub use aggregator::{
    ApplicationInfo, EndpointTelemetry, OperationMetric, OperationStats, TelemetryAggregator,
    TelemetryReport,
};
pub use volume::{daily_volume_by_product, summarize_quote, DailyProductVolume};
