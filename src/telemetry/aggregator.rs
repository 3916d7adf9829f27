// ============================================================================
// Telemetry Aggregator
// Lock-free call counters and latency accumulators per operation
// ============================================================================

use crate::domain::TelemetryConfig;
use chrono::NaiveDate;
use crossbeam::utils::CachePadded;
use crossbeam_skiplist::SkipMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

const NANOS_PER_MILLI: f64 = 1_000_000.0;

// ============================================================================
// Operation Metric
// ============================================================================

/// Accumulators for one operation name.
///
/// Every counter is updated atomically on its own; the call counter is bumped
/// last so a reader that sees `n` calls also sees the other updates of those
/// `n` calls.
#[derive(Debug)]
pub struct OperationMetric {
    calls: CachePadded<AtomicU64>,
    successes: AtomicU64,
    total_nanos: AtomicU64,
    min_nanos: AtomicU64,
    max_nanos: AtomicU64,
    recent: Mutex<VecDeque<u64>>,
    capacity: usize,
}

impl OperationMetric {
    pub fn new(capacity: usize) -> Self {
        Self {
            calls: CachePadded::new(AtomicU64::new(0)),
            successes: AtomicU64::new(0),
            total_nanos: AtomicU64::new(0),
            min_nanos: AtomicU64::new(u64::MAX),
            max_nanos: AtomicU64::new(0),
            recent: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity: capacity.max(1),
        }
    }

    pub fn observe(&self, duration: Duration, success: bool) {
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);

        self.total_nanos.fetch_add(nanos, Ordering::AcqRel);
        self.min_nanos.fetch_min(nanos, Ordering::AcqRel);
        self.max_nanos.fetch_max(nanos, Ordering::AcqRel);

        {
            let mut recent = self.recent.lock();
            if recent.len() == self.capacity {
                recent.pop_front();
            }
            recent.push_back(nanos);
        }

        if success {
            self.successes.fetch_add(1, Ordering::AcqRel);
        }
        self.calls.fetch_add(1, Ordering::Release);
    }

    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::Acquire)
    }

    /// Rollup of the accumulators; `None` until the first call lands
    pub fn stats(&self) -> Option<OperationStats> {
        let calls = self.calls.load(Ordering::Acquire);
        if calls == 0 {
            return None;
        }

        let successes = self.successes.load(Ordering::Acquire);
        let total = self.total_nanos.load(Ordering::Acquire);
        let min = self.min_nanos.load(Ordering::Acquire);
        let max = self.max_nanos.load(Ordering::Acquire);

        Some(OperationStats {
            call_count: calls,
            success_count: successes.min(calls),
            average_duration_ms: total as f64 / calls as f64 / NANOS_PER_MILLI,
            min_duration_ms: if min == u64::MAX { 0.0 } else { min as f64 / NANOS_PER_MILLI },
            max_duration_ms: max as f64 / NANOS_PER_MILLI,
            success_ratio: (successes as f64 / calls as f64).min(1.0),
        })
    }

    /// Most recent samples, oldest first
    pub fn recent_durations(&self) -> Vec<Duration> {
        self.recent
            .lock()
            .iter()
            .map(|&nanos| Duration::from_nanos(nanos))
            .collect()
    }
}

/// Point-in-time rollup of one operation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperationStats {
    pub call_count: u64,
    pub success_count: u64,
    pub average_duration_ms: f64,
    pub min_duration_ms: f64,
    pub max_duration_ms: f64,
    pub success_ratio: f64,
}

// ============================================================================
// Report Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationInfo {
    pub name: String,
    pub version: String,
}

/// Per-endpoint entry of a telemetry report, whole milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointTelemetry {
    pub name: String,
    pub request_count: u64,
    pub average_ms: u64,
    pub min_ms: u64,
    pub max_ms: u64,
    pub success_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryReport {
    pub reference_date: NaiveDate,
    pub application: ApplicationInfo,
    pub endpoints: Vec<EndpointTelemetry>,
}

// ============================================================================
// Aggregator
// ============================================================================

/// Process-wide telemetry store.
///
/// Construct one per process and share it (`Arc`) with every caller; tests
/// build their own. Safe for concurrent `measure`/`record` without external
/// locking.
pub struct TelemetryAggregator {
    /// SkipMap provides lock-free concurrent sorted map
    /// Key: operation name
    metrics: SkipMap<String, OperationMetric>,
    config: TelemetryConfig,
}

impl TelemetryAggregator {
    pub fn new(config: TelemetryConfig) -> Self {
        Self {
            metrics: SkipMap::new(),
            config,
        }
    }

    /// Run `operation`, recording its wall-clock duration and outcome.
    ///
    /// `Err` counts as a failure and is returned unchanged. A panic is
    /// recorded as a failure and keeps unwinding.
    pub fn measure<T, E, F>(&self, operation: &str, f: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: fmt::Display,
    {
        let in_flight = InFlight::start(self, operation);
        let result = f();

        match &result {
            Ok(_) => {
                let elapsed = in_flight.settle(true);
                tracing::debug!(
                    operation,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Operation completed"
                );
            }
            Err(e) => {
                let elapsed = in_flight.settle(false);
                tracing::error!(
                    operation,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Operation failed: {}",
                    e
                );
            }
        }

        result
    }

    /// Record an externally measured call
    pub fn record(&self, operation: &str, duration: Duration, success: bool) {
        match self.metrics.get(operation) {
            Some(entry) => entry.value().observe(duration, success),
            None => {
                let capacity = self.config.sample_capacity;
                self.metrics
                    .get_or_insert(operation.to_string(), OperationMetric::new(capacity))
                    .value()
                    .observe(duration, success);
            }
        }
    }

    /// Current rollup of every observed operation, ordered by name
    pub fn snapshot(&self) -> BTreeMap<String, OperationStats> {
        self.metrics
            .iter()
            .filter_map(|entry| {
                entry
                    .value()
                    .stats()
                    .map(|stats| (entry.key().clone(), stats))
            })
            .collect()
    }

    /// Rollup of a single operation
    pub fn stats(&self, operation: &str) -> Option<OperationStats> {
        self.metrics
            .get(operation)
            .and_then(|entry| entry.value().stats())
    }

    pub fn recent_durations(&self, operation: &str) -> Vec<Duration> {
        self.metrics
            .get(operation)
            .map(|entry| entry.value().recent_durations())
            .unwrap_or_default()
    }

    /// Forget every operation (test isolation)
    pub fn reset(&self) {
        self.metrics.clear();
    }

    /// Endpoint report for `reference_date`, labelled with this
    /// aggregator's configured endpoint labels.
    pub fn report(&self, reference_date: NaiveDate, application: ApplicationInfo) -> TelemetryReport {
        self.report_with_labels(reference_date, application, &self.config.endpoint_labels)
    }

    /// Endpoint report for `reference_date` under the given labels.
    ///
    /// With labels, only labelled operations appear, under their labels;
    /// with none, every operation appears under its own name.
    pub fn report_with_labels(
        &self,
        reference_date: NaiveDate,
        application: ApplicationInfo,
        labels: &BTreeMap<String, String>,
    ) -> TelemetryReport {
        let endpoints = self
            .snapshot()
            .into_iter()
            .filter_map(|(operation, stats)| {
                let name = if labels.is_empty() {
                    operation
                } else {
                    labels.get(&operation)?.clone()
                };

                Some(EndpointTelemetry {
                    name,
                    request_count: stats.call_count,
                    average_ms: stats.average_duration_ms as u64,
                    min_ms: stats.min_duration_ms as u64,
                    max_ms: stats.max_duration_ms as u64,
                    success_ratio: stats.success_ratio,
                })
            })
            .collect();

        TelemetryReport {
            reference_date,
            application,
            endpoints,
        }
    }

    pub fn config(&self) -> &TelemetryConfig {
        &self.config
    }
}

impl Default for TelemetryAggregator {
    fn default() -> Self {
        Self::new(TelemetryConfig::default())
    }
}

// ============================================================================
// In-flight measurement
// ============================================================================

/// Records a failed call if dropped before being settled (the measured
/// closure panicked).
struct InFlight<'a> {
    aggregator: &'a TelemetryAggregator,
    operation: &'a str,
    started: Instant,
    settled: bool,
}

impl<'a> InFlight<'a> {
    fn start(aggregator: &'a TelemetryAggregator, operation: &'a str) -> Self {
        Self {
            aggregator,
            operation,
            started: Instant::now(),
            settled: false,
        }
    }

    fn settle(mut self, success: bool) -> Duration {
        self.settled = true;
        let elapsed = self.started.elapsed();
        self.aggregator.record(self.operation, elapsed, success);
        elapsed
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            let elapsed = self.started.elapsed();
            self.aggregator.record(self.operation, elapsed, false);
            tracing::error!(
                operation = self.operation,
                elapsed_ms = elapsed.as_millis() as u64,
                "Operation panicked"
            );
        }
    }
}
