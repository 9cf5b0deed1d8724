//! Prometheus metrics for the read pipeline
//!
//! The catalog and position aggregator record how often they hit the chain
//! boundary and how long their fan-outs take. Recording is a no-op until an
//! exporter is installed, so library code and tests can record freely.

use metrics::{counter, gauge, histogram, Counter, Gauge, Histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;

/// Install the Prometheus exporter, serving `/metrics` on the given port.
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;

    tracing::info!(%addr, "Metrics exporter listening");
    Ok(())
}

/// Metric set for one stage of the read pipeline.
///
/// # Metrics
///
/// * `pipeline_loads_total` - Catalog builds / list aggregations completed
/// * `pipeline_load_failures_total` - Builds / aggregations that failed
/// * `pipeline_provider_reads_total` - Individual chain reads issued
/// * `pipeline_load_duration_seconds` - Fan-out wall-clock duration
/// * `pipeline_items` - Items currently held (options in the catalog,
///   positions in the last listing)
#[derive(Clone)]
pub struct PipelineMetrics {
    loads_total: Counter,
    load_failures: Counter,
    provider_reads: Counter,
    load_duration: Histogram,
    items: Gauge,
    stage: String,
}

impl PipelineMetrics {
    /// Create the metric set for a named stage (e.g., "catalog",
    /// "positions").
    pub fn new(stage: &str) -> Self {
        let name = stage.to_string();
        Self {
            loads_total: counter!("pipeline_loads_total", "stage" => name.clone()),
            load_failures: counter!("pipeline_load_failures_total", "stage" => name.clone()),
            provider_reads: counter!("pipeline_provider_reads_total", "stage" => name.clone()),
            load_duration: histogram!("pipeline_load_duration_seconds", "stage" => name.clone()),
            items: gauge!("pipeline_items", "stage" => name.clone()),
            stage: name,
        }
    }

    /// Record a completed load with its duration and resulting item count.
    pub fn record_load(&self, duration: Duration, item_count: usize) {
        self.loads_total.increment(1);
        self.load_duration.record(duration.as_secs_f64());
        self.items.set(item_count as f64);
    }

    /// Record a failed load.
    pub fn record_failure(&self) {
        self.load_failures.increment(1);
    }

    /// Record `n` provider reads issued as part of a fan-out.
    pub fn record_reads(&self, n: u64) {
        self.provider_reads.increment(n);
    }

    /// Name of the stage this set belongs to.
    pub fn stage(&self) -> &str {
        &self.stage
    }
}
