//! Observability infrastructure for Optionbook
//!
//! This crate provides:
//! - Structured logging via tracing
//! - Prometheus metrics for the read pipeline
//!
//! # Quick Start
//!
//! ```ignore
//! use observability::{init_logging, LogFormat};
//!
//! init_logging("optionbook", LogFormat::Pretty)?;
//!
//! // Optional: expose /metrics on a port
//! observability::metrics::init_metrics(9090)?;
//! ```

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, init_logging_with_level, LogFormat};
pub use metrics::{init_metrics, PipelineMetrics};
