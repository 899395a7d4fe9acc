//! Shared types for Sitepulse
//!
//! This crate holds everything both halves of the pipeline agree on:
//! the metrics data model, the artifact (raw Lighthouse report) schema,
//! and the error taxonomy.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  live path:    AuditRunner ──────────► PerformanceMetrics │
//! │  offline path: MetricsLoader ─► TrendAggregator ─► HTML   │
//! │                                                           │
//! │  shared:  artifact file format + PerformanceMetrics shape │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod artifact;
pub mod error;
pub mod metrics;

pub use artifact::LighthouseReport;
pub use error::{Error, Result};
pub use metrics::{PerformanceMetrics, Thresholds, TimestampedMetrics};

/// File extension of persisted audit artifacts.
pub const ARTIFACT_EXTENSION: &str = "json";

/// File name of the rendered trend document, written next to the artifacts.
pub const TREND_REPORT_FILE: &str = "performance_report.html";
