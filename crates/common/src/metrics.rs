//! Performance metrics data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Metrics extracted from a single audit run.
///
/// Every numeric field is `0.0` when the engine omitted the underlying
/// audit; absence is never surfaced as a missing value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// The audited page
    pub url: String,

    /// Performance score, 0-100 (scaled from the engine's 0-1 fraction)
    pub score: f64,

    /// First Contentful Paint, ms
    pub fcp: f64,

    /// Largest Contentful Paint, ms
    pub lcp: f64,

    /// Time to Interactive, ms
    pub tti: f64,

    /// Total Blocking Time, ms
    pub tbt: f64,

    /// Cumulative Layout Shift, unitless
    pub cls: f64,

    /// Where the raw report was persisted, if persistence was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_report_path: Option<PathBuf>,
}

/// A metrics record tied to a point in time, as reconstructed from a
/// persisted artifact. The date comes from the artifact's filename or,
/// failing that, the time of loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimestampedMetrics {
    pub date: DateTime<Utc>,

    #[serde(flatten)]
    pub metrics: PerformanceMetrics,
}

/// Optional per-metric performance budget.
///
/// Unset fields are not checked. Timings are upper bounds in milliseconds,
/// `min_score` is a lower bound on the 0-100 score, `max_cls` an upper
/// bound on the layout-shift score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(default)]
    pub min_score: Option<f64>,

    #[serde(default)]
    pub max_fcp_ms: Option<f64>,

    #[serde(default)]
    pub max_lcp_ms: Option<f64>,

    #[serde(default)]
    pub max_tti_ms: Option<f64>,

    #[serde(default)]
    pub max_tbt_ms: Option<f64>,

    #[serde(default)]
    pub max_cls: Option<f64>,
}

impl Thresholds {
    /// Check metrics against the budget, returning one message per breach.
    /// An empty result means the budget holds.
    pub fn violations(&self, metrics: &PerformanceMetrics) -> Vec<String> {
        let mut out = Vec::new();

        if let Some(min) = self.min_score {
            if metrics.score < min {
                out.push(format!("score {:.1} below minimum {:.1}", metrics.score, min));
            }
        }
        if let Some(max) = self.max_fcp_ms {
            if metrics.fcp > max {
                out.push(format!("FCP {:.0}ms exceeds {:.0}ms", metrics.fcp, max));
            }
        }
        if let Some(max) = self.max_lcp_ms {
            if metrics.lcp > max {
                out.push(format!("LCP {:.0}ms exceeds {:.0}ms", metrics.lcp, max));
            }
        }
        if let Some(max) = self.max_tti_ms {
            if metrics.tti > max {
                out.push(format!("TTI {:.0}ms exceeds {:.0}ms", metrics.tti, max));
            }
        }
        if let Some(max) = self.max_tbt_ms {
            if metrics.tbt > max {
                out.push(format!("TBT {:.0}ms exceeds {:.0}ms", metrics.tbt, max));
            }
        }
        if let Some(max) = self.max_cls {
            if metrics.cls > max {
                out.push(format!("CLS {:.3} exceeds {:.3}", metrics.cls, max));
            }
        }

        out
    }
}
