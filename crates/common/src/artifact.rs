//! Lighthouse report schema and metric extraction
//!
//! An artifact is the raw JSON the audit engine emitted, written to disk
//! verbatim. Only the slice of the report we chart is modeled here; the
//! rest of the (large) document is ignored on deserialization.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::metrics::PerformanceMetrics;

/// Audit ids of the charted timing metrics.
pub const FIRST_CONTENTFUL_PAINT: &str = "first-contentful-paint";
pub const LARGEST_CONTENTFUL_PAINT: &str = "largest-contentful-paint";
pub const TIME_TO_INTERACTIVE: &str = "interactive";
pub const TOTAL_BLOCKING_TIME: &str = "total-blocking-time";
pub const CUMULATIVE_LAYOUT_SHIFT: &str = "cumulative-layout-shift";

/// The subset of a Lighthouse result this pipeline consumes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LighthouseReport {
    #[serde(default, rename = "requestedUrl")]
    pub requested_url: Option<String>,

    #[serde(default)]
    pub categories: Categories,

    #[serde(default)]
    pub audits: HashMap<String, AuditEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Categories {
    #[serde(default)]
    pub performance: Option<CategoryResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryResult {
    /// 0-1 fraction; null while the category is still erroring out
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditEntry {
    #[serde(default, rename = "numericValue")]
    pub numeric_value: Option<f64>,
}

impl LighthouseReport {
    /// Parse an artifact body.
    ///
    /// Accepts both the bare report object and the `{"lhr": {...}}`
    /// envelope the Node runner wraps it in.
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        match value.get("lhr") {
            Some(inner) => serde_json::from_value(inner.clone()),
            None => serde_json::from_value(value),
        }
    }

    /// Performance score scaled to 0-100. A missing or null category score
    /// reads as fraction 0 before scaling.
    pub fn performance_score(&self) -> f64 {
        let fraction = self
            .categories
            .performance
            .as_ref()
            .and_then(|c| c.score)
            .unwrap_or(0.0);
        fraction * 100.0
    }

    /// Numeric value of one audit, `0.0` when the audit is absent.
    pub fn audit_value(&self, id: &str) -> f64 {
        self.audits
            .get(id)
            .and_then(|a| a.numeric_value)
            .unwrap_or(0.0)
    }

    /// The URL the report was requested for, `"N/A"` when absent.
    pub fn requested_url(&self) -> &str {
        self.requested_url.as_deref().unwrap_or("N/A")
    }

    /// Extract the charted metrics, attributing them to `url`.
    pub fn to_metrics(&self, url: impl Into<String>) -> PerformanceMetrics {
        PerformanceMetrics {
            url: url.into(),
            score: self.performance_score(),
            fcp: self.audit_value(FIRST_CONTENTFUL_PAINT),
            lcp: self.audit_value(LARGEST_CONTENTFUL_PAINT),
            tti: self.audit_value(TIME_TO_INTERACTIVE),
            tbt: self.audit_value(TOTAL_BLOCKING_TIME),
            cls: self.audit_value(CUMULATIVE_LAYOUT_SHIFT),
            full_report_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_enveloped_artifact() {
        let body = r#"{
            "lhr": {
                "requestedUrl": "https://example.com/",
                "categories": { "performance": { "score": 0.95 } },
                "audits": {
                    "first-contentful-paint": { "numericValue": 1200.5 },
                    "cumulative-layout-shift": { "numericValue": 0.02 }
                }
            }
        }"#;

        let report = LighthouseReport::from_json(body).unwrap();
        assert_eq!(report.requested_url(), "https://example.com/");
        assert_eq!(report.performance_score(), 95.0);
        assert_eq!(report.audit_value(FIRST_CONTENTFUL_PAINT), 1200.5);
        assert_eq!(report.audit_value(CUMULATIVE_LAYOUT_SHIFT), 0.02);
    }

    #[test]
    fn test_parse_bare_report() {
        let body = r#"{
            "requestedUrl": "https://example.com/",
            "categories": { "performance": { "score": 0.8 } },
            "audits": { "interactive": { "numericValue": 3500 } }
        }"#;

        let report = LighthouseReport::from_json(body).unwrap();
        assert_eq!(report.performance_score(), 80.0);
        assert_eq!(report.audit_value(TIME_TO_INTERACTIVE), 3500.0);
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let report = LighthouseReport::from_json("{}").unwrap();
        let metrics = report.to_metrics("https://example.com/");

        assert_eq!(report.requested_url(), "N/A");
        assert_eq!(metrics.score, 0.0);
        assert_eq!(metrics.fcp, 0.0);
        assert_eq!(metrics.lcp, 0.0);
        assert_eq!(metrics.tti, 0.0);
        assert_eq!(metrics.tbt, 0.0);
        assert_eq!(metrics.cls, 0.0);
    }

    #[test]
    fn test_null_category_score_reads_as_zero() {
        let body = r#"{
            "categories": { "performance": { "score": null } },
            "audits": { "total-blocking-time": {} }
        }"#;

        let report = LighthouseReport::from_json(body).unwrap();
        assert_eq!(report.performance_score(), 0.0);
        assert_eq!(report.audit_value(TOTAL_BLOCKING_TIME), 0.0);
    }

    #[test]
    fn test_score_bounds() {
        for fraction in [0.0, 0.33, 1.0] {
            let body = format!(
                r#"{{ "categories": {{ "performance": {{ "score": {} }} }} }}"#,
                fraction
            );
            let report = LighthouseReport::from_json(&body).unwrap();
            let score = report.performance_score();
            assert!((0.0..=100.0).contains(&score));
        }
    }
}
