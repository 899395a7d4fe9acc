//! Audit orchestration
//!
//! One `run` call = one browser acquisition, one engine invocation, one
//! metrics extraction. Strictly sequential; the call does not return until
//! the browser process is gone.

use std::path::{Path, PathBuf};
use chrono::Utc;
use tracing::info;

use sitepulse_common::{Error, PerformanceMetrics, Result};

use crate::browser::{BrowserConfig, BrowserLauncher, ChromeLauncher};
use crate::engine::{AuditEngine, EngineConfig, LighthouseCli};
use crate::persist;

/// Configuration for the audit runner
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Directory artifacts are persisted into (must exist before a
    /// persisting run)
    pub reports_dir: PathBuf,

    /// Browser launch configuration
    pub browser: BrowserConfig,

    /// Engine configuration
    pub engine: EngineConfig,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            reports_dir: PathBuf::from("reports/performance"),
            browser: BrowserConfig::default(),
            engine: EngineConfig::default(),
        }
    }
}

/// Per-call audit parameters
#[derive(Debug, Clone)]
pub struct AuditRequest {
    /// Category subset to audit
    pub categories: Vec<String>,

    /// Persist the raw report next to previous runs
    pub save_report: bool,

    /// Explicit artifact path; None = reports dir + `lighthouse-<now_ms>.json`
    pub report_path: Option<PathBuf>,
}

impl Default for AuditRequest {
    fn default() -> Self {
        Self {
            categories: vec!["performance".to_string()],
            save_report: false,
            report_path: None,
        }
    }
}

/// Drives one audit run end to end
pub struct AuditRunner {
    config: AuditConfig,
    browser: Box<dyn BrowserLauncher>,
    engine: Box<dyn AuditEngine>,
}

impl AuditRunner {
    /// Runner with the production browser and engine
    pub fn new(config: AuditConfig) -> Self {
        let browser = Box::new(ChromeLauncher::new(config.browser.clone()));
        let engine = Box::new(LighthouseCli::new(config.engine.clone()));
        Self::with_parts(config, browser, engine)
    }

    /// Runner with injected collaborators
    pub fn with_parts(
        config: AuditConfig,
        browser: Box<dyn BrowserLauncher>,
        engine: Box<dyn AuditEngine>,
    ) -> Self {
        Self {
            config,
            browser,
            engine,
        }
    }

    pub fn reports_dir(&self) -> &Path {
        &self.config.reports_dir
    }

    /// Audit `url` once and extract its metrics.
    ///
    /// The browser session is scoped to this call: it is torn down after
    /// the engine returns and before the outcome is inspected, on success
    /// and failure alike.
    pub async fn run(&self, url: &str, request: AuditRequest) -> Result<PerformanceMetrics> {
        info!("Auditing {}", url);

        let session = self.browser.launch().await?;
        let outcome = self
            .engine
            .audit(url, &request.categories, session.port())
            .await;
        drop(session);

        let engine_report = outcome?.ok_or_else(|| Error::AuditFailure(url.to_string()))?;
        let mut metrics = engine_report.report.to_metrics(url);

        if request.save_report && !engine_report.raw.is_empty() {
            let path = request
                .report_path
                .clone()
                .unwrap_or_else(|| self.default_report_path());
            persist::save_report(&path, &engine_report.raw)?;
            info!("Full report saved to {}", path.display());
            metrics.full_report_path = Some(path);
        }

        Ok(metrics)
    }

    /// Default artifact path, stamped with the current time in milliseconds
    fn default_report_path(&self) -> PathBuf {
        self.config
            .reports_dir
            .join(format!("lighthouse-{}.json", Utc::now().timestamp_millis()))
    }
}
