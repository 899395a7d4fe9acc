//! Audit engine invocation
//!
//! The engine is an external collaborator: the Lighthouse CLI, attached to
//! an already-running browser via its debugging port. Tests substitute
//! stub engines through the `AuditEngine` trait.

use std::process::{Command, Stdio};
use async_trait::async_trait;
use tokio::process::Command as TokioCommand;
use tracing::{debug, warn};

use sitepulse_common::{Error, LighthouseReport, Result};

/// What one engine invocation produced: the raw body to persist verbatim
/// and its parsed form for metric extraction.
pub struct EngineReport {
    pub raw: String,
    pub report: LighthouseReport,
}

/// Runs one audit against a URL through an acquired browser port.
///
/// `Ok(None)` means the engine produced no result object at all; a result
/// with missing fields still comes back as `Ok(Some(..))`.
#[async_trait]
pub trait AuditEngine: Send + Sync {
    async fn audit(&self, url: &str, categories: &[String], port: u16)
        -> Result<Option<EngineReport>>;
}

/// Configuration for the Lighthouse CLI
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Suppress the engine's own progress logging
    pub quiet: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { quiet: true }
    }
}

/// Shells out to the Lighthouse CLI via npx.
pub struct LighthouseCli {
    config: EngineConfig,
}

impl LighthouseCli {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Check if the Lighthouse CLI is installed
    fn check_lighthouse_installed() -> Result<()> {
        let output = Command::new("npx")
            .args(["lighthouse", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match output {
            Ok(status) if status.success() => Ok(()),
            _ => Err(Error::LighthouseNotFound),
        }
    }
}

#[async_trait]
impl AuditEngine for LighthouseCli {
    async fn audit(
        &self,
        url: &str,
        categories: &[String],
        port: u16,
    ) -> Result<Option<EngineReport>> {
        Self::check_lighthouse_installed()?;

        let mut cmd = TokioCommand::new("npx");
        cmd.arg("lighthouse")
            .arg(url)
            .arg("--output=json")
            .arg("--output-path=stdout")
            .arg(format!("--port={}", port));

        if !categories.is_empty() {
            cmd.arg(format!("--only-categories={}", categories.join(",")));
        }
        if self.config.quiet {
            cmd.arg("--quiet");
        }

        debug!("Running lighthouse for {} on port {}", url, port);

        let output = cmd.stdin(Stdio::null()).output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Engine(format!(
                "lighthouse exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let body = stdout.trim();
        if body.is_empty() {
            return Ok(None);
        }

        match LighthouseReport::from_json(body) {
            Ok(report) => Ok(Some(EngineReport {
                raw: body.to_string(),
                report,
            })),
            Err(e) => {
                // Engine ran but emitted nothing extractable - the caller
                // treats this the same as no result.
                warn!("lighthouse output is not a report: {}", e);
                Ok(None)
            }
        }
    }
}
