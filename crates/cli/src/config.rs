//! CLI configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use sitepulse_audit::{AuditConfig, BrowserConfig, EngineConfig};
use sitepulse_common::Thresholds;

/// Sitepulse configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory artifacts and the rendered report live in
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,

    /// Browser configuration
    #[serde(default)]
    pub browser: BrowserSection,

    /// Engine configuration
    #[serde(default)]
    pub engine: EngineSection,

    /// Performance budget for `audit --check`
    #[serde(default)]
    pub thresholds: Thresholds,
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("reports/performance")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reports_dir: default_reports_dir(),
            browser: BrowserSection::default(),
            engine: EngineSection::default(),
            thresholds: Thresholds::default(),
        }
    }
}

/// Browser-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserSection {
    /// Path to the Chromium/Chrome binary (None = `chromium` from PATH)
    #[serde(default)]
    pub binary_path: Option<String>,

    /// Seconds to wait for the DevTools endpoint on startup
    #[serde(default = "default_startup_timeout_secs")]
    pub startup_timeout_secs: u64,
}

fn default_startup_timeout_secs() -> u64 {
    15
}

impl Default for BrowserSection {
    fn default() -> Self {
        Self {
            binary_path: None,
            startup_timeout_secs: default_startup_timeout_secs(),
        }
    }
}

/// Engine-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSection {
    /// Suppress the engine's own progress logging
    #[serde(default = "default_quiet")]
    pub quiet: bool,
}

fn default_quiet() -> bool {
    true
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            quiet: default_quiet(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// The audit-crate view of this configuration
    pub fn audit_config(&self) -> AuditConfig {
        AuditConfig {
            reports_dir: self.reports_dir.clone(),
            browser: BrowserConfig {
                binary_path: self.browser.binary_path.clone(),
                startup_timeout: Duration::from_secs(self.browser.startup_timeout_secs),
            },
            engine: EngineConfig {
                quiet: self.engine.quiet,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = Config::load(Path::new("does-not-exist.toml")).unwrap();
        assert_eq!(config.reports_dir, PathBuf::from("reports/performance"));
        assert!(config.engine.quiet);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let toml = r#"
reports_dir = "artifacts/perf"

[thresholds]
min_score = 80.0
max_fcp_ms = 2000.0
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.reports_dir, PathBuf::from("artifacts/perf"));
        assert_eq!(config.thresholds.min_score, Some(80.0));
        assert_eq!(config.browser.startup_timeout_secs, 15);
    }

    #[test]
    fn test_audit_config_mapping() {
        let config = Config {
            browser: BrowserSection {
                binary_path: Some("/usr/bin/chromium".to_string()),
                startup_timeout_secs: 30,
            },
            ..Default::default()
        };

        let audit = config.audit_config();
        assert_eq!(audit.browser.binary_path.as_deref(), Some("/usr/bin/chromium"));
        assert_eq!(audit.browser.startup_timeout, Duration::from_secs(30));
    }
}
