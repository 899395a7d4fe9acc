//! Sitepulse trend reporting
//!
//! The offline half of the pipeline: scan the artifacts a directory has
//! accumulated over many audit runs, order them chronologically, and render
//! a self-contained HTML trend document next to them.
//!
//! ```text
//! reports/performance/*.json ─► load_all ─► order_by_date ─► render_trend
//!                                                               │
//!                              reports/performance/performance_report.html
//! ```

pub mod loader;
pub mod render;
pub mod trend;

use std::path::{Path, PathBuf};
use tracing::info;

use sitepulse_common::{Result, TREND_REPORT_FILE};

/// Generate the trend report for a directory of artifacts.
///
/// Returns the path of the written document, or `None` when there is
/// nothing to show - an empty directory is not an error.
pub fn generate_report(dir: &Path) -> Result<Option<PathBuf>> {
    let entries = loader::load_all(dir)?;
    if entries.is_empty() {
        info!("No performance artifacts in {}, nothing to show", dir.display());
        return Ok(None);
    }

    let ordered = trend::order_by_date(entries);
    let html = render::render_trend(&ordered);

    let output = dir.join(TREND_REPORT_FILE);
    std::fs::write(&output, html)?;

    info!("Trend report written to {}", output.display());
    Ok(Some(output))
}
