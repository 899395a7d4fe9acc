//! Output formatting for CLI

use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use sitepulse_common::PerformanceMetrics;

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print one audit result
pub fn print_metrics(metrics: &PerformanceMetrics, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic);

            table.set_header(vec!["Metric", "Value"]);
            table.add_row(vec!["URL".to_string(), metrics.url.clone()]);
            table.add_row(vec!["Score".to_string(), colored_score(metrics.score)]);
            table.add_row(vec!["FCP".to_string(), format!("{:.0} ms", metrics.fcp)]);
            table.add_row(vec!["LCP".to_string(), format!("{:.0} ms", metrics.lcp)]);
            table.add_row(vec!["TTI".to_string(), format!("{:.0} ms", metrics.tti)]);
            table.add_row(vec!["TBT".to_string(), format!("{:.0} ms", metrics.tbt)]);
            table.add_row(vec!["CLS".to_string(), format!("{:.3}", metrics.cls)]);
            if let Some(path) = &metrics.full_report_path {
                table.add_row(vec!["Report".to_string(), path.display().to_string()]);
            }

            println!("{table}");
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(metrics).unwrap_or_default()
            );
        }
    }
}

/// Score colored by the Lighthouse bands: 90+ good, 50-89 needs
/// improvement, below 50 poor.
fn colored_score(score: f64) -> String {
    let text = format!("{:.1}", score);
    if score >= 90.0 {
        text.green().to_string()
    } else if score >= 50.0 {
        text.yellow().to_string()
    } else {
        text.red().to_string()
    }
}
