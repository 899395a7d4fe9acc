//! Trend document rendering
//!
//! Produces one standalone HTML page: a line chart of the performance
//! score over time and a grouped bar chart of the timing metrics, both
//! drawn by Chart.js pulled from its CDN when the page is opened. No
//! network I/O happens at render time.

use chrono::Local;
use serde::Serialize;
use sitepulse_common::TimestampedMetrics;

const HEADER: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Performance Trend Report</title>
  <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
  <style>
    body { font-family: system-ui, -apple-system, 'Segoe UI', sans-serif; margin: 20px; }
    h1 { color: #333; }
    canvas { max-width: 900px; margin: 20px auto; display: block; }
  </style>
</head>
<body>
  <h1>Lighthouse Performance Trend</h1>
"#;

const CANVASES: &str = r#"  <canvas id="scoreChart"></canvas>
  <canvas id="perfMetrics"></canvas>

"#;

const CHART_SCRIPT: &str = r#"
    new Chart(document.getElementById('scoreChart'), {
      type: 'line',
      data: {
        labels,
        datasets: [{
          label: 'Performance Score',
          data: scoreData,
          borderColor: 'green',
          backgroundColor: 'rgba(0,128,0,0.2)',
          fill: true
        }]
      },
      options: {
        scales: { y: { beginAtZero: true, max: 100 } }
      }
    });

    new Chart(document.getElementById('perfMetrics'), {
      type: 'bar',
      data: {
        labels,
        datasets: [
          { label: 'FCP (ms)', data: fcp, backgroundColor: 'blue' },
          { label: 'LCP (ms)', data: lcp, backgroundColor: 'orange' },
          { label: 'TTI (ms)', data: tti, backgroundColor: 'purple' },
          { label: 'TBT (ms)', data: tbt, backgroundColor: 'red' },
          { label: 'CLS', data: cls, backgroundColor: 'gray' }
        ]
      },
      options: {
        responsive: true,
        plugins: {
          legend: { position: 'top' }
        },
        scales: {
          y: { beginAtZero: true }
        }
      }
    });
  </script>
</body>
</html>
"#;

/// Render an ordered metrics sequence as a trend document.
///
/// Byte-identical for identical input, except that date labels are
/// formatted as local date-time strings and therefore depend on the
/// host timezone. An empty sequence renders with an "N/A" URL.
pub fn render_trend(entries: &[TimestampedMetrics]) -> String {
    let labels: Vec<String> = entries
        .iter()
        .map(|e| {
            e.date
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .collect();

    let score: Vec<f64> = entries.iter().map(|e| e.metrics.score).collect();
    let fcp: Vec<f64> = entries.iter().map(|e| e.metrics.fcp).collect();
    let lcp: Vec<f64> = entries.iter().map(|e| e.metrics.lcp).collect();
    let tti: Vec<f64> = entries.iter().map(|e| e.metrics.tti).collect();
    let tbt: Vec<f64> = entries.iter().map(|e| e.metrics.tbt).collect();
    let cls: Vec<f64> = entries.iter().map(|e| e.metrics.cls).collect();

    let current_url = entries
        .last()
        .map(|e| e.metrics.url.as_str())
        .unwrap_or("N/A");

    let mut doc = String::new();
    doc.push_str(HEADER);
    doc.push_str(&format!(
        "  <p>Audited URL: <b>{}</b></p>\n",
        html_escape(current_url)
    ));
    doc.push_str(CANVASES);
    doc.push_str("  <script>\n");
    doc.push_str(&format!("    const labels = {};\n", json(&labels)));
    doc.push_str(&format!("    const scoreData = {};\n", json(&score)));
    doc.push_str(&format!("    const fcp = {};\n", json(&fcp)));
    doc.push_str(&format!("    const lcp = {};\n", json(&lcp)));
    doc.push_str(&format!("    const tti = {};\n", json(&tti)));
    doc.push_str(&format!("    const tbt = {};\n", json(&tbt)));
    doc.push_str(&format!("    const cls = {};\n", json(&cls)));
    doc.push_str(CHART_SCRIPT);

    doc
}

fn json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "[]".to_string())
}

/// Escape HTML special characters
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use sitepulse_common::PerformanceMetrics;

    fn entry(ms: i64, url: &str, score: f64, fcp: f64) -> TimestampedMetrics {
        TimestampedMetrics {
            date: DateTime::<Utc>::from_timestamp_millis(ms).unwrap(),
            metrics: PerformanceMetrics {
                url: url.to_string(),
                score,
                fcp,
                lcp: 0.0,
                tti: 0.0,
                tbt: 0.0,
                cls: 0.0,
                full_report_path: None,
            },
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let entries = vec![
            entry(1000, "https://example.com/", 95.0, 1200.0),
            entry(2000, "https://example.com/", 80.0, 0.0),
        ];

        assert_eq!(render_trend(&entries), render_trend(&entries));
    }

    #[test]
    fn test_series_follow_input_order() {
        let entries = vec![
            entry(1000, "https://example.com/", 95.0, 1200.0),
            entry(2000, "https://example.com/", 80.0, 0.0),
        ];

        let doc = render_trend(&entries);
        assert!(doc.contains("const scoreData = [95.0,80.0];"));
        assert!(doc.contains("const fcp = [1200.0,0.0];"));
    }

    #[test]
    fn test_most_recent_url_is_shown() {
        let entries = vec![
            entry(1000, "https://old.example.com/", 50.0, 0.0),
            entry(2000, "https://new.example.com/", 60.0, 0.0),
        ];

        let doc = render_trend(&entries);
        assert!(doc.contains("https://new.example.com/"));
    }

    #[test]
    fn test_empty_sequence_renders_placeholder() {
        let doc = render_trend(&[]);
        assert!(doc.contains("<b>N/A</b>"));
        assert!(doc.contains("const labels = [];"));
    }

    #[test]
    fn test_score_axis_is_fixed() {
        let doc = render_trend(&[]);
        assert!(doc.contains("max: 100"));
    }

    #[test]
    fn test_url_is_escaped() {
        let entries = vec![entry(1000, "https://example.com/?a=<b>&c=\"d\"", 50.0, 0.0)];

        let doc = render_trend(&entries);
        assert!(doc.contains("&lt;b&gt;"));
        assert!(!doc.contains("<b>&c"));
    }
}
