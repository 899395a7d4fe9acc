//! Chronological ordering of loaded metrics

use sitepulse_common::TimestampedMetrics;

/// Sort metrics ascending by date.
///
/// The sort is stable: entries sharing a timestamp keep their load order.
pub fn order_by_date(mut entries: Vec<TimestampedMetrics>) -> Vec<TimestampedMetrics> {
    entries.sort_by_key(|e| e.date);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use sitepulse_common::PerformanceMetrics;

    fn entry(ms: i64, url: &str) -> TimestampedMetrics {
        TimestampedMetrics {
            date: DateTime::<Utc>::from_timestamp_millis(ms).unwrap(),
            metrics: PerformanceMetrics {
                url: url.to_string(),
                score: 0.0,
                fcp: 0.0,
                lcp: 0.0,
                tti: 0.0,
                tbt: 0.0,
                cls: 0.0,
                full_report_path: None,
            },
        }
    }

    #[test]
    fn test_orders_ascending_regardless_of_input_order() {
        let ordered = order_by_date(vec![entry(3000, "c"), entry(1000, "a"), entry(2000, "b")]);

        let dates: Vec<i64> = ordered.iter().map(|e| e.date.timestamp_millis()).collect();
        assert_eq!(dates, vec![1000, 2000, 3000]);
    }

    #[test]
    fn test_tied_dates_keep_input_order() {
        let ordered = order_by_date(vec![
            entry(1000, "first"),
            entry(1000, "second"),
            entry(500, "zero"),
        ]);

        assert_eq!(ordered[0].metrics.url, "zero");
        assert_eq!(ordered[1].metrics.url, "first");
        assert_eq!(ordered[2].metrics.url, "second");
    }

    #[test]
    fn test_empty_input_stays_empty() {
        assert!(order_by_date(Vec::new()).is_empty());
    }
}
