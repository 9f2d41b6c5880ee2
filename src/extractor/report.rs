use crate::config::ValueOrder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Summary of one extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub source: String,
    pub column: String,
    pub order: ValueOrder,
    pub rows_scanned: usize,
    pub empty_skipped: usize,
    pub bytes_read: u64,
    pub values: Vec<String>,
    pub duration: Duration,
    pub extracted_at: DateTime<Utc>,
}

impl ExtractionReport {
    pub fn unique_count(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn display_summary(&self) -> String {
        format!(
            "{} distinct value(s) in column '{}' across {} row(s) of {}",
            self.unique_count(),
            self.column,
            self.rows_scanned,
            self.source
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> ExtractionReport {
        ExtractionReport {
            source: "people.csv".to_string(),
            column: "country".to_string(),
            order: ValueOrder::FirstSeen,
            rows_scanned: 5,
            empty_skipped: 0,
            bytes_read: 64,
            values: vec!["US".to_string(), "FR".to_string(), "DE".to_string()],
            duration: Duration::from_millis(3),
            extracted_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_summary() {
        let report = sample_report();
        assert_eq!(report.unique_count(), 3);
        assert!(!report.is_empty());
        assert_eq!(
            report.display_summary(),
            "3 distinct value(s) in column 'country' across 5 row(s) of people.csv"
        );
    }

    #[test]
    fn test_report_serializes_order_in_kebab_case() {
        let json = serde_json::to_value(sample_report()).unwrap();
        assert_eq!(json["order"], "first-seen");
        assert_eq!(json["values"][1], "FR");
        assert_eq!(json["rows_scanned"], 5);
    }
}
