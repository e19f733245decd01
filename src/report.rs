//! Lag result rendering
//!
//! Formats the computed lag vector for human reading or downstream
//! tooling.

use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;

/// A rendered measurement report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LagReport {
    /// Key symbol the run typed
    pub key_symbol: String,
    /// Camera startup delay compensation applied, milliseconds
    pub camera_startup_delay_ms: i64,
    /// Per-press lag in milliseconds; `null` marks unresolved presses
    pub lag_ms: Vec<Option<i64>>,
    /// How many presses resolved to a visible effect
    pub resolved: usize,
}

impl LagReport {
    /// Build a report from a computed lag vector
    pub fn new(key_symbol: impl Into<String>, camera_startup_delay_ms: i64, lag_ms: Vec<Option<i64>>) -> Self {
        let resolved = lag_ms.iter().filter(|l| l.is_some()).count();
        Self {
            key_symbol: key_symbol.into(),
            camera_startup_delay_ms,
            lag_ms,
            resolved,
        }
    }

    /// Render in the requested format
    pub fn render(&self, format: OutputFormat) -> anyhow::Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    fn render_text(&self) -> String {
        let mut out = String::new();
        for (i, lag) in self.lag_ms.iter().enumerate() {
            match lag {
                Some(ms) => out.push_str(&format!("char = {}\tlag = {}ms\n", i + 1, ms)),
                None => out.push_str(&format!("char = {}\tlag = unresolved\n", i + 1)),
            }
        }
        out.push_str(&format!(
            "{}/{} presses resolved\n",
            self.resolved,
            self.lag_ms.len()
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_report_lists_each_press() {
        let report = LagReport::new("m", 50, vec![Some(70), None, Some(72)]);
        let text = report.render(OutputFormat::Text).unwrap();
        assert!(text.contains("char = 1\tlag = 70ms"));
        assert!(text.contains("char = 2\tlag = unresolved"));
        assert!(text.contains("char = 3\tlag = 72ms"));
        assert!(text.contains("2/3 presses resolved"));
    }

    #[test]
    fn test_json_report_round_trips() {
        let report = LagReport::new("m", 50, vec![Some(70), None]);
        let json = report.render(OutputFormat::Json).unwrap();
        let back: LagReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.lag_ms, vec![Some(70), None]);
        assert_eq!(back.resolved, 1);
    }

    #[test]
    fn test_unresolved_serializes_as_null() {
        let report = LagReport::new("m", 0, vec![None]);
        let json = report.render(OutputFormat::Json).unwrap();
        assert!(json.contains("null"));
    }

    #[test]
    fn test_resolved_count() {
        let report = LagReport::new("m", 0, vec![Some(1), Some(2), None, Some(3)]);
        assert_eq!(report.resolved, 3);
    }
}
