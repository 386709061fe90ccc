//! Benchmark report: plain-text lines for humans, JSON for scripts

use std::io::{self, Write};

use serde::Serialize;

use crate::algorithm::Digest;
use crate::harness::{BenchConfig, Implementation, Timing};

/// One timed implementation
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub implementation: Implementation,
    pub threads: usize,
    pub total_secs: f64,
    pub avg_micros: f64,
    pub digest: String,
}

impl From<&Timing> for ReportRow {
    fn from(timing: &Timing) -> Self {
        Self {
            implementation: timing.implementation,
            threads: timing.threads,
            total_secs: timing.total_secs(),
            avg_micros: timing.average_micros(),
            digest: hex::encode(timing.last_digest),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub message: String,
    pub iterations: u32,
    /// Digest both implementations agreed on, when the cross-check ran
    pub cross_check_digest: Option<String>,
    pub rows: Vec<ReportRow>,
}

impl Report {
    pub fn new(config: &BenchConfig) -> Self {
        Self {
            message: hex::encode(config.message),
            iterations: config.iterations,
            cross_check_digest: None,
            rows: Vec::new(),
        }
    }

    pub fn set_cross_check(&mut self, digest: &Digest) {
        self.cross_check_digest = Some(hex::encode(digest));
    }

    pub fn push(&mut self, timing: &Timing) {
        self.rows.push(ReportRow::from(timing));
    }

    /// Totals for every row first, then per-call averages
    pub fn render_text(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() * 2 + 1);

        if let Some(digest) = &self.cross_check_digest {
            lines.push(format!(
                "Cross-check passed over {} iterations: {}",
                self.iterations, digest
            ));
        }

        for row in &self.rows {
            let threads = if row.threads > 1 {
                format!(" on {} threads", row.threads)
            } else {
                String::new()
            };
            lines.push(format!(
                "{} time over {} iterations{}: {:.6} seconds",
                row.implementation.label(),
                self.iterations,
                threads,
                row.total_secs
            ));
        }

        for row in &self.rows {
            lines.push(format!(
                "Average time per hash ({}): {:.2} microseconds",
                row.implementation.short_label(),
                row.avg_micros
            ));
        }

        lines.join("\n")
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the plain-text report followed by a newline
    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.render_text())
    }

    /// Write the JSON report followed by a newline
    pub fn write_json<W: Write>(&self, out: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sample_report() -> Report {
        let config = BenchConfig::default();
        let mut report = Report::new(&config);
        report.set_cross_check(&[0xAB; 32]);
        report.push(&Timing {
            implementation: Implementation::Custom,
            iterations: config.iterations,
            threads: 1,
            elapsed: Duration::from_millis(25),
            last_digest: [0x11; 32],
        });
        report.push(&Timing {
            implementation: Implementation::Reference,
            iterations: config.iterations,
            threads: 1,
            elapsed: Duration::from_millis(12),
            last_digest: [0x11; 32],
        });
        report
    }

    #[test]
    fn test_render_text_lines() {
        let text = sample_report().render_text();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        let cross_check = "Cross-check passed over 100000 iterations: abab";
        assert!(lines[0].starts_with(cross_check));
        assert_eq!(
            lines[1],
            "Custom optimized SHA-256 time over 100000 iterations: 0.025000 seconds"
        );
        assert_eq!(
            lines[2],
            "Reference sha2 SHA-256 compression time over 100000 iterations: 0.012000 seconds"
        );
        assert_eq!(lines[3], "Average time per hash (custom): 0.25 microseconds");
        assert_eq!(lines[4], "Average time per hash (sha2): 0.12 microseconds");
    }

    #[test]
    fn test_render_text_mentions_threads() {
        let mut report = Report::new(&BenchConfig::filled(b'a', 10));
        report.push(&Timing {
            implementation: Implementation::Custom,
            iterations: 10,
            threads: 4,
            elapsed: Duration::from_micros(10),
            last_digest: [0; 32],
        });

        let text = report.render_text();
        assert!(text.contains("over 10 iterations on 4 threads"));
    }

    #[test]
    fn test_json_shape() {
        let json = sample_report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["iterations"], 100_000);
        assert_eq!(value["message"], "61".repeat(64));
        assert_eq!(value["rows"][0]["implementation"], "custom");
        assert_eq!(value["rows"][1]["implementation"], "reference");
        assert_eq!(value["rows"][0]["digest"], "11".repeat(32));
        assert!(value["rows"][0]["avg_micros"].as_f64().unwrap() > 0.0);
    }

    /// Writer whose every write fails, like stdout redirected to a full device
    struct FullDevice;

    impl Write for FullDevice {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("no space left on device"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_text_matches_render() {
        let report = sample_report();
        let mut out = Vec::new();
        report.write_text(&mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), report.render_text() + "\n");
    }

    #[test]
    fn test_write_json_round_trips() {
        let mut out = Vec::new();
        sample_report().write_json(&mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["rows"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_write_errors_are_returned() {
        let report = sample_report();

        let err = report.write_text(&mut FullDevice).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert!(report.write_json(&mut FullDevice).is_err());
    }
}
