//! Compact single-line-per-finding output formatter

use super::OutputFormatter;
use crate::engine::LintResult;
use crate::finding::Finding;
use std::path::Path;

/// One finding per line, grep-friendly
#[derive(Default)]
pub struct CompactFormatter;

impl CompactFormatter {
    /// Create a new compact formatter
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for CompactFormatter {
    fn format(&self, result: &LintResult) -> String {
        let mut output = String::new();

        for report in &result.reports {
            if let Some(err) = &report.read_error {
                output.push_str(&format!(
                    "{}: error: could not read file: {}\n",
                    report.file.display(),
                    err
                ));
                continue;
            }
            for finding in &report.findings {
                output.push_str(&self.format_finding(&report.file, finding));
                output.push('\n');
            }
        }

        output
    }

    fn format_finding(&self, file: &Path, finding: &Finding) -> String {
        format!(
            "{}:{}: {}: {} [{}]",
            file.display(),
            finding.line,
            finding.severity,
            finding.message,
            finding.rule
        )
    }
}
