//! JSON output formatter

use super::OutputFormatter;
use crate::engine::LintResult;
use crate::finding::Finding;
use serde::Serialize;
use std::path::Path;

/// JSON formatter for machine-readable output
#[derive(Default)]
pub struct JsonFormatter {
    /// Pretty print with indentation
    pub pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable pretty printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    files: Vec<JsonFile<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonFile<'a> {
    file: String,
    used_fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    read_error: Option<&'a str>,
    findings: &'a [Finding],
}

#[derive(Serialize)]
struct JsonSummary {
    files_processed: usize,
    errors: usize,
    warnings: usize,
    fallback_files: usize,
    duration_secs: f64,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, result: &LintResult) -> String {
        let output = JsonOutput {
            files: result
                .reports
                .iter()
                .map(|report| JsonFile {
                    file: report.file.display().to_string(),
                    used_fallback: report.used_fallback,
                    read_error: report.read_error.as_deref(),
                    findings: &report.findings,
                })
                .collect(),
            summary: JsonSummary {
                files_processed: result.files_processed,
                errors: result.error_count,
                warnings: result.warning_count,
                fallback_files: result.fallback_files,
                duration_secs: result.duration.as_secs_f64(),
            },
        };

        let serialized = if self.pretty {
            serde_json::to_string_pretty(&output)
        } else {
            serde_json::to_string(&output)
        };

        serialized.unwrap_or_else(|err| format!(r#"{{"error": "{}"}}"#, err))
    }

    fn format_finding(&self, _file: &Path, finding: &Finding) -> String {
        serde_json::to_string(finding).unwrap_or_else(|err| format!(r#"{{"error": "{}"}}"#, err))
    }
}
