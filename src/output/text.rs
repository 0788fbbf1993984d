//! Human-readable text output formatter

use super::OutputFormatter;
use crate::engine::LintResult;
use crate::finding::{Finding, Severity};
use colored::*;
use std::path::Path;

/// Text formatter with optional color support
pub struct TextFormatter {
    /// Enable colored output
    pub colored: bool,

    /// Show the component snippet under each finding
    pub show_snippet: bool,

    /// Show the WCAG note under each finding
    pub show_wcag: bool,

    /// Show the learn-more link under each finding
    pub show_links: bool,

    /// Show statistics
    pub show_stats: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self {
            colored: true,
            show_snippet: true,
            show_wcag: true,
            show_links: false,
            show_stats: true,
        }
    }
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable colors
    pub fn without_color(mut self) -> Self {
        self.colored = false;
        self
    }

    /// Show learn-more links
    pub fn with_links(mut self) -> Self {
        self.show_links = true;
        self
    }

    fn severity_str(&self, severity: Severity) -> ColoredString {
        let s = format!("{}", severity);
        if !self.colored {
            return s.normal();
        }
        match severity {
            Severity::Error => s.red().bold(),
            Severity::Warning => s.yellow().bold(),
        }
    }

    fn pipe(&self) -> String {
        if self.colored {
            "|".blue().to_string()
        } else {
            "|".to_string()
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, result: &LintResult) -> String {
        let mut output = String::new();

        for report in &result.reports {
            let heading = report.file.display().to_string();
            if self.colored {
                output.push_str(&format!("{}\n", heading.underline()));
            } else {
                output.push_str(&format!("{}\n", heading));
            }

            if let Some(err) = &report.read_error {
                let line = format!("  could not read file: {}", err);
                if self.colored {
                    output.push_str(&format!("{}\n\n", line.red()));
                } else {
                    output.push_str(&format!("{}\n\n", line));
                }
                continue;
            }

            if report.used_fallback {
                let note = "  checked with built-in rules (no checklist available)";
                if self.colored {
                    output.push_str(&format!("{}\n", note.dimmed()));
                } else {
                    output.push_str(&format!("{}\n", note));
                }
            }

            for finding in &report.findings {
                output.push_str(&self.format_finding(&report.file, finding));
                output.push('\n');
            }
            output.push('\n');
        }

        if self.show_stats {
            output.push_str(&format!(
                "{} {} processed",
                result.files_processed,
                if result.files_processed == 1 {
                    "file"
                } else {
                    "files"
                }
            ));

            let mut counts = Vec::new();
            if result.error_count > 0 {
                let s = format!(
                    "{} {}",
                    result.error_count,
                    if result.error_count == 1 {
                        "error"
                    } else {
                        "errors"
                    }
                );
                counts.push(if self.colored {
                    s.red().to_string()
                } else {
                    s
                });
            }
            if result.warning_count > 0 {
                let s = format!(
                    "{} {}",
                    result.warning_count,
                    if result.warning_count == 1 {
                        "warning"
                    } else {
                        "warnings"
                    }
                );
                counts.push(if self.colored {
                    s.yellow().to_string()
                } else {
                    s
                });
            }

            if !counts.is_empty() {
                output.push_str(&format!(": {}", counts.join(", ")));
            }
            output.push('\n');

            if result.fallback_files > 0 {
                output.push_str(&format!(
                    "{} {} checked with built-in rules\n",
                    result.fallback_files,
                    if result.fallback_files == 1 {
                        "file"
                    } else {
                        "files"
                    }
                ));
            }

            output.push_str(&format!(
                "Finished in {:.2}s\n",
                result.duration.as_secs_f64()
            ));
        }

        output
    }

    fn format_finding(&self, file: &Path, finding: &Finding) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}:{}: {}[{}]: {}\n",
            file.display(),
            finding.line,
            self.severity_str(finding.severity),
            if self.colored {
                finding.rule.cyan().to_string()
            } else {
                finding.rule.clone()
            },
            finding.message
        ));

        if self.show_snippet && !finding.snippet.is_empty() {
            let snippet = finding.snippet.replace('\n', " ");
            output.push_str(&format!("   {} {}\n", self.pipe(), snippet.trim()));
        }

        if self.show_wcag {
            output.push_str(&format!(
                "   = WCAG Level {} ({})\n",
                finding.wcag_level, finding.wcag_criteria
            ));
        }

        if self.show_links {
            output.push_str(&format!("   = learn more: {}\n", finding.learn_more_url));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::engine::Engine;
    use crate::finding::{WcagLevel, CHECKLIST_URL};
    use std::path::PathBuf;

    fn finding() -> Finding {
        Finding {
            rule: "textField Missing Label".to_string(),
            message: "All inputs must have a label".to_string(),
            snippet: "a!textField(value: 1)".to_string(),
            line: 3,
            severity: Severity::Error,
            wcag_level: WcagLevel::A,
            wcag_criteria: "1.3.1, 4.1.2".to_string(),
            learn_more_url: CHECKLIST_URL.to_string(),
        }
    }

    #[test]
    fn test_format_finding() {
        let formatter = TextFormatter::new().without_color();
        let output = formatter.format_finding(&PathBuf::from("form.sail"), &finding());

        assert!(output.contains("form.sail:3"));
        assert!(output.contains("error"));
        assert!(output.contains("textField Missing Label"));
        assert!(output.contains("All inputs must have a label"));
        assert!(output.contains("a!textField(value: 1)"));
        assert!(output.contains("WCAG Level A"));
    }

    #[test]
    fn test_format_finding_with_links() {
        let formatter = TextFormatter::new().without_color().with_links();
        let output = formatter.format_finding(&PathBuf::from("form.sail"), &finding());
        assert!(output.contains(CHECKLIST_URL));
    }

    #[test]
    fn test_format_result() {
        let engine = Engine::new(Config::default());
        let result = engine.lint_source(&PathBuf::from("form.sail"), "a!textField(value: 1)");

        let formatter = TextFormatter::new().without_color();
        let output = formatter.format(&result);

        assert!(output.contains("form.sail"));
        assert!(output.contains("built-in rules"));
        assert!(output.contains("1 file processed"));
        assert!(output.contains("1 error"));
    }
}
