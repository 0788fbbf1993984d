//! Multi-file lint engine
//!
//! The engine wraps the single-scan core for CLI use: it reads files,
//! runs one scan per file, counts severities, and merges per-file results
//! in input order so parallel runs stay deterministic.

use crate::config::Config;
use crate::finding::{Finding, Severity};
use crate::rule::Rule;
use crate::scanner::{self, ScanResult};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Findings for one scanned file
#[derive(Debug)]
pub struct FileReport {
    /// Scanned file
    pub file: PathBuf,

    /// Findings, line-ascending
    pub findings: Vec<Finding>,

    /// True when the built-in check table governed this file's scan
    pub used_fallback: bool,

    /// Set when the file could not be read; no findings in that case
    pub read_error: Option<String>,
}

/// Result of a lint run
#[derive(Debug, Default)]
pub struct LintResult {
    /// Per-file reports, in input order
    pub reports: Vec<FileReport>,

    /// Files processed
    pub files_processed: usize,

    /// Files with at least one error
    pub files_with_errors: usize,

    /// Files with at least one warning
    pub files_with_warnings: usize,

    /// Files scanned with the built-in check table
    pub fallback_files: usize,

    /// Total errors
    pub error_count: usize,

    /// Total warnings
    pub warning_count: usize,

    /// Processing duration
    pub duration: Duration,
}

impl LintResult {
    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Check if result is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        self.error_count == 0 && self.warning_count == 0
    }

    /// Get exit code (0 = success, 1 = warnings, 2 = errors)
    pub fn exit_code(&self) -> i32 {
        if self.error_count > 0 {
            2
        } else if self.warning_count > 0 {
            1
        } else {
            0
        }
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: LintResult) {
        self.reports.extend(other.reports);
        self.files_processed += other.files_processed;
        self.files_with_errors += other.files_with_errors;
        self.files_with_warnings += other.files_with_warnings;
        self.fallback_files += other.fallback_files;
        self.error_count += other.error_count;
        self.warning_count += other.warning_count;
    }

    /// Iterate over every finding across all reports
    pub fn findings(&self) -> impl Iterator<Item = (&Path, &Finding)> {
        self.reports
            .iter()
            .flat_map(|report| report.findings.iter().map(move |f| (report.file.as_path(), f)))
    }
}

/// The lint engine
pub struct Engine {
    config: Config,
    rules: Vec<Rule>,
}

impl Engine {
    /// Create a new engine with configuration; no checklist rules means
    /// every scan uses the built-in check table
    pub fn new(config: Config) -> Self {
        Self {
            config,
            rules: Vec::new(),
        }
    }

    /// Set the checklist rules driving dynamic scans
    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    /// Lint multiple files
    pub fn lint(&self, files: &[PathBuf]) -> LintResult {
        let start = Instant::now();

        let results: Vec<LintResult> = if self.config.engine.parallel {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(if self.config.engine.jobs > 0 {
                    self.config.engine.jobs
                } else {
                    num_cpus::get()
                })
                .build()
                .unwrap_or_else(|_| rayon::ThreadPoolBuilder::new().build().unwrap());

            pool.install(|| files.par_iter().map(|f| self.lint_file(f)).collect())
        } else {
            files.iter().map(|f| self.lint_file(f)).collect()
        };

        let mut combined = LintResult::default();
        for result in results {
            combined.merge(result);
        }

        combined.duration = start.elapsed();
        combined
    }

    /// Lint a single file
    pub fn lint_file(&self, path: &Path) -> LintResult {
        let mut result = LintResult {
            files_processed: 1,
            ..LintResult::default()
        };

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(err) => {
                log::error!("failed to read {}: {}", path.display(), err);
                result.error_count = 1;
                result.files_with_errors = 1;
                result.reports.push(FileReport {
                    file: path.to_path_buf(),
                    findings: Vec::new(),
                    used_fallback: false,
                    read_error: Some(err.to_string()),
                });
                return result;
            }
        };

        result.merge_scan(path, scanner::scan(&content, &self.rules), &self.config);
        result
    }

    /// Lint already-loaded source text under the engine's rules
    pub fn lint_source(&self, name: &Path, source: &str) -> LintResult {
        let mut result = LintResult {
            files_processed: 1,
            ..LintResult::default()
        };
        result.merge_scan(name, scanner::scan(source, &self.rules), &self.config);
        result
    }
}

impl LintResult {
    fn merge_scan(&mut self, path: &Path, scan: ScanResult, config: &Config) {
        let used_fallback = scan.used_fallback();
        let findings: Vec<Finding> = match config.checklist.min_severity {
            Some(min) => scan
                .findings
                .into_iter()
                .filter(|f| f.severity >= min)
                .collect(),
            None => scan.findings,
        };

        for finding in &findings {
            match finding.severity {
                Severity::Error => self.error_count += 1,
                Severity::Warning => self.warning_count += 1,
            }
        }

        if findings.iter().any(|f| f.is_error()) {
            self.files_with_errors = 1;
        }
        if findings.iter().any(|f| f.is_warning()) {
            self.files_with_warnings = 1;
        }
        if used_fallback {
            self.fallback_files = 1;
        }

        self.reports.push(FileReport {
            file: path.to_path_buf(),
            findings,
            used_fallback,
            read_error: None,
        });
    }
}
