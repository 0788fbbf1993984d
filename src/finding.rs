//! Finding types for scan results

use serde::{Deserialize, Serialize};

/// Reference page for every finding's "learn more" link
pub const CHECKLIST_URL: &str =
    "https://appian-design.github.io/aurora/accessibility/checklist/";

/// Severity level for findings
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Warning - degraded experience for assistive technology
    #[default]
    Warning,
    /// Error - content is inaccessible
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "warning" | "warn" => Ok(Severity::Warning),
            "error" | "err" => Ok(Severity::Error),
            _ => Err(()),
        }
    }
}

/// WCAG conformance level a finding maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    A,
    AA,
}

impl std::fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WcagLevel::A => write!(f, "A"),
            WcagLevel::AA => write!(f, "AA"),
        }
    }
}

/// One reported accessibility violation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Short rule label, starting with the component it concerns
    pub rule: String,
    /// Human-readable requirement text
    pub message: String,
    /// Truncated component span for display
    pub snippet: String,
    /// Line number (1-based)
    pub line: usize,
    /// Severity level
    pub severity: Severity,
    /// WCAG conformance level
    pub wcag_level: WcagLevel,
    /// WCAG success criteria (e.g. "1.3.1, 4.1.2")
    pub wcag_criteria: String,
    /// Documentation URL
    pub learn_more_url: String,
}

impl Finding {
    /// First word of the rule label; the component-category half of the
    /// deduplication key
    pub fn label_prefix(&self) -> &str {
        self.rule.split_whitespace().next().unwrap_or("")
    }

    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Check if this is a warning
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}
