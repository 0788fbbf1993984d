//! Saillint - SAIL Accessibility Linter
//!
//! Scans SAIL interface definitions for accessibility problems against the
//! design-system checklist, with a built-in rule set as a fallback when no
//! checklist is available.
//!
//! # Architecture
//!
//! ```text
//! CLI/API -> Engine -> scan -> interpreter -> checks -> locator/predicates
//! ```
//!
//! Checklist rules carry free-text testing guidance; the interpreter
//! classifies that text into deterministic checks over component spans
//! located in the raw source. No SAIL grammar is involved: the locator
//! only balances parentheses, and predicates are plain text matching.
//!
//! # Example
//!
//! ```
//! use saillint::rule::Rule;
//! use saillint::scanner::scan;
//!
//! let rule = Rule::new(
//!     "Form Inputs",
//!     "All inputs must have a label",
//!     "Inspect the label parameter for a value",
//! );
//! let result = scan("a!textField(value: 1)", &[rule]);
//!
//! assert!(!result.used_fallback());
//! assert_eq!(result.findings.len(), 1);
//! ```

pub mod check;
pub mod config;
pub mod engine;
pub mod fallback;
pub mod finding;
pub mod interpreter;
pub mod locator;
pub mod output;
pub mod predicate;
pub mod rule;
pub mod scanner;

// Re-export main types
pub use check::{Check, Condition, FindingTemplate};
pub use config::{ColorMode, Config, ConfigError, OutputFormat};
pub use engine::{Engine, FileReport, LintResult};
pub use finding::{Finding, Severity, WcagLevel, CHECKLIST_URL};
pub use interpreter::{compile, classifications, Classification};
pub use locator::{find_components, Component};
pub use output::{CompactFormatter, JsonFormatter, OutputFormatter, TextFormatter};
pub use rule::{load_rules, Rule, RuleFile, RuleLoadError};
pub use scanner::{scan, ScanMode, ScanResult};
