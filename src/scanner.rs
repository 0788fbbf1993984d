//! Scan orchestration: mode selection, deduplication, ordering
//!
//! One scan is a pure function of its inputs. Mode selection is encoded in
//! the returned [`ScanMode`], never in shared state: either the supplied
//! checklist rules drive the scan (`Dynamic`) or the built-in table does
//! (`Fallback`), and findings from the two paths never mix in one result.

use crate::check::Check;
use crate::fallback;
use crate::finding::Finding;
use crate::interpreter;
use crate::rule::Rule;
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

/// Which check table produced a scan's findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Checks compiled from the supplied checklist rules
    Dynamic,
    /// The built-in check table
    Fallback,
}

/// The outcome of one scan
#[derive(Debug)]
pub struct ScanResult {
    /// Findings, line-ascending
    pub findings: Vec<Finding>,

    /// Which path produced them
    pub mode: ScanMode,
}

impl ScanResult {
    /// True when the built-in table governed the scan
    pub fn used_fallback(&self) -> bool {
        self.mode == ScanMode::Fallback
    }

    /// Count of error-severity findings
    pub fn error_count(&self) -> usize {
        self.findings.iter().filter(|f| f.is_error()).count()
    }

    /// Count of warning-severity findings
    pub fn warning_count(&self) -> usize {
        self.findings.iter().filter(|f| f.is_warning()).count()
    }
}

/// Failure of the dynamic scan path as a whole
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("no checklist rules supplied")]
    EmptyRuleSet,
}

/// Scan SAIL source for accessibility findings.
///
/// Always returns a result: when no usable rules are supplied, or the
/// dynamic path fails as a whole, the scan switches to the built-in check
/// table for the entire invocation.
pub fn scan(source: &str, rules: &[Rule]) -> ScanResult {
    match scan_dynamic(source, rules) {
        Ok(findings) => ScanResult {
            findings,
            mode: ScanMode::Dynamic,
        },
        Err(err) => {
            log::info!("{}; using built-in checks", err);
            ScanResult {
                findings: scan_fallback(source),
                mode: ScanMode::Fallback,
            }
        }
    }
}

fn scan_dynamic(source: &str, rules: &[Rule]) -> Result<Vec<Finding>, ScanError> {
    if rules.is_empty() {
        return Err(ScanError::EmptyRuleSet);
    }

    let checks: Vec<Check> = rules.iter().flat_map(interpreter::compile).collect();

    let mut findings = Vec::new();
    for check in &checks {
        findings.extend(check.execute(source));
    }

    Ok(sort_by_line(dedup(findings)))
}

fn scan_fallback(source: &str) -> Vec<Finding> {
    let mut findings = Vec::new();
    for check in fallback::fallback_checks() {
        findings.extend(check.execute(source));
    }
    sort_by_line(findings)
}

/// Keep one finding per `(line, first word of rule label)` key,
/// first-seen-wins. Check compilation order is therefore the tie-breaker
/// when two checks flag the same component on the same line.
fn dedup(findings: Vec<Finding>) -> Vec<Finding> {
    let mut seen = HashSet::new();
    findings
        .into_iter()
        .filter(|finding| seen.insert((finding.line, finding.label_prefix().to_string())))
        .collect()
}

fn sort_by_line(mut findings: Vec<Finding>) -> Vec<Finding> {
    findings.sort_by_key(|finding| finding.line);
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::{Severity, WcagLevel};

    fn label_rule() -> Rule {
        Rule::new(
            "Form Inputs",
            "All inputs must have a label",
            "Inspect the label parameter for a value",
        )
    }

    #[test]
    fn test_empty_rules_use_fallback() {
        let result = scan("a!textField(value: 1)", &[]);

        assert!(result.used_fallback());
        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.findings[0].rule, "Input Missing Label");
    }

    #[test]
    fn test_unlabelled_text_field_yields_one_error() {
        let result = scan("a!textField(value: 1)", &[label_rule()]);

        assert_eq!(result.mode, ScanMode::Dynamic);
        assert_eq!(result.findings.len(), 1);

        let finding = &result.findings[0];
        assert_eq!(finding.severity, Severity::Error);
        assert_eq!(finding.wcag_level, WcagLevel::A);
        assert_eq!(finding.line, 1);
        assert_eq!(finding.message, "All inputs must have a label");
    }

    #[test]
    fn test_labelled_image_yields_nothing() {
        let rule = Rule::new(
            "Icon",
            "Images must have alt text",
            "Inspect the altText parameter for a value",
        );
        let result = scan(r#"a!image(altText: "x")"#, &[rule]);

        assert_eq!(result.mode, ScanMode::Dynamic);
        assert!(result.findings.is_empty());
    }

    #[test]
    fn test_group_label_missing() {
        let rule = Rule::new(
            "Form Inputs",
            "Groups of choices must have a label",
            "If more than one checkbox is present the group must have a label",
        );
        let source = r#"a!checkboxField(choiceLabels: {"A","B"}, choiceValues: {1,2})"#;
        let result = scan(source, &[rule]);

        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.findings[0].rule, "checkboxField Group Missing Label");
    }

    #[test]
    fn test_duplicate_labels_flag_each_component() {
        let rule = Rule::new(
            "Form Inputs",
            "Duplicate labels need supplementary accessibility text",
            "Duplicate controls need accessibilityText for context",
        );
        let source = concat!(
            "a!textField(label: \"Name\", value: 1),\n",
            "a!textField(label: \"Name\", value: 2)"
        );
        let result = scan(source, &[rule]);

        assert_eq!(result.findings.len(), 2);
        assert_eq!(result.findings[0].line, 1);
        assert_eq!(result.findings[1].line, 2);
        for finding in &result.findings {
            assert_eq!(finding.rule, "textField Missing Accessibility Text");
        }
    }

    #[test]
    fn test_dedup_keeps_first_match_per_line_and_component() {
        // Both rules flag the same unlabelled checkboxField; the dedup key
        // (line, first label word) collapses them to the earlier check.
        let rules = [
            label_rule(),
            Rule::new(
                "Form Inputs",
                "Choice fields must have choiceLabels",
                "Inspect the choiceLabels parameter",
            ),
        ];
        let result = scan("a!checkboxField(value: 1)", &rules);

        assert_eq!(result.findings.len(), 1);
        assert_eq!(result.findings[0].rule, "checkboxField Missing Label");
    }

    #[test]
    fn test_dedup_invariant() {
        let rules = [
            label_rule(),
            Rule::new(
                "Form Inputs",
                "Choice fields must have choiceLabels",
                "Inspect the choiceLabels parameter",
            ),
            Rule::new(
                "Grids",
                "Grids must have a label",
                "The grid must have a label",
            ),
        ];
        let source = concat!(
            "a!textField(value: 1),\n",
            "a!checkboxField(value: 2),\n",
            "a!gridField(columns: {}),\n",
            "a!textField(value: 3)"
        );
        let result = scan(source, &rules);

        let mut keys = HashSet::new();
        for finding in &result.findings {
            assert!(
                keys.insert((finding.line, finding.label_prefix().to_string())),
                "duplicate key for {}",
                finding.rule
            );
        }
    }

    #[test]
    fn test_findings_are_line_ascending() {
        let source = concat!(
            "a!gridField(columns: {}),\n",
            "a!textField(value: 1),\n",
            "a!checkboxField(value: 2)"
        );
        let rules = [
            label_rule(),
            Rule::new(
                "Grids",
                "Grids must have a label",
                "The grid must have a label",
            ),
        ];
        let result = scan(source, &rules);

        let lines: Vec<usize> = result.findings.iter().map(|f| f.line).collect();
        let mut sorted = lines.clone();
        sorted.sort_unstable();
        assert_eq!(lines, sorted);
    }

    #[test]
    fn test_scan_is_idempotent() {
        let source = concat!(
            "a!textField(value: 1),\n",
            "a!checkboxField(choiceLabels: {\"A\",\"B\"}, choiceValues: {1,2})"
        );
        let rules = [
            label_rule(),
            Rule::new(
                "Form Inputs",
                "Groups of choices must have a label",
                "If more than one checkbox is present the group must have a label",
            ),
        ];

        let first = scan(source, &rules);
        let second = scan(source, &rules);

        assert_eq!(first.mode, second.mode);
        assert_eq!(first.findings.len(), second.findings.len());
        for (a, b) in first.findings.iter().zip(second.findings.iter()) {
            assert_eq!(a.rule, b.rule);
            assert_eq!(a.line, b.line);
            assert_eq!(a.severity, b.severity);
        }
    }

    #[test]
    fn test_unmatched_rules_scan_clean() {
        let rule = Rule::new("General", "Be accessible", "Review manually");
        let result = scan("a!textField(value: 1)", &[rule]);

        // The rule compiled to nothing, so the dynamic path ran and found
        // nothing; it did not fall back.
        assert_eq!(result.mode, ScanMode::Dynamic);
        assert!(result.findings.is_empty());
    }

    #[test]
    fn test_fallback_counts() {
        let source = concat!(
            "a!textField(value: 1),\n",
            "a!pieChartField(series: local!data)"
        );
        let result = scan(source, &[]);

        assert!(result.used_fallback());
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.warning_count(), 1);
    }
}
