//! Built-in checks used when no checklist rules are available
//!
//! These run straight through the check executor with no rule
//! interpretation and no deduplication pass. At most one entry can fire
//! per component instance: entries either target disjoint component names
//! or carry mutually exclusive conditions (a label cannot be both missing
//! and present-but-empty).

use crate::check::{Check, Condition, FindingTemplate};
use crate::finding::{Severity, WcagLevel};

fn template(
    rule: &str,
    message: &str,
    severity: Severity,
    wcag_level: WcagLevel,
    wcag_criteria: &'static str,
) -> FindingTemplate {
    FindingTemplate {
        rule: rule.to_string(),
        message: message.to_string(),
        severity,
        wcag_level,
        wcag_criteria,
    }
}

/// The static fallback check table
pub fn fallback_checks() -> Vec<Check> {
    vec![
        Check {
            components: &["imageField"],
            condition: Condition::MissingEveryParameter {
                names: &["altText", "accessibilityText"],
            },
            template: template(
                "Image Missing Alt Text",
                "Images must provide alternative text for screen readers.",
                Severity::Error,
                WcagLevel::A,
                "1.1.1",
            ),
        },
        Check {
            components: &["linkField"],
            condition: Condition::MissingEveryParameter {
                names: &["label", "accessibilityText"],
            },
            template: template(
                "Link Missing Label",
                "Links must describe their destination.",
                Severity::Error,
                WcagLevel::A,
                "2.4.4, 4.1.2",
            ),
        },
        Check {
            components: &["buttonWidget"],
            condition: Condition::MissingEveryParameter {
                names: &["label", "accessibilityText"],
            },
            template: template(
                "Button Missing Label",
                "Buttons must have an accessible name.",
                Severity::Error,
                WcagLevel::A,
                "4.1.2",
            ),
        },
        Check {
            components: &[
                "textField",
                "dropdownField",
                "checkboxField",
                "radioButtonField",
            ],
            condition: Condition::MissingParameter { name: "label" },
            template: template(
                "Input Missing Label",
                "Form inputs must have a label.",
                Severity::Error,
                WcagLevel::A,
                "1.3.1, 4.1.2",
            ),
        },
        Check {
            components: &[
                "textField",
                "paragraphField",
                "dropdownField",
                "checkboxField",
                "radioButtonField",
                "fileUploadField",
                "pickerField",
            ],
            condition: Condition::EmptyParameter { name: "label" },
            template: template(
                "Empty Label",
                "Labels must not be empty strings.",
                Severity::Error,
                WcagLevel::A,
                "2.4.6",
            ),
        },
        Check {
            components: &["iconIndicator"],
            condition: Condition::MissingEveryParameter {
                names: &["accessibilityText", "caption"],
            },
            template: template(
                "Icon Missing Accessibility Text",
                "Standalone icons must describe their meaning.",
                Severity::Warning,
                WcagLevel::AA,
                "1.1.1",
            ),
        },
        Check {
            components: &[
                "columnChartField",
                "barChartField",
                "lineChartField",
                "pieChartField",
                "areaChartField",
            ],
            condition: Condition::MissingParameter {
                name: "accessibilityText",
            },
            template: template(
                "Chart Missing Accessibility Text",
                "Charts must summarize their content for screen readers.",
                Severity::Warning,
                WcagLevel::AA,
                "1.1.1",
            ),
        },
        Check {
            components: &["cardLayout", "cardChoiceField"],
            condition: Condition::StyledConditionallyWithoutNarration,
            template: template(
                "Selected Card Missing Accessibility Text",
                "Cards that indicate selection visually must narrate that state.",
                Severity::Error,
                WcagLevel::A,
                "4.1.2",
            ),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_flags_unlabelled_input() {
        let findings: Vec<_> = fallback_checks()
            .iter()
            .flat_map(|check| check.execute("a!textField(value: 1)"))
            .collect();

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, "Input Missing Label");
    }

    #[test]
    fn test_fallback_passes_labelled_image() {
        let findings: Vec<_> = fallback_checks()
            .iter()
            .flat_map(|check| check.execute(r#"a!imageField(altText: "Logo", source: doc)"#))
            .collect();

        assert!(findings.is_empty());
    }

    #[test]
    fn test_fallback_flags_empty_label_once() {
        // Present-but-empty and missing are mutually exclusive conditions.
        let findings: Vec<_> = fallback_checks()
            .iter()
            .flat_map(|check| check.execute(r#"a!textField(label: "", value: 1)"#))
            .collect();

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, "Empty Label");
    }

    #[test]
    fn test_fallback_flags_conditionally_styled_card() {
        let source = r#"a!cardLayout(style: if(local!picked, "ACCENT", "NONE"))"#;
        let findings: Vec<_> = fallback_checks()
            .iter()
            .flat_map(|check| check.execute(source))
            .collect();

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, "Selected Card Missing Accessibility Text");
    }

    #[test]
    fn test_fallback_chart_check_is_warning() {
        let findings: Vec<_> = fallback_checks()
            .iter()
            .flat_map(|check| check.execute("a!pieChartField(series: local!data)"))
            .collect();

        assert_eq!(findings.len(), 1);
        assert!(findings[0].is_warning());
        assert_eq!(findings[0].wcag_level, WcagLevel::AA);
    }
}
