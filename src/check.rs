//! Compiled checks and their execution
//!
//! A check is one unit of scan work: the component names to locate, a
//! violation condition, and the finding metadata to stamp on every hit.
//! Checks come from the rule interpreter or from the built-in fallback
//! table; both run through the same executor.

use crate::finding::{Finding, Severity, WcagLevel, CHECKLIST_URL};
use crate::locator::{self, Component};
use crate::predicate::{self, PredicateError};
use std::collections::HashSet;

/// Maximum characters of a component span carried into a finding
const SNIPPET_LIMIT: usize = 80;

/// Violation condition evaluated against each located component span
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Parameter absent from the span
    MissingParameter { name: &'static str },

    /// Every one of the listed parameters absent
    MissingEveryParameter { names: &'static [&'static str] },

    /// Parameter present with an empty quoted value
    EmptyParameter { name: &'static str },

    /// Multi-valued list parameter without a group label
    GroupWithoutLabel { list: &'static str },

    /// Conditional styling with no accessibility narration
    StyledConditionallyWithoutNarration,

    /// `link` configuration carrying its own `label` parameter
    LinkWithLabel,

    /// Large display text without a semantic heading tag
    LargeTextWithoutHeadingTag,

    /// Collapsible layout without a heading-tag parameter
    CollapsibleWithoutHeadingTag,

    /// `validations` parameter present but `required` never asserted
    ValidatedWithoutRequired,

    /// Label shared with a sibling and no accessibility narration
    DuplicateLabelWithoutNarration,

    /// Any use of the component is a violation
    Prohibited,
}

impl Condition {
    /// Whether evaluation needs the duplicate-label set computed across
    /// every component the check located
    fn wants_duplicates(&self) -> bool {
        matches!(self, Condition::DuplicateLabelWithoutNarration)
    }

    /// Evaluate the condition against one component span. `duplicates` is
    /// the shared-label set for cross-component conditions, empty otherwise.
    fn holds(
        &self,
        component: &Component,
        duplicates: &HashSet<String>,
    ) -> Result<bool, PredicateError> {
        let span = component.text.as_str();
        match self {
            Condition::MissingParameter { name } => Ok(!predicate::has_parameter(span, name)?),

            Condition::MissingEveryParameter { names } => {
                for name in *names {
                    if predicate::has_parameter(span, name)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }

            Condition::EmptyParameter { name } => Ok(predicate::has_parameter(span, name)?
                && !predicate::has_nonempty_parameter(span, name)?),

            Condition::GroupWithoutLabel { list } => Ok(predicate::has_multiple_values(span, list)?
                && !predicate::has_parameter(span, "label")?),

            Condition::StyledConditionallyWithoutNarration => {
                Ok(predicate::is_conditionally_styled(span)?
                    && !predicate::has_parameter(span, "accessibilityText")?)
            }

            Condition::LinkWithLabel => predicate::link_carries_label(span),

            Condition::LargeTextWithoutHeadingTag => {
                let size = predicate::parameter_value(span, "size")?;
                Ok(matches!(size.as_deref(), Some("LARGE") | Some("MEDIUM_PLUS"))
                    && !predicate::has_parameter(span, "headingTag")?)
            }

            Condition::CollapsibleWithoutHeadingTag => {
                Ok(predicate::parameter_is_true(span, "isCollapsible")?
                    && !predicate::has_parameter(span, "labelHeadingTag")?
                    && !predicate::has_parameter(span, "headingTag")?)
            }

            Condition::ValidatedWithoutRequired => {
                Ok(predicate::has_parameter(span, "validations")?
                    && !predicate::parameter_is_true(span, "required")?)
            }

            Condition::DuplicateLabelWithoutNarration => {
                let label = predicate::parameter_value(span, "label")?;
                Ok(label.is_some_and(|l| duplicates.contains(&l))
                    && !predicate::has_parameter(span, "accessibilityText")?)
            }

            Condition::Prohibited => Ok(true),
        }
    }
}

/// Metadata stamped onto every finding a check emits.
///
/// `{component}` placeholders in the rule label and message are replaced
/// with the located component's name.
#[derive(Debug, Clone)]
pub struct FindingTemplate {
    /// Rule label; should start with the component category it concerns
    pub rule: String,

    /// Human-readable requirement text
    pub message: String,

    /// Severity level
    pub severity: Severity,

    /// WCAG conformance level
    pub wcag_level: WcagLevel,

    /// WCAG success criteria
    pub wcag_criteria: &'static str,
}

/// A compiled unit of scan work
#[derive(Debug, Clone)]
pub struct Check {
    /// Component names to locate
    pub components: &'static [&'static str],

    /// Violation condition
    pub condition: Condition,

    /// Finding metadata
    pub template: FindingTemplate,
}

impl Check {
    /// Locate every component this check covers and emit one finding per
    /// violating span.
    ///
    /// A predicate failure on one span is logged and skipped; the rest of
    /// the scan continues.
    pub fn execute(&self, source: &str) -> Vec<Finding> {
        let located: Vec<Component> = self
            .components
            .iter()
            .flat_map(|name| locator::find_components(source, name))
            .collect();

        let duplicates = if self.condition.wants_duplicates() {
            match predicate::duplicate_labels(&located) {
                Ok(labels) => labels,
                Err(err) => {
                    log::warn!("duplicate-label grouping failed: {}", err);
                    HashSet::new()
                }
            }
        } else {
            HashSet::new()
        };

        let mut findings = Vec::new();
        for component in &located {
            match self.condition.holds(component, &duplicates) {
                Ok(true) => findings.push(self.finding_for(component)),
                Ok(false) => {}
                Err(err) => {
                    log::warn!(
                        "skipping a!{} at line {}: {}",
                        component.name,
                        component.line,
                        err
                    );
                }
            }
        }

        findings
    }

    fn finding_for(&self, component: &Component) -> Finding {
        Finding {
            rule: self.template.rule.replace("{component}", &component.name),
            message: self
                .template
                .message
                .replace("{component}", &component.name),
            snippet: snippet(&component.text),
            line: component.line,
            severity: self.template.severity,
            wcag_level: self.template.wcag_level,
            wcag_criteria: self.template.wcag_criteria.to_string(),
            learn_more_url: CHECKLIST_URL.to_string(),
        }
    }
}

fn snippet(text: &str) -> String {
    text.chars().take(SNIPPET_LIMIT).collect()
}
