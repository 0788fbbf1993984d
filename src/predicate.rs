//! Pure predicates over located component spans
//!
//! Every predicate is a side-effect-free function of span text. None of
//! them locate components; that is the locator's job. Pattern construction
//! is fallible and surfaces as a [`PredicateError`] the executor catches.

use crate::locator::Component;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Error evaluating a predicate against a span
#[derive(Debug, Error)]
pub enum PredicateError {
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Span contains `name` followed by the parameter separator
pub fn has_parameter(span: &str, name: &str) -> Result<bool, PredicateError> {
    let re = Regex::new(&format!(r"{}\s*:", regex::escape(name)))?;
    Ok(re.is_match(span))
}

/// `has_parameter` holds and the literal value is not an empty quoted string
pub fn has_nonempty_parameter(span: &str, name: &str) -> Result<bool, PredicateError> {
    if !has_parameter(span, name)? {
        return Ok(false);
    }
    let empty = Regex::new(&format!(r#"{}\s*:\s*""\s*[,)]"#, regex::escape(name)))?;
    Ok(!empty.is_match(span))
}

/// The named parameter's braced value list holds more than one
/// comma-separated element
pub fn has_multiple_values(span: &str, name: &str) -> Result<bool, PredicateError> {
    let re = Regex::new(&format!(
        r"{}\s*:\s*\{{[^}}]*,[^}}]*\}}",
        regex::escape(name)
    ))?;
    Ok(re.is_match(span))
}

/// The named parameter is set to the literal `true`
pub fn parameter_is_true(span: &str, name: &str) -> Result<bool, PredicateError> {
    let re = Regex::new(&format!(r"{}\s*:\s*true", regex::escape(name)))?;
    Ok(re.is_match(span))
}

/// Literal string value of the named parameter, if any
pub fn parameter_value(span: &str, name: &str) -> Result<Option<String>, PredicateError> {
    let re = Regex::new(&format!(r#"{}\s*:\s*"([^"]*)""#, regex::escape(name)))?;
    Ok(re.captures(span).map(|caps| caps[1].to_string()))
}

/// A style, color, or border parameter whose value is a conditional
/// expression. Heuristic proxy for "this control visually indicates a
/// dynamic selection state".
pub fn is_conditionally_styled(span: &str) -> Result<bool, PredicateError> {
    let re = Regex::new(r"(?:style|backgroundColor|showBorder)\s*:\s*if\s*\(")?;
    Ok(re.is_match(span))
}

/// A `link` configuration that carries its own `label` parameter
pub fn link_carries_label(span: &str) -> Result<bool, PredicateError> {
    let re = Regex::new(r"link\s*:[^)]*label\s*:")?;
    Ok(re.is_match(span))
}

/// Label values shared by two or more of the given components.
///
/// Cross-component input: callers pass every located sibling of the kinds
/// under inspection, not just one span.
pub fn duplicate_labels(components: &[Component]) -> Result<HashSet<String>, PredicateError> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for component in components {
        if let Some(label) = parameter_value(&component.text, "label")? {
            *counts.entry(label).or_insert(0) += 1;
        }
    }
    Ok(counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(label, _)| label)
        .collect())
}
