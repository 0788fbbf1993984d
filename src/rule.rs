//! Checklist rule definitions and loading

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// One row of the accessibility checklist
///
/// Rules are read-only input to the interpreter. The `test_instruction`
/// free text is the source of truth for deciding which automatic checks
/// a rule implies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Checklist category (e.g. "Form Inputs", "Grids")
    pub category: String,

    /// Human-readable requirement text, attached to findings as the message
    pub criteria: String,

    /// Free-text testing guidance interpreted by the classifier.
    /// The external checklist historically calls this field `sailTest`.
    #[serde(alias = "sailTest")]
    pub test_instruction: String,
}

impl Rule {
    /// Create a new rule
    pub fn new(category: &str, criteria: &str, test_instruction: &str) -> Self {
        Self {
            category: category.to_string(),
            criteria: criteria.to_string(),
            test_instruction: test_instruction.to_string(),
        }
    }
}

/// Checklist file format (for loading from YAML/JSON)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleFile {
    /// File format version
    #[serde(default)]
    pub version: Option<String>,

    /// Rules defined in this file
    pub rules: Vec<Rule>,
}

/// Error loading checklist rules
#[derive(Debug, Error)]
pub enum RuleLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported checklist format: {0}")]
    Unsupported(String),
}

/// Load checklist rules from a YAML or JSON file, chosen by extension
pub fn load_rules(path: &Path) -> Result<Vec<Rule>, RuleLoadError> {
    let content = std::fs::read_to_string(path)?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let file: RuleFile = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&content)?,
        "json" => serde_json::from_str(&content)?,
        other => return Err(RuleLoadError::Unsupported(other.to_string())),
    };

    Ok(file.rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_rule_creation() {
        let rule = Rule::new(
            "Form Inputs",
            "All inputs must have a label",
            "Inspect the label parameter for a value",
        );

        assert_eq!(rule.category, "Form Inputs");
        assert_eq!(rule.criteria, "All inputs must have a label");
        assert_eq!(rule.test_instruction, "Inspect the label parameter for a value");
    }

    #[test]
    fn test_rule_file_deserialize_yaml() {
        let yaml = r#"
version: "1.0"
rules:
  - category: Form Inputs
    criteria: All inputs must have a label
    test_instruction: Inspect the label parameter for a value
"#;

        let file: RuleFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.version, Some("1.0".to_string()));
        assert_eq!(file.rules.len(), 1);
        assert_eq!(file.rules[0].category, "Form Inputs");
    }

    #[test]
    fn test_rule_sail_test_alias() {
        let json = r#"{
            "rules": [
                {
                    "category": "Icon",
                    "criteria": "Icons must have alt text",
                    "sailTest": "Inspect the altText parameter"
                }
            ]
        }"#;

        let file: RuleFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.rules[0].test_instruction, "Inspect the altText parameter");
    }

    #[test]
    fn test_load_rules_json() {
        let mut tmp = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .unwrap();
        write!(
            tmp,
            r#"{{"rules": [{{"category": "Grids", "criteria": "c", "sailTest": "t"}}]}}"#
        )
        .unwrap();

        let rules = load_rules(tmp.path()).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].category, "Grids");
    }

    #[test]
    fn test_load_rules_unsupported_extension() {
        let mut tmp = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(tmp, "not a checklist").unwrap();

        assert!(matches!(
            load_rules(tmp.path()),
            Err(RuleLoadError::Unsupported(_))
        ));
    }

    #[test]
    fn test_load_rules_missing_file() {
        assert!(matches!(
            load_rules(Path::new("/nonexistent/checklist.yaml")),
            Err(RuleLoadError::Io(_))
        ));
    }
}
