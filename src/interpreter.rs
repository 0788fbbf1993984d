//! Classification of checklist rules into executable checks
//!
//! A checklist rule carries free-text testing guidance, not code. The
//! interpreter matches that text (case-insensitively, together with the
//! rule's category) against a fixed, ordered table of classifications.
//! Matching is not exclusive: one rule may trigger several classifications,
//! and several rules may trigger the same one. An unmatched rule compiles
//! to zero checks, which means "no applicable automatic check".
//!
//! Table order is the documented priority order: when two classifications
//! flag the same component on the same line, deduplication keeps the
//! earlier entry's finding.

use crate::check::{Check, Condition, FindingTemplate};
use crate::finding::{Severity, WcagLevel};
use crate::rule::Rule;

/// Form input components that take a `label` parameter
const FORM_INPUTS: &[&str] = &[
    "textField",
    "paragraphField",
    "integerField",
    "decimalField",
    "dateField",
    "dropdownField",
    "checkboxField",
    "radioButtonField",
    "fileUploadField",
    "pickerField",
];

/// Components whose options are described by `choiceLabels`
const CHOICE_INPUTS: &[&str] = &["checkboxField", "radioButtonField"];

/// Components that render imagery
const IMAGES: &[&str] = &["image", "richTextIcon"];

/// Inputs commonly repeated across a form, where identical labels need
/// supplementary narration
const DUPLICATE_PRONE: &[&str] = &["textField", "integerField", "decimalField", "dropdownField"];

/// Inputs that accept a `validations` parameter
const VALIDATED_INPUTS: &[&str] = &[
    "textField",
    "dropdownField",
    "checkboxField",
    "radioButtonField",
    "dateField",
];

/// Card components that can indicate selection visually
const CARDS: &[&str] = &["cardLayout", "cardChoiceField"];

/// Layouts that can collapse behind a heading
const COLLAPSIBLE_LAYOUTS: &[&str] = &["sectionLayout", "boxLayout"];

/// Button components
const BUTTONS: &[&str] = &["buttonWidget", "buttonArrayLayout"];

/// Chart components
const CHARTS: &[&str] = &[
    "barChartField",
    "columnChartField",
    "lineChartField",
    "pieChartField",
    "areaChartField",
];

/// Lowercased rule text the classification predicates match against
#[derive(Debug, Clone)]
pub struct RuleText {
    pub category: String,
    pub instruction: String,
}

impl RuleText {
    fn of(rule: &Rule) -> Self {
        Self {
            category: rule.category.to_lowercase(),
            instruction: rule.test_instruction.to_lowercase(),
        }
    }
}

/// One entry of the classification table: a predicate over rule text and
/// the check it compiles to
pub struct Classification {
    /// Stable identifier, also shown by `--list-checks`
    pub id: &'static str,

    /// One-line description of what the compiled check verifies
    pub summary: &'static str,

    /// Predicate over the lowercased rule text
    pub applies: fn(&RuleText) -> bool,

    /// Check factory; the rule's criteria becomes the finding message
    pub build: fn(&Rule) -> Check,
}

/// The ordered classification table
pub fn classifications() -> &'static [Classification] {
    CLASSIFICATIONS
}

/// Compile one rule into the checks its test instruction implies
pub fn compile(rule: &Rule) -> Vec<Check> {
    let text = RuleText::of(rule);
    CLASSIFICATIONS
        .iter()
        .filter(|classification| (classification.applies)(&text))
        .map(|classification| (classification.build)(rule))
        .collect()
}

static CLASSIFICATIONS: &[Classification] = &[
    Classification {
        id: "input-label",
        summary: "Form inputs must have a label parameter",
        applies: wants_input_label,
        build: build_input_label,
    },
    Classification {
        id: "choice-labels",
        summary: "Checkbox and radio fields must have choiceLabels",
        applies: wants_choice_labels,
        build: build_choice_labels,
    },
    Classification {
        id: "group-label",
        summary: "Multi-choice fields must have a group label",
        applies: wants_group_label,
        build: build_group_label,
    },
    Classification {
        id: "alt-text",
        summary: "Images and icons must have alternative text",
        applies: wants_alt_text,
        build: build_alt_text,
    },
    Classification {
        id: "grid-label",
        summary: "Grids must have a label",
        applies: wants_grid_label,
        build: build_grid_label,
    },
    Classification {
        id: "grid-column-header",
        summary: "Grid columns must have header labels",
        applies: wants_grid_column_header,
        build: build_grid_column_header,
    },
    Classification {
        id: "semantic-heading",
        summary: "Large display text must use a semantic heading tag",
        applies: wants_semantic_heading,
        build: build_semantic_heading,
    },
    Classification {
        id: "collapsible-heading",
        summary: "Collapsible layouts must have a heading tag",
        applies: wants_collapsible_heading,
        build: build_collapsible_heading,
    },
    Classification {
        id: "progress-bar-label",
        summary: "Progress bars must have a label",
        applies: wants_progress_bar_label,
        build: build_progress_bar_label,
    },
    Classification {
        id: "file-upload-label",
        summary: "File upload fields must have a label",
        applies: wants_file_upload_label,
        build: build_file_upload_label,
    },
    Classification {
        id: "card-narration",
        summary: "Conditionally styled cards must narrate selection state",
        applies: wants_card_narration,
        build: build_card_narration,
    },
    Classification {
        id: "card-link-label",
        summary: "Card links must not carry their own label",
        applies: wants_card_link_label,
        build: build_card_link_label,
    },
    Classification {
        id: "prohibited-datetime",
        summary: "The combined date and time field must not be used",
        applies: wants_prohibited_datetime,
        build: build_prohibited_datetime,
    },
    Classification {
        id: "duplicate-label",
        summary: "Inputs sharing a label need accessibility text for context",
        applies: wants_duplicate_label,
        build: build_duplicate_label,
    },
    Classification {
        id: "required-field",
        summary: "Validated inputs must assert the required parameter",
        applies: wants_required_field,
        build: build_required_field,
    },
    Classification {
        id: "link-label",
        summary: "Links must have a label or accessibility text",
        applies: wants_link_label,
        build: build_link_label,
    },
    Classification {
        id: "button-label",
        summary: "Buttons must have a label",
        applies: wants_button_label,
        build: build_button_label,
    },
    Classification {
        id: "chart-narration",
        summary: "Charts must have accessibility text",
        applies: wants_chart_narration,
        build: build_chart_narration,
    },
    Classification {
        id: "picker-label",
        summary: "Picker fields must have a label",
        applies: wants_picker_label,
        build: build_picker_label,
    },
];

fn template(
    rule: &Rule,
    label: &str,
    severity: Severity,
    wcag_level: WcagLevel,
    wcag_criteria: &'static str,
) -> FindingTemplate {
    FindingTemplate {
        rule: label.to_string(),
        message: rule.criteria.clone(),
        severity,
        wcag_level,
        wcag_criteria,
    }
}

// --- input-label ---

fn wants_input_label(text: &RuleText) -> bool {
    text.instruction.contains("inspect the label parameter")
        || text.instruction.contains("label parameter for a value")
        || text.instruction.contains("label must not be null")
        || (text.category.contains("form")
            && text.instruction.contains("label")
            && text.instruction.contains("parameter")
            && !text.instruction.contains("choicelabels"))
}

fn build_input_label(rule: &Rule) -> Check {
    Check {
        components: FORM_INPUTS,
        condition: Condition::MissingParameter { name: "label" },
        template: template(
            rule,
            "{component} Missing Label",
            Severity::Error,
            WcagLevel::A,
            "1.3.1, 4.1.2",
        ),
    }
}

// --- choice-labels ---

fn wants_choice_labels(text: &RuleText) -> bool {
    text.instruction.contains("choicelabels") || text.instruction.contains("choice labels")
}

fn build_choice_labels(rule: &Rule) -> Check {
    Check {
        components: CHOICE_INPUTS,
        condition: Condition::MissingParameter {
            name: "choiceLabels",
        },
        template: template(
            rule,
            "{component} Missing Choice Labels",
            Severity::Error,
            WcagLevel::A,
            "1.3.1, 4.1.2",
        ),
    }
}

// --- group-label ---

fn wants_group_label(text: &RuleText) -> bool {
    text.category.contains("form")
        && (text.instruction.contains("more than one checkbox")
            || (text.instruction.contains("more than one")
                && text.instruction.contains("radio button"))
            || (text.instruction.contains("group") && text.instruction.contains("label")))
}

fn build_group_label(rule: &Rule) -> Check {
    Check {
        components: CHOICE_INPUTS,
        condition: Condition::GroupWithoutLabel {
            list: "choiceLabels",
        },
        template: template(
            rule,
            "{component} Group Missing Label",
            Severity::Error,
            WcagLevel::A,
            "1.3.1",
        ),
    }
}

// --- alt-text ---

fn wants_alt_text(text: &RuleText) -> bool {
    text.instruction.contains("alttext") || text.instruction.contains("alt text")
}

fn build_alt_text(rule: &Rule) -> Check {
    Check {
        components: IMAGES,
        condition: Condition::MissingEveryParameter {
            names: &["altText", "accessibilityText"],
        },
        template: template(
            rule,
            "{component} Missing Alt Text",
            Severity::Error,
            WcagLevel::A,
            "1.1.1",
        ),
    }
}

// --- grid-label ---

fn wants_grid_label(text: &RuleText) -> bool {
    text.category.contains("grid")
        && text.instruction.contains("label")
        && !text.instruction.contains("column")
}

fn build_grid_label(rule: &Rule) -> Check {
    Check {
        components: &["gridField"],
        condition: Condition::MissingParameter { name: "label" },
        template: template(
            rule,
            "Grid Missing Label",
            Severity::Error,
            WcagLevel::A,
            "1.3.1, 4.1.2",
        ),
    }
}

// --- grid-column-header ---

fn wants_grid_column_header(text: &RuleText) -> bool {
    text.category.contains("grid")
        && (text.instruction.contains("column") || text.instruction.contains("header"))
}

fn build_grid_column_header(rule: &Rule) -> Check {
    Check {
        components: &["gridColumn"],
        condition: Condition::MissingParameter { name: "label" },
        template: template(
            rule,
            "Grid Column Missing Header",
            Severity::Warning,
            WcagLevel::AA,
            "1.3.1",
        ),
    }
}

// --- semantic-heading ---

fn wants_semantic_heading(text: &RuleText) -> bool {
    text.category.contains("heading")
        || text.instruction.contains("headingfield")
        || text.instruction.contains("heading tag")
}

fn build_semantic_heading(rule: &Rule) -> Check {
    Check {
        components: &["richTextItem"],
        condition: Condition::LargeTextWithoutHeadingTag,
        template: template(
            rule,
            "Text Should Use Semantic Heading",
            Severity::Warning,
            WcagLevel::AA,
            "1.3.1",
        ),
    }
}

// --- collapsible-heading ---

fn wants_collapsible_heading(text: &RuleText) -> bool {
    ((text.category.contains("section") || text.category.contains("box"))
        && (text.instruction.contains("labelheadingtag") || text.instruction.contains("heading")))
        || text.instruction.contains("collapsible")
}

fn build_collapsible_heading(rule: &Rule) -> Check {
    Check {
        components: COLLAPSIBLE_LAYOUTS,
        condition: Condition::CollapsibleWithoutHeadingTag,
        template: template(
            rule,
            "{component} Missing Heading Tag",
            Severity::Error,
            WcagLevel::A,
            "1.3.1",
        ),
    }
}

// --- progress-bar-label ---

fn wants_progress_bar_label(text: &RuleText) -> bool {
    (text.category.contains("progress") || text.instruction.contains("progress"))
        && text.instruction.contains("label")
}

fn build_progress_bar_label(rule: &Rule) -> Check {
    Check {
        components: &["progressBarField"],
        condition: Condition::MissingParameter { name: "label" },
        template: template(
            rule,
            "Progress Bar Missing Label",
            Severity::Error,
            WcagLevel::A,
            "1.3.1, 4.1.2",
        ),
    }
}

// --- file-upload-label ---

fn wants_file_upload_label(text: &RuleText) -> bool {
    (text.category.contains("file") || text.instruction.contains("file upload"))
        && text.instruction.contains("label")
}

fn build_file_upload_label(rule: &Rule) -> Check {
    Check {
        components: &["fileUploadField"],
        condition: Condition::MissingParameter { name: "label" },
        template: template(
            rule,
            "File Upload Missing Label",
            Severity::Error,
            WcagLevel::A,
            "1.3.1, 4.1.2",
        ),
    }
}

// --- card-narration ---

fn wants_card_narration(text: &RuleText) -> bool {
    text.category.contains("card")
        && (text.instruction.contains("selected") || text.instruction.contains("accessibility"))
}

fn build_card_narration(rule: &Rule) -> Check {
    Check {
        components: CARDS,
        condition: Condition::StyledConditionallyWithoutNarration,
        template: template(
            rule,
            "Selected Card Missing Accessibility Text",
            Severity::Error,
            WcagLevel::A,
            "4.1.2",
        ),
    }
}

// --- card-link-label ---

fn wants_card_link_label(text: &RuleText) -> bool {
    text.category.contains("card")
        && text.instruction.contains("label")
        && text.instruction.contains("must not")
}

fn build_card_link_label(rule: &Rule) -> Check {
    Check {
        components: &["cardLayout"],
        condition: Condition::LinkWithLabel,
        template: template(
            rule,
            "Card Link Should Not Have Label",
            Severity::Error,
            WcagLevel::A,
            "2.4.4",
        ),
    }
}

// --- prohibited-datetime ---

fn wants_prohibited_datetime(text: &RuleText) -> bool {
    text.category.contains("date & time")
        || (text.instruction.contains("datetimefield") && text.instruction.contains("must not"))
}

fn build_prohibited_datetime(rule: &Rule) -> Check {
    Check {
        components: &["dateTimeField"],
        condition: Condition::Prohibited,
        template: template(
            rule,
            "dateTimeField Not Allowed",
            Severity::Error,
            WcagLevel::A,
            "4.1.2",
        ),
    }
}

// --- duplicate-label ---

fn wants_duplicate_label(text: &RuleText) -> bool {
    text.instruction.contains("duplicate")
        || text.instruction.contains("repeated")
        || (text.instruction.contains("accessibilitytext") && text.instruction.contains("context"))
}

fn build_duplicate_label(rule: &Rule) -> Check {
    Check {
        components: DUPLICATE_PRONE,
        condition: Condition::DuplicateLabelWithoutNarration,
        template: template(
            rule,
            "{component} Missing Accessibility Text",
            Severity::Error,
            WcagLevel::A,
            "2.4.6",
        ),
    }
}

// --- required-field ---

fn wants_required_field(text: &RuleText) -> bool {
    (text.category.contains("validation") || text.category.contains("form"))
        && text.instruction.contains("required")
        && text.instruction.contains("parameter")
}

fn build_required_field(rule: &Rule) -> Check {
    Check {
        components: VALIDATED_INPUTS,
        condition: Condition::ValidatedWithoutRequired,
        template: template(
            rule,
            "{component} Missing Required Parameter",
            Severity::Warning,
            WcagLevel::AA,
            "3.3.2",
        ),
    }
}

// --- link-label ---

fn wants_link_label(text: &RuleText) -> bool {
    text.category.contains("link") && text.instruction.contains("label")
}

fn build_link_label(rule: &Rule) -> Check {
    Check {
        components: &["linkField"],
        condition: Condition::MissingEveryParameter {
            names: &["label", "accessibilityText"],
        },
        template: template(
            rule,
            "Link Missing Label",
            Severity::Error,
            WcagLevel::A,
            "2.4.4, 4.1.2",
        ),
    }
}

// --- button-label ---

fn wants_button_label(text: &RuleText) -> bool {
    (text.category.contains("button") || text.instruction.contains("button"))
        && text.instruction.contains("label")
}

fn build_button_label(rule: &Rule) -> Check {
    Check {
        components: BUTTONS,
        condition: Condition::MissingParameter { name: "label" },
        template: template(
            rule,
            "{component} Missing Label",
            Severity::Error,
            WcagLevel::A,
            "4.1.2",
        ),
    }
}

// --- chart-narration ---

fn wants_chart_narration(text: &RuleText) -> bool {
    text.category.contains("chart") || text.instruction.contains("chart")
}

fn build_chart_narration(rule: &Rule) -> Check {
    Check {
        components: CHARTS,
        condition: Condition::MissingParameter {
            name: "accessibilityText",
        },
        template: template(
            rule,
            "{component} Missing Accessibility Text",
            Severity::Error,
            WcagLevel::A,
            "1.1.1",
        ),
    }
}

// --- picker-label ---

fn wants_picker_label(text: &RuleText) -> bool {
    (text.category.contains("picker") || text.instruction.contains("picker"))
        && text.instruction.contains("label")
}

fn build_picker_label(rule: &Rule) -> Check {
    Check {
        components: &["pickerField"],
        condition: Condition::MissingParameter { name: "label" },
        template: template(
            rule,
            "Picker Field Missing Label",
            Severity::Error,
            WcagLevel::A,
            "1.3.1, 4.1.2",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(category: &str, instruction: &str) -> Rule {
        Rule::new(category, "criteria text", instruction)
    }

    fn ids(rule: &Rule) -> Vec<&'static str> {
        let text = RuleText::of(rule);
        CLASSIFICATIONS
            .iter()
            .filter(|c| (c.applies)(&text))
            .map(|c| c.id)
            .collect()
    }

    #[test]
    fn test_label_instruction_compiles_to_label_check() {
        let r = rule("Form Inputs", "Inspect the label parameter for a value");
        assert_eq!(ids(&r), vec!["input-label"]);

        let checks = compile(&r);
        assert_eq!(checks.len(), 1);
        assert_eq!(
            checks[0].condition,
            Condition::MissingParameter { name: "label" }
        );
        assert_eq!(checks[0].template.message, "criteria text");
    }

    #[test]
    fn test_classification_is_case_insensitive() {
        let r = rule("FORM INPUTS", "INSPECT THE LABEL PARAMETER FOR A VALUE");
        assert_eq!(ids(&r), vec!["input-label"]);
    }

    #[test]
    fn test_unrecognized_instruction_compiles_to_nothing() {
        let r = rule("General", "Review the design with a screen reader");
        assert!(compile(&r).is_empty());
    }

    #[test]
    fn test_overlapping_classifications_by_design() {
        // Mentions both choiceLabels and group labels: two checks, table order.
        let r = rule(
            "Form Inputs",
            "Inspect choiceLabels; when more than one checkbox is shown the group needs a label",
        );
        assert_eq!(ids(&r), vec!["choice-labels", "group-label"]);
    }

    #[test]
    fn test_group_label_rule() {
        let r = rule(
            "Form Inputs",
            "If more than one checkbox is present the group must have a label",
        );
        assert_eq!(ids(&r), vec!["group-label"]);
    }

    #[test]
    fn test_alt_text_rule() {
        let r = rule("Icon", "Inspect the altText parameter for a value");
        assert_eq!(ids(&r), vec!["alt-text"]);
    }

    #[test]
    fn test_grid_rules_split_on_column_mention() {
        let grid = rule("Grids", "The grid must have a label");
        assert_eq!(ids(&grid), vec!["grid-label"]);

        let column = rule("Grids", "Each column must have a header");
        assert_eq!(ids(&column), vec!["grid-column-header"]);
    }

    #[test]
    fn test_prohibited_datetime_rule() {
        let r = rule(
            "Date & Time Component",
            "The combined control must not be used",
        );
        assert_eq!(ids(&r), vec!["prohibited-datetime"]);
    }

    #[test]
    fn test_duplicate_label_rule() {
        let r = rule(
            "Form Inputs",
            "Duplicate labels need accessibilityText for context",
        );
        assert!(ids(&r).contains(&"duplicate-label"));
    }

    #[test]
    fn test_required_field_rule() {
        let r = rule(
            "Validations",
            "The required parameter must be set to true on validated inputs",
        );
        assert_eq!(ids(&r), vec!["required-field"]);
    }

    #[test]
    fn test_card_rules() {
        let narration = rule("Cards", "Selected cards must have accessibilityText");
        assert!(ids(&narration).contains(&"card-narration"));

        let link = rule("Cards", "The link label parameter must not be used");
        assert!(ids(&link).contains(&"card-link-label"));
    }

    #[test]
    fn test_classification_ids_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for classification in classifications() {
            assert!(
                seen.insert(classification.id),
                "duplicate classification id: {}",
                classification.id
            );
        }
    }
}
