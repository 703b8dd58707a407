//! Structural validation: the choice-constraint validator and the aggregated
//! issue report produced by composition.

pub mod choice;

use serde_json::Value;

pub use choice::check_choice_groups;

/// One field-attributable structural violation.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    /// A choice group has more than one populated member, or a required
    /// group has none. `populated` lists the offending populated members
    /// (empty when the violation is an unpopulated required group);
    /// `members` always lists the group's alternatives.
    ChoiceViolation {
        group: String,
        populated: Vec<String>,
        members: Vec<String>,
    },

    /// A non-choice required field is absent from the input
    MissingRequiredField { field: String },

    /// An input key is not declared (strict mode only)
    UnknownField { field: String },

    /// A value is present but cannot be coerced to its declared kind
    FieldTypeError {
        field: String,
        expected: String,
        value: Value,
    },
}

impl ValidationIssue {
    /// Stable machine-readable code for this issue kind
    pub fn code(&self) -> &'static str {
        match self {
            ValidationIssue::ChoiceViolation { .. } => "choice-violation",
            ValidationIssue::MissingRequiredField { .. } => "missing-required-field",
            ValidationIssue::UnknownField { .. } => "unknown-field",
            ValidationIssue::FieldTypeError { .. } => "field-type-error",
        }
    }

    /// Prefix the issue's field path with a parent segment
    pub(crate) fn prefixed(self, prefix: &str) -> Self {
        let join = |field: String| format!("{prefix}.{field}");
        match self {
            ValidationIssue::ChoiceViolation {
                group,
                populated,
                members,
            } => ValidationIssue::ChoiceViolation {
                group: join(group),
                populated: populated.into_iter().map(join).collect(),
                members,
            },
            ValidationIssue::MissingRequiredField { field } => {
                ValidationIssue::MissingRequiredField { field: join(field) }
            }
            ValidationIssue::UnknownField { field } => {
                ValidationIssue::UnknownField { field: join(field) }
            }
            ValidationIssue::FieldTypeError {
                field,
                expected,
                value,
            } => ValidationIssue::FieldTypeError {
                field: join(field),
                expected,
                value,
            },
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationIssue::ChoiceViolation {
                group,
                populated,
                members,
            } => {
                if populated.is_empty() {
                    write!(
                        f,
                        "no variant populated for required choice group {group:?}, expected one of: {}",
                        members.join(", ")
                    )
                } else {
                    write!(
                        f,
                        "more than one variant populated for choice group {group:?}: {}",
                        populated.join(", ")
                    )
                }
            }
            ValidationIssue::MissingRequiredField { field } => {
                write!(f, "required field {field:?} is missing")
            }
            ValidationIssue::UnknownField { field } => {
                write!(f, "unknown field {field:?}")
            }
            ValidationIssue::FieldTypeError {
                field,
                expected,
                value,
            } => {
                write!(f, "field {field:?} expects {expected}, got {value}")
            }
        }
    }
}

/// All structural violations found while composing one instance.
///
/// Composition is all-or-nothing: when a report is returned, no partial
/// instance exists.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub type_tag: String,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new(type_tag: impl Into<String>) -> Self {
        Self {
            type_tag: type_tag.into(),
            issues: Vec::new(),
        }
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = ValidationIssue>) {
        self.issues.extend(issues);
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Whether any issue carries the given code
    pub fn has_code(&self, code: &str) -> bool {
        self.issues.iter().any(|issue| issue.code() == code)
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} failed structural validation with {} issue(s)",
            self.type_tag,
            self.issues.len()
        )?;
        for issue in &self.issues {
            write!(f, "; {issue}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn issue_codes_are_stable() {
        let issue = ValidationIssue::MissingRequiredField {
            field: "status".into(),
        };
        assert_eq!(issue.code(), "missing-required-field");

        let issue = ValidationIssue::FieldTypeError {
            field: "count".into(),
            expected: "positiveInt".into(),
            value: json!("three"),
        };
        assert_eq!(issue.code(), "field-type-error");
    }

    #[test]
    fn prefixing_rewrites_paths() {
        let issue = ValidationIssue::MissingRequiredField {
            field: "coverage".into(),
        };
        match issue.prefixed("coverage[0]") {
            ValidationIssue::MissingRequiredField { field } => {
                assert_eq!(field, "coverage[0].coverage");
            }
            other => panic!("unexpected issue {other:?}"),
        }
    }

    #[test]
    fn report_display_lists_every_issue() {
        let mut report = ValidationReport::new("Patient");
        report.push(ValidationIssue::MissingRequiredField {
            field: "status".into(),
        });
        report.push(ValidationIssue::UnknownField {
            field: "favouriteColour".into(),
        });

        let text = report.to_string();
        assert!(text.contains("2 issue(s)"));
        assert!(text.contains("status"));
        assert!(text.contains("favouriteColour"));
        assert!(report.has_code("unknown-field"));
        assert!(!report.has_code("choice-violation"));
    }
}
