// Choice-constraint validation over a candidate field-value mapping

use serde_json::{Map, Value};

use crate::schema::TypeDeclaration;

use super::ValidationIssue;

/// Whether a mapping entry counts as absent. A key that is missing and a key
/// carrying an explicit JSON null are indistinguishable for choice purposes.
pub(crate) fn is_absent(mapping: &Map<String, Value>, field: &str) -> bool {
    matches!(mapping.get(field), None | Some(Value::Null))
}

/// Verify every choice group of a declaration against a candidate mapping.
///
/// For each group the populated members are counted: more than one populated
/// member is a violation, as is zero populated members for a required group.
/// Groups are evaluated independently and all violations are collected; the
/// validator is a pure predicate with no side effects and runs before the
/// mapping is accepted into a constructed instance.
pub fn check_choice_groups(
    declaration: &TypeDeclaration,
    mapping: &Map<String, Value>,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for group in declaration.choice_groups() {
        let populated: Vec<String> = group
            .members
            .iter()
            .filter(|member| !is_absent(mapping, member))
            .map(|member| member.to_string())
            .collect();

        if populated.len() > 1 || (populated.is_empty() && group.required) {
            issues.push(ValidationIssue::ChoiceViolation {
                group: group.tag.to_string(),
                populated,
                members: group.members.iter().map(|m| m.to_string()).collect(),
            });
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldDescriptor, TypeDeclaration};
    use crate::types::PrimitiveKind;
    use serde_json::json;

    fn declaration(required: bool) -> TypeDeclaration {
        let builder = TypeDeclaration::builder("Observation")
            .field(
                FieldDescriptor::primitive("valueBoolean", PrimitiveKind::Boolean)
                    .in_choice("value"),
            )
            .field(
                FieldDescriptor::primitive("valueDateTime", PrimitiveKind::DateTime)
                    .in_choice("value"),
            )
            .field(FieldDescriptor::composite("valuePeriod", "Period").in_choice("value"));
        if required {
            builder.require_choice("value").build()
        } else {
            builder.build()
        }
    }

    fn mapping(value: serde_json::Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn exactly_one_member_passes() {
        let issues = check_choice_groups(&declaration(true), &mapping(json!({
            "valueBoolean": true
        })));
        assert!(issues.is_empty());
    }

    #[test]
    fn two_members_fail_and_are_named() {
        let issues = check_choice_groups(&declaration(false), &mapping(json!({
            "valueBoolean": true,
            "valueDateTime": "2020-01-01"
        })));
        assert_eq!(issues.len(), 1);
        match &issues[0] {
            ValidationIssue::ChoiceViolation { populated, .. } => {
                assert_eq!(populated, &["valueBoolean", "valueDateTime"]);
            }
            other => panic!("unexpected issue {other:?}"),
        }
    }

    #[test]
    fn empty_required_group_fails() {
        let issues = check_choice_groups(&declaration(true), &Map::new());
        assert_eq!(issues.len(), 1);
        match &issues[0] {
            ValidationIssue::ChoiceViolation { populated, members, .. } => {
                assert!(populated.is_empty());
                assert_eq!(members.len(), 3);
            }
            other => panic!("unexpected issue {other:?}"),
        }
    }

    #[test]
    fn empty_optional_group_passes() {
        let issues = check_choice_groups(&declaration(false), &Map::new());
        assert!(issues.is_empty());
    }

    #[test]
    fn explicit_null_counts_as_absent() {
        let issues = check_choice_groups(&declaration(true), &mapping(json!({
            "valueBoolean": null,
            "valueDateTime": "2020-01-01"
        })));
        assert!(issues.is_empty());

        let issues = check_choice_groups(&declaration(true), &mapping(json!({
            "valueBoolean": null
        })));
        assert_eq!(issues.len(), 1, "null alone leaves the required group empty");
    }

    #[test]
    fn groups_are_evaluated_independently() {
        let declaration = TypeDeclaration::builder("Patient")
            .field(
                FieldDescriptor::primitive("deceasedBoolean", PrimitiveKind::Boolean)
                    .in_choice("deceased"),
            )
            .field(
                FieldDescriptor::primitive("deceasedDateTime", PrimitiveKind::DateTime)
                    .in_choice("deceased"),
            )
            .field(
                FieldDescriptor::primitive("multipleBirthBoolean", PrimitiveKind::Boolean)
                    .in_choice("multipleBirth"),
            )
            .field(
                FieldDescriptor::primitive("multipleBirthInteger", PrimitiveKind::Integer)
                    .in_choice("multipleBirth"),
            )
            .build();

        let issues = check_choice_groups(&declaration, &mapping(json!({
            "deceasedBoolean": false,
            "deceasedDateTime": "2020-01-01",
            "multipleBirthBoolean": true,
            "multipleBirthInteger": 2
        })));
        assert_eq!(issues.len(), 2, "both violated groups are reported");
    }
}
