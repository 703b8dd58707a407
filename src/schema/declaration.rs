// Type declarations: the ordered field set of one resource or backbone type

use std::collections::HashMap;

use super::descriptor::{Cardinality, ChoiceGroup, FieldDescriptor};

/// The static declaration of one resource or backbone element type: its
/// ordered field descriptors plus derived lookup and choice-group indexes.
///
/// Built once through [`DeclarationBuilder`]; malformed declarations are
/// configuration errors and panic at build time.
#[derive(Debug)]
pub struct TypeDeclaration {
    type_tag: &'static str,
    fields: Vec<FieldDescriptor>,
    by_external: HashMap<&'static str, usize>,
    by_binding: HashMap<&'static str, usize>,
    choice_groups: Vec<ChoiceGroup>,
}

impl TypeDeclaration {
    pub fn builder(type_tag: &'static str) -> DeclarationBuilder {
        DeclarationBuilder {
            type_tag,
            fields: Vec::new(),
            required_groups: Vec::new(),
        }
    }

    /// The fixed type tag this declaration describes
    pub fn type_tag(&self) -> &'static str {
        self.type_tag
    }

    /// Field descriptors in declaration order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a field by its external wire name
    pub fn field_by_external(&self, name: &str) -> Option<(usize, &FieldDescriptor)> {
        let index = *self.by_external.get(name)?;
        Some((index, &self.fields[index]))
    }

    /// Look up a field by its internal binding name
    pub fn field_by_binding(&self, binding: &str) -> Option<(usize, &FieldDescriptor)> {
        let index = *self.by_binding.get(binding)?;
        Some((index, &self.fields[index]))
    }

    /// Resolve a field by external or binding name
    pub fn field(&self, name: &str) -> Option<(usize, &FieldDescriptor)> {
        self.field_by_external(name)
            .or_else(|| self.field_by_binding(name))
    }

    /// Derived choice-group index, ordered by first member appearance
    pub fn choice_groups(&self) -> &[ChoiceGroup] {
        &self.choice_groups
    }

    pub fn choice_group(&self, tag: &str) -> Option<&ChoiceGroup> {
        self.choice_groups.iter().find(|group| group.tag == tag)
    }
}

/// Builder for [`TypeDeclaration`].
#[derive(Debug)]
pub struct DeclarationBuilder {
    type_tag: &'static str,
    fields: Vec<FieldDescriptor>,
    required_groups: Vec<&'static str>,
}

impl DeclarationBuilder {
    pub fn field(mut self, descriptor: FieldDescriptor) -> Self {
        self.fields.push(descriptor);
        self
    }

    /// Mark a choice group as required: exactly one member must be populated
    pub fn require_choice(mut self, group: &'static str) -> Self {
        self.required_groups.push(group);
        self
    }

    /// Build the declaration, deriving lookup and choice-group indexes.
    ///
    /// # Panics
    ///
    /// Panics on duplicate external or binding names, a choice group with
    /// fewer than two members, a repeating or required choice member, or a
    /// required flag naming an unknown group. These are declaration bugs,
    /// not input conditions.
    pub fn build(self) -> TypeDeclaration {
        let type_tag = self.type_tag;
        let mut by_external = HashMap::with_capacity(self.fields.len());
        let mut by_binding = HashMap::with_capacity(self.fields.len());
        let mut choice_groups: Vec<ChoiceGroup> = Vec::new();

        for (index, field) in self.fields.iter().enumerate() {
            if by_external.insert(field.name(), index).is_some() {
                panic!("{type_tag}: duplicate field name {:?}", field.name());
            }
            if by_binding.insert(field.binding(), index).is_some() {
                panic!("{type_tag}: duplicate binding name {:?}", field.binding());
            }

            if let Some(tag) = field.choice_group() {
                match field.cardinality() {
                    Cardinality::Optional => {}
                    other => panic!(
                        "{type_tag}: choice member {:?} must be optional-single, is {other:?}",
                        field.name()
                    ),
                }
                match choice_groups.iter_mut().find(|group| group.tag == tag) {
                    Some(group) => group.members.push(field.name()),
                    None => choice_groups.push(ChoiceGroup {
                        tag,
                        members: vec![field.name()],
                        required: false,
                    }),
                }
            }
        }

        for group in &choice_groups {
            if group.members.len() < 2 {
                panic!(
                    "{type_tag}: choice group {:?} needs at least two members",
                    group.tag
                );
            }
        }

        for tag in &self.required_groups {
            let group = choice_groups
                .iter_mut()
                .find(|group| group.tag == *tag)
                .unwrap_or_else(|| panic!("{type_tag}: unknown choice group {tag:?}"));
            group.required = true;
        }

        TypeDeclaration {
            type_tag,
            fields: self.fields,
            by_external,
            by_binding,
            choice_groups,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PrimitiveKind;

    fn report_declaration() -> TypeDeclaration {
        TypeDeclaration::builder("Report")
            .field(FieldDescriptor::primitive("status", PrimitiveKind::Code).required())
            .field(
                FieldDescriptor::primitive("effectiveDateTime", PrimitiveKind::DateTime)
                    .in_choice("effective"),
            )
            .field(
                FieldDescriptor::composite("effectivePeriod", "Period").in_choice("effective"),
            )
            .field(FieldDescriptor::primitive("note", PrimitiveKind::String).repeating())
            .build()
    }

    #[test]
    fn derives_choice_index() {
        let declaration = report_declaration();
        let group = declaration.choice_group("effective").unwrap();
        assert_eq!(group.members, vec!["effectiveDateTime", "effectivePeriod"]);
        assert!(!group.required);
    }

    #[test]
    fn require_choice_marks_group() {
        let declaration = TypeDeclaration::builder("Report")
            .field(
                FieldDescriptor::primitive("valueBoolean", PrimitiveKind::Boolean)
                    .in_choice("value"),
            )
            .field(FieldDescriptor::composite("valuePeriod", "Period").in_choice("value"))
            .require_choice("value")
            .build();
        assert!(declaration.choice_group("value").unwrap().required);
    }

    #[test]
    fn field_lookup_by_either_name() {
        let declaration = TypeDeclaration::builder("History")
            .field(
                FieldDescriptor::composite("class", "Coding")
                    .required()
                    .bound_as("class_code"),
            )
            .build();

        let (_, by_external) = declaration.field("class").unwrap();
        let (_, by_binding) = declaration.field("class_code").unwrap();
        assert_eq!(by_external.name(), by_binding.name());
        assert!(declaration.field("period").is_none());
    }

    #[test]
    #[should_panic(expected = "duplicate field name")]
    fn duplicate_field_panics() {
        TypeDeclaration::builder("Broken")
            .field(FieldDescriptor::primitive("status", PrimitiveKind::Code))
            .field(FieldDescriptor::primitive("status", PrimitiveKind::String))
            .build();
    }

    #[test]
    #[should_panic(expected = "at least two members")]
    fn singleton_choice_group_panics() {
        TypeDeclaration::builder("Broken")
            .field(
                FieldDescriptor::primitive("valueBoolean", PrimitiveKind::Boolean)
                    .in_choice("value"),
            )
            .build();
    }

    #[test]
    #[should_panic(expected = "unknown choice group")]
    fn unknown_required_group_panics() {
        TypeDeclaration::builder("Broken")
            .field(FieldDescriptor::primitive("status", PrimitiveKind::Code))
            .require_choice("value")
            .build();
    }
}
