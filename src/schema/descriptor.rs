// Field descriptors: the static shape of one field of a declared type

use crate::types::PrimitiveKind;

/// Cardinality of a declared field.
///
/// Choice-group members are always single-valued; repetition and choice
/// membership are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Exactly one value must be present
    Required,
    /// Zero or one value
    Optional,
    /// Zero or more values, input order preserved
    Repeating,
}

impl Cardinality {
    pub fn is_required(&self) -> bool {
        matches!(self, Cardinality::Required)
    }

    pub fn is_repeating(&self) -> bool {
        matches!(self, Cardinality::Repeating)
    }
}

/// The declared value kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// An opaque validated scalar
    Primitive(PrimitiveKind),
    /// A nested composite, resolved by type tag in the same release
    Composite(&'static str),
    /// A pointer to another resource. The permissible target type tags are
    /// schema metadata for external resolution, not a composition-time check;
    /// the value itself is coerced through the release's `Reference` shape.
    Reference(&'static [&'static str]),
}

impl FieldKind {
    /// Human-readable kind name for diagnostics
    pub fn describe(&self) -> String {
        match self {
            FieldKind::Primitive(kind) => kind.name().to_string(),
            FieldKind::Composite(tag) => (*tag).to_string(),
            FieldKind::Reference(targets) => format!("Reference({})", targets.join(" | ")),
        }
    }

    /// The type tag the value is coerced through, if composite-shaped
    pub fn composite_tag(&self) -> Option<&'static str> {
        match self {
            FieldKind::Primitive(_) => None,
            FieldKind::Composite(tag) => Some(tag),
            FieldKind::Reference(_) => Some("Reference"),
        }
    }
}

/// Static description of one field: external wire name, internal binding
/// name, value kind, cardinality and optional choice-group membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: &'static str,
    binding: &'static str,
    kind: FieldKind,
    cardinality: Cardinality,
    choice_group: Option<&'static str>,
}

impl FieldDescriptor {
    pub fn primitive(name: &'static str, kind: PrimitiveKind) -> Self {
        Self::new(name, FieldKind::Primitive(kind))
    }

    pub fn composite(name: &'static str, type_tag: &'static str) -> Self {
        Self::new(name, FieldKind::Composite(type_tag))
    }

    pub fn reference(name: &'static str, targets: &'static [&'static str]) -> Self {
        Self::new(name, FieldKind::Reference(targets))
    }

    fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            binding: name,
            kind,
            cardinality: Cardinality::Optional,
            choice_group: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.cardinality = Cardinality::Required;
        self
    }

    pub fn repeating(mut self) -> Self {
        self.cardinality = Cardinality::Repeating;
        self
    }

    /// Mark this field as one alternative of a choice group
    pub fn in_choice(mut self, group: &'static str) -> Self {
        self.choice_group = Some(group);
        self
    }

    /// Set the internal binding name, used where the external name collides
    /// with a reserved identifier
    pub fn bound_as(mut self, binding: &'static str) -> Self {
        self.binding = binding;
        self
    }

    /// External (wire) name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Internal binding name; equals `name()` unless aliased
    pub fn binding(&self) -> &'static str {
        self.binding
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn choice_group(&self) -> Option<&'static str> {
        self.choice_group
    }

    /// Permissible Reference target type tags, if this is a reference field
    pub fn reference_targets(&self) -> Option<&'static [&'static str]> {
        match self.kind {
            FieldKind::Reference(targets) => Some(targets),
            _ => None,
        }
    }
}

/// A named set of mutually exclusive field alternatives representing one
/// logical value. At most one member may be populated; a required group must
/// have exactly one populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceGroup {
    pub tag: &'static str,
    pub members: Vec<&'static str>,
    pub required: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_defaults() {
        let field = FieldDescriptor::primitive("status", PrimitiveKind::Code);
        assert_eq!(field.name(), "status");
        assert_eq!(field.binding(), "status");
        assert_eq!(field.cardinality(), Cardinality::Optional);
        assert!(field.choice_group().is_none());
    }

    #[test]
    fn binding_alias() {
        let field = FieldDescriptor::composite("class", "Coding")
            .required()
            .bound_as("class_code");
        assert_eq!(field.name(), "class");
        assert_eq!(field.binding(), "class_code");
        assert!(field.cardinality().is_required());
    }

    #[test]
    fn reference_targets_are_metadata() {
        let field = FieldDescriptor::reference("subject", &["Patient", "Group"]);
        assert_eq!(field.reference_targets(), Some(["Patient", "Group"].as_slice()));
        assert_eq!(field.kind().composite_tag(), Some("Reference"));
        assert_eq!(field.kind().describe(), "Reference(Patient | Group)");
    }
}
