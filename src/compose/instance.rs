// Immutable composed instances and their wire export

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::config::FhirRelease;
use crate::schema::TypeDeclaration;
use crate::types::{Element, PrimitiveValue};

/// A coerced field value inside a composed instance.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Primitive(PrimitiveValue),
    Composite(Composite),
    /// Values of a repeating field, in input order, duplicates preserved
    Sequence(Vec<FieldValue>),
}

impl FieldValue {
    pub fn as_primitive(&self) -> Option<&PrimitiveValue> {
        match self {
            FieldValue::Primitive(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_composite(&self) -> Option<&Composite> {
        match self {
            FieldValue::Composite(composite) => Some(composite),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::Sequence(values) => Some(values),
            _ => None,
        }
    }

    /// Export back to the untyped wire form
    pub fn to_wire(&self) -> Value {
        match self {
            FieldValue::Primitive(value) => value.to_wire(),
            FieldValue::Composite(composite) => Value::Object(composite.to_wire()),
            FieldValue::Sequence(values) => {
                Value::Array(values.iter().map(FieldValue::to_wire).collect())
            }
        }
    }
}

/// A validated, immutable composite node: the declaration it was composed
/// against, its Element base, and its coerced field values.
#[derive(Debug, Clone)]
pub struct Composite {
    declaration: Arc<TypeDeclaration>,
    element: Element,
    values: Vec<Option<FieldValue>>,
}

impl Composite {
    pub(crate) fn new(
        declaration: Arc<TypeDeclaration>,
        element: Element,
        values: Vec<Option<FieldValue>>,
    ) -> Self {
        debug_assert_eq!(declaration.fields().len(), values.len());
        Self {
            declaration,
            element,
            values,
        }
    }

    /// The fixed type tag of the declaration this node was composed against
    pub fn type_tag(&self) -> &str {
        self.declaration.type_tag()
    }

    pub fn declaration(&self) -> &Arc<TypeDeclaration> {
        &self.declaration
    }

    /// The inherited identifier and extension side-channel
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Look up a populated field by external or binding name
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        let (index, _) = self.declaration.field(name)?;
        self.values[index].as_ref()
    }

    /// Whether a declared field is populated
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The literal pointer of a `Reference`-shaped node, if populated
    pub fn reference_literal(&self) -> Option<&str> {
        self.get("reference")?.as_primitive()?.as_str()
    }

    /// Export the node as a tree keyed by external field names.
    ///
    /// Declared fields, identifier and extensions round-trip unchanged;
    /// absent fields are omitted.
    pub fn to_wire(&self) -> Map<String, Value> {
        let mut wire = Map::new();

        if let Some(id) = &self.element.id {
            wire.insert("id".to_string(), Value::String(id.clone()));
        }
        if !self.element.extensions.is_empty() {
            let extensions = self
                .element
                .extensions
                .iter()
                .map(|extension| Value::Object(extension.to_wire()))
                .collect();
            wire.insert("extension".to_string(), Value::Array(extensions));
        }

        for (field, value) in self.declaration.fields().iter().zip(&self.values) {
            if let Some(value) = value {
                wire.insert(field.name().to_string(), value.to_wire());
            }
        }

        wire
    }
}

impl PartialEq for Composite {
    fn eq(&self, other: &Self) -> bool {
        self.type_tag() == other.type_tag()
            && self.element == other.element
            && self.values == other.values
    }
}

/// A top-level, independently addressable composed document.
///
/// The type tag comes from the declaration and the release from the
/// composing registry; neither is user-supplied and both are immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    release: FhirRelease,
    root: Composite,
}

impl Resource {
    pub(crate) fn new(release: FhirRelease, root: Composite) -> Self {
        Self { release, root }
    }

    /// The release this resource was composed under
    pub fn release(&self) -> FhirRelease {
        self.release
    }

    pub fn type_tag(&self) -> &str {
        self.root.type_tag()
    }

    pub fn element(&self) -> &Element {
        self.root.element()
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.root.get(name)
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.root.is_set(name)
    }

    pub fn root(&self) -> &Composite {
        &self.root
    }

    /// Export the document as a wire mapping. The `resourceType`
    /// discriminator is always present so consumers can identify the
    /// serialized form without a schema.
    pub fn to_wire(&self) -> Map<String, Value> {
        let mut wire = Map::new();
        wire.insert(
            "resourceType".to_string(),
            Value::String(self.type_tag().to_string()),
        );
        for (key, value) in self.root.to_wire() {
            wire.insert(key, value);
        }
        wire
    }
}
