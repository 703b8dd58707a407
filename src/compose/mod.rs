//! Resource and backbone-element composition: the pipeline that turns an
//! untyped field-value mapping into a validated, immutable instance.

pub mod instance;

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::trace;

use crate::config::{ComposeOptions, FhirRelease};
use crate::error::{FhirDocError, Result};
use crate::schema::{Cardinality, FieldDescriptor, FieldKind, ReleaseRegistry, SchemaRegistry, TypeDeclaration};
use crate::types::{Element, Extension, PrimitiveValue};
use crate::validation::choice::is_absent;
use crate::validation::{ValidationIssue, ValidationReport, check_choice_groups};

pub use instance::{Composite, FieldValue, Resource};

enum NodeOutcome {
    Built(Composite),
    Invalid(Vec<ValidationIssue>),
}

/// Composes validated instances for one release.
///
/// Composition is a precondition-gated, all-or-nothing pipeline: the choice
/// validator and the cardinality checks run before any value is accepted,
/// and on any violation no partial instance is returned.
#[derive(Debug)]
pub struct Composer<'a> {
    registry: &'a SchemaRegistry,
    options: ComposeOptions,
}

impl<'a> Composer<'a> {
    /// Bind a composer to a release's registry.
    ///
    /// Fails with `ReleaseMismatch` when the registry was populated for a
    /// different release than the options name.
    pub fn new(registry: &'a SchemaRegistry, options: ComposeOptions) -> Result<Self> {
        if registry.release() != options.release {
            return Err(FhirDocError::ReleaseMismatch {
                expected: options.release,
                found: registry.release(),
            });
        }
        Ok(Self { registry, options })
    }

    /// A composer over the shared built-in catalogs
    pub fn shared(options: ComposeOptions) -> Composer<'static> {
        let registry = ReleaseRegistry::shared()
            .registry(options.release)
            .expect("shared registry is populated for every release");
        Composer { registry, options }
    }

    pub fn release(&self) -> FhirRelease {
        self.options.release
    }

    pub fn options(&self) -> ComposeOptions {
        self.options
    }

    /// Compose a resource instance from an untyped wire mapping.
    pub fn compose(&self, type_tag: &str, mapping: &Map<String, Value>) -> Result<Resource> {
        let declaration = self.registry.get(type_tag)?.clone();
        trace!(
            release = self.release().short_name(),
            type_tag, "composing resource"
        );

        match self.compose_node(&declaration, mapping, true)? {
            NodeOutcome::Built(root) => Ok(Resource::new(self.release(), root)),
            NodeOutcome::Invalid(issues) => {
                let mut report = ValidationReport::new(type_tag);
                report.extend(issues);
                Err(FhirDocError::Validation(report))
            }
        }
    }

    /// Export an instance back to its wire mapping.
    ///
    /// Fails with `ReleaseMismatch` when the instance was composed under a
    /// different release than this composer is scoped to.
    pub fn export(&self, resource: &Resource) -> Result<Map<String, Value>> {
        self.check_release(resource)?;
        Ok(resource.to_wire())
    }

    /// Re-run the choice-constraint validator over an instance.
    ///
    /// Instances are immutable, so this holds by construction; the entry
    /// point exists for callers that rebuild instances from modified wire
    /// mappings and as the cross-release acceptance gate.
    pub fn revalidate(&self, resource: &Resource) -> Result<()> {
        self.check_release(resource)?;
        let issues = check_choice_groups(resource.root().declaration(), &resource.root().to_wire());
        if issues.is_empty() {
            Ok(())
        } else {
            let mut report = ValidationReport::new(resource.type_tag());
            report.extend(issues);
            Err(FhirDocError::Validation(report))
        }
    }

    fn check_release(&self, resource: &Resource) -> Result<()> {
        if resource.release() != self.release() {
            return Err(FhirDocError::ReleaseMismatch {
                expected: self.release(),
                found: resource.release(),
            });
        }
        Ok(())
    }

    fn compose_node(
        &self,
        declaration: &Arc<TypeDeclaration>,
        mapping: &Map<String, Value>,
        is_root: bool,
    ) -> Result<NodeOutcome> {
        // Precondition gate: choice groups first, then plain cardinality.
        let mut issues = check_choice_groups(declaration, mapping);

        for field in declaration.fields() {
            if field.cardinality().is_required()
                && field.choice_group().is_none()
                && is_absent(mapping, field.name())
            {
                issues.push(ValidationIssue::MissingRequiredField {
                    field: field.name().to_string(),
                });
            }
        }

        let element = self.parse_element(mapping, &mut issues);

        for key in mapping.keys() {
            if key == "id" || key == "extension" {
                continue;
            }
            if is_root && key == "resourceType" {
                // The tag is declaration-fixed, never taken from input; a
                // self-describing wire form may repeat it but not contradict it.
                if mapping[key] != Value::String(declaration.type_tag().to_string()) {
                    issues.push(ValidationIssue::FieldTypeError {
                        field: "resourceType".to_string(),
                        expected: format!("the fixed type tag {:?}", declaration.type_tag()),
                        value: mapping[key].clone(),
                    });
                }
                continue;
            }
            if declaration.field_by_external(key).is_none() && self.options.strict_unknown_fields {
                issues.push(ValidationIssue::UnknownField { field: key.clone() });
            }
        }

        let mut values = Vec::with_capacity(declaration.fields().len());
        for field in declaration.fields() {
            let value = match mapping.get(field.name()) {
                None | Some(Value::Null) => None,
                Some(raw) => self.coerce_field(field, raw, &mut issues)?,
            };
            values.push(value);
        }

        if issues.is_empty() {
            Ok(NodeOutcome::Built(Composite::new(
                declaration.clone(),
                element,
                values,
            )))
        } else {
            Ok(NodeOutcome::Invalid(issues))
        }
    }

    fn parse_element(
        &self,
        mapping: &Map<String, Value>,
        issues: &mut Vec<ValidationIssue>,
    ) -> Element {
        let mut element = Element::new();

        match mapping.get("id") {
            None | Some(Value::Null) => {}
            Some(Value::String(id)) => element.id = Some(id.clone()),
            Some(other) => issues.push(ValidationIssue::FieldTypeError {
                field: "id".to_string(),
                expected: "string".to_string(),
                value: other.clone(),
            }),
        }

        match mapping.get("extension") {
            None | Some(Value::Null) => {}
            Some(Value::Array(items)) => {
                for (index, item) in items.iter().enumerate() {
                    let parsed = item
                        .as_object()
                        .ok_or_else(|| "extension entries must be objects".to_string())
                        .and_then(Extension::from_wire);
                    match parsed {
                        Ok(extension) => element.extensions.push(extension),
                        Err(message) => issues.push(ValidationIssue::FieldTypeError {
                            field: format!("extension[{index}]"),
                            expected: message,
                            value: item.clone(),
                        }),
                    }
                }
            }
            Some(other) => issues.push(ValidationIssue::FieldTypeError {
                field: "extension".to_string(),
                expected: "array of extension objects".to_string(),
                value: other.clone(),
            }),
        }

        element
    }

    fn coerce_field(
        &self,
        field: &FieldDescriptor,
        raw: &Value,
        issues: &mut Vec<ValidationIssue>,
    ) -> Result<Option<FieldValue>> {
        if field.cardinality() == Cardinality::Repeating {
            let Value::Array(items) = raw else {
                issues.push(ValidationIssue::FieldTypeError {
                    field: field.name().to_string(),
                    expected: format!("array of {}", field.kind().describe()),
                    value: raw.clone(),
                });
                return Ok(None);
            };

            // Input order and duplicates are preserved exactly.
            let mut sequence = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let path = format!("{}[{index}]", field.name());
                if let Some(value) = self.coerce_single(field, item, &path, issues)? {
                    sequence.push(value);
                }
            }
            if sequence.len() == items.len() {
                Ok(Some(FieldValue::Sequence(sequence)))
            } else {
                Ok(None)
            }
        } else if raw.is_array() {
            issues.push(ValidationIssue::FieldTypeError {
                field: field.name().to_string(),
                expected: format!("a single {}", field.kind().describe()),
                value: raw.clone(),
            });
            Ok(None)
        } else {
            self.coerce_single(field, raw, field.name(), issues)
        }
    }

    fn coerce_single(
        &self,
        field: &FieldDescriptor,
        raw: &Value,
        path: &str,
        issues: &mut Vec<ValidationIssue>,
    ) -> Result<Option<FieldValue>> {
        match field.kind() {
            FieldKind::Primitive(kind) => match PrimitiveValue::parse(kind, raw) {
                Ok(value) => Ok(Some(FieldValue::Primitive(value))),
                Err(lexical) => {
                    issues.push(ValidationIssue::FieldTypeError {
                        field: path.to_string(),
                        expected: lexical.to_string(),
                        value: raw.clone(),
                    });
                    Ok(None)
                }
            },
            FieldKind::Composite(_) | FieldKind::Reference(_) => {
                let tag = field
                    .kind()
                    .composite_tag()
                    .expect("composite-shaped kinds carry a tag");
                let Value::Object(nested) = raw else {
                    issues.push(ValidationIssue::FieldTypeError {
                        field: path.to_string(),
                        expected: field.kind().describe(),
                        value: raw.clone(),
                    });
                    return Ok(None);
                };

                // A missing nested declaration is a catalog bug, not an
                // input condition; it propagates as UnknownType.
                let declaration = self.registry.get(tag)?.clone();
                match self.compose_node(&declaration, nested, false)? {
                    NodeOutcome::Built(composite) => Ok(Some(FieldValue::Composite(composite))),
                    NodeOutcome::Invalid(nested_issues) => {
                        issues.extend(
                            nested_issues
                                .into_iter()
                                .map(|issue| issue.prefixed(path)),
                        );
                        Ok(None)
                    }
                }
            }
        }
    }
}
