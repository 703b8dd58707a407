// Release-scoped declaration registries

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use tracing::debug;

use crate::config::FhirRelease;
use crate::error::{FhirDocError, Result};

use super::declaration::TypeDeclaration;

/// All type declarations of one release, keyed by type tag.
///
/// Populated once from the release's static catalog and read-only
/// afterwards; lookups are by exact tag match.
#[derive(Debug)]
pub struct SchemaRegistry {
    release: FhirRelease,
    declarations: HashMap<&'static str, Arc<TypeDeclaration>>,
}

impl SchemaRegistry {
    pub fn new(release: FhirRelease) -> Self {
        Self {
            release,
            declarations: HashMap::new(),
        }
    }

    pub fn release(&self) -> FhirRelease {
        self.release
    }

    /// Register a declaration under its type tag.
    ///
    /// # Panics
    ///
    /// Panics if the tag is already registered for this release — a second
    /// registration is a configuration bug, not an input condition.
    pub fn register(&mut self, declaration: TypeDeclaration) {
        let tag = declaration.type_tag();
        if self
            .declarations
            .insert(tag, Arc::new(declaration))
            .is_some()
        {
            panic!(
                "declaration {tag:?} registered twice for release {}",
                self.release
            );
        }
    }

    /// Resolve the declaration for a type tag
    pub fn get(&self, type_tag: &str) -> Result<&Arc<TypeDeclaration>> {
        self.declarations
            .get(type_tag)
            .ok_or_else(|| FhirDocError::UnknownType {
                release: self.release,
                type_tag: type_tag.to_string(),
            })
    }

    pub fn contains(&self, type_tag: &str) -> bool {
        self.declarations.contains_key(type_tag)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Iterate over the registered type tags
    pub fn type_tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.declarations.keys().copied()
    }
}

/// Process-wide table of one fully isolated [`SchemaRegistry`] per release.
///
/// Declarations and instances are never shared across releases; the release
/// identifier is an explicit parameter to every lookup.
#[derive(Debug)]
pub struct ReleaseRegistry {
    registries: HashMap<FhirRelease, SchemaRegistry>,
}

static SHARED: LazyLock<ReleaseRegistry> = LazyLock::new(|| {
    let mut registry = ReleaseRegistry::empty();
    for &release in FhirRelease::all() {
        let schemas = crate::catalog::build(release);
        debug!(
            release = release.short_name(),
            declarations = schemas.len(),
            "populated schema registry"
        );
        registry.insert(schemas);
    }
    registry
});

impl ReleaseRegistry {
    /// An empty table, for callers supplying their own declaration catalogs
    pub fn empty() -> Self {
        Self {
            registries: HashMap::new(),
        }
    }

    /// The shared registry holding the built-in catalogs of every release.
    ///
    /// Built on first access and immutable afterwards, so it is freely
    /// shareable across threads.
    pub fn shared() -> &'static ReleaseRegistry {
        &SHARED
    }

    /// Add a release's registry to the table.
    ///
    /// # Panics
    ///
    /// Panics if the release is already present.
    pub fn insert(&mut self, registry: SchemaRegistry) {
        let release = registry.release();
        if self.registries.insert(release, registry).is_some() {
            panic!("registry for release {release} inserted twice");
        }
    }

    /// The per-release registry, if that release has been populated
    pub fn registry(&self, release: FhirRelease) -> Option<&SchemaRegistry> {
        self.registries.get(&release)
    }

    /// Resolve a (release, type tag) pair to its declaration
    pub fn resolve(&self, release: FhirRelease, type_tag: &str) -> Result<&Arc<TypeDeclaration>> {
        let registry = self
            .registries
            .get(&release)
            .ok_or_else(|| FhirDocError::UnknownType {
                release,
                type_tag: type_tag.to_string(),
            })?;
        registry.get(type_tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDescriptor;
    use crate::types::PrimitiveKind;

    fn flag_declaration() -> TypeDeclaration {
        TypeDeclaration::builder("Flag")
            .field(FieldDescriptor::primitive("status", PrimitiveKind::Code).required())
            .build()
    }

    #[test]
    fn lookup_by_exact_tag() {
        let mut registry = SchemaRegistry::new(FhirRelease::R4);
        registry.register(flag_declaration());

        assert!(registry.get("Flag").is_ok());
        let err = registry.get("flag").unwrap_err();
        assert!(matches!(err, FhirDocError::UnknownType { ref type_tag, .. } if type_tag == "flag"));
    }

    #[test]
    #[should_panic(expected = "registered twice")]
    fn duplicate_registration_panics() {
        let mut registry = SchemaRegistry::new(FhirRelease::R4);
        registry.register(flag_declaration());
        registry.register(flag_declaration());
    }

    #[test]
    fn releases_are_isolated() {
        let mut table = ReleaseRegistry::empty();
        let mut r4 = SchemaRegistry::new(FhirRelease::R4);
        r4.register(flag_declaration());
        table.insert(r4);

        assert!(table.resolve(FhirRelease::R4, "Flag").is_ok());
        assert!(matches!(
            table.resolve(FhirRelease::Stu3, "Flag"),
            Err(FhirDocError::UnknownType {
                release: FhirRelease::Stu3,
                ..
            })
        ));
    }

    #[test]
    fn shared_registry_holds_both_releases() {
        let shared = ReleaseRegistry::shared();
        assert!(shared.resolve(FhirRelease::R4, "Flag").is_ok());
        assert!(shared.resolve(FhirRelease::Stu3, "Patient").is_ok());
        // release catalogs do not leak into each other
        assert!(shared.resolve(FhirRelease::Stu3, "Flag").is_err());
        assert!(shared.resolve(FhirRelease::R4, "DeviceMetric").is_err());
    }
}
