//! Built-in declaration catalogs, one per release.
//!
//! Each release's catalog is assembled independently; no declaration is
//! shared across releases even when the field sets happen to coincide. The
//! shared data types come first, then the release's resources and their
//! backbone elements.

mod datatypes;
mod r4;
mod stu3;

use crate::config::FhirRelease;
use crate::schema::SchemaRegistry;

/// Build the full declaration catalog of one release.
pub fn build(release: FhirRelease) -> SchemaRegistry {
    let mut registry = SchemaRegistry::new(release);
    datatypes::register(&mut registry, release);
    match release {
        FhirRelease::Stu3 => stu3::register(&mut registry),
        FhirRelease::R4 => r4::register(&mut registry),
    }
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_release_builds() {
        for &release in FhirRelease::all() {
            let registry = build(release);
            assert_eq!(registry.release(), release);
            assert!(registry.contains("Reference"));
            assert!(registry.contains("CodeableConcept"));
        }
    }

    #[test]
    fn nested_tags_resolve_within_their_release() {
        // every composite-shaped field must point at a registered tag,
        // otherwise composition would surface a catalog bug as UnknownType
        for &release in FhirRelease::all() {
            let registry = build(release);
            for tag in registry.type_tags().collect::<Vec<_>>() {
                let declaration = registry.get(tag).unwrap().clone();
                for field in declaration.fields() {
                    if let Some(nested) = field.kind().composite_tag() {
                        assert!(
                            registry.contains(nested),
                            "{release}: {tag}.{} points at unregistered {nested}",
                            field.name()
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn reference_shape_differs_across_releases() {
        let stu3 = build(FhirRelease::Stu3);
        let r4 = build(FhirRelease::R4);
        assert!(stu3.get("Reference").unwrap().field("type").is_none());
        assert!(r4.get("Reference").unwrap().field("type").is_some());
    }
}
