//! # fhirdoc
//!
//! A typed FHIR document model with schema-driven structural validation.
//!
//! Resources are composed from untyped JSON mappings against static type
//! declarations and validated on the way in; a successfully composed
//! instance is immutable and structurally correct by construction.
//!
//! ## Features
//!
//! - **Choice constraints**: mutually exclusive one-of-many field groups,
//!   validated before any instance is built
//! - **Release isolation**: independent declaration catalogs for the 3.0.2
//!   and 4.0.1 releases, with no cross-release sharing
//! - **Lossless round-trips**: composed instances export back to a wire
//!   mapping equal to their accepted input
//! - **Aggregated diagnostics**: every structural violation of an input is
//!   collected into one report, attributed to its field path
//!
//! ## Quick Start
//!
//! ```rust
//! use fhirdoc::{ComposeOptions, Composer, FhirRelease};
//! use serde_json::json;
//!
//! # fn example() -> fhirdoc::Result<()> {
//! let composer = Composer::shared(ComposeOptions::new(FhirRelease::R4));
//!
//! let wire = json!({
//!     "status": "active",
//!     "code": { "text": "fall risk" },
//!     "subject": { "reference": "Patient/p1" }
//! });
//! let flag = composer.compose("Flag", wire.as_object().unwrap())?;
//!
//! assert_eq!(flag.type_tag(), "Flag");
//! assert!(flag.is_set("code"));
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod compose;
pub mod config;
pub mod error;
pub mod schema;
pub mod types;
pub mod validation;

pub use compose::{Composer, Composite, FieldValue, Resource};
pub use config::{ComposeOptions, FhirRelease};
pub use error::{FhirDocError, Result};
pub use schema::{
    Cardinality, ChoiceGroup, FieldDescriptor, FieldKind, ReleaseRegistry, SchemaRegistry,
    TypeDeclaration,
};
pub use types::{Element, Extension, PrimitiveKind, PrimitiveValue};
pub use validation::{ValidationIssue, ValidationReport, check_choice_groups};
