use thiserror::Error;

use crate::config::FhirRelease;
use crate::validation::ValidationReport;

/// Failures surfaced by declaration lookup and composition.
///
/// Every failure is detected at composition time and attributed to its
/// source; none is process-fatal. The sole fatal condition in the crate is a
/// malformed or duplicate static declaration, which panics at registry build
/// time as a configuration bug.
#[derive(Error, Debug)]
pub enum FhirDocError {
    /// The (release, type tag) pair is not present in the registry
    #[error("unknown type {type_tag:?} in release {release}")]
    UnknownType {
        release: FhirRelease,
        type_tag: String,
    },

    /// Data composed under one release was presented to a composition path
    /// scoped to another
    #[error(
        "release mismatch: composer is scoped to {expected}, instance was composed under {found}"
    )]
    ReleaseMismatch {
        expected: FhirRelease,
        found: FhirRelease,
    },

    /// The input mapping violated the structural rules of its declaration;
    /// all violations are aggregated into one report
    #[error("{0}")]
    Validation(ValidationReport),
}

impl FhirDocError {
    /// The aggregated report, when this is a validation failure
    pub fn validation_report(&self) -> Option<&ValidationReport> {
        match self {
            FhirDocError::Validation(report) => Some(report),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FhirDocError>;
