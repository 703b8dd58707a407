use serde::{Deserialize, Serialize};

/// A release of the FHIR specification supported by this crate.
///
/// Releases are mutually incompatible: declarations and composed instances
/// are scoped to exactly one release and are never shared or converted
/// across releases.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FhirRelease {
    #[serde(rename = "3.0.2")]
    Stu3,
    #[serde(rename = "4.0.1")]
    R4,
}

impl FhirRelease {
    /// Get all supported releases
    pub fn all() -> &'static [FhirRelease] {
        &[FhirRelease::Stu3, FhirRelease::R4]
    }

    /// Get the specification version string for this release
    pub fn version(&self) -> &'static str {
        match self {
            FhirRelease::Stu3 => "3.0.2",
            FhirRelease::R4 => "4.0.1",
        }
    }

    /// Get a short identifier for this release (e.g., "stu3", "r4")
    pub fn short_name(&self) -> &'static str {
        match self {
            FhirRelease::Stu3 => "stu3",
            FhirRelease::R4 => "r4",
        }
    }
}

impl std::fmt::Display for FhirRelease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.short_name(), self.version())
    }
}

/// Options recognized by the composition pipeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComposeOptions {
    /// Release whose declaration catalog drives composition
    pub release: FhirRelease,

    /// Whether unrecognized mapping keys are rejected (`UnknownField`) or
    /// silently ignored
    pub strict_unknown_fields: bool,
}

impl ComposeOptions {
    /// Lenient options for a release: unknown mapping keys are ignored
    pub fn new(release: FhirRelease) -> Self {
        Self {
            release,
            strict_unknown_fields: false,
        }
    }

    /// Strict options for a release: unknown mapping keys fail composition
    pub fn strict(release: FhirRelease) -> Self {
        Self {
            release,
            strict_unknown_fields: true,
        }
    }

    pub fn with_strict_unknown_fields(mut self, strict: bool) -> Self {
        self.strict_unknown_fields = strict;
        self
    }
}
