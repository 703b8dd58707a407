// Resource declarations of the 4.0.1 release

use crate::schema::{FieldDescriptor, SchemaRegistry, TypeDeclaration};
use crate::types::PrimitiveKind;

pub(super) fn register(registry: &mut SchemaRegistry) {
    registry.register(account());
    registry.register(account_coverage());
    registry.register(account_guarantor());
    registry.register(diagnostic_report());
    registry.register(diagnostic_report_media());
    registry.register(encounter());
    registry.register(encounter_class_history());
    registry.register(encounter_diagnosis());
    registry.register(encounter_hospitalization());
    registry.register(encounter_location());
    registry.register(encounter_participant());
    registry.register(encounter_status_history());
    registry.register(flag());
}

fn account() -> TypeDeclaration {
    TypeDeclaration::builder("Account")
        .field(FieldDescriptor::composite("identifier", "Identifier").repeating())
        .field(FieldDescriptor::primitive("status", PrimitiveKind::Code).required())
        .field(FieldDescriptor::composite("type", "CodeableConcept").bound_as("type_concept"))
        .field(FieldDescriptor::primitive("name", PrimitiveKind::String))
        .field(
            FieldDescriptor::reference(
                "subject",
                &[
                    "Patient",
                    "Device",
                    "Practitioner",
                    "PractitionerRole",
                    "Location",
                    "HealthcareService",
                    "Organization",
                ],
            )
            .repeating(),
        )
        .field(FieldDescriptor::composite("servicePeriod", "Period"))
        .field(FieldDescriptor::composite("coverage", "AccountCoverage").repeating())
        .field(FieldDescriptor::reference("owner", &["Organization"]))
        .field(FieldDescriptor::primitive("description", PrimitiveKind::String))
        .field(FieldDescriptor::composite("guarantor", "AccountGuarantor").repeating())
        .field(FieldDescriptor::reference("partOf", &["Account"]))
        .build()
}

fn account_coverage() -> TypeDeclaration {
    TypeDeclaration::builder("AccountCoverage")
        .field(FieldDescriptor::reference("coverage", &["Coverage"]).required())
        .field(FieldDescriptor::primitive("priority", PrimitiveKind::PositiveInt))
        .build()
}

fn account_guarantor() -> TypeDeclaration {
    TypeDeclaration::builder("AccountGuarantor")
        .field(
            FieldDescriptor::reference("party", &["Patient", "RelatedPerson", "Organization"])
                .required(),
        )
        .field(FieldDescriptor::primitive("onHold", PrimitiveKind::Boolean))
        .field(FieldDescriptor::composite("period", "Period"))
        .build()
}

fn diagnostic_report() -> TypeDeclaration {
    TypeDeclaration::builder("DiagnosticReport")
        .field(FieldDescriptor::composite("identifier", "Identifier").repeating())
        .field(
            FieldDescriptor::reference(
                "basedOn",
                &[
                    "CarePlan",
                    "ImmunizationRecommendation",
                    "MedicationRequest",
                    "NutritionOrder",
                    "ServiceRequest",
                ],
            )
            .repeating(),
        )
        .field(FieldDescriptor::primitive("status", PrimitiveKind::Code).required())
        .field(FieldDescriptor::composite("category", "CodeableConcept").repeating())
        .field(FieldDescriptor::composite("code", "CodeableConcept").required())
        .field(FieldDescriptor::reference(
            "subject",
            &["Patient", "Group", "Device", "Location"],
        ))
        .field(FieldDescriptor::reference("encounter", &["Encounter"]))
        .field(
            FieldDescriptor::primitive("effectiveDateTime", PrimitiveKind::DateTime)
                .in_choice("effective"),
        )
        .field(FieldDescriptor::composite("effectivePeriod", "Period").in_choice("effective"))
        .field(FieldDescriptor::primitive("issued", PrimitiveKind::Instant))
        .field(
            FieldDescriptor::reference(
                "performer",
                &["Practitioner", "PractitionerRole", "Organization", "CareTeam"],
            )
            .repeating(),
        )
        .field(
            FieldDescriptor::reference(
                "resultsInterpreter",
                &["Practitioner", "PractitionerRole", "Organization", "CareTeam"],
            )
            .repeating(),
        )
        .field(FieldDescriptor::reference("specimen", &["Specimen"]).repeating())
        .field(FieldDescriptor::reference("result", &["Observation"]).repeating())
        .field(FieldDescriptor::reference("imagingStudy", &["ImagingStudy"]).repeating())
        .field(FieldDescriptor::composite("media", "DiagnosticReportMedia").repeating())
        .field(FieldDescriptor::primitive("conclusion", PrimitiveKind::String))
        .field(FieldDescriptor::composite("conclusionCode", "CodeableConcept").repeating())
        .field(FieldDescriptor::composite("presentedForm", "Attachment").repeating())
        .build()
}

fn diagnostic_report_media() -> TypeDeclaration {
    TypeDeclaration::builder("DiagnosticReportMedia")
        .field(FieldDescriptor::primitive("comment", PrimitiveKind::String))
        .field(FieldDescriptor::reference("link", &["Media"]).required())
        .build()
}

fn encounter() -> TypeDeclaration {
    TypeDeclaration::builder("Encounter")
        .field(FieldDescriptor::composite("identifier", "Identifier").repeating())
        .field(FieldDescriptor::primitive("status", PrimitiveKind::Code).required())
        .field(
            FieldDescriptor::composite("statusHistory", "EncounterStatusHistory").repeating(),
        )
        .field(
            FieldDescriptor::composite("class", "Coding")
                .required()
                .bound_as("class_coding"),
        )
        .field(FieldDescriptor::composite("classHistory", "EncounterClassHistory").repeating())
        .field(
            FieldDescriptor::composite("type", "CodeableConcept")
                .repeating()
                .bound_as("type_concept"),
        )
        .field(FieldDescriptor::composite("serviceType", "CodeableConcept"))
        .field(FieldDescriptor::composite("priority", "CodeableConcept"))
        .field(FieldDescriptor::reference("subject", &["Patient", "Group"]))
        .field(FieldDescriptor::reference("episodeOfCare", &["EpisodeOfCare"]).repeating())
        .field(FieldDescriptor::reference("basedOn", &["ServiceRequest"]).repeating())
        .field(FieldDescriptor::composite("participant", "EncounterParticipant").repeating())
        .field(FieldDescriptor::reference("appointment", &["Appointment"]).repeating())
        .field(FieldDescriptor::composite("period", "Period"))
        .field(FieldDescriptor::composite("length", "Duration"))
        .field(FieldDescriptor::composite("reasonCode", "CodeableConcept").repeating())
        .field(
            FieldDescriptor::reference(
                "reasonReference",
                &["Condition", "Procedure", "Observation", "ImmunizationRecommendation"],
            )
            .repeating(),
        )
        .field(FieldDescriptor::composite("diagnosis", "EncounterDiagnosis").repeating())
        .field(FieldDescriptor::reference("account", &["Account"]).repeating())
        .field(FieldDescriptor::composite("hospitalization", "EncounterHospitalization"))
        .field(FieldDescriptor::composite("location", "EncounterLocation").repeating())
        .field(FieldDescriptor::reference("serviceProvider", &["Organization"]))
        .field(FieldDescriptor::reference("partOf", &["Encounter"]))
        .build()
}

fn encounter_class_history() -> TypeDeclaration {
    TypeDeclaration::builder("EncounterClassHistory")
        .field(
            FieldDescriptor::composite("class", "Coding")
                .required()
                .bound_as("class_coding"),
        )
        .field(FieldDescriptor::composite("period", "Period").required())
        .build()
}

fn encounter_diagnosis() -> TypeDeclaration {
    TypeDeclaration::builder("EncounterDiagnosis")
        .field(FieldDescriptor::reference("condition", &["Condition", "Procedure"]).required())
        .field(FieldDescriptor::composite("use", "CodeableConcept").bound_as("use_concept"))
        .field(FieldDescriptor::primitive("rank", PrimitiveKind::PositiveInt))
        .build()
}

fn encounter_hospitalization() -> TypeDeclaration {
    TypeDeclaration::builder("EncounterHospitalization")
        .field(FieldDescriptor::composite("preAdmissionIdentifier", "Identifier"))
        .field(FieldDescriptor::reference("origin", &["Location", "Organization"]))
        .field(FieldDescriptor::composite("admitSource", "CodeableConcept"))
        .field(FieldDescriptor::composite("reAdmission", "CodeableConcept"))
        .field(FieldDescriptor::composite("dietPreference", "CodeableConcept").repeating())
        .field(FieldDescriptor::composite("specialCourtesy", "CodeableConcept").repeating())
        .field(FieldDescriptor::composite("specialArrangement", "CodeableConcept").repeating())
        .field(FieldDescriptor::reference("destination", &["Location", "Organization"]))
        .field(FieldDescriptor::composite("dischargeDisposition", "CodeableConcept"))
        .build()
}

fn encounter_location() -> TypeDeclaration {
    TypeDeclaration::builder("EncounterLocation")
        .field(FieldDescriptor::reference("location", &["Location"]).required())
        .field(FieldDescriptor::primitive("status", PrimitiveKind::Code))
        .field(FieldDescriptor::composite("physicalType", "CodeableConcept"))
        .field(FieldDescriptor::composite("period", "Period"))
        .build()
}

fn encounter_participant() -> TypeDeclaration {
    TypeDeclaration::builder("EncounterParticipant")
        .field(
            FieldDescriptor::composite("type", "CodeableConcept")
                .repeating()
                .bound_as("type_concept"),
        )
        .field(FieldDescriptor::composite("period", "Period"))
        .field(FieldDescriptor::reference(
            "individual",
            &["Practitioner", "PractitionerRole", "RelatedPerson"],
        ))
        .build()
}

fn encounter_status_history() -> TypeDeclaration {
    TypeDeclaration::builder("EncounterStatusHistory")
        .field(FieldDescriptor::primitive("status", PrimitiveKind::Code).required())
        .field(FieldDescriptor::composite("period", "Period").required())
        .build()
}

fn flag() -> TypeDeclaration {
    TypeDeclaration::builder("Flag")
        .field(FieldDescriptor::composite("identifier", "Identifier").repeating())
        .field(FieldDescriptor::primitive("status", PrimitiveKind::Code).required())
        .field(FieldDescriptor::composite("category", "CodeableConcept").repeating())
        .field(FieldDescriptor::composite("code", "CodeableConcept").required())
        .field(
            FieldDescriptor::reference(
                "subject",
                &[
                    "Patient",
                    "Location",
                    "Group",
                    "Organization",
                    "Practitioner",
                    "PlanDefinition",
                    "Medication",
                    "Procedure",
                ],
            )
            .required(),
        )
        .field(FieldDescriptor::composite("period", "Period"))
        .field(FieldDescriptor::reference("encounter", &["Encounter"]))
        .field(FieldDescriptor::reference(
            "author",
            &["Device", "Organization", "Patient", "Practitioner", "PractitionerRole"],
        ))
        .build()
}
