// Resource declarations of the 3.0.2 release

use crate::schema::{FieldDescriptor, SchemaRegistry, TypeDeclaration};
use crate::types::PrimitiveKind;

pub(super) fn register(registry: &mut SchemaRegistry) {
    registry.register(patient());
    registry.register(patient_animal());
    registry.register(patient_communication());
    registry.register(patient_contact());
    registry.register(patient_link());
    registry.register(device_metric());
    registry.register(device_metric_calibration());
}

fn patient() -> TypeDeclaration {
    TypeDeclaration::builder("Patient")
        .field(FieldDescriptor::composite("identifier", "Identifier").repeating())
        .field(FieldDescriptor::primitive("active", PrimitiveKind::Boolean))
        .field(FieldDescriptor::composite("name", "HumanName").repeating())
        .field(FieldDescriptor::composite("telecom", "ContactPoint").repeating())
        .field(FieldDescriptor::primitive("gender", PrimitiveKind::Code))
        .field(FieldDescriptor::primitive("birthDate", PrimitiveKind::Date))
        .field(
            FieldDescriptor::primitive("deceasedBoolean", PrimitiveKind::Boolean)
                .in_choice("deceased"),
        )
        .field(
            FieldDescriptor::primitive("deceasedDateTime", PrimitiveKind::DateTime)
                .in_choice("deceased"),
        )
        .field(FieldDescriptor::composite("address", "Address").repeating())
        .field(FieldDescriptor::composite("maritalStatus", "CodeableConcept"))
        .field(
            FieldDescriptor::primitive("multipleBirthBoolean", PrimitiveKind::Boolean)
                .in_choice("multipleBirth"),
        )
        .field(
            FieldDescriptor::primitive("multipleBirthInteger", PrimitiveKind::Integer)
                .in_choice("multipleBirth"),
        )
        .field(FieldDescriptor::composite("photo", "Attachment").repeating())
        .field(FieldDescriptor::composite("contact", "PatientContact").repeating())
        .field(FieldDescriptor::composite("animal", "PatientAnimal"))
        .field(FieldDescriptor::composite("communication", "PatientCommunication").repeating())
        .field(
            FieldDescriptor::reference("generalPractitioner", &["Organization", "Practitioner"])
                .repeating(),
        )
        .field(FieldDescriptor::reference("managingOrganization", &["Organization"]))
        .field(FieldDescriptor::composite("link", "PatientLink").repeating())
        .build()
}

fn patient_animal() -> TypeDeclaration {
    TypeDeclaration::builder("PatientAnimal")
        .field(FieldDescriptor::composite("species", "CodeableConcept").required())
        .field(FieldDescriptor::composite("breed", "CodeableConcept"))
        .field(FieldDescriptor::composite("genderStatus", "CodeableConcept"))
        .build()
}

fn patient_communication() -> TypeDeclaration {
    TypeDeclaration::builder("PatientCommunication")
        .field(FieldDescriptor::composite("language", "CodeableConcept").required())
        .field(FieldDescriptor::primitive("preferred", PrimitiveKind::Boolean))
        .build()
}

fn patient_contact() -> TypeDeclaration {
    TypeDeclaration::builder("PatientContact")
        .field(FieldDescriptor::composite("relationship", "CodeableConcept").repeating())
        .field(FieldDescriptor::composite("name", "HumanName"))
        .field(FieldDescriptor::composite("telecom", "ContactPoint").repeating())
        .field(FieldDescriptor::composite("address", "Address"))
        .field(FieldDescriptor::primitive("gender", PrimitiveKind::Code))
        .field(FieldDescriptor::reference("organization", &["Organization"]))
        .field(FieldDescriptor::composite("period", "Period"))
        .build()
}

fn patient_link() -> TypeDeclaration {
    TypeDeclaration::builder("PatientLink")
        .field(FieldDescriptor::reference("other", &["Patient", "RelatedPerson"]).required())
        .field(
            FieldDescriptor::primitive("type", PrimitiveKind::Code)
                .required()
                .bound_as("type_code"),
        )
        .build()
}

fn device_metric() -> TypeDeclaration {
    TypeDeclaration::builder("DeviceMetric")
        .field(FieldDescriptor::composite("identifier", "Identifier").required())
        .field(
            FieldDescriptor::composite("type", "CodeableConcept")
                .required()
                .bound_as("type_concept"),
        )
        .field(FieldDescriptor::composite("unit", "CodeableConcept"))
        .field(FieldDescriptor::reference("source", &["Device"]))
        .field(FieldDescriptor::reference("parent", &["DeviceComponent"]))
        .field(FieldDescriptor::primitive("operationalStatus", PrimitiveKind::Code))
        .field(FieldDescriptor::primitive("color", PrimitiveKind::Code))
        .field(FieldDescriptor::primitive("category", PrimitiveKind::Code).required())
        .field(FieldDescriptor::composite("measurementPeriod", "Timing"))
        .field(
            FieldDescriptor::composite("calibration", "DeviceMetricCalibration").repeating(),
        )
        .build()
}

fn device_metric_calibration() -> TypeDeclaration {
    TypeDeclaration::builder("DeviceMetricCalibration")
        .field(FieldDescriptor::primitive("type", PrimitiveKind::Code).bound_as("type_code"))
        .field(FieldDescriptor::primitive("state", PrimitiveKind::Code))
        .field(FieldDescriptor::primitive("time", PrimitiveKind::Instant))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patient_carries_two_optional_choice_groups() {
        let patient = patient();
        let deceased = patient.choice_group("deceased").unwrap();
        assert_eq!(deceased.members, vec!["deceasedBoolean", "deceasedDateTime"]);
        assert!(!deceased.required);

        let multiple_birth = patient.choice_group("multipleBirth").unwrap();
        assert_eq!(
            multiple_birth.members,
            vec!["multipleBirthBoolean", "multipleBirthInteger"]
        );
        assert!(!multiple_birth.required);
    }

    #[test]
    fn patient_link_type_is_aliased_and_required() {
        let link = patient_link();
        let (index, field) = link.field("type").unwrap();
        let (alias_index, _) = link.field("type_code").unwrap();
        assert_eq!(index, alias_index);
        assert!(field.cardinality().is_required());
    }

    #[test]
    fn device_metric_required_fields() {
        let metric = device_metric();
        for name in ["identifier", "type", "category"] {
            let (_, field) = metric.field(name).unwrap();
            assert!(field.cardinality().is_required(), "{name} must be required");
        }
    }
}
