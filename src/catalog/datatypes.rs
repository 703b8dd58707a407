// Shared complex data types, instantiated per release

use crate::config::FhirRelease;
use crate::schema::{FieldDescriptor, SchemaRegistry, TypeDeclaration};
use crate::types::PrimitiveKind;

pub(super) fn register(registry: &mut SchemaRegistry, release: FhirRelease) {
    registry.register(coding());
    registry.register(codeable_concept());
    registry.register(identifier());
    registry.register(period());
    registry.register(quantity("Quantity"));
    registry.register(quantity("Duration"));
    registry.register(reference(release));
    registry.register(human_name());
    registry.register(address());
    registry.register(contact_point());
    registry.register(attachment(release));
    registry.register(timing());
    registry.register(timing_repeat());
}

fn coding() -> TypeDeclaration {
    TypeDeclaration::builder("Coding")
        .field(FieldDescriptor::primitive("system", PrimitiveKind::Uri))
        .field(FieldDescriptor::primitive("version", PrimitiveKind::String))
        .field(FieldDescriptor::primitive("code", PrimitiveKind::Code))
        .field(FieldDescriptor::primitive("display", PrimitiveKind::String))
        .field(FieldDescriptor::primitive("userSelected", PrimitiveKind::Boolean))
        .build()
}

fn codeable_concept() -> TypeDeclaration {
    TypeDeclaration::builder("CodeableConcept")
        .field(FieldDescriptor::composite("coding", "Coding").repeating())
        .field(FieldDescriptor::primitive("text", PrimitiveKind::String))
        .build()
}

fn identifier() -> TypeDeclaration {
    TypeDeclaration::builder("Identifier")
        .field(FieldDescriptor::primitive("use", PrimitiveKind::Code).bound_as("use_code"))
        .field(
            FieldDescriptor::composite("type", "CodeableConcept").bound_as("type_concept"),
        )
        .field(FieldDescriptor::primitive("system", PrimitiveKind::Uri))
        .field(FieldDescriptor::primitive("value", PrimitiveKind::String))
        .field(FieldDescriptor::composite("period", "Period"))
        .field(FieldDescriptor::reference("assigner", &["Organization"]))
        .build()
}

fn period() -> TypeDeclaration {
    TypeDeclaration::builder("Period")
        .field(FieldDescriptor::primitive("start", PrimitiveKind::DateTime))
        .field(FieldDescriptor::primitive("end", PrimitiveKind::DateTime))
        .build()
}

// Quantity and Duration share one field set but stay distinct declarations
fn quantity(tag: &'static str) -> TypeDeclaration {
    TypeDeclaration::builder(tag)
        .field(FieldDescriptor::primitive("value", PrimitiveKind::Decimal))
        .field(FieldDescriptor::primitive("comparator", PrimitiveKind::Code))
        .field(FieldDescriptor::primitive("unit", PrimitiveKind::String))
        .field(FieldDescriptor::primitive("system", PrimitiveKind::Uri))
        .field(FieldDescriptor::primitive("code", PrimitiveKind::Code))
        .build()
}

fn reference(release: FhirRelease) -> TypeDeclaration {
    let builder = TypeDeclaration::builder("Reference")
        .field(FieldDescriptor::primitive("reference", PrimitiveKind::String));
    // the target-type hint field was introduced after the 3.0.x line
    let builder = match release {
        FhirRelease::Stu3 => builder,
        FhirRelease::R4 => builder.field(
            FieldDescriptor::primitive("type", PrimitiveKind::Uri).bound_as("type_uri"),
        ),
    };
    builder
        .field(FieldDescriptor::composite("identifier", "Identifier"))
        .field(FieldDescriptor::primitive("display", PrimitiveKind::String))
        .build()
}

fn human_name() -> TypeDeclaration {
    TypeDeclaration::builder("HumanName")
        .field(FieldDescriptor::primitive("use", PrimitiveKind::Code).bound_as("use_code"))
        .field(FieldDescriptor::primitive("text", PrimitiveKind::String))
        .field(FieldDescriptor::primitive("family", PrimitiveKind::String))
        .field(FieldDescriptor::primitive("given", PrimitiveKind::String).repeating())
        .field(FieldDescriptor::primitive("prefix", PrimitiveKind::String).repeating())
        .field(FieldDescriptor::primitive("suffix", PrimitiveKind::String).repeating())
        .field(FieldDescriptor::composite("period", "Period"))
        .build()
}

fn address() -> TypeDeclaration {
    TypeDeclaration::builder("Address")
        .field(FieldDescriptor::primitive("use", PrimitiveKind::Code).bound_as("use_code"))
        .field(FieldDescriptor::primitive("type", PrimitiveKind::Code).bound_as("type_code"))
        .field(FieldDescriptor::primitive("text", PrimitiveKind::String))
        .field(FieldDescriptor::primitive("line", PrimitiveKind::String).repeating())
        .field(FieldDescriptor::primitive("city", PrimitiveKind::String))
        .field(FieldDescriptor::primitive("district", PrimitiveKind::String))
        .field(FieldDescriptor::primitive("state", PrimitiveKind::String))
        .field(FieldDescriptor::primitive("postalCode", PrimitiveKind::String))
        .field(FieldDescriptor::primitive("country", PrimitiveKind::String))
        .field(FieldDescriptor::composite("period", "Period"))
        .build()
}

fn contact_point() -> TypeDeclaration {
    TypeDeclaration::builder("ContactPoint")
        .field(FieldDescriptor::primitive("system", PrimitiveKind::Code))
        .field(FieldDescriptor::primitive("value", PrimitiveKind::String))
        .field(FieldDescriptor::primitive("use", PrimitiveKind::Code).bound_as("use_code"))
        .field(FieldDescriptor::primitive("rank", PrimitiveKind::PositiveInt))
        .field(FieldDescriptor::composite("period", "Period"))
        .build()
}

fn attachment(release: FhirRelease) -> TypeDeclaration {
    // the location field was retyped from uri to the dedicated url kind
    let url_kind = match release {
        FhirRelease::Stu3 => PrimitiveKind::Uri,
        FhirRelease::R4 => PrimitiveKind::Url,
    };
    TypeDeclaration::builder("Attachment")
        .field(FieldDescriptor::primitive("contentType", PrimitiveKind::Code))
        .field(FieldDescriptor::primitive("language", PrimitiveKind::Code))
        .field(FieldDescriptor::primitive("data", PrimitiveKind::Base64Binary))
        .field(FieldDescriptor::primitive("url", url_kind))
        .field(FieldDescriptor::primitive("size", PrimitiveKind::UnsignedInt))
        .field(FieldDescriptor::primitive("hash", PrimitiveKind::Base64Binary))
        .field(FieldDescriptor::primitive("title", PrimitiveKind::String))
        .field(FieldDescriptor::primitive("creation", PrimitiveKind::DateTime))
        .build()
}

fn timing() -> TypeDeclaration {
    TypeDeclaration::builder("Timing")
        .field(FieldDescriptor::primitive("event", PrimitiveKind::DateTime).repeating())
        .field(FieldDescriptor::composite("repeat", "TimingRepeat"))
        .field(FieldDescriptor::composite("code", "CodeableConcept"))
        .build()
}

fn timing_repeat() -> TypeDeclaration {
    TypeDeclaration::builder("TimingRepeat")
        .field(FieldDescriptor::composite("boundsDuration", "Duration").in_choice("bounds"))
        .field(FieldDescriptor::composite("boundsPeriod", "Period").in_choice("bounds"))
        .field(FieldDescriptor::primitive("count", PrimitiveKind::PositiveInt))
        .field(FieldDescriptor::primitive("countMax", PrimitiveKind::PositiveInt))
        .field(FieldDescriptor::primitive("duration", PrimitiveKind::Decimal))
        .field(FieldDescriptor::primitive("durationUnit", PrimitiveKind::Code))
        .field(FieldDescriptor::primitive("frequency", PrimitiveKind::PositiveInt))
        .field(FieldDescriptor::primitive("frequencyMax", PrimitiveKind::PositiveInt))
        .field(FieldDescriptor::primitive("period", PrimitiveKind::Decimal))
        .field(FieldDescriptor::primitive("periodUnit", PrimitiveKind::Code))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Cardinality;

    #[test]
    fn reserved_names_carry_binding_aliases() {
        let identifier = identifier();
        let (_, by_binding) = identifier.field_by_binding("type_concept").unwrap();
        assert_eq!(by_binding.name(), "type");
        assert!(identifier.field_by_binding("type").is_none());
    }

    #[test]
    fn timing_repeat_bounds_is_an_optional_choice() {
        let repeat = timing_repeat();
        let bounds = repeat.choice_group("bounds").unwrap();
        assert_eq!(bounds.members, vec!["boundsDuration", "boundsPeriod"]);
        assert!(!bounds.required);
    }

    #[test]
    fn human_name_given_repeats() {
        let name = human_name();
        let (_, given) = name.field("given").unwrap();
        assert_eq!(given.cardinality(), Cardinality::Repeating);
    }
}
