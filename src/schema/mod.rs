pub mod declaration;
pub mod descriptor;
pub mod registry;

pub use declaration::{DeclarationBuilder, TypeDeclaration};
pub use descriptor::{Cardinality, ChoiceGroup, FieldDescriptor, FieldKind};
pub use registry::{ReleaseRegistry, SchemaRegistry};
