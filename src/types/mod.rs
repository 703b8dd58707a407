pub mod element;
pub mod primitive;

pub use element::{Element, Extension};
pub use primitive::{LexicalError, PrimitiveKind, PrimitiveValue, Scalar};
