mod common;
mod document;
mod service;
mod type_def;

pub use common::{Extensions, TypeRef};
pub use document::{SchemaDocument, SCHEMA_URL};
pub use service::{OperationDef, ServiceDef};
pub use type_def::{PropertyDef, TypeDef};
