#![forbid(unsafe_code)]

//! Nexus IDL compiler core: schema documents in, per-language bindings out.
//!
//! The pipeline is parse ([`parser`]), validate and resolve ([`model`]), classify each operation
//! ([`shape`]), synthesize target-agnostic bindings ([`synth`]) and render them ([`emit`]).

pub mod emit;
pub mod error;
pub mod model;
pub mod parser;
pub mod shape;
pub mod synth;
pub mod types;
pub mod validate;

use std::path::Path;

pub use crate::emit::{assemble, generate, EmissionTarget, GeneratedCode, GeneratorOptions, Language};
pub use crate::error::{EmitError, IdlError, ParseError, SchemaError, Violation};
pub use crate::model::Schema;
pub use crate::parser::{load_schema_file, parse_schema_str, DocumentFormat, ParsedSchema};
pub use crate::shape::OperationShape;
pub use crate::synth::{synthesize, synthesize_parallel, SchemaBindings};
pub use crate::types::SchemaDocument;
pub use crate::validate::{validate_schema, Validate};

/// Parses and resolves a schema held in memory.
pub fn schema_from_str(input: &str, format: DocumentFormat) -> Result<Schema, IdlError> {
    let parsed = parse_schema_str(input, format)?;
    Ok(Schema::from_document(&parsed.document)?)
}

/// Reads, parses and resolves a schema file.
pub fn load_schema(path: &Path) -> Result<Schema, IdlError> {
    let parsed = load_schema_file(path)?;
    Ok(Schema::from_document(&parsed.document)?)
}

/// Runs the whole pipeline for one in-memory schema.
pub fn compile_str(
    input: &str,
    language: Language,
    options: &GeneratorOptions,
) -> Result<GeneratedCode, IdlError> {
    let schema = schema_from_str(input, DocumentFormat::Auto)?;
    Ok(generate(&synthesize(&schema), language, options)?)
}
