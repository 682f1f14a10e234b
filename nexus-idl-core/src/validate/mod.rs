mod rules;
mod validator;

use crate::error::SchemaError;
use crate::types::SchemaDocument;
use validator::Validator;

pub trait Validate {
    fn validate(&self) -> Result<(), SchemaError>;
}

impl Validate for SchemaDocument {
    fn validate(&self) -> Result<(), SchemaError> {
        validate_schema(self)
    }
}

pub fn validate_schema(doc: &SchemaDocument) -> Result<(), SchemaError> {
    let mut v = Validator::new();
    v.validate_document(doc);
    v.finish()
}
