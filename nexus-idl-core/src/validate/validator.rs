use std::sync::LazyLock;

use regex::Regex;

use crate::error::{SchemaError, Violation};
use crate::types::{Extensions, SchemaDocument};

use super::rules;

pub(crate) static ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*$").expect("valid"));
pub(crate) static PROPERTY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").expect("valid"));
pub(crate) static JAVA_PACKAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*(\.[a-zA-Z_][a-zA-Z0-9_]*)*$").expect("valid")
});

pub struct Validator {
    violations: Vec<Violation>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    pub fn finish(self) -> Result<(), SchemaError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            tracing::debug!(violations = self.violations.len(), "schema rejected");
            Err(SchemaError::new(self.violations))
        }
    }

    pub fn validate_document(&mut self, doc: &SchemaDocument) {
        rules::document::validate_document(self, doc);
    }

    pub(crate) fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation::new(path, message));
    }

    pub(crate) fn validate_identifier(&mut self, path: &str, value: &str) {
        if !ID_RE.is_match(value) {
            self.push(path, "must match regex ^[a-zA-Z][a-zA-Z0-9_]*$");
        }
    }

    pub(crate) fn validate_wire_name(&mut self, path: &str, value: Option<&str>) {
        if let Some(name) = value {
            if name.trim().is_empty() {
                self.push(path, "must not be empty");
            }
        }
    }

    pub(crate) fn validate_extensions(&mut self, path: &str, ext: &Extensions) {
        for key in ext.keys() {
            if !key.starts_with("x-") {
                self.push(
                    format!("{path}.{key}"),
                    "unknown field (only x-* extensions are allowed)",
                );
            }
        }
    }
}
