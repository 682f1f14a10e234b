use std::collections::BTreeMap;

use crate::types::{Extensions, ServiceDef, TypeDef};

pub const SCHEMA_URL: &str = "http://api.nexus/draft-01/schema#";

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SchemaDocument {
    /// Must be [`SCHEMA_URL`].
    #[serde(rename = "$schema")]
    pub schema: String,

    /// Package for Java output; ignored by other targets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "javaPackage")]
    pub java_package: Option<String>,

    pub services: Vec<ServiceDef>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub types: BTreeMap<String, TypeDef>,

    #[serde(flatten, default)]
    pub extensions: Extensions,
}
