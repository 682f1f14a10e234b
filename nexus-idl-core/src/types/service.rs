use crate::types::{Extensions, TypeRef};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ServiceDef {
    pub identifier: String,

    /// Wire name. Defaults to `identifier`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub operations: Vec<OperationDef>,

    #[serde(flatten, default)]
    pub extensions: Extensions,
}

impl ServiceDef {
    pub fn wire_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.identifier)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OperationDef {
    pub identifier: String,

    /// Wire name. Defaults to `identifier`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<TypeRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<TypeRef>,

    #[serde(flatten, default)]
    pub extensions: Extensions,
}

impl OperationDef {
    pub fn wire_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.identifier)
    }
}
