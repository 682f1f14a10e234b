use std::collections::BTreeMap;

/// Vendor extensions (`x-...`) captured from the schema.
///
/// Unknown fields are deserialized into this map; the `x-` prefix is enforced at validation time.
pub type Extensions = BTreeMap<String, serde_json::Value>;

/// A `{ "$ref": "#/types/Name" }` pointer to a type declared in the same schema.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TypeRef {
    #[serde(rename = "$ref")]
    pub reference: String,
}

impl TypeRef {
    pub const LOCAL_PREFIX: &'static str = "#/types/";

    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }

    pub fn local(name: &str) -> Self {
        Self::new(format!("{}{name}", Self::LOCAL_PREFIX))
    }

    /// The referenced type name, if this is a local `#/types/<Name>` reference.
    pub fn local_name(&self) -> Option<&str> {
        self.reference
            .strip_prefix(Self::LOCAL_PREFIX)
            .filter(|n| !n.is_empty() && !n.contains('/'))
    }
}
