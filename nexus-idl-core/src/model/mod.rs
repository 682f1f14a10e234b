//! The resolved, read-only schema model.
//!
//! A [`Schema`] is only ever built from a document that passed validation, so every
//! [`MessageRef`] it hands out resolves.

mod build;

pub(crate) use build::reaches;

use std::collections::BTreeMap;

use crate::shape::OperationShape;

#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub(crate) services: Vec<Service>,
    pub(crate) messages: BTreeMap<String, Message>,
    pub(crate) java_package: Option<String>,
}

impl Schema {
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn service(&self, identifier: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.identifier == identifier)
    }

    /// All declared messages, ordered by name.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.values()
    }

    pub fn message(&self, name: &str) -> Option<&Message> {
        self.messages.get(name)
    }

    pub fn resolve(&self, r: &MessageRef) -> Option<&Message> {
        self.messages.get(r.name())
    }

    pub fn java_package(&self) -> Option<&str> {
        self.java_package.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    pub identifier: String,
    pub wire_name: String,
    pub description: Option<String>,
    pub(crate) operations: Vec<Operation>,
}

impl Service {
    /// Operations in declaration order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn operation(&self, identifier: &str) -> Option<&Operation> {
        self.operations.iter().find(|o| o.identifier == identifier)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub identifier: String,
    pub wire_name: String,
    pub description: Option<String>,
    pub input: Option<MessageRef>,
    pub output: Option<MessageRef>,
}

impl Operation {
    pub fn shape(&self) -> OperationShape {
        OperationShape::from_presence(self.input.is_some(), self.output.is_some())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageRef(String);

impl MessageRef {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub name: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Ordered by field name.
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: FieldType,
    pub optional: bool,
    /// The field's message leads back to the owning message through other message fields.
    /// Targets that embed messages by value must add indirection here.
    pub recursive: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Primitive(Primitive),
    Array(Box<FieldType>),
    Message(MessageRef),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    String,
    Integer,
    Number,
    Boolean,
}

impl Primitive {
    pub(crate) fn parse(kind: &str) -> Option<Self> {
        match kind {
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }
}
