use std::collections::{BTreeMap, BTreeSet};

use crate::error::SchemaError;
use crate::model::{Field, FieldType, Message, MessageRef, Operation, Primitive, Schema, Service};
use crate::types::{OperationDef, PropertyDef, SchemaDocument, ServiceDef, TypeDef, TypeRef};
use crate::validate::validate_schema;

impl Schema {
    /// Validates `doc` and resolves it into the read-only model.
    pub fn from_document(doc: &SchemaDocument) -> Result<Self, SchemaError> {
        validate_schema(doc)?;

        let mut messages = doc
            .types
            .iter()
            .map(|(name, def)| build_message(name, def).map(|m| (name.clone(), m)))
            .collect::<Result<BTreeMap<_, _>, SchemaError>>()?;
        mark_recursive_fields(&mut messages);

        let services = doc
            .services
            .iter()
            .enumerate()
            .map(|(idx, svc)| build_service(idx, svc))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            services = services.len(),
            messages = messages.len(),
            "schema resolved"
        );

        Ok(Self {
            services,
            messages,
            java_package: doc.java_package.clone(),
        })
    }
}

fn build_service(idx: usize, svc: &ServiceDef) -> Result<Service, SchemaError> {
    let operations = svc
        .operations
        .iter()
        .enumerate()
        .map(|(oidx, op)| build_operation(&format!("$.services[{idx}].operations[{oidx}]"), op))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Service {
        identifier: svc.identifier.clone(),
        wire_name: svc.wire_name().to_string(),
        description: svc.description.clone(),
        operations,
    })
}

fn build_operation(path: &str, op: &OperationDef) -> Result<Operation, SchemaError> {
    Ok(Operation {
        identifier: op.identifier.clone(),
        wire_name: op.wire_name().to_string(),
        description: op.description.clone(),
        input: op
            .input
            .as_ref()
            .map(|r| message_ref(&format!("{path}.input.$ref"), r))
            .transpose()?,
        output: op
            .output
            .as_ref()
            .map(|r| message_ref(&format!("{path}.output.$ref"), r))
            .transpose()?,
    })
}

fn message_ref(path: &str, r: &TypeRef) -> Result<MessageRef, SchemaError> {
    r.local_name()
        .map(MessageRef::new)
        .ok_or_else(|| SchemaError::single(path, "must be a local reference of the form #/types/<Name>"))
}

fn build_message(name: &str, def: &TypeDef) -> Result<Message, SchemaError> {
    let required: BTreeSet<&str> = def.required.iter().map(String::as_str).collect();
    let fields = def
        .properties
        .iter()
        .map(|(field, prop)| -> Result<Field, SchemaError> {
            Ok(Field {
                name: field.clone(),
                ty: field_type(&format!("$.types.{name}.properties.{field}"), prop)?,
                optional: !required.contains(field.as_str()),
                recursive: false,
                description: prop.description.clone(),
            })
        })
        .collect::<Result<Vec<_>, SchemaError>>()?;

    Ok(Message {
        name: name.to_string(),
        title: def.title.clone(),
        description: def.description.clone(),
        fields,
    })
}

fn field_type(path: &str, prop: &PropertyDef) -> Result<FieldType, SchemaError> {
    if let Some(r) = &prop.reference {
        return message_ref(&format!("{path}.$ref"), &TypeRef::new(r.as_str())).map(FieldType::Message);
    }
    match prop.kind.as_deref() {
        Some("array") => {
            let items = prop
                .items
                .as_deref()
                .ok_or_else(|| SchemaError::single(format!("{path}.items"), "is required for array properties"))?;
            Ok(FieldType::Array(Box::new(field_type(&format!("{path}.items"), items)?)))
        }
        Some(kind) => Primitive::parse(kind)
            .map(FieldType::Primitive)
            .ok_or_else(|| SchemaError::single(format!("{path}.type"), format!("unsupported type `{kind}`"))),
        None => Err(SchemaError::single(path, "must declare `type` or `$ref`")),
    }
}

/// Flags every message field that sits on a reference cycle. Arrays hold their elements
/// indirectly, so only direct message fields form edges.
fn mark_recursive_fields(messages: &mut BTreeMap<String, Message>) {
    let edges: BTreeMap<String, Vec<String>> = messages
        .iter()
        .map(|(name, m)| {
            let targets = m
                .fields
                .iter()
                .filter_map(|f| match &f.ty {
                    FieldType::Message(r) => Some(r.name().to_string()),
                    _ => None,
                })
                .collect();
            (name.clone(), targets)
        })
        .collect();

    for message in messages.values_mut() {
        for field in &mut message.fields {
            if let FieldType::Message(r) = &field.ty {
                field.recursive = reaches(&edges, r.name(), &message.name);
            }
        }
    }
}

pub(crate) fn reaches(edges: &BTreeMap<String, Vec<String>>, from: &str, target: &str) -> bool {
    let mut stack = vec![from];
    let mut seen = BTreeSet::new();
    while let Some(name) = stack.pop() {
        if name == target {
            return true;
        }
        if !seen.insert(name) {
            continue;
        }
        if let Some(next) = edges.get(name) {
            stack.extend(next.iter().map(String::as_str));
        }
    }
    false
}
