use std::collections::{BTreeMap, HashMap};

use heck::ToSnakeCase;

use crate::model::reaches;
use crate::types::{PropertyDef, TypeDef, TypeRef};
use crate::validate::validator::{Validator, PROPERTY_RE};

const PRIMITIVES: &[&str] = &["string", "integer", "number", "boolean"];

pub(crate) fn validate_type(
    v: &mut Validator,
    def: &TypeDef,
    path: &str,
    types: &BTreeMap<String, TypeDef>,
) {
    v.validate_extensions(path, &def.extensions);

    if let Some(kind) = &def.kind {
        if kind != "object" {
            v.push(format!("{path}.type"), "message types must be of type object");
        }
    }

    let mut generated = HashMap::<String, &str>::new();
    for (name, prop) in &def.properties {
        let ppath = format!("{path}.properties.{name}");
        if !PROPERTY_RE.is_match(name) {
            v.push(&ppath, "property name must match regex ^[a-zA-Z_][a-zA-Z0-9_]*$");
        }
        if let Some(prev) = generated.insert(name.to_snake_case(), name) {
            v.push(
                &ppath,
                format!("collides with property `{prev}` after case conversion"),
            );
        }
        validate_property(v, prop, &ppath, types);
    }

    for (idx, req) in def.required.iter().enumerate() {
        if !def.properties.contains_key(req) {
            v.push(
                format!("{path}.required[{idx}]"),
                format!("names undeclared property `{req}`"),
            );
        }
    }
}

/// Rejects cycles made only of required message fields: no finite value could satisfy them.
pub(crate) fn validate_required_cycles(v: &mut Validator, types: &BTreeMap<String, TypeDef>) {
    let required_refs = |def: &TypeDef| -> Vec<(String, String)> {
        def.properties
            .iter()
            .filter(|(name, _)| def.required.contains(name))
            .filter_map(|(name, prop)| {
                let target = TypeRef::new(prop.reference.as_deref()?).local_name()?.to_string();
                Some((name.clone(), target))
            })
            .collect()
    };
    let edges: BTreeMap<String, Vec<String>> = types
        .iter()
        .map(|(name, def)| {
            let targets = required_refs(def).into_iter().map(|(_, target)| target).collect();
            (name.clone(), targets)
        })
        .collect();

    for (name, def) in types {
        for (prop, target) in required_refs(def) {
            if reaches(&edges, &target, name) {
                v.push(
                    format!("$.types.{name}.properties.{prop}"),
                    format!("required reference to `{target}` forms a cycle back to `{name}`; make a field on the cycle optional"),
                );
            }
        }
    }
}

fn validate_property(
    v: &mut Validator,
    prop: &PropertyDef,
    path: &str,
    types: &BTreeMap<String, TypeDef>,
) {
    v.validate_extensions(path, &prop.extensions);

    match (&prop.kind, &prop.reference) {
        (Some(_), Some(_)) => v.push(path, "must declare either `type` or `$ref`, not both"),
        (None, None) => v.push(path, "must declare `type` or `$ref`"),
        (None, Some(r)) => match TypeRef::new(r.as_str()).local_name() {
            None => v.push(
                format!("{path}.$ref"),
                "must be a local reference of the form #/types/<Name>",
            ),
            Some(name) if !types.contains_key(name) => {
                v.push(format!("{path}.$ref"), format!("references undefined type `{name}`"));
            }
            Some(_) => {}
        },
        (Some(kind), None) if kind == "array" => match &prop.items {
            Some(items) => validate_property(v, items, &format!("{path}.items"), types),
            None => v.push(format!("{path}.items"), "is required for array properties"),
        },
        (Some(kind), None) => {
            if !PRIMITIVES.contains(&kind.as_str()) {
                v.push(
                    format!("{path}.type"),
                    "must be one of string, integer, number, boolean, array",
                );
            }
        }
    }
}
