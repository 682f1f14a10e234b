use std::collections::{BTreeMap, HashMap, HashSet};

use heck::ToUpperCamelCase;

use crate::types::{ServiceDef, TypeDef, TypeRef};
use crate::validate::validator::Validator;

pub(crate) fn validate_service(
    v: &mut Validator,
    svc: &ServiceDef,
    path: &str,
    types: &BTreeMap<String, TypeDef>,
) {
    let mut identifiers = HashSet::<&str>::new();
    let mut wire_names = HashSet::<&str>::new();
    // Generated identifiers are derived from the upper-camel form, so `get_user` and `GetUser`
    // would emit the same symbol.
    let mut generated = HashMap::<String, &str>::new();

    for (idx, op) in svc.operations.iter().enumerate() {
        let opath = format!("{path}.operations[{idx}]");
        v.validate_extensions(&opath, &op.extensions);
        v.validate_identifier(&format!("{opath}.identifier"), &op.identifier);
        v.validate_wire_name(&format!("{opath}.name"), op.name.as_deref());

        if !identifiers.insert(&op.identifier) {
            v.push(
                format!("{opath}.identifier"),
                "must be unique within the service",
            );
        } else if let Some(prev) = generated.insert(op.identifier.to_upper_camel_case(), &op.identifier) {
            v.push(
                format!("{opath}.identifier"),
                format!("collides with operation `{prev}` after case conversion"),
            );
        }
        if !wire_names.insert(op.wire_name()) {
            v.push(
                format!("{opath}.name"),
                "operation name must be unique within the service",
            );
        }

        if let Some(input) = &op.input {
            validate_type_ref(v, &format!("{opath}.input"), input, types);
        }
        if let Some(output) = &op.output {
            validate_type_ref(v, &format!("{opath}.output"), output, types);
        }
    }
}

fn validate_type_ref(
    v: &mut Validator,
    path: &str,
    r: &TypeRef,
    types: &BTreeMap<String, TypeDef>,
) {
    match r.local_name() {
        None => v.push(
            format!("{path}.$ref"),
            "must be a local reference of the form #/types/<Name>",
        ),
        Some(name) if !types.contains_key(name) => {
            v.push(format!("{path}.$ref"), format!("references undefined type `{name}`"));
        }
        Some(_) => {}
    }
}
