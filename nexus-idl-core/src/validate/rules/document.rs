use std::collections::HashSet;

use crate::types::{SchemaDocument, SCHEMA_URL};
use crate::validate::rules::{names, service, types};
use crate::validate::validator::{Validator, JAVA_PACKAGE_RE};

pub(crate) fn validate_document(v: &mut Validator, doc: &SchemaDocument) {
    v.validate_extensions("$", &doc.extensions);

    if doc.schema != SCHEMA_URL {
        v.push("$.$schema", format!("must be '{SCHEMA_URL}'"));
    }

    if let Some(pkg) = &doc.java_package {
        if !JAVA_PACKAGE_RE.is_match(pkg) {
            v.push("$.javaPackage", "must be a dotted Java package name");
        }
    }

    if doc.services.is_empty() {
        v.push("$.services", "must have at least one entry");
    }

    let mut identifiers = HashSet::<&str>::new();
    let mut wire_names = HashSet::<&str>::new();
    for (idx, svc) in doc.services.iter().enumerate() {
        let path = format!("$.services[{idx}]");
        v.validate_extensions(&path, &svc.extensions);
        v.validate_identifier(&format!("{path}.identifier"), &svc.identifier);
        v.validate_wire_name(&format!("{path}.name"), svc.name.as_deref());

        if !identifiers.insert(&svc.identifier) {
            v.push(format!("{path}.identifier"), "must be unique");
        }
        if !wire_names.insert(svc.wire_name()) {
            v.push(format!("{path}.name"), "service name must be unique");
        }

        service::validate_service(v, svc, &path, &doc.types);
    }

    for (name, def) in &doc.types {
        let path = format!("$.types.{name}");
        v.validate_identifier(&path, name);
        types::validate_type(v, def, &path, &doc.types);
    }
    types::validate_required_cycles(v, &doc.types);
    names::validate_generated_names(v, doc);
}
