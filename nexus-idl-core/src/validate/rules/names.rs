//! Every target emits all services and messages of a schema into one namespace. Distinct
//! schema names that derive the same symbol are rejected here.

use std::collections::{HashMap, HashSet};

use crate::synth::Ident;
use crate::types::{SchemaDocument, ServiceDef};
use crate::validate::validator::Validator;

#[derive(Default)]
struct Namespace {
    owners: HashMap<String, String>,
}

impl Namespace {
    /// Claims all of `symbols` for `owner`. Only the first clash is reported, and a clashing
    /// owner claims nothing.
    fn claim(&mut self, v: &mut Validator, path: &str, owner: String, symbols: Vec<String>) {
        let clash = symbols
            .iter()
            .find_map(|s| self.owners.get(s).map(|prev| (s, prev)));
        if let Some((symbol, prev)) = clash {
            v.push(
                path,
                format!("generated name `{symbol}` is already generated for {prev}"),
            );
            return;
        }
        for symbol in symbols {
            self.owners.insert(symbol, owner.clone());
        }
    }
}

pub(crate) fn validate_generated_names(v: &mut Validator, doc: &SchemaDocument) {
    let mut global = Namespace::default();

    for name in doc.types.keys() {
        global.claim(
            v,
            &format!("$.types.{name}"),
            format!("type `{name}`"),
            vec![Ident::new(name).upper_camel()],
        );
    }

    // Exact duplicates are reported by the document rules already.
    let mut seen = HashSet::<&str>::new();
    for (idx, svc) in doc.services.iter().enumerate() {
        if seen.insert(&svc.identifier) {
            validate_service_names(v, &mut global, &format!("$.services[{idx}]"), svc);
        }
    }
}

fn validate_service_names(v: &mut Validator, global: &mut Namespace, path: &str, svc: &ServiceDef) {
    let s = Ident::new(&svc.identifier);
    let handler = s.suffixed("Handler");
    let client = s.suffixed("WorkflowClient");
    global.claim(
        v,
        &format!("{path}.identifier"),
        format!("service `{}`", svc.identifier),
        vec![
            s.upper_camel(),
            s.suffixed("ServiceName").upper_camel(),
            handler.upper_camel(),
            handler.prefixed("Unimplemented").upper_camel(),
            s.prefixed("New").upper_camel(),
            s.prefixed("Register").upper_camel(),
            client.upper_camel(),
            client.prefixed("New").upper_camel(),
        ],
    );

    // Client methods share the client type with its constructor.
    let mut members = Namespace::default();
    members.owners.insert("New".to_string(), "the client constructor".to_string());

    let mut seen = HashSet::<Ident>::new();
    for (idx, op) in svc.operations.iter().enumerate() {
        let o = Ident::new(&op.identifier);
        // Case variants within one service are reported by the service rules.
        if !seen.insert(o.clone()) {
            continue;
        }
        let opath = format!("{path}.operations[{idx}].identifier");
        let owner = format!("operation `{}` of service `{}`", op.identifier, svc.identifier);
        let qualified = Ident::concat(&[&s, &o]);
        global.claim(
            v,
            &opath,
            owner.clone(),
            vec![
                qualified.suffixed("OperationName").upper_camel(),
                qualified.suffixed("Operation").upper_camel(),
                qualified.suffixed("Future").upper_camel(),
                qualified.prefixed("unimplemented").lower_camel(),
            ],
        );
        members.claim(
            v,
            &opath,
            format!("the client methods of {owner}"),
            vec![o.upper_camel(), o.suffixed("Async").upper_camel()],
        );
    }
}
