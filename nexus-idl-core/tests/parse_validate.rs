use std::path::{Path, PathBuf};

use nexus_idl_core::model::FieldType;
use nexus_idl_core::{
    load_schema, parse_schema_str, schema_from_str, validate_schema, DocumentFormat, IdlError, ParseError, Schema,
};

fn minimal_valid_yaml() -> &'static str {
    r##"
$schema: http://api.nexus/draft-01/schema#
services:
  - identifier: UserService
    name: directory.UserService
    operations:
      - identifier: GetUser
        name: Get User
        input:
          $ref: "#/types/GetUserRequest"
        output:
          $ref: "#/types/GetUserResponse"
types:
  GetUserRequest:
    type: object
    properties:
      userId:
        type: string
    required: [userId]
  GetUserResponse:
    type: object
    properties:
      name:
        type: string
"##
}

fn violations(yaml: &str) -> Vec<nexus_idl_core::Violation> {
    let parsed = parse_schema_str(yaml, DocumentFormat::Yaml).unwrap();
    validate_schema(&parsed.document).unwrap_err().violations
}

#[test]
fn parse_yaml_and_validate_ok() {
    let parsed = parse_schema_str(minimal_valid_yaml(), DocumentFormat::Yaml).unwrap();
    validate_schema(&parsed.document).unwrap();
}

#[test]
fn parse_auto_detects_yaml() {
    let parsed = parse_schema_str(minimal_valid_yaml(), DocumentFormat::Auto).unwrap();
    assert_eq!(parsed.format, DocumentFormat::Yaml);
}

#[test]
fn parse_auto_detects_json() {
    let json = r##"{
  "$schema": "http://api.nexus/draft-01/schema#",
  "services": [
    { "identifier": "Echo", "operations": [ { "identifier": "ping" } ] }
  ]
}"##;
    let parsed = parse_schema_str(json, DocumentFormat::Auto).unwrap();
    assert_eq!(parsed.format, DocumentFormat::Json);
    validate_schema(&parsed.document).unwrap();
}

#[test]
fn parse_garbage_is_rejected() {
    let err = parse_schema_str("not: [valid", DocumentFormat::Auto).unwrap_err();
    assert!(format!("{err}").contains("YAML"));
}

#[test]
fn wrong_schema_url_is_rejected() {
    let bad = minimal_valid_yaml().replace("draft-01", "draft-02");
    assert!(violations(&bad).iter().any(|v| v.path == "$.$schema"));
}

#[test]
fn undefined_message_reference_is_rejected() {
    let bad = minimal_valid_yaml().replace("#/types/GetUserResponse", "#/types/Missing");
    let v = violations(&bad);
    assert!(v
        .iter()
        .any(|v| v.path == "$.services[0].operations[0].output.$ref"
            && v.message.contains("`Missing`")));
}

#[test]
fn duplicate_operation_wire_names_are_rejected() {
    let bad = minimal_valid_yaml().replace(
        "types:\n",
        "      - identifier: GetUserAgain\n        name: Get User\ntypes:\n",
    );
    assert!(violations(&bad)
        .iter()
        .any(|v| v.path == "$.services[0].operations[1].name"));
}

#[test]
fn duplicate_service_identifiers_are_rejected() {
    let bad = r##"
$schema: http://api.nexus/draft-01/schema#
services:
  - identifier: Echo
    name: a
    operations: []
  - identifier: Echo
    name: b
    operations: []
"##;
    assert!(violations(bad)
        .iter()
        .any(|v| v.path == "$.services[1].identifier" && v.message.contains("must be unique")));
}

#[test]
fn identifiers_must_match_pattern() {
    let bad = minimal_valid_yaml().replace("identifier: GetUser", "identifier: 1GetUser");
    assert!(violations(&bad)
        .iter()
        .any(|v| v.path == "$.services[0].operations[0].identifier"));
}

#[test]
fn case_colliding_operations_are_rejected() {
    let bad = minimal_valid_yaml().replace(
        "types:\n",
        "      - identifier: getUser\n        name: other\ntypes:\n",
    );
    assert!(violations(&bad)
        .iter()
        .any(|v| v.message.contains("after case conversion")));
}

#[test]
fn required_must_name_a_declared_property() {
    let bad = minimal_valid_yaml().replace("required: [userId]", "required: [userId, nope]");
    assert!(violations(&bad)
        .iter()
        .any(|v| v.path == "$.types.GetUserRequest.required[1]"));
}

#[test]
fn unknown_keys_are_rejected_but_extensions_pass() {
    let bad = minimal_valid_yaml().replace(
        "    name: directory.UserService\n",
        "    name: directory.UserService\n    colour: blue\n    x-owner: team\n",
    );
    let v = violations(&bad);
    assert_eq!(v.len(), 1);
    assert_eq!(v[0].path, "$.services[0].colour");
}

#[test]
fn property_needs_a_type_or_ref() {
    let bad = minimal_valid_yaml().replace("      name:\n        type: string\n", "      name: {}\n");
    assert!(violations(&bad)
        .iter()
        .any(|v| v.path == "$.types.GetUserResponse.properties.name"));
}

#[test]
fn all_violations_are_reported_together() {
    let bad = minimal_valid_yaml()
        .replace("draft-01", "draft-09")
        .replace("identifier: GetUser", "identifier: 9GetUser")
        .replace("#/types/GetUserRequest", "#/types/Nope");
    assert!(violations(&bad).len() >= 3);
}

#[test]
fn resolved_model_keeps_declaration_order_and_wire_names() {
    let schema = schema_from_str(minimal_valid_yaml(), DocumentFormat::Yaml).unwrap();
    let svc = schema.service("UserService").unwrap();
    assert_eq!(svc.wire_name, "directory.UserService");
    let op = svc.operation("GetUser").unwrap();
    assert_eq!(op.wire_name, "Get User");

    let output = op.output.as_ref().unwrap();
    let message = schema.resolve(output).unwrap();
    assert_eq!(message.name, "GetUserResponse");
    assert!(message.fields[0].optional);

    let request = schema.message("GetUserRequest").unwrap();
    assert!(!request.fields[0].optional);
}

#[test]
fn invalid_schema_never_builds_a_model() {
    let bad = minimal_valid_yaml().replace("#/types/GetUserRequest", "#/types/Nope");
    let err = schema_from_str(&bad, DocumentFormat::Yaml).unwrap_err();
    assert!(matches!(err, IdlError::Schema(_)));

    let parsed = parse_schema_str(&bad, DocumentFormat::Yaml).unwrap();
    assert!(Schema::from_document(&parsed.document).is_err());
}

#[test]
fn sample_schema_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../samples/schemas/services.yml");
    let schema = nexus_idl_core::load_schema(&path).unwrap();
    let ids = schema.services().iter().map(|s| s.identifier.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, ["UserService", "OneWayService"]);
}

fn two_services(first: &str, first_op: &str, second: &str, second_op: &str) -> String {
    format!(
        r##"
$schema: http://api.nexus/draft-01/schema#
services:
  - identifier: {first}
    operations:
      - identifier: {first_op}
  - identifier: {second}
    operations:
      - identifier: {second_op}
"##
    )
}

fn clashes(yaml: &str) -> Vec<nexus_idl_core::Violation> {
    violations(yaml)
        .into_iter()
        .filter(|v| v.message.starts_with("generated name"))
        .collect()
}

#[test]
fn services_differing_only_in_case_are_rejected() {
    let v = clashes(&two_services("UserService", "GetUser", "userService", "ListUsers"));
    assert_eq!(v.len(), 1);
    assert_eq!(v[0].path, "$.services[1].identifier");
    assert!(v[0].message.contains("`UserService`"), "{}", v[0].message);
}

#[test]
fn service_and_operation_names_that_concatenate_alike_are_rejected() {
    let v = clashes(&two_services("UserService", "GetUser", "User", "ServiceGetUser"));
    assert_eq!(v.len(), 1);
    assert_eq!(v[0].path, "$.services[1].operations[0].identifier");
    assert!(v[0].message.contains("`UserServiceGetUserOperationName`"), "{}", v[0].message);
    assert!(v[0].message.contains("operation `GetUser` of service `UserService`"));
}

#[test]
fn operation_named_like_the_client_constructor_is_rejected() {
    let v = clashes(&two_services("Echo", "New", "Other", "ping"));
    assert_eq!(v.len(), 1);
    assert_eq!(v[0].path, "$.services[0].operations[0].identifier");
    assert!(v[0].message.contains("the client constructor"));
}

#[test]
fn operation_colliding_with_an_async_variant_is_rejected() {
    let yaml = two_services("Echo", "Ping", "Other", "ping").replace(
        "      - identifier: Ping\n",
        "      - identifier: Ping\n      - identifier: PingAsync\n",
    );
    let v = clashes(&yaml);
    assert_eq!(v.len(), 1);
    assert_eq!(v[0].path, "$.services[0].operations[1].identifier");
    assert!(v[0].message.contains("`PingAsync`"));
}

#[test]
fn type_named_like_a_service_symbol_is_rejected() {
    let bad = minimal_valid_yaml().replace("  GetUserResponse:\n", "  UserServiceHandler:\n").replace(
        "#/types/GetUserResponse",
        "#/types/UserServiceHandler",
    );
    let v = clashes(&bad);
    assert_eq!(v.len(), 1);
    assert_eq!(v[0].path, "$.services[0].identifier");
    assert!(v[0].message.contains("type `UserServiceHandler`"));
}

#[test]
fn same_operation_in_different_services_is_fine() {
    let yaml = two_services("Users", "Get", "Orders", "Get");
    validate_schema(&parse_schema_str(&yaml, DocumentFormat::Yaml).unwrap().document).unwrap();
}

const MUTUAL: &str = r##"
$schema: http://api.nexus/draft-01/schema#
services:
  - identifier: Tree
    operations:
      - identifier: Walk
        input:
          $ref: "#/types/Node"
types:
  Node:
    type: object
    properties:
      label:
        type: string
      edge:
        $ref: "#/types/Edge"
      children:
        type: array
        items:
          $ref: "#/types/Node"
    required: [label, edge]
  Edge:
    type: object
    properties:
      to:
        $ref: "#/types/Node"
      weight:
        type: number
"##;

#[test]
fn mutually_recursive_fields_are_marked() {
    let schema = schema_from_str(MUTUAL, DocumentFormat::Yaml).unwrap();
    let recursive = |message: &str, field: &str| {
        schema
            .message(message)
            .unwrap()
            .fields
            .iter()
            .find(|f| f.name == field)
            .unwrap()
            .recursive
    };
    assert!(recursive("Node", "edge"));
    assert!(recursive("Edge", "to"));
    assert!(!recursive("Node", "label"));
    // Arrays already add indirection.
    assert!(!recursive("Node", "children"));
}

#[test]
fn cycle_of_required_references_is_rejected() {
    let bad = MUTUAL.replace("      weight:\n        type: number\n", "      weight:\n        type: number\n    required: [to]\n");
    let v = violations(&bad);
    assert!(
        v.iter().any(|v| v.path == "$.types.Node.properties.edge" && v.message.contains("cycle")),
        "{v:?}"
    );
    assert!(v.iter().any(|v| v.path == "$.types.Edge.properties.to"));
}

fn split_sample(file: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../samples/schemas/split").join(file)
}

#[test]
fn references_to_other_files_resolve_relative_to_the_schema() {
    let schema = load_schema(&split_sample("orders.yml")).unwrap();
    let names = schema.messages().map(|m| m.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, ["Money", "PlaceOrderRequest", "PlaceOrderResponse", "PostalAddress"]);

    let op = schema.service("OrderService").unwrap().operation("PlaceOrder").unwrap();
    assert_eq!(schema.resolve(op.input.as_ref().unwrap()).unwrap().name, "PlaceOrderRequest");

    // `#/types/Money` inside common.yml points back into common.yml.
    let request = schema.message("PlaceOrderRequest").unwrap();
    let target = |name: &str| match &request.fields.iter().find(|f| f.name == name).unwrap().ty {
        FieldType::Message(r) => r.name().to_string(),
        other => panic!("{name} is {other:?}"),
    };
    assert_eq!(target("budget"), "Money");
    // A reference back into orders.yml names the declared type instead of importing a copy.
    assert_eq!(target("previous"), "PlaceOrderResponse");

    let address = schema.message("PostalAddress").unwrap();
    let fields = address.fields.iter().map(|f| (f.name.as_str(), f.optional)).collect::<Vec<_>>();
    assert_eq!(fields, [("city", false), ("lines", true)]);
}

#[test]
fn missing_definition_in_referenced_file_is_a_parse_error() {
    let err = load_schema(&split_sample("dangling.yml")).unwrap_err();
    match err {
        IdlError::Parse(ParseError::Ref { reference, .. }) => assert_eq!(reference, "common.yml#/types/Refund"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn in_memory_schemas_keep_file_references_as_violations() {
    let bad = minimal_valid_yaml().replace("#/types/GetUserRequest", "common.yml#/types/GetUserRequest");
    assert!(violations(&bad)
        .iter()
        .any(|v| v.path == "$.services[0].operations[0].input.$ref" && v.message.contains("local reference")));
}
