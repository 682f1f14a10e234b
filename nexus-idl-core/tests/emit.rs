use nexus_idl_core::{
    assemble, compile_str, generate, schema_from_str, synthesize, DocumentFormat, EmitError, GeneratorOptions, IdlError,
    Language,
};

const SAMPLE: &str = include_str!("../../samples/schemas/services.yml");

fn render(language: Language) -> String {
    let code = compile_str(SAMPLE, language, &GeneratorOptions::default()).unwrap();
    assemble(&[code])
}

fn assert_contains_all(out: &str, expected: &[&str]) {
    for line in expected {
        assert!(out.contains(line), "missing `{line}` in:\n{out}");
    }
}

#[test]
fn go_bindings() {
    let out = render(Language::Go);
    assert!(out.starts_with("package gen\n\nimport \"github.com/nexus-rpc/sdk-go/nexus\"\n"));
    assert_contains_all(
        &out,
        &[
            "// A simple person schema\n//\n// Response containing person details.\ntype GetPersonResponse struct {",
            "\tEmail *string `json:\"email,omitempty\"`",
            "\tUserID string `json:\"userId\"`",
            "\tAddress *Address `json:\"address,omitempty\"`",
            "\tTags []string `json:\"tags,omitempty\"`",
            "\tLines []string `json:\"lines\"`",
            "\tResident *GetPersonResponse `json:\"resident,omitempty\"`",
            "// UserServiceServiceName Service for managing users.\nconst UserServiceServiceName = \"directory.UserService\"",
            "const UserServiceGetUserOperationName = \"Get User\"",
            "var UserServiceGetUserOperation = nexus.NewOperationReference[GetPersonRequest, GetPersonResponse](UserServiceGetUserOperationName)",
            "var OneWayServiceNoInputOperation = nexus.NewOperationReference[nexus.NoValue, NoInputResponse](OneWayServiceNoInputOperationName)",
            "\tGetUser(name string) nexus.Operation[GetPersonRequest, GetPersonResponse]",
            "type UnimplementedUserServiceHandler struct{}",
            "\tnexus.UnimplementedOperation[NoInputRequest, nexus.NoValue]",
            "\tif err := service.Register(handler.GetUser(UserServiceGetUserOperationName)); err != nil {\n\t\treturn nil, err\n\t}",
            "func (f UserServiceGetUserFuture) GetTyped(ctx workflow.Context) (GetPersonResponse, error) {",
            "func (f OneWayServiceNoOutputFuture) GetTyped(ctx workflow.Context) error {",
            "func (c *OneWayServiceWorkflowClient) NoInputAsync(ctx workflow.Context, options workflow.NexusOperationOptions) OneWayServiceNoInputFuture {",
            "\tfut := c.c.ExecuteOperation(ctx, OneWayServiceNoInputOperationName, nil, options)",
            "func (c *UserServiceWorkflowClient) GetUser(ctx workflow.Context, input GetPersonRequest, options workflow.NexusOperationOptions) (GetPersonResponse, error) {",
            "func (c *OneWayServiceWorkflowClient) Ping(ctx workflow.Context, options workflow.NexusOperationOptions) error {",
        ],
    );
}

#[test]
fn go_package_is_configurable() {
    let options = GeneratorOptions {
        go_package: "bindings".to_string(),
        ..GeneratorOptions::default()
    };
    let code = compile_str(SAMPLE, Language::Go, &options).unwrap();
    assert_eq!(code.headers, ["package bindings"]);
}

#[test]
fn typescript_bindings() {
    let out = render(Language::TypeScript);
    assert!(out.starts_with("import * as nexus from \"nexus-rpc\";\n"));
    assert_contains_all(
        &out,
        &[
            "export interface GetPersonResponse {",
            "  email?: string;",
            "  address?: Address;",
            "  tags?: string[];",
            "  lines: string[];",
            "  age: number;",
            "  userId: string;",
            "export const UserService = nexus.service(\"directory.UserService\", {",
            "  getUser: nexus.operation<GetPersonRequest, GetPersonResponse>({\n    name: \"Get User\",\n  }),",
            "  noInput: nexus.operation<void, NoInputResponse>({",
            "  noOutput: nexus.operation<NoInputRequest, void>({",
            "  /**\n   * Represents the noInput operation.\n   */",
            "});",
        ],
    );
}

#[test]
fn python_bindings() {
    let out = render(Language::Python);
    assert!(out.starts_with("from __future__ import annotations\n"));
    assert_contains_all(
        &out,
        &[
            "import nexusrpc",
            "class GetPersonRequest(BaseModel):\n    \"\"\"Request to retrieve a person by their user ID.\"\"\"\n    user_id: str = Field(alias=\"userId\")",
            "    email: Optional[str] = None",
            "    address: Optional[Address] = None",
            "    tags: Optional[List[str]] = None",
            "    lines: List[str]",
            "@nexusrpc.service\nclass UserService:\n    \"\"\"Service for managing users.\"\"\"",
            "    get_user: nexusrpc.Operation[GetPersonRequest, GetPersonResponse] = nexusrpc.Operation(name=\"Get User\")",
            "    no_input: nexusrpc.Operation[None, NoInputResponse] = nexusrpc.Operation(name=\"noInput\")\n    \"\"\"Operation for noInput.\"\"\"",
            "    ping: nexusrpc.Operation[None, None] = nexusrpc.Operation(name=\"ping\")",
        ],
    );
    // Optional fields follow required ones so defaults never precede non-defaults.
    let age = out.find("    age: int").unwrap();
    let email = out.find("    email: Optional[str]").unwrap();
    let name = out.find("    name: str").unwrap();
    assert!(age < name && name < email);
}

#[test]
fn java_bindings() {
    let out = render(Language::Java);
    assert!(out.starts_with("package com.example.nexus;\n\nimport io.nexusrpc.Operation;\n"));
    assert_contains_all(
        &out,
        &[
            "/**\n * Service for managing users.\n */\n@Service(\"directory.UserService\")\npublic interface UserService {",
            "    @Operation(\"Get User\")\n    GetPersonResponse getUser(@Nonnull GetPersonRequest input);",
            "    NoInputResponse noInput();",
            "    void noOutput(@Nonnull NoInputRequest input);",
            "    void ping();",
            "     * Operation for noInput.",
        ],
    );
}

#[test]
fn java_requires_a_package() {
    let without = SAMPLE.replace("javaPackage: com.example.nexus\n", "");
    let err = compile_str(&without, Language::Java, &GeneratorOptions::default()).unwrap_err();
    assert!(matches!(err, IdlError::Emit(EmitError::MissingJavaPackage)));
}

#[test]
fn rust_bindings() {
    let out = render(Language::Rust);
    assert!(out.starts_with("// Code generated by nexus-idl. DO NOT EDIT.\n\nuse nexus_idl_runtime as nexus;\n"));
    assert_contains_all(
        &out,
        &[
            "#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]\npub struct GetPersonRequest {",
            "    #[serde(rename = \"userId\")]\n    pub user_id: String,",
            "    #[serde(default, skip_serializing_if = \"Option::is_none\")]\n    pub email: Option<String>,",
            "    pub lines: Vec<String>,",
            "    #[serde(default, skip_serializing_if = \"Option::is_none\")]\n    pub tags: Option<Vec<String>>,",
            // Address and GetPersonResponse refer to each other.
            "    pub address: Option<Box<Address>>,",
            "    pub resident: Option<Box<GetPersonResponse>>,",
            "pub const USER_SERVICE_SERVICE_NAME: &str = \"directory.UserService\";",
            "pub const USER_SERVICE_GET_USER_OPERATION_NAME: &str = \"Get User\";",
            "pub const ONE_WAY_SERVICE_NO_INPUT_OPERATION: nexus::OperationRef<nexus::NoValue, NoInputResponse> =",
            "#[nexus::async_trait]\npub trait UserServiceHandler: Send + Sync {",
            "    async fn no_input(&self, ctx: &nexus::OperationContext) -> Result<NoInputResponse, nexus::HandlerError> {",
            "    async fn no_output(&self, ctx: &nexus::OperationContext, input: NoInputRequest) -> Result<(), nexus::HandlerError> {",
            "        Err(nexus::HandlerError::unimplemented(USER_SERVICE_GET_USER_OPERATION_NAME))",
            "impl UserServiceHandler for UnimplementedUserServiceHandler {}",
            "pub fn new_user_service<H: UserServiceHandler + 'static>(handler: H) -> Result<nexus::Service, nexus::RegistrationError> {",
            "            async move { handler.no_output(&ctx, input).await.map(|()| nexus::NoValue) }",
            "    pub fn ping_async(&self, ctx: &nexus::WorkflowContext, options: nexus::OperationOptions) -> OneWayServicePingFuture {",
            "    pub async fn get_user(&self, ctx: &nexus::WorkflowContext, input: GetPersonRequest, options: nexus::OperationOptions) -> Result<GetPersonResponse, nexus::CallError> {",
            "pub struct OneWayServiceNoOutputFuture(pub nexus::NexusOperationFuture);",
            "        self.0.wait(ctx).await",
        ],
    );
}

#[test]
fn doc_width_is_honored() {
    let long = SAMPLE.replace(
        "description: Retrieves a user by their ID.",
        "description: Retrieves a user by their ID, looking the identifier up in the directory and returning every attribute that is known about that person.",
    );
    let options = GeneratorOptions {
        doc_width: 60,
        ..GeneratorOptions::default()
    };
    let code = compile_str(&long, Language::Go, &options).unwrap();
    for line in code.body.lines().filter(|l| l.starts_with("//")) {
        assert!(line.len() <= 60, "too long: {line}");
    }
}

#[test]
fn assembling_several_schemas_writes_shared_lines_once() {
    let schema = schema_from_str(SAMPLE, DocumentFormat::Yaml).unwrap();
    let bindings = synthesize(&schema);
    let options = GeneratorOptions::default();
    let a = generate(&bindings, Language::Go, &options).unwrap();
    let b = generate(&bindings, Language::Go, &options).unwrap();
    let out = assemble(&[a, b]);
    assert_eq!(out.matches("package gen").count(), 1);
    assert_eq!(out.matches("import \"go.temporal.io/sdk/workflow\"").count(), 1);
    assert_eq!(out.matches("type UserServiceHandler interface").count(), 2);
}

#[test]
fn every_language_renders_the_sample() {
    for language in Language::ALL {
        let code = compile_str(SAMPLE, language, &GeneratorOptions::default()).unwrap();
        assert!(!code.body.is_empty(), "{language} produced nothing");
    }
}

#[test]
fn checked_in_runtime_bindings_are_current() {
    let expected = include_str!("../../nexus-idl-runtime/tests/generated/mod.rs");
    assert_eq!(render(Language::Rust), expected);
}

const LINKED: &str = r##"
$schema: http://api.nexus/draft-01/schema#
services:
  - identifier: Graph
    operations:
      - identifier: Walk
        input:
          $ref: "#/types/Node"
types:
  Node:
    type: object
    properties:
      edge:
        $ref: "#/types/Edge"
      self:
        type: string
        description: Says "hi"
    required: [edge, self]
  Edge:
    type: object
    properties:
      to:
        $ref: "#/types/Node"
"##;

#[test]
fn required_field_on_a_reference_cycle_gets_indirection() {
    let go = compile_str(LINKED, Language::Go, &GeneratorOptions::default()).unwrap().body;
    assert_contains_all(
        &go,
        &["\tEdge *Edge `json:\"edge\"`", "\tTo *Node `json:\"to,omitempty\"`"],
    );

    let rust = compile_str(LINKED, Language::Rust, &GeneratorOptions::default()).unwrap().body;
    assert_contains_all(
        &rust,
        &[
            "    pub edge: Box<Edge>,",
            "    #[serde(default, skip_serializing_if = \"Option::is_none\")]\n    pub to: Option<Box<Node>>,",
        ],
    );
}

#[test]
fn path_keyword_fields_are_renamed_in_rust() {
    let rust = compile_str(LINKED, Language::Rust, &GeneratorOptions::default()).unwrap().body;
    assert!(rust.contains("    #[serde(rename = \"self\")]\n    pub self_: String,"), "{rust}");
}

#[test]
fn python_docstring_ending_in_a_quote_stays_closed() {
    let python = compile_str(LINKED, Language::Python, &GeneratorOptions::default()).unwrap().body;
    assert!(python.contains("\"\"\"Says \"hi\\\"\"\"\""), "{python}");
    assert!(!python.contains("\"hi\"\"\"\""));
}
