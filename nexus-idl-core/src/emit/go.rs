use std::fmt::{self, Write};

use super::{quoted, render_err, CodeWriter, EmissionTarget, GeneratedCode, GeneratorOptions, Language};
use super::{wrap_doc, WrapOptions};
use crate::error::EmitError;
use crate::model::{FieldType, Primitive};
use crate::synth::{ClientCall, ConstantKind, Ident, MessageBinding, SchemaBindings, ServiceBindings, TypeSlot};

const NEXUS_IMPORT: &str = "import \"github.com/nexus-rpc/sdk-go/nexus\"";
const WORKFLOW_IMPORT: &str = "import \"go.temporal.io/sdk/workflow\"";

/// Words Go style spells in all caps inside identifiers.
const INITIALISMS: &[&str] = &[
    "api", "http", "id", "ip", "json", "sql", "uri", "url", "uuid", "xml",
];

/// Message structs, nexus service bindings and Temporal in-workflow clients.
pub struct GoTarget {
    options: GeneratorOptions,
}

impl GoTarget {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    fn doc<W: Write>(&self, w: &mut CodeWriter<W>, text: &str) -> fmt::Result {
        w.writelns(wrap_doc(text, &WrapOptions::prefixed("//").max_len(self.options.doc_width)))
    }

    fn render<W: Write>(&self, w: &mut CodeWriter<W>, bindings: &SchemaBindings) -> fmt::Result {
        for message in &bindings.messages {
            self.write_message(w, message)?;
        }
        for svc in &bindings.services {
            self.write_service(w, svc)?;
        }
        Ok(())
    }

    fn write_message<W: Write>(&self, w: &mut CodeWriter<W>, binding: &MessageBinding) -> fmt::Result {
        let message = &binding.message;
        let doc = [message.title.as_deref(), message.description.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("\n\n");
        self.doc(w, &doc)?;
        w.block(&format!("type {} struct", binding.ident.upper_camel()), |w| {
            for field in &message.fields {
                if let Some(desc) = &field.description {
                    self.doc(w, desc)?;
                }
                let mut ty = go_type(&field.ty);
                let mut tag = field.name.clone();
                if field.optional {
                    if !matches!(field.ty, FieldType::Array(_)) {
                        ty = format!("*{ty}");
                    }
                    tag.push_str(",omitempty");
                } else if field.recursive {
                    ty = format!("*{ty}");
                }
                w.writeln(format!("{} {ty} `json:\"{tag}\"`", go_field_name(&field.name)))?;
            }
            Ok(())
        })?;
        w.blank_line()
    }

    fn write_service<W: Write>(&self, w: &mut CodeWriter<W>, svc: &ServiceBindings) -> fmt::Result {
        let svc_name = svc.ident.upper_camel();

        for constant in svc.name_constants() {
            let ident = constant.ident.upper_camel();
            let doc = constant.doc.clone().unwrap_or_else(|| match constant.kind {
                ConstantKind::Service => format!("is the name of the {} service.", constant.value),
                ConstantKind::Operation => format!("is the name of the {} operation.", constant.value),
            });
            self.doc(w, &format!("{ident} {doc}"))?;
            w.writeln(format!("const {ident} = {}", quoted(&constant.value)))?;
            w.blank_line()?;
        }

        for descriptor in svc.descriptors() {
            let ident = descriptor.ident().upper_camel();
            let doc = descriptor
                .operation
                .description
                .clone()
                .unwrap_or_else(|| format!("references the {} operation.", descriptor.operation.wire_name));
            self.doc(w, &format!("{ident} {doc}"))?;
            w.writeln(format!(
                "var {ident} = nexus.NewOperationReference[{}, {}]({})",
                slot_type(descriptor.input()),
                slot_type(descriptor.output()),
                descriptor.name_constant().upper_camel(),
            ))?;
            w.blank_line()?;
        }

        let handler = svc.handler();
        let handler_ident = handler.ident.upper_camel();
        let unimplemented_ident = handler.unimplemented_ident.upper_camel();
        self.doc(w, &format!("{handler_ident} defines the handler interface for the {svc_name} service."))?;
        w.block(&format!("type {handler_ident} interface"), |w| {
            for method in &handler.methods {
                w.writeln(format!(
                    "{}(name string) {}",
                    method.ident().upper_camel(),
                    operation_type(method.descriptor.input(), method.descriptor.output()),
                ))?;
            }
            Ok(())
        })?;
        w.blank_line()?;

        self.doc(w, &format!("{unimplemented_ident} provides an unimplemented version of {handler_ident}."))?;
        w.writeln(format!("type {unimplemented_ident} struct{{}}"))?;
        w.blank_line()?;

        for method in &handler.methods {
            let method_ident = method.ident().upper_camel();
            let stub = Ident::concat(&[&svc.ident, method.ident()]).prefixed("unimplemented").lower_camel();
            let input = slot_type(method.descriptor.input());
            let output = slot_type(method.descriptor.output());

            self.doc(w, &format!("{stub} provides an unimplemented {method_ident} operation."))?;
            w.block(&format!("type {stub} struct"), |w| {
                w.writeln(format!("nexus.UnimplementedOperation[{input}, {output}]"))?;
                w.writeln("name string")
            })?;
            w.blank_line()?;
            w.block(&format!("func (op *{stub}) Name() string"), |w| w.writeln("return op.name"))?;
            w.blank_line()?;
            self.doc(w, &format!("{method_ident} returns an unimplemented operation."))?;
            w.block(
                &format!(
                    "func ({unimplemented_ident}) {method_ident}(name string) {}",
                    operation_type(method.descriptor.input(), method.descriptor.output())
                ),
                |w| w.writeln(format!("return &{stub}{{name: name}}")),
            )?;
            w.blank_line()?;
        }

        let registration = svc.registration();
        let ctor = registration.ident.upper_camel();
        self.doc(w, &format!("{ctor} creates a new {svc_name} service from a handler with all operations registered."))?;
        w.block(
            &format!("func {ctor}(handler {handler_ident}) (*nexus.Service, error)"),
            |w| {
                w.writeln(format!(
                    "service := nexus.NewService({})",
                    registration.service_constant.upper_camel()
                ))?;
                w.blank_line()?;
                for step in &registration.steps {
                    w.block(
                        &format!(
                            "if err := service.Register(handler.{}({})); err != nil",
                            step.operation().ident.upper_camel(),
                            step.descriptor().name_constant().upper_camel(),
                        ),
                        |w| w.writeln("return nil, err"),
                    )?;
                }
                w.blank_line()?;
                w.writeln("return service, nil")
            },
        )?;
        w.blank_line()?;

        self.write_client(w, svc)
    }

    fn write_client<W: Write>(&self, w: &mut CodeWriter<W>, svc: &ServiceBindings) -> fmt::Result {
        let client = svc.client();
        let client_ident = client.ident.upper_camel();
        let wire = &svc.wire_name;

        self.doc(w, &format!("{client_ident} is an in-workflow Nexus client for the {wire} service."))?;
        w.block(&format!("type {client_ident} struct"), |w| w.writeln("c workflow.NexusClient"))?;
        w.blank_line()?;
        self.doc(w, &format!("New{client_ident} creates a new in-workflow Nexus client for the {wire} service."))?;
        w.block(
            &format!("func New{client_ident}(endpoint string) *{client_ident}"),
            |w| {
                w.writeln(format!(
                    "c := workflow.NewNexusClient(endpoint, {})",
                    svc.service_constant_ident().upper_camel()
                ))?;
                w.writeln(format!("return &{client_ident}{{c}}"))
            },
        )?;
        w.blank_line()?;

        for call in &client.calls {
            self.write_call(w, &client_ident, call)?;
        }
        Ok(())
    }

    fn write_call<W: Write>(&self, w: &mut CodeWriter<W>, client_ident: &str, call: &ClientCall<'_>) -> fmt::Result {
        let wire = &call.operation.wire_name;
        let future = call.future_ident().upper_camel();
        let sync_ident = call.sync_ident().upper_camel();
        let async_ident = call.async_ident().upper_camel();
        let name_constant = call.descriptor.name_constant().upper_camel();

        self.doc(w, &format!("{future} is a future for the {wire} operation."))?;
        w.block(&format!("type {future} struct"), |w| w.writeln("workflow.NexusOperationFuture"))?;
        w.blank_line()?;

        self.doc(w, "GetTyped gets the typed result of the operation.")?;
        if call.returns_payload() {
            let output = slot_type(call.descriptor.output());
            w.block(
                &format!("func (f {future}) GetTyped(ctx workflow.Context) ({output}, error)"),
                |w| {
                    w.writeln(format!("var output {output}"))?;
                    w.writeln("err := f.Get(ctx, &output)")?;
                    w.writeln("return output, err")
                },
            )?;
        } else {
            w.block(&format!("func (f {future}) GetTyped(ctx workflow.Context) error"), |w| {
                w.writeln("return f.Get(ctx, nil)")
            })?;
        }
        w.blank_line()?;

        let (params, input_arg) = if call.takes_input() {
            (
                format!(
                    "ctx workflow.Context, input {}, options workflow.NexusOperationOptions",
                    slot_type(call.descriptor.input())
                ),
                "input",
            )
        } else {
            ("ctx workflow.Context, options workflow.NexusOperationOptions".to_string(), "nil")
        };
        let forward = if call.takes_input() { "ctx, input, options" } else { "ctx, options" };

        self.doc(w, &format!("{async_ident} executes the {wire} operation and returns a future."))?;
        w.block(
            &format!("func (c *{client_ident}) {async_ident}({params}) {future}"),
            |w| {
                w.writeln(format!(
                    "fut := c.c.ExecuteOperation(ctx, {name_constant}, {input_arg}, options)"
                ))?;
                w.writeln(format!("return {future}{{fut}}"))
            },
        )?;
        w.blank_line()?;

        let returns = if call.returns_payload() {
            format!("({}, error)", slot_type(call.descriptor.output()))
        } else {
            "error".to_string()
        };
        self.doc(w, &format!("{sync_ident} executes the {wire} operation and returns the result."))?;
        w.block(
            &format!("func (c *{client_ident}) {sync_ident}({params}) {returns}"),
            |w| {
                w.writeln(format!("fut := c.{async_ident}({forward})"))?;
                w.writeln("return fut.GetTyped(ctx)")
            },
        )?;
        w.blank_line()
    }
}

impl EmissionTarget for GoTarget {
    fn language(&self) -> Language {
        Language::Go
    }

    fn emit(&self, bindings: &SchemaBindings) -> Result<GeneratedCode, EmitError> {
        let mut w = CodeWriter::with_tabs(String::new());
        self.render(&mut w, bindings).map_err(render_err(Language::Go))?;

        Ok(GeneratedCode {
            headers: vec![format!("package {}", self.options.go_package)],
            imports: vec![NEXUS_IMPORT.to_string(), WORKFLOW_IMPORT.to_string()],
            body: w.into_inner(),
        })
    }
}

fn go_type(ty: &FieldType) -> String {
    match ty {
        FieldType::Primitive(Primitive::String) => "string".to_string(),
        FieldType::Primitive(Primitive::Integer) => "int64".to_string(),
        FieldType::Primitive(Primitive::Number) => "float64".to_string(),
        FieldType::Primitive(Primitive::Boolean) => "bool".to_string(),
        FieldType::Array(items) => format!("[]{}", go_type(items)),
        FieldType::Message(r) => Ident::new(r.name()).upper_camel(),
    }
}

fn slot_type(slot: &TypeSlot) -> String {
    match slot.message_name() {
        Some(name) => Ident::new(name).upper_camel(),
        None => "nexus.NoValue".to_string(),
    }
}

fn operation_type(input: &TypeSlot, output: &TypeSlot) -> String {
    format!("nexus.Operation[{}, {}]", slot_type(input), slot_type(output))
}

fn go_field_name(json_name: &str) -> String {
    Ident::new(json_name)
        .words()
        .iter()
        .map(|word| {
            if INITIALISMS.contains(&word.as_str()) {
                word.to_uppercase()
            } else {
                crate::synth::capitalize(word)
            }
        })
        .collect()
}
