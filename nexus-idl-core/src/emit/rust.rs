use std::fmt::{self, Write};

use super::{render_err, wrap_doc, CodeWriter, EmissionTarget, GeneratedCode, GeneratorOptions, Language, WrapOptions};
use crate::error::EmitError;
use crate::model::{Field, FieldType, Primitive};
use crate::shape::OperationShape;
use crate::synth::{ClientCall, HandlerMethod, Ident, MessageBinding, RegistrationStep, SchemaBindings, ServiceBindings, TypeSlot};

/// Alias generated code uses for the runtime crate.
const RT: &str = "nexus";

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "box", "break", "const", "continue", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "static", "struct", "trait", "true", "type", "unsafe", "use",
    "where", "while", "yield",
];

/// Path keywords that cannot be written as raw identifiers.
const RESERVED: &[&str] = &["crate", "self", "Self", "super"];

/// Serde message structs and service bindings against `nexus-idl-runtime`.
pub struct RustTarget {
    options: GeneratorOptions,
}

impl RustTarget {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    fn doc<W: Write>(&self, w: &mut CodeWriter<W>, text: &str) -> fmt::Result {
        let width = self.options.doc_width.saturating_sub(4 * w.indent_level());
        w.writelns(wrap_doc(text, &WrapOptions::prefixed("///").max_len(width)))
    }

    fn render<W: Write>(&self, w: &mut CodeWriter<W>, bindings: &SchemaBindings) -> fmt::Result {
        for message in &bindings.messages {
            self.write_message(w, message)?;
        }
        for svc in &bindings.services {
            self.write_constants(w, svc)?;
            self.write_handler(w, svc)?;
            self.write_registration(w, svc)?;
            self.write_client(w, svc)?;
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
        w.writeln("#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]")?;
        let name = binding.ident.upper_camel();
        if message.fields.is_empty() {
            w.writeln(format!("pub struct {name} {{}}"))?;
            return w.blank_line();
        }
        w.block(&format!("pub struct {name}"), |w| {
            for field in &message.fields {
                self.write_field(w, field)?;
            }
            Ok(())
        })?;
        w.blank_line()
    }

    fn write_field<W: Write>(&self, w: &mut CodeWriter<W>, field: &Field) -> fmt::Result {
        if let Some(desc) = &field.description {
            self.doc(w, desc)?;
        }
        let ident = escape(Ident::new(&field.name).snake());
        if ident.trim_start_matches("r#") != field.name {
            w.writeln(format!("#[serde(rename = \"{}\")]", field.name))?;
        }
        let mut ty = rust_type(&field.ty);
        if field.recursive {
            ty = format!("Box<{ty}>");
        }
        if field.optional {
            w.writeln("#[serde(default, skip_serializing_if = \"Option::is_none\")]")?;
            ty = format!("Option<{ty}>");
        }
        w.writeln(format!("pub {ident}: {ty},"))
    }

    fn write_constants<W: Write>(&self, w: &mut CodeWriter<W>, svc: &ServiceBindings) -> fmt::Result {
        for constant in svc.name_constants() {
            if let Some(doc) = &constant.doc {
                self.doc(w, doc)?;
            }
            w.writeln(format!(
                "pub const {}: &str = {:?};",
                constant.ident.shouty_snake(),
                constant.value
            ))?;
            w.blank_line()?;
        }
        for descriptor in svc.descriptors() {
            if let Some(doc) = &descriptor.operation.description {
                self.doc(w, doc)?;
            }
            w.writeln(format!(
                "pub const {}: {RT}::OperationRef<{}, {}> =",
                descriptor.ident().shouty_snake(),
                slot_type(descriptor.input()),
                slot_type(descriptor.output()),
            ))?;
            {
                let _indent = w.indent();
                w.writeln(format!(
                    "{RT}::OperationRef::new({});",
                    descriptor.name_constant().shouty_snake()
                ))?;
            }
            w.blank_line()?;
        }
        Ok(())
    }

    fn write_handler<W: Write>(&self, w: &mut CodeWriter<W>, svc: &ServiceBindings) -> fmt::Result {
        let handler = svc.handler();
        let handler_ident = handler.ident.upper_camel();

        self.doc(
            w,
            &format!(
                "Handler for the {} service. Methods left unimplemented fail with `HandlerError::Unimplemented`.",
                svc.wire_name
            ),
        )?;
        w.writeln(format!("#[{RT}::async_trait]"))?;
        w.block(&format!("pub trait {handler_ident}: Send + Sync"), |w| {
            for (idx, method) in handler.methods.iter().enumerate() {
                if idx > 0 {
                    w.blank_line()?;
                }
                self.write_handler_method(w, method)?;
            }
            Ok(())
        })?;
        w.blank_line()?;

        let unimplemented = handler.unimplemented_ident.upper_camel();
        w.writeln(format!(
            "/// Answers every {} operation with `HandlerError::Unimplemented`.",
            svc.wire_name
        ))?;
        w.writeln("#[derive(Debug, Clone, Copy, Default)]")?;
        w.writeln(format!("pub struct {unimplemented};"))?;
        w.blank_line()?;
        w.writeln(format!("impl {handler_ident} for {unimplemented} {{}}"))?;
        w.blank_line()
    }

    fn write_handler_method<W: Write>(&self, w: &mut CodeWriter<W>, method: &HandlerMethod<'_>) -> fmt::Result {
        if let Some(doc) = &method.operation.description {
            self.doc(w, doc)?;
        }
        let shape = method.shape();
        let mut params = vec!["&self".to_string(), format!("ctx: &{RT}::OperationContext")];
        let mut ignored = vec!["ctx"];
        if shape.has_input() {
            params.push(format!("input: {}", slot_type(method.descriptor.input())));
            ignored.push("input");
        }
        let ignored = match ignored.as_slice() {
            [only] => only.to_string(),
            many => format!("({})", many.join(", ")),
        };
        w.block(
            &format!(
                "async fn {}({}) -> Result<{}, {RT}::HandlerError>",
                escape(method.ident().snake()),
                params.join(", "),
                output_type(method.descriptor.output()),
            ),
            |w| {
                w.writeln(format!("let _ = {ignored};"))?;
                w.writeln(format!(
                    "Err({RT}::HandlerError::unimplemented({}))",
                    method.descriptor.name_constant().shouty_snake()
                ))
            },
        )
    }

    fn write_registration<W: Write>(&self, w: &mut CodeWriter<W>, svc: &ServiceBindings) -> fmt::Result {
        let registration = svc.registration();
        let handler_ident = svc.handler().ident.upper_camel();
        let ctor = registration.ident.snake();
        let register = svc.ident.prefixed("register").snake();
        let returns = format!("Result<{RT}::Service, {RT}::RegistrationError>");

        self.doc(
            w,
            &format!("Creates the {} service with every operation bound to `handler`.", svc.wire_name),
        )?;
        w.block(
            &format!("pub fn {ctor}<H: {handler_ident} + 'static>(handler: H) -> {returns}"),
            |w| {
                w.writeln(format!(
                    "{register}({RT}::Service::new({}), handler)",
                    registration.service_constant.shouty_snake()
                ))
            },
        )?;
        w.blank_line()?;

        self.doc(
            w,
            "Registers every operation on `service` in declaration order. The first failure is returned and `service` is dropped.",
        )?;
        let service_param = if registration.steps.is_empty() { "service" } else { "mut service" };
        w.block(
            &format!(
                "pub fn {register}<H: {handler_ident} + 'static>({service_param}: {RT}::Service, handler: H) -> {returns}"
            ),
            |w| {
                if registration.steps.is_empty() {
                    w.writeln("let _ = handler;")?;
                } else {
                    w.writeln("let handler = std::sync::Arc::new(handler);")?;
                }
                for step in &registration.steps {
                    self.write_registration_step(w, step)?;
                }
                w.writeln("Ok(service)")
            },
        )?;
        w.blank_line()
    }

    fn write_registration_step<W: Write>(&self, w: &mut CodeWriter<W>, step: &RegistrationStep<'_>) -> fmt::Result {
        let op = step.operation();
        let method = escape(op.ident.snake());
        let (params, call) = match op.shape {
            OperationShape::RequestResponse => ("ctx, input", format!("handler.{method}(&ctx, input).await")),
            OperationShape::NoInput => ("ctx, _", format!("handler.{method}(&ctx).await")),
            OperationShape::NoOutput => (
                "ctx, input",
                format!("handler.{method}(&ctx, input).await.map(|()| {RT}::NoValue)"),
            ),
            OperationShape::NoInputNoOutput => (
                "ctx, _",
                format!("handler.{method}(&ctx).await.map(|()| {RT}::NoValue)"),
            ),
        };
        w.writeln("service.register({")?;
        {
            let _indent = w.indent();
            w.writeln("let handler = std::sync::Arc::clone(&handler);")?;
            w.block_with(
                &format!(
                    "{}.handler(move |{params}|",
                    step.descriptor().ident().shouty_snake()
                ),
                ")",
                |w| {
                    w.writeln("let handler = std::sync::Arc::clone(&handler);")?;
                    w.writeln(format!("async move {{ {call} }}"))
                },
            )?;
        }
        w.writeln("})?;")
    }

    fn write_client<W: Write>(&self, w: &mut CodeWriter<W>, svc: &ServiceBindings) -> fmt::Result {
        let client = svc.client();
        let client_ident = client.ident.upper_camel();

        self.doc(w, &format!("In-workflow client for the {} service.", svc.wire_name))?;
        w.writeln("#[derive(Debug, Clone)]")?;
        w.block(&format!("pub struct {client_ident}"), |w| {
            w.writeln(format!("client: {RT}::NexusClient,"))
        })?;
        w.blank_line()?;

        w.block(&format!("impl {client_ident}"), |w| {
            w.block("pub fn new(endpoint: impl Into<String>) -> Self", |w| {
                w.writeln(format!(
                    "Self {{ client: {RT}::NexusClient::new(endpoint, {}) }}",
                    svc.service_constant_ident().shouty_snake()
                ))
            })?;
            for call in &client.calls {
                w.blank_line()?;
                self.write_call(w, call)?;
            }
            Ok(())
        })?;
        w.blank_line()?;

        for call in &client.calls {
            self.write_future(w, call)?;
        }
        Ok(())
    }

    fn write_call<W: Write>(&self, w: &mut CodeWriter<W>, call: &ClientCall<'_>) -> fmt::Result {
        let wire = &call.operation.wire_name;
        let future = call.future_ident().upper_camel();
        let sync_ident = escape(call.sync_ident().snake());
        let async_ident = call.async_ident().snake();

        let mut params = vec!["&self".to_string(), format!("ctx: &{RT}::WorkflowContext")];
        if call.takes_input() {
            params.push(format!("input: {}", slot_type(call.descriptor.input())));
        }
        params.push(format!("options: {RT}::OperationOptions"));
        let params = params.join(", ");
        let input_arg = if call.takes_input() {
            "input".to_string()
        } else {
            format!("{RT}::NoValue")
        };
        let forward = if call.takes_input() { "ctx, input, options" } else { "ctx, options" };

        w.writeln(format!("/// Starts the {wire} operation and returns without waiting for it."))?;
        w.block(&format!("pub fn {async_ident}({params}) -> {future}"), |w| {
            w.writeln(format!(
                "{future}(self.client.execute_operation(ctx, {}.name(), {input_arg}, options))",
                call.descriptor.ident().shouty_snake()
            ))
        })?;
        w.blank_line()?;
        w.writeln(format!("/// Runs the {wire} operation and waits for its result."))?;
        w.block(
            &format!(
                "pub async fn {sync_ident}({params}) -> Result<{}, {RT}::CallError>",
                output_type(call.descriptor.output())
            ),
            |w| {
                w.writeln(format!("let mut future = self.{async_ident}({forward});"))?;
                w.writeln("future.get_typed(ctx).await")
            },
        )
    }

    fn write_future<W: Write>(&self, w: &mut CodeWriter<W>, call: &ClientCall<'_>) -> fmt::Result {
        let future = call.future_ident().upper_camel();
        w.writeln(format!("/// Pending result of the {} operation.", call.operation.wire_name))?;
        w.writeln("#[derive(Debug)]")?;
        w.writeln(format!("pub struct {future}(pub {RT}::NexusOperationFuture);"))?;
        w.blank_line()?;
        w.block(&format!("impl {future}"), |w| {
            if call.returns_payload() {
                w.writeln("/// Waits for the operation and returns its output.")?;
            } else {
                w.writeln("/// Waits for the operation and reports whether it succeeded.")?;
            }
            w.block(
                &format!(
                    "pub async fn get_typed(&mut self, ctx: &{RT}::WorkflowContext) -> Result<{}, {RT}::CallError>",
                    output_type(call.descriptor.output())
                ),
                |w| {
                    if call.returns_payload() {
                        w.writeln("self.0.get(ctx).await")
                    } else {
                        w.writeln("self.0.wait(ctx).await")
                    }
                },
            )
        })?;
        w.blank_line()
    }
}

impl EmissionTarget for RustTarget {
    fn language(&self) -> Language {
        Language::Rust
    }

    fn emit(&self, bindings: &SchemaBindings) -> Result<GeneratedCode, EmitError> {
        let mut w = CodeWriter::with_indent_spaces(String::new(), 4);
        self.render(&mut w, bindings).map_err(render_err(Language::Rust))?;
        let imports = if bindings.services.is_empty() {
            Vec::new()
        } else {
            vec![format!("use {} as {RT};", self.options.rust_runtime_crate)]
        };
        Ok(GeneratedCode {
            headers: vec!["// Code generated by nexus-idl. DO NOT EDIT.".to_string()],
            imports,
            body: w.into_inner(),
        })
    }
}

fn rust_type(ty: &FieldType) -> String {
    match ty {
        FieldType::Primitive(Primitive::String) => "String".to_string(),
        FieldType::Primitive(Primitive::Integer) => "i64".to_string(),
        FieldType::Primitive(Primitive::Number) => "f64".to_string(),
        FieldType::Primitive(Primitive::Boolean) => "bool".to_string(),
        FieldType::Array(items) => format!("Vec<{}>", rust_type(items)),
        FieldType::Message(r) => Ident::new(r.name()).upper_camel(),
    }
}

fn slot_type(slot: &TypeSlot) -> String {
    match slot.message_name() {
        Some(name) => Ident::new(name).upper_camel(),
        None => format!("{RT}::NoValue"),
    }
}

/// What a handler or client returns for an output slot; absent outputs become `()`.
fn output_type(slot: &TypeSlot) -> String {
    match slot.message_name() {
        Some(name) => Ident::new(name).upper_camel(),
        None => "()".to_string(),
    }
}

fn escape(ident: String) -> String {
    if RESERVED.contains(&ident.as_str()) {
        format!("{ident}_")
    } else if KEYWORDS.contains(&ident.as_str()) {
        format!("r#{ident}")
    } else {
        ident
    }
}
