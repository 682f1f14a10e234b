use std::fmt::{self, Write};

use super::{quoted, render_err, wrap_doc, CodeWriter, EmissionTarget, GeneratedCode, GeneratorOptions, Language, WrapOptions};
use crate::error::EmitError;
use crate::model::{Field, FieldType, Primitive};
use crate::synth::{Ident, MessageBinding, SchemaBindings, ServiceBindings, TypeSlot};

const KEYWORDS: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif",
    "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda",
    "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
];

/// Pydantic message models and `@nexusrpc.service` classes for the nexus-rpc Python SDK.
pub struct PythonTarget {
    options: GeneratorOptions,
}

impl PythonTarget {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    /// Writes a triple-quoted docstring; short text stays on one line.
    fn docstring<W: Write>(&self, w: &mut CodeWriter<W>, text: &str) -> fmt::Result {
        let text = docstring_text(text);
        let indent = 4 * w.indent_level();
        let lines = wrap_doc(&text, &WrapOptions::prefixed("").max_len(self.options.doc_width.saturating_sub(indent)));
        match lines.as_slice() {
            [] => Ok(()),
            [only] => w.writeln(format!("\"\"\"{}\"\"\"", only.trim_start())),
            _ => {
                w.writeln("\"\"\"")?;
                w.writelns(lines.iter().map(|l| l.trim_start()))?;
                w.writeln("\"\"\"")
            }
        }
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
        w.writeln(format!("class {}(BaseModel):", binding.ident.upper_camel()))?;
        let _indent = w.indent();

        let doc = [message.title.as_deref(), message.description.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("\n\n");
        self.docstring(w, &doc)?;
        if message.fields.is_empty() {
            w.writeln("pass")?;
        }

        // Fields without a default must come first.
        let (required, optional): (Vec<&Field>, Vec<&Field>) =
            message.fields.iter().partition(|f| !f.optional);
        for field in required.into_iter().chain(optional) {
            w.writeln(field_line(field))?;
            if let Some(desc) = &field.description {
                self.docstring(w, desc)?;
            }
        }
        drop(_indent);
        w.blank_line()?;
        w.blank_line()
    }

    fn write_service<W: Write>(&self, w: &mut CodeWriter<W>, svc: &ServiceBindings) -> fmt::Result {
        w.writeln("@nexusrpc.service")?;
        w.writeln(format!("class {}:", svc.ident.upper_camel()))?;
        let _indent = w.indent();

        let doc = svc
            .description
            .clone()
            .unwrap_or_else(|| format!("Service for {}.", svc.wire_name));
        self.docstring(w, &doc)?;
        if svc.operations.is_empty() {
            w.writeln("pass")?;
        }

        for descriptor in svc.descriptors() {
            let op = descriptor.operation;
            w.blank_line()?;
            w.writeln(format!(
                "{}: nexusrpc.Operation[{}, {}] = nexusrpc.Operation(name={})",
                python_name(&op.ident),
                slot_type(descriptor.input()),
                slot_type(descriptor.output()),
                quoted(&op.wire_name),
            ))?;
            let doc = op
                .description
                .clone()
                .unwrap_or_else(|| format!("Operation for {}.", op.wire_name));
            self.docstring(w, &doc)?;
        }
        drop(_indent);
        w.blank_line()?;
        w.blank_line()
    }
}

impl EmissionTarget for PythonTarget {
    fn language(&self) -> Language {
        Language::Python
    }

    fn emit(&self, bindings: &SchemaBindings) -> Result<GeneratedCode, EmitError> {
        let mut w = CodeWriter::with_indent_spaces(String::new(), 4);
        self.render(&mut w, bindings).map_err(render_err(Language::Python))?;
        Ok(GeneratedCode {
            headers: vec!["from __future__ import annotations".to_string()],
            imports: vec![
                "from typing import List, Optional".to_string(),
                "import nexusrpc".to_string(),
                "from pydantic import BaseModel, Field".to_string(),
            ],
            body: w.into_inner(),
        })
    }
}

/// Escapes text for a `"""` literal. A trailing quote would merge with the closing delimiter.
fn docstring_text(text: &str) -> String {
    let escaped = text.replace('\\', "\\\\");
    let (body, trailing_quote) = match escaped.strip_suffix('"') {
        Some(body) => (body, true),
        None => (escaped.as_str(), false),
    };
    let mut out = body.replace("\"\"\"", "\\\"\\\"\\\"");
    if trailing_quote {
        out.push_str("\\\"");
    }
    out
}

fn field_line(field: &Field) -> String {
    let name = python_name(&Ident::new(&field.name));
    let alias = (name != field.name).then(|| format!("alias={}", quoted(&field.name)));
    let ty = python_type(&field.ty);
    match (field.optional, alias) {
        (false, None) => format!("{name}: {ty}"),
        (false, Some(alias)) => format!("{name}: {ty} = Field({alias})"),
        (true, None) => format!("{name}: Optional[{ty}] = None"),
        (true, Some(alias)) => format!("{name}: Optional[{ty}] = Field(default=None, {alias})"),
    }
}

fn python_name(ident: &Ident) -> String {
    let name = ident.snake();
    if KEYWORDS.contains(&name.as_str()) {
        format!("{name}_")
    } else {
        name
    }
}

fn python_type(ty: &FieldType) -> String {
    match ty {
        FieldType::Primitive(Primitive::String) => "str".to_string(),
        FieldType::Primitive(Primitive::Integer) => "int".to_string(),
        FieldType::Primitive(Primitive::Number) => "float".to_string(),
        FieldType::Primitive(Primitive::Boolean) => "bool".to_string(),
        FieldType::Array(items) => format!("List[{}]", python_type(items)),
        FieldType::Message(r) => Ident::new(r.name()).upper_camel(),
    }
}

fn slot_type(slot: &TypeSlot) -> String {
    match slot.message_name() {
        Some(name) => Ident::new(name).upper_camel(),
        None => "None".to_string(),
    }
}
