use std::fmt::{self, Write};

use super::{quoted, render_err, wrap_doc, CodeWriter, EmissionTarget, GeneratedCode, GeneratorOptions, Language, WrapOptions};
use crate::error::EmitError;
use crate::model::{FieldType, Primitive};
use crate::synth::{Ident, MessageBinding, SchemaBindings, ServiceBindings, TypeSlot};

const NEXUS_IMPORT: &str = "import * as nexus from \"nexus-rpc\";";

/// Message interfaces and `nexus.service` definitions for the nexus-rpc TypeScript SDK.
pub struct TypeScriptTarget {
    options: GeneratorOptions,
}

impl TypeScriptTarget {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    fn doc<W: Write>(&self, w: &mut CodeWriter<W>, text: &str) -> fmt::Result {
        let indent = "  ".repeat(w.indent_level());
        let width = self.options.doc_width.saturating_sub(indent.len());
        w.writelns(wrap_doc(text, &WrapOptions::prefixed(" *").max_len(width).framed("/**", " */")))
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
        w.block(&format!("export interface {}", binding.ident.upper_camel()), |w| {
            for field in &message.fields {
                if let Some(desc) = &field.description {
                    self.doc(w, desc)?;
                }
                let marker = if field.optional { "?" } else { "" };
                w.writeln(format!("{}{marker}: {};", field.name, ts_type(&field.ty)))?;
            }
            Ok(())
        })?;
        w.blank_line()
    }

    fn write_service<W: Write>(&self, w: &mut CodeWriter<W>, svc: &ServiceBindings) -> fmt::Result {
        if let Some(desc) = &svc.description {
            self.doc(w, desc)?;
        }
        w.block_with(
            &format!(
                "export const {} = nexus.service({},",
                svc.ident.upper_camel(),
                quoted(&svc.wire_name)
            ),
            ");",
            |w| {
                for descriptor in svc.descriptors() {
                    let op = descriptor.operation;
                    let doc = op
                        .description
                        .clone()
                        .unwrap_or_else(|| format!("Represents the {} operation.", op.wire_name));
                    self.doc(w, &doc)?;
                    w.writeln(format!(
                        "{}: nexus.operation<{}, {}>({{",
                        op.ident.lower_camel(),
                        slot_type(descriptor.input()),
                        slot_type(descriptor.output()),
                    ))?;
                    {
                        let _indent = w.indent();
                        w.writeln(format!("name: {},", quoted(&op.wire_name)))?;
                    }
                    w.writeln("}),")?;
                }
                Ok(())
            },
        )?;
        w.blank_line()
    }
}

impl EmissionTarget for TypeScriptTarget {
    fn language(&self) -> Language {
        Language::TypeScript
    }

    fn emit(&self, bindings: &SchemaBindings) -> Result<GeneratedCode, EmitError> {
        let mut w = CodeWriter::with_indent_spaces(String::new(), 2);
        self.render(&mut w, bindings).map_err(render_err(Language::TypeScript))?;
        Ok(GeneratedCode {
            headers: Vec::new(),
            imports: vec![NEXUS_IMPORT.to_string()],
            body: w.into_inner(),
        })
    }
}

fn ts_type(ty: &FieldType) -> String {
    match ty {
        FieldType::Primitive(Primitive::String) => "string".to_string(),
        FieldType::Primitive(Primitive::Integer | Primitive::Number) => "number".to_string(),
        FieldType::Primitive(Primitive::Boolean) => "boolean".to_string(),
        FieldType::Array(items) => format!("{}[]", ts_type(items)),
        FieldType::Message(r) => Ident::new(r.name()).upper_camel(),
    }
}

fn slot_type(slot: &TypeSlot) -> String {
    match slot.message_name() {
        Some(name) => Ident::new(name).upper_camel(),
        None => "void".to_string(),
    }
}
