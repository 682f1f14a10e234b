use std::fmt::{self, Write};

use super::{quoted, render_err, wrap_doc, CodeWriter, EmissionTarget, GeneratedCode, GeneratorOptions, Language, WrapOptions};
use crate::error::EmitError;
use crate::synth::{Ident, SchemaBindings, ServiceBindings, TypeSlot};

const IMPORTS: &[&str] = &[
    "import io.nexusrpc.Operation;",
    "import io.nexusrpc.Service;",
    "import javax.annotation.Nonnull;",
    "import javax.annotation.Nullable;",
];

/// `@Service` interfaces for the nexus-rpc Java SDK.
///
/// Message classes are referenced by name and expected to live in the same package.
pub struct JavaTarget {
    options: GeneratorOptions,
}

impl JavaTarget {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    fn doc<W: Write>(&self, w: &mut CodeWriter<W>, text: &str) -> fmt::Result {
        let width = self.options.doc_width.saturating_sub(4 * w.indent_level());
        w.writelns(wrap_doc(text, &WrapOptions::prefixed(" *").max_len(width).framed("/**", " */")))
    }

    fn write_service<W: Write>(&self, w: &mut CodeWriter<W>, svc: &ServiceBindings) -> fmt::Result {
        let doc = svc
            .description
            .clone()
            .unwrap_or_else(|| format!("Service for {}.", svc.wire_name));
        self.doc(w, &doc)?;
        w.writeln(format!("@Service({})", quoted(&svc.wire_name)))?;
        w.block(&format!("public interface {}", svc.ident.upper_camel()), |w| {
            for descriptor in svc.descriptors() {
                let op = descriptor.operation;
                w.blank_line()?;
                let doc = op
                    .description
                    .clone()
                    .unwrap_or_else(|| format!("Operation for {}.", op.wire_name));
                self.doc(w, &doc)?;
                w.writeln(format!("@Operation({})", quoted(&op.wire_name)))?;
                let params = match descriptor.input().message_name() {
                    Some(name) => format!("@Nonnull {} input", Ident::new(name).upper_camel()),
                    None => String::new(),
                };
                w.writeln(format!(
                    "{} {}({params});",
                    slot_type(descriptor.output()),
                    op.ident.lower_camel()
                ))?;
            }
            Ok(())
        })?;
        w.blank_line()
    }
}

impl EmissionTarget for JavaTarget {
    fn language(&self) -> Language {
        Language::Java
    }

    fn emit(&self, bindings: &SchemaBindings) -> Result<GeneratedCode, EmitError> {
        let package = bindings.java_package.as_deref().ok_or(EmitError::MissingJavaPackage)?;
        let mut w = CodeWriter::with_indent_spaces(String::new(), 4);
        bindings
            .services
            .iter()
            .try_for_each(|svc| self.write_service(&mut w, svc))
            .map_err(render_err(Language::Java))?;
        Ok(GeneratedCode {
            headers: vec![format!("package {package};")],
            imports: IMPORTS.iter().map(|i| i.to_string()).collect(),
            body: w.into_inner(),
        })
    }
}

fn slot_type(slot: &TypeSlot) -> String {
    match slot.message_name() {
        Some(name) => Ident::new(name).upper_camel(),
        None => "void".to_string(),
    }
}
