//! Emission targets: render [`SchemaBindings`] as source text for one language.
//!
//! Targets only read the synthesized bindings; they never re-derive shapes or type pairings.

mod code_writer;
mod doc;
mod go;
mod java;
mod python;
mod rust;
mod typescript;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use code_writer::{CodeWriter, IndentGuard};
pub use doc::{wrap_doc, WrapOptions};
pub use go::GoTarget;
pub use java::JavaTarget;
pub use python::PythonTarget;
pub use rust::RustTarget;
pub use typescript::TypeScriptTarget;

use crate::error::EmitError;
use crate::synth::SchemaBindings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Go,
    TypeScript,
    Python,
    Java,
    Rust,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::Go,
        Language::TypeScript,
        Language::Python,
        Language::Java,
        Language::Rust,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Java => "java",
            Language::Rust => "rust",
        }
    }

    pub fn file_extension(self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::TypeScript => "ts",
            Language::Python => "py",
            Language::Java => "java",
            Language::Rust => "rs",
        }
    }

    pub fn target(self, options: &GeneratorOptions) -> Box<dyn EmissionTarget> {
        match self {
            Language::Go => Box::new(GoTarget::new(options.clone())),
            Language::TypeScript => Box::new(TypeScriptTarget::new(options.clone())),
            Language::Python => Box::new(PythonTarget::new(options.clone())),
            Language::Java => Box::new(JavaTarget::new(options.clone())),
            Language::Rust => Box::new(RustTarget::new(options.clone())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = EmitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "go" | "golang" => Ok(Language::Go),
            "typescript" | "ts" => Ok(Language::TypeScript),
            "python" | "py" => Ok(Language::Python),
            "java" => Ok(Language::Java),
            "rust" | "rs" => Ok(Language::Rust),
            _ => Err(EmitError::UnsupportedLanguage(s.to_string())),
        }
    }
}

/// Knobs shared by every target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Maximum width of wrapped documentation comments.
    pub doc_width: usize,
    /// Package clause for Go output.
    pub go_package: String,
    /// Crate path generated Rust code refers to for runtime types.
    pub rust_runtime_crate: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            doc_width: WrapOptions::DEFAULT_MAX_LEN,
            go_package: "gen".to_string(),
            rust_runtime_crate: "nexus_idl_runtime".to_string(),
        }
    }
}

/// Generated output for one schema, split so several can be merged by [`assemble`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedCode {
    pub headers: Vec<String>,
    pub imports: Vec<String>,
    pub body: String,
}

pub trait EmissionTarget: Send + Sync {
    fn language(&self) -> Language;
    fn emit(&self, bindings: &SchemaBindings) -> Result<GeneratedCode, EmitError>;
}

pub fn generate(
    bindings: &SchemaBindings,
    language: Language,
    options: &GeneratorOptions,
) -> Result<GeneratedCode, EmitError> {
    let code = language.target(options).emit(bindings)?;
    tracing::debug!(
        %language,
        services = bindings.services.len(),
        bytes = code.body.len(),
        "emitted bindings"
    );
    Ok(code)
}

/// Joins several outputs into one file: headers, then imports, then every body in order.
/// Headers and imports appearing in more than one output are written once.
pub fn assemble(parts: &[GeneratedCode]) -> String {
    let mut out = String::new();

    let headers = dedup(parts.iter().flat_map(|p| p.headers.iter()));
    for header in &headers {
        out.push_str(header);
        out.push('\n');
    }
    if !headers.is_empty() {
        out.push('\n');
    }

    let imports = dedup(parts.iter().flat_map(|p| p.imports.iter()));
    for import in &imports {
        out.push_str(import);
        out.push('\n');
    }
    if !imports.is_empty() {
        out.push('\n');
    }

    for (idx, part) in parts.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        out.push_str(part.body.trim_end());
        out.push('\n');
    }
    out
}

fn dedup<'a>(items: impl Iterator<Item = &'a String>) -> Vec<&'a String> {
    let mut seen = Vec::new();
    for item in items {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen
}

/// A double-quoted string literal valid in Go, TypeScript, Python and Java.
pub(crate) fn quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

pub(crate) fn render_err(language: Language) -> impl FnOnce(fmt::Error) -> EmitError {
    move |source| EmitError::Format {
        language: language.as_str(),
        source,
    }
}
