use std::path::Path;

use crate::error::ParseError;
use crate::types::SchemaDocument;

mod refs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Auto,
}

#[derive(Debug, Clone)]
pub struct ParsedSchema {
    pub document: SchemaDocument,
    pub format: DocumentFormat,
}

pub fn parse_schema_str(input: &str, format: DocumentFormat) -> Result<ParsedSchema, ParseError> {
    match format {
        DocumentFormat::Json => Ok(ParsedSchema {
            document: serde_json::from_str::<SchemaDocument>(input)?,
            format,
        }),
        DocumentFormat::Yaml => Ok(ParsedSchema {
            document: serde_yaml::from_str::<SchemaDocument>(input)?,
            format,
        }),
        DocumentFormat::Auto => parse_schema_auto(input),
    }
}

/// Reads and parses a schema file, picking the format from the extension when it is
/// `.json`, `.yml` or `.yaml` and sniffing the content otherwise.
///
/// `$ref`s naming another file are resolved relative to this file's directory and the
/// referenced types are merged into the document.
pub fn load_schema_file(path: &Path) -> Result<ParsedSchema, ParseError> {
    let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let format = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => DocumentFormat::Json,
        Some("yml" | "yaml") => DocumentFormat::Yaml,
        _ => DocumentFormat::Auto,
    };
    tracing::debug!(path = %path.display(), ?format, "loading schema");
    let mut parsed = parse_schema_str(&content, format)?;
    refs::resolve_external_refs(&mut parsed.document, path)?;
    Ok(parsed)
}

fn parse_schema_auto(input: &str) -> Result<ParsedSchema, ParseError> {
    // JSON always starts with `{` after trimming.
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') {
        return match serde_json::from_str::<SchemaDocument>(input) {
            Ok(document) => Ok(ParsedSchema {
                document,
                format: DocumentFormat::Json,
            }),
            Err(e) => match serde_yaml::from_str::<SchemaDocument>(input) {
                Ok(document) => Ok(ParsedSchema {
                    document,
                    format: DocumentFormat::Yaml,
                }),
                Err(_) => Err(ParseError::Json(e)),
            },
        };
    }

    match serde_yaml::from_str::<SchemaDocument>(input) {
        Ok(document) => Ok(ParsedSchema {
            document,
            format: DocumentFormat::Yaml,
        }),
        Err(e) => {
            if let Ok(document) = serde_json::from_str::<SchemaDocument>(input) {
                return Ok(ParsedSchema {
                    document,
                    format: DocumentFormat::Json,
                });
            }
            Err(ParseError::Yaml(e))
        }
    }
}
