use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdlError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Emit(#[from] EmitError),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to read schema {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot resolve $ref `{reference}` in {file}: {reason}")]
    Ref {
        reference: String,
        file: String,
        reason: String,
    },
}

/// A schema that is malformed or internally inconsistent.
///
/// Carries every violation found in one pass so callers can report them all at once.
#[derive(Debug, Error)]
#[error("nexus schema failed validation ({violations_len} violations)")]
pub struct SchemaError {
    pub violations: Vec<Violation>,
    violations_len: usize,
}

impl SchemaError {
    pub fn new(violations: Vec<Violation>) -> Self {
        let violations_len = violations.len();
        Self {
            violations,
            violations_len,
        }
    }

    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(vec![Violation::new(path, message)])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("javaPackage is required to generate Java code")]
    MissingJavaPackage,
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("failed to render {language} code: {source}")]
    Format {
        language: &'static str,
        #[source]
        source: std::fmt::Error,
    },
}
