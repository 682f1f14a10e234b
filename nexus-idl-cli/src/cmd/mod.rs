pub mod generate;
pub mod inspect;
pub mod languages;
pub mod validate;

use std::path::{Path, PathBuf};

use futures_util::future::join_all;
use nexus_idl_core::{load_schema, IdlError, ParseError, Schema};

use crate::exit_codes;
use crate::output::{print_violations, OutputFormat};

/// Why a schema file could not be turned into a [`Schema`].
#[derive(Debug)]
pub struct LoadFailure {
    pub code: i32,
    pub summary: String,
    pub details: Vec<String>,
}

impl LoadFailure {
    pub fn report(&self, format: OutputFormat, quiet: bool) {
        print_violations(format, quiet, &self.summary, &self.details);
    }
}

pub fn failure(path: &Path, err: IdlError) -> LoadFailure {
    let (code, details) = match &err {
        IdlError::Parse(ParseError::Io { .. }) => (exit_codes::RUNTIME_ERROR, Vec::new()),
        IdlError::Parse(_) => (exit_codes::VALIDATION_FAILED, Vec::new()),
        IdlError::Schema(e) => (
            exit_codes::VALIDATION_FAILED,
            e.violations.iter().map(ToString::to_string).collect(),
        ),
        IdlError::Emit(_) => (exit_codes::EMIT_FAILED, Vec::new()),
    };
    LoadFailure {
        code,
        summary: format!("{}: {err}", path.display()),
        details,
    }
}

/// Loads every schema on the blocking pool. Results come back in argument order.
pub async fn load_all(paths: &[PathBuf]) -> Vec<(PathBuf, Result<Schema, LoadFailure>)> {
    let tasks = paths.iter().cloned().map(|path| async move {
        let task_path = path.clone();
        let joined = tokio::task::spawn_blocking(move || load_schema(&task_path)).await;
        let result = match joined {
            Ok(Ok(schema)) => Ok(schema),
            Ok(Err(e)) => Err(failure(&path, e)),
            Err(e) => Err(LoadFailure {
                code: exit_codes::RUNTIME_ERROR,
                summary: format!("{}: loader task failed: {e}", path.display()),
                details: Vec::new(),
            }),
        };
        (path, result)
    });
    join_all(tasks).await
}
