use std::path::{Path, PathBuf};

use nexus_idl_core::{assemble, generate, synthesize_parallel, GeneratorOptions, IdlError, Language};
use serde::Serialize;

use crate::cmd::{failure, load_all};
use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::{GeneratorArgs, OutputArgs};

#[derive(Serialize)]
struct GenerateResult {
    language: &'static str,
    schemas: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    out: Option<String>,
    bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

pub async fn generate_cmd(
    paths: &[PathBuf],
    lang: &str,
    out: Option<&Path>,
    generator: GeneratorArgs,
    output: OutputArgs,
) -> i32 {
    let language: Language = match lang.parse() {
        Ok(l) => l,
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::EMIT_FAILED;
        }
    };
    let options = GeneratorOptions::from(generator);

    let mut schemas = Vec::with_capacity(paths.len());
    let mut exit_code = exit_codes::SUCCESS;
    for (path, loaded) in load_all(paths).await {
        match loaded {
            Ok(schema) => schemas.push((path, schema)),
            Err(failure) => {
                failure.report(output.format, output.quiet);
                if exit_code == exit_codes::SUCCESS {
                    exit_code = failure.code;
                }
            }
        }
    }
    if exit_code != exit_codes::SUCCESS {
        return exit_code;
    }

    let mut parts = Vec::with_capacity(schemas.len());
    for (path, schema) in &schemas {
        let bindings = synthesize_parallel(schema);
        match generate(&bindings, language, &options) {
            Ok(code) => parts.push(code),
            Err(e) => {
                let f = failure(path, IdlError::Emit(e));
                f.report(output.format, output.quiet);
                return f.code;
            }
        }
    }
    let text = assemble(&parts);
    tracing::info!(language = %language, files = parts.len(), bytes = text.len(), "generated bindings");

    let mut result = GenerateResult {
        language: language.as_str(),
        schemas: schemas.iter().map(|(p, _)| p.display().to_string()).collect(),
        out: None,
        bytes: text.len(),
        code: None,
    };

    match out {
        Some(out) => {
            if let Err(e) = std::fs::write(out, &text) {
                print_error(
                    output.format,
                    output.quiet,
                    &format!("failed to write {}: {e}", out.display()),
                );
                return exit_codes::RUNTIME_ERROR;
            }
            result.out = Some(out.display().to_string());
            if output.format == OutputFormat::Text && !output.quiet {
                println!("wrote {} ({} bytes)", out.display(), text.len());
            } else {
                print_result(output.format, output.quiet, &result);
            }
        }
        None => {
            if output.format == OutputFormat::Text {
                // Generated code is the command's product, so `--quiet` does not suppress it.
                print!("{text}");
            } else {
                result.code = Some(text);
                print_result(output.format, output.quiet, &result);
            }
        }
    }
    exit_codes::SUCCESS
}
