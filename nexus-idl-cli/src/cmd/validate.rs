use std::path::PathBuf;

use serde::Serialize;

use crate::cmd::load_all;
use crate::exit_codes;
use crate::output::{print_result, OutputFormat};
use crate::OutputArgs;

#[derive(Serialize)]
struct ValidateResult {
    path: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    services: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

pub async fn validate_cmd(paths: &[PathBuf], output: OutputArgs) -> i32 {
    let mut exit_code = exit_codes::SUCCESS;
    let mut results = Vec::with_capacity(paths.len());

    for (path, loaded) in load_all(paths).await {
        match loaded {
            Ok(schema) => {
                if output.format == OutputFormat::Text && !output.quiet {
                    println!(
                        "ok: {} ({} services, {} messages)",
                        path.display(),
                        schema.services().len(),
                        schema.messages().count()
                    );
                }
                results.push(ValidateResult {
                    path: path.display().to_string(),
                    valid: true,
                    services: Some(schema.services().len()),
                    errors: vec![],
                });
            }
            Err(failure) => {
                if exit_code == exit_codes::SUCCESS {
                    exit_code = failure.code;
                }
                if output.format == OutputFormat::Text {
                    failure.report(output.format, output.quiet);
                }
                let mut errors = vec![failure.summary];
                errors.extend(failure.details);
                results.push(ValidateResult {
                    path: path.display().to_string(),
                    valid: false,
                    services: None,
                    errors,
                });
            }
        }
    }

    if output.format == OutputFormat::Json {
        print_result(output.format, output.quiet, &results);
    }
    exit_code
}
