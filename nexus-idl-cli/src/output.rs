use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn print_result<T: Serialize>(format: OutputFormat, quiet: bool, result: &T) {
    if quiet {
        return;
    }
    let rendered = match format {
        OutputFormat::Text => serde_json::to_string_pretty(result),
        OutputFormat::Json => serde_json::to_string(result),
    };
    if let Ok(json) = rendered {
        println!("{json}");
    }
}

pub fn print_error(format: OutputFormat, quiet: bool, message: &str) {
    print_violations(format, quiet, message, &[]);
}

/// Reports a failure together with the individual schema violations behind it.
///
/// Text output lists one violation per line under the summary; JSON output nests them in a
/// `violations` array.
pub fn print_violations(format: OutputFormat, quiet: bool, message: &str, violations: &[String]) {
    if quiet {
        return;
    }
    match format {
        OutputFormat::Text => {
            eprintln!("error: {message}");
            for v in violations {
                eprintln!("- {v}");
            }
        }
        OutputFormat::Json => {
            let err = if violations.is_empty() {
                serde_json::json!({"error": message})
            } else {
                serde_json::json!({"error": message, "violations": violations})
            };
            eprintln!("{}", serde_json::to_string(&err).unwrap_or_default());
        }
    }
}
