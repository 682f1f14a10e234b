use std::path::Path;

use nexus_idl_core::{synthesize, SchemaBindings};
use serde::Serialize;

use crate::cmd::load_all;
use crate::exit_codes;
use crate::output::{print_result, OutputFormat};
use crate::OutputArgs;

#[derive(Serialize)]
struct InspectResult {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    java_package: Option<String>,
    services: Vec<ServiceSummary>,
    messages: Vec<String>,
}

#[derive(Serialize)]
struct ServiceSummary {
    name: String,
    wire_name: String,
    operations: Vec<OperationSummary>,
}

#[derive(Serialize)]
struct OperationSummary {
    name: String,
    wire_name: String,
    shape: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    input: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
}

fn summarize(path: &Path, bindings: &SchemaBindings) -> InspectResult {
    InspectResult {
        path: path.display().to_string(),
        java_package: bindings.java_package.clone(),
        services: bindings
            .services
            .iter()
            .map(|s| ServiceSummary {
                name: s.ident.upper_camel(),
                wire_name: s.wire_name.clone(),
                operations: s
                    .operations
                    .iter()
                    .map(|op| OperationSummary {
                        name: op.ident.upper_camel(),
                        wire_name: op.wire_name.clone(),
                        shape: op.shape.as_str(),
                        input: op.input.message_name().map(str::to_string),
                        output: op.output.message_name().map(str::to_string),
                    })
                    .collect(),
            })
            .collect(),
        messages: bindings.messages.iter().map(|m| m.message.name.clone()).collect(),
    }
}

pub async fn inspect_cmd(path: &Path, output: OutputArgs) -> i32 {
    let paths = [path.to_path_buf()];
    let Some((path, loaded)) = load_all(&paths).await.into_iter().next() else {
        return exit_codes::RUNTIME_ERROR;
    };
    let schema = match loaded {
        Ok(s) => s,
        Err(failure) => {
            failure.report(output.format, output.quiet);
            return failure.code;
        }
    };
    let summary = summarize(&path, &synthesize(&schema));

    if output.format == OutputFormat::Text {
        if !output.quiet {
            print_text(&summary);
        }
    } else {
        print_result(output.format, output.quiet, &summary);
    }
    exit_codes::SUCCESS
}

fn print_text(summary: &InspectResult) {
    println!("schema: {}", summary.path);
    if let Some(pkg) = &summary.java_package {
        println!("java package: {pkg}");
    }
    for svc in &summary.services {
        println!("service {} ({})", svc.name, svc.wire_name);
        for op in &svc.operations {
            println!(
                "  {} ({}) {} in={} out={}",
                op.name,
                op.wire_name,
                op.shape,
                op.input.as_deref().unwrap_or("-"),
                op.output.as_deref().unwrap_or("-"),
            );
        }
    }
    if !summary.messages.is_empty() {
        println!("messages: {}", summary.messages.join(", "));
    }
}

