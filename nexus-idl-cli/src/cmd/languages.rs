use nexus_idl_core::Language;
use serde::Serialize;

use crate::exit_codes;
use crate::output::{print_result, OutputFormat};
use crate::OutputArgs;

#[derive(Serialize)]
struct LanguageInfo {
    name: &'static str,
    extension: &'static str,
}

pub fn languages_cmd(output: OutputArgs) -> i32 {
    let languages: Vec<LanguageInfo> = Language::ALL
        .iter()
        .map(|l| LanguageInfo {
            name: l.as_str(),
            extension: l.file_extension(),
        })
        .collect();

    if output.format == OutputFormat::Text {
        if !output.quiet {
            for l in &languages {
                println!("{}\t.{}", l.name, l.extension);
            }
        }
    } else {
        print_result(output.format, output.quiet, &languages);
    }
    exit_codes::SUCCESS
}
