use clap::Args;
use nexus_idl_core::GeneratorOptions;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct GeneratorArgs {
    /// Package clause for Go output.
    #[arg(long, default_value = "gen")]
    pub go_package: String,
    /// Maximum width of generated documentation comments.
    #[arg(long, default_value_t = 120)]
    pub doc_width: usize,
    /// Crate path generated Rust code uses for the runtime.
    #[arg(long, default_value = "nexus_idl_runtime")]
    pub rust_runtime_crate: String,
}

impl From<GeneratorArgs> for GeneratorOptions {
    fn from(args: GeneratorArgs) -> Self {
        GeneratorOptions {
            doc_width: args.doc_width,
            go_package: args.go_package,
            rust_runtime_crate: args.rust_runtime_crate,
        }
    }
}
