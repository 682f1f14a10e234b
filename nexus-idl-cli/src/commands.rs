use std::path::PathBuf;

use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate bindings for one or more schema files into a single output.
    Generate {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Target language: go, typescript (ts), python (py), java, rust (rs).
        #[arg(long, short)]
        lang: String,
        /// Write to this file instead of stdout.
        #[arg(long, short)]
        out: Option<PathBuf>,
        #[command(flatten)]
        generator: GeneratorArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Check schema files without generating anything.
    Validate {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show the services, operations and shapes a schema defines.
    Inspect {
        path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List supported target languages.
    Languages {
        #[command(flatten)]
        output: OutputArgs,
    },
}
