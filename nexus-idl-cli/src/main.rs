use clap::Parser;

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod logging;
mod output;

pub use args::*;
use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "nexus-idl", version, about = "Nexus IDL code generator")]
struct Cli {
    /// Log filter, e.g. `debug` or `nexus_idl_core=trace`. Overrides NEXUS_IDL_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref());

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli.command));
    std::process::exit(exit_code);
}

async fn run_command(command: Command) -> i32 {
    match command {
        Command::Generate {
            paths,
            lang,
            out,
            generator,
            output,
        } => cmd::generate::generate_cmd(&paths, &lang, out.as_deref(), generator, output).await,
        Command::Validate { paths, output } => cmd::validate::validate_cmd(&paths, output).await,
        Command::Inspect { path, output } => cmd::inspect::inspect_cmd(&path, output).await,
        Command::Languages { output } => cmd::languages::languages_cmd(output),
    }
}
