use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use novalang::diagnostics;
use novalang::driver::Compiler;
use novalang::logger;
use novalang::lsp;

#[derive(Parser, Debug)]
#[command(name = "novac", version, about = "Nova language compiler")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile every project described by the configuration file
    Compiler {
        /// Path to the configuration file (default: ./.nova/nc.json)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Directory the IR artifacts are written to
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,
    },
    /// Print the language-server handshake descriptor
    Lsp,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logger::info("Welcome to Nova Language!");

    let code = match cli.command {
        Command::Compiler { config, output } => {
            let mut compiler = match config {
                Some(path) => Compiler::from_config_path(&path)?,
                None => Compiler::new()?,
            };
            compiler.generate_all(&output)?;

            diagnostics::print_all(compiler.diagnostics());
            if compiler.has_errors() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Command::Lsp => {
            println!(
                "{}",
                serde_json::to_string_pretty(&lsp::initialize_result())?
            );
            ExitCode::SUCCESS
        }
    };

    logger::info("Goodbye.");
    Ok(code)
}
