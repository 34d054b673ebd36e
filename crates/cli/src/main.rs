// matchgrid CLI - consolidated match tables from pairwise comparison results

mod exit_codes;
mod table;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::EXIT_SUCCESS;

#[derive(Parser)]
#[command(name = "mgrid")]
#[command(about = "Build one-row-per-pair match tables from comparison results")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the match table described by a TOML config file
    #[command(after_help = "\
Examples:
  mgrid build human-plant.table.toml
  mgrid build human-plant.table.toml --output table.csv
  mgrid build human-plant.table.toml --json")]
    Build {
        /// Path to the .table.toml config file
        config: PathBuf,

        /// Write the table here instead of the config's [output] file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Print the build summary as JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Validate a table config without building
    #[command(after_help = "\
Examples:
  mgrid validate human-plant.table.toml")]
    Validate {
        /// Path to the .table.toml config file
        config: PathBuf,
    },
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build { config, output, json } => table::cmd_build(config, output, json),
        Commands::Validate { config } => table::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}
