//! REDCap converter CLI.

use clap::Parser;
use redcap_cli::logging::init_logging;
use redcap_cli::types::ExitStatus;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command};
use crate::commands::{run_convert, run_fields};
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&cli.log_config()) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(ExitStatus::Aborted.code());
    }

    let status = match cli.command {
        Command::Convert(args) => run_convert(&args).map(|result| {
            print_summary(&result);
            result.exit_status()
        }),
        Command::Fields(args) => run_fields(&args).map(|()| ExitStatus::Clean),
    }
    .unwrap_or_else(|error| {
        eprintln!("error: {error:#}");
        ExitStatus::Aborted
    });
    std::process::exit(status.code());
}
