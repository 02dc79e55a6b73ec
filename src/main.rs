//! Tagwise - tag recommendation CLI
//!
//! Loads workspace tags, entities and activity into a local store and
//! recommends tags for a project or folder.

mod cli;
mod commands;

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;

use cli::{Cli, OutputFormat};
use tagwise_core::error::{ExitCode as TagwiseExitCode, TagwiseError};
use tagwise_core::logging;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return report_parse_error(err),
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }
    tracing::debug!(format = ?cli.format, store = %cli.store.display(), "parse_args");

    match commands::dispatch::run(&cli) {
        Ok(()) => ExitCode::from(TagwiseExitCode::Success as u8),
        Err(e) => report_error(&e, cli.format, cli.quiet),
    }
}

/// Clap errors bypass `Cli::format`, so the format is read from argv
fn report_parse_error(err: clap::Error) -> ExitCode {
    let argv = std::env::args_os()
        .skip(1)
        .filter_map(|arg| arg.into_string().ok());
    if OutputFormat::from_argv(argv) != OutputFormat::Json {
        err.exit();
    }

    let error = match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        ErrorKind::ValueValidation
        | ErrorKind::InvalidValue
        | ErrorKind::InvalidSubcommand
        | ErrorKind::UnknownArgument
        | ErrorKind::ArgumentConflict
        | ErrorKind::MissingRequiredArgument => TagwiseError::UsageError(err.to_string()),
        _ => TagwiseError::Other(err.to_string()),
    };
    report_error(&error, OutputFormat::Json, false)
}

fn report_error(error: &TagwiseError, format: OutputFormat, quiet: bool) -> ExitCode {
    match format {
        OutputFormat::Json => eprintln!("{}", error.to_json()),
        OutputFormat::Human if !quiet => eprintln!("error: {}", error),
        OutputFormat::Human => {}
    }
    ExitCode::from(error.exit_code() as u8)
}
