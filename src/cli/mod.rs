//! Command-line interface
//!
//! - start: serve the HTTP API
//! - query: one-shot query against a data directory
//! - insert: one-shot insert from stdin into a data directory

mod args;
mod commands;
mod config;
mod errors;
mod io;
mod logging;

pub use args::{Cli, Command};
pub use commands::{insert, open_store, query, run_command, start};
pub use config::Config;
pub use errors::{CliError, CliResult};
pub use io::{read_payload, write_json};
pub use logging::init_tracing;

/// Parses arguments and runs the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}
