//! CLI argument definitions using clap
//!
//! Commands:
//! - datasets start --config <path>
//! - datasets query --config <path> --dataset <name>
//! - datasets insert --config <path> --dataset <name>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::query::SortDirection;

/// datasets - schemaless JSON datasets with grouped and sorted queries
#[derive(Parser, Debug)]
#[command(name = "datasets")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./datasets.json")]
        config: PathBuf,

        /// Port to listen on (overrides the config file)
        #[arg(long)]
        port: Option<u16>,

        /// Data directory for the file store (overrides the config file)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Run one query against the file store and print the result
    Query {
        /// Path to configuration file
        #[arg(long, default_value = "./datasets.json")]
        config: PathBuf,

        /// Data directory for the file store (overrides the config file)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Dataset to query
        #[arg(long)]
        dataset: String,

        /// Field to group by
        #[arg(long)]
        group_by: Option<String>,

        /// Field to sort by
        #[arg(long)]
        sort_by: Option<String>,

        /// Sort direction: asc or desc
        #[arg(long)]
        order: Option<SortDirection>,
    },

    /// Insert one JSON payload read from stdin into the file store
    Insert {
        /// Path to configuration file
        #[arg(long, default_value = "./datasets.json")]
        config: PathBuf,

        /// Data directory for the file store (overrides the config file)
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Dataset to insert into
        #[arg(long)]
        dataset: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
