//! CLI command implementations

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_stdin_payload, write_json};
use super::logging::init_tracing;
use crate::http_server::HttpServer;
use crate::query::{RecordQuery, SortDirection};
use crate::service::DatasetService;
use crate::storage::{FileRecordStore, InMemoryRecordStore, RecordStore};

/// Dispatches a parsed command.
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Start {
            config,
            port,
            data_dir,
        } => start(&config, port, data_dir),
        Command::Query {
            config,
            data_dir,
            dataset,
            group_by,
            sort_by,
            order,
        } => query(&config, data_dir, dataset, group_by, sort_by, order),
        Command::Insert {
            config,
            data_dir,
            dataset,
        } => insert(&config, data_dir, &dataset),
    }
}

fn load_config(path: &Path, data_dir: Option<PathBuf>) -> CliResult<Config> {
    let config = Config::load(path)?.with_data_dir(data_dir);
    init_tracing(&config.log_filter);
    Ok(config)
}

/// Opens the store the configuration asks for.
pub fn open_store(config: &Config) -> CliResult<Arc<dyn RecordStore>> {
    match &config.data_dir {
        Some(dir) => {
            let store = FileRecordStore::open(dir)?;
            info!(path = %store.path().display(), "using file record store");
            Ok(Arc::new(store))
        }
        None => {
            info!("no data_dir configured, records are kept in memory only");
            Ok(Arc::new(InMemoryRecordStore::new()))
        }
    }
}

/// Runs the HTTP server until interrupted.
pub fn start(config_path: &Path, port: Option<u16>, data_dir: Option<PathBuf>) -> CliResult<()> {
    let mut config = load_config(config_path, data_dir)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    let service = DatasetService::new(open_store(&config)?);
    let server = HttpServer::new(config.http.clone(), service);

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to start runtime: {}", e)))?;

    runtime
        .block_on(server.start())
        .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
}

/// One-shot query against the file store.
pub fn query(
    config_path: &Path,
    data_dir: Option<PathBuf>,
    dataset: String,
    group_by: Option<String>,
    sort_by: Option<String>,
    order: Option<SortDirection>,
) -> CliResult<()> {
    let config = load_config(config_path, data_dir)?;
    let store = FileRecordStore::open(config.require_data_dir()?)?;
    let service = DatasetService::new(Arc::new(store));

    let query = RecordQuery {
        dataset,
        group_by,
        sort_by,
        order,
    };
    let result = service.query(&query)?;
    write_json(&result)
}

/// One-shot insert of a stdin payload into the file store.
pub fn insert(config_path: &Path, data_dir: Option<PathBuf>, dataset: &str) -> CliResult<()> {
    let config = load_config(config_path, data_dir)?;
    let store = FileRecordStore::open(config.require_data_dir()?)?;
    let service = DatasetService::new(Arc::new(store));

    let payload = read_stdin_payload()?;
    let response = service.insert(dataset, payload)?;
    write_json(&response)
}
