//! datasets - schemaless JSON datasets with grouped and sorted queries
//!
//! Documents are inserted into named datasets without a schema and queried by
//! any top-level field:
//!
//! - [`storage`]: append-only record stores (file and in-memory)
//! - [`query`]: comparison, ordering, grouping and the query engine
//! - [`service`]: parameter validation and insert/query orchestration
//! - [`http_server`]: axum routes and error mapping
//! - [`cli`]: configuration, logging and commands

pub mod cli;
pub mod http_server;
pub mod query;
pub mod service;
pub mod storage;
