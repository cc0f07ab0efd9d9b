//! rawhttp - HTTP/1.1 from raw bytes
//!
//! Incremental request parsing, response serialization and a minimal
//! one-request-per-connection server built on tokio streams.

pub mod config;
pub mod http;
pub mod routes;
pub mod server;
