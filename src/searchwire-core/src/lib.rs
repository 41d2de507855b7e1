//! Searchwire Core Library
//!
//! This crate provides the request plumbing for talking to a search engine
//! cluster over its REST API:
//! - JSON wire codec with date handling
//! - REST path assembly
//! - Endpoint parsing and a fixed connection pool
//! - Request dispatch with injected request logging

pub mod codec;
pub mod config;
pub mod dispatch;
pub mod endpoint;
pub mod error;
pub mod logging;
pub mod models;
pub mod path;
pub mod pool;
pub mod query;
pub mod transport;

// Re-export commonly used types
pub use codec::Timestamp;
pub use config::{ClientConfig, Servers};
pub use dispatch::Dispatcher;
pub use endpoint::Endpoint;
pub use error::{Error, Result};
pub use logging::RequestLogger;
pub use models::*;
pub use path::make_path;
pub use pool::{ConnectionPool, PooledConnection};
pub use query::RenderQuery;
pub use transport::{HttpTransport, Method, RawResponse, Transport};
