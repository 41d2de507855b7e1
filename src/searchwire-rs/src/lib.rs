//! Searchwire Client Library
//!
//! Blocking client for a search engine cluster's REST API.
//!
//! ```rust,no_run
//! use searchwire::{Client, QueryParams};
//! use serde_json::json;
//!
//! fn main() -> searchwire::Result<()> {
//!     let client = Client::connect(vec!["127.0.0.1:9200", "127.0.0.1:9201"])?;
//!     client.index(&json!({"user": "kimchy"}), "twitter", "tweet", Some("1"), false)?;
//!     let hits = client.search(&json!({"query": {"match_all": {}}}), &["twitter"], &[], QueryParams::new())?;
//!     println!("{}", hits);
//!     Ok(())
//! }
//! ```

mod admin;
mod client;

pub use admin::ClusterHealthOptions;
pub use client::Client;
pub use searchwire_core;
pub use searchwire_core::{
    ClientConfig, Error, HealthLevel, HealthStatus, Method, QueryParams, RenderQuery,
    RequestLogger, Result, Timestamp,
};
