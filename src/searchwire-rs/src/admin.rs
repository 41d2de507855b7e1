//! Index administration and cluster inspection

use searchwire_core::path::{join, join_or_all, make_path};
use searchwire_core::{HealthLevel, HealthStatus, Method, QueryParams, Result};
use serde_json::Value;

use crate::Client;

/// Parameters for [`Client::cluster_health`]
///
/// `level` and `wait_for_status` are checked against their allowed values
/// before anything is sent.
#[derive(Debug, Clone)]
pub struct ClusterHealthOptions {
    /// `cluster`, `indices` or `shards`
    pub level: String,
    /// `green`, `yellow` or `red`
    pub wait_for_status: Option<String>,
    pub wait_for_relocating_shards: Option<u32>,
    /// How long the server waits for `wait_for_status`, in seconds
    pub timeout_secs: u64,
}

impl Default for ClusterHealthOptions {
    fn default() -> Self {
        Self {
            level: HealthLevel::Cluster.as_str().to_string(),
            wait_for_status: None,
            wait_for_relocating_shards: None,
            timeout_secs: 30,
        }
    }
}

impl ClusterHealthOptions {
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn wait_for_status(mut self, status: impl Into<String>) -> Self {
        self.wait_for_status = Some(status.into());
        self
    }

    pub fn wait_for_relocating_shards(mut self, shards: u32) -> Self {
        self.wait_for_relocating_shards = Some(shards);
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    fn to_params(&self) -> Result<QueryParams> {
        let level: HealthLevel = self.level.parse()?;
        let wait_for_status = self
            .wait_for_status
            .as_deref()
            .map(str::parse::<HealthStatus>)
            .transpose()?;

        let mut params = QueryParams::new();
        if level != HealthLevel::Cluster {
            params.insert("level", level);
        }
        if let Some(status) = wait_for_status {
            params.insert("wait_for_status", status);
            params.insert("timeout", format!("{}s", self.timeout_secs));
        }
        if let Some(shards) = self.wait_for_relocating_shards {
            params.insert("wait_for_relocating_shards", shards);
        }
        Ok(params)
    }
}

impl Client {
    /// Status of one or more indices; empty means all
    pub fn status(&self, indexes: &[&str]) -> Result<Value> {
        let path = make_path([join_or_all(indexes).as_str(), "_status"]);
        self.send(Method::Get, &path, None, &QueryParams::new())
    }

    pub fn create_index(&self, index: &str, settings: Option<&Value>) -> Result<Value> {
        self.send(Method::Put, &make_path([index]), settings, &QueryParams::new())
    }

    pub fn delete_index(&self, index: &str) -> Result<Value> {
        self.send(Method::Delete, &make_path([index]), None, &QueryParams::new())
    }

    pub fn flush(&self, indexes: &[&str], refresh: Option<bool>) -> Result<Value> {
        let path = make_path([join_or_all(indexes).as_str(), "_flush"]);
        let mut params = QueryParams::new();
        if let Some(refresh) = refresh {
            params.insert("refresh", refresh);
        }
        self.send(Method::Post, &path, None, &params)
    }

    pub fn refresh(&self, indexes: &[&str]) -> Result<Value> {
        let path = make_path([join_or_all(indexes).as_str(), "_refresh"]);
        self.send(Method::Post, &path, None, &QueryParams::new())
    }

    pub fn optimize(&self, indexes: &[&str], params: QueryParams) -> Result<Value> {
        let path = make_path([join_or_all(indexes).as_str(), "_optimize"]);
        self.send(Method::Post, &path, None, &params)
    }

    pub fn gateway_snapshot(&self, indexes: &[&str]) -> Result<Value> {
        let path = make_path([join_or_all(indexes).as_str(), "_gateway", "snapshot"]);
        self.send(Method::Post, &path, None, &QueryParams::new())
    }

    /// Register a mapping for `doc_type` on one or more indices
    pub fn put_mapping(&self, doc_type: &str, mapping: &Value, indexes: &[&str]) -> Result<Value> {
        let path = make_path([join_or_all(indexes).as_str(), doc_type, "_mapping"]);
        self.send(Method::Put, &path, Some(mapping), &QueryParams::new())
    }

    /// Cluster health, optionally restricted to some indices
    pub fn cluster_health(&self, indexes: &[&str], options: &ClusterHealthOptions) -> Result<Value> {
        let params = options.to_params()?;
        let path = make_path(["_cluster", "health", join(indexes).as_str()]);
        self.send(Method::Get, &path, None, &params)
    }

    pub fn cluster_state(&self) -> Result<Value> {
        self.send(
            Method::Get,
            &make_path(["_cluster", "state"]),
            None,
            &QueryParams::new(),
        )
    }

    /// Node info; empty `nodes` means every node
    pub fn cluster_nodes(&self, nodes: &[&str]) -> Result<Value> {
        let path = make_path(["_cluster", "nodes", join(nodes).as_str()]);
        self.send(Method::Get, &path, None, &QueryParams::new())
    }
}
