use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::endpoint::Endpoint;
use crate::error::Result;

/// Client configuration. Fixed once a client is built from it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// One address or a list of addresses
    #[serde(default = "default_servers", deserialize_with = "one_or_many")]
    pub servers: Vec<String>,

    /// Log every request/response at debug level
    #[serde(default)]
    pub debug: bool,

    /// Write the request log to this file instead of stderr
    #[serde(default)]
    pub trace_file: Option<PathBuf>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: f64,

    /// Turn non-2xx replies into `Error::Status` instead of returning the body
    #[serde(default)]
    pub error_on_status: bool,
}

fn default_servers() -> Vec<String> {
    vec!["127.0.0.1:9200".to_string()]
}

fn default_timeout_secs() -> f64 {
    5.0
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<String>, D::Error> {
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(server) => vec![server],
        OneOrMany::Many(servers) => servers,
    })
}

/// Server list accepted by [`ClientConfig::new`]
pub struct Servers(Vec<String>);

impl From<&str> for Servers {
    fn from(server: &str) -> Self {
        Servers(vec![server.to_string()])
    }
}

impl From<String> for Servers {
    fn from(server: String) -> Self {
        Servers(vec![server])
    }
}

impl From<Vec<String>> for Servers {
    fn from(servers: Vec<String>) -> Self {
        Servers(servers)
    }
}

impl From<Vec<&str>> for Servers {
    fn from(servers: Vec<&str>) -> Self {
        Servers(servers.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Servers {
    fn from(servers: &[&str]) -> Self {
        Servers(servers.iter().map(|s| s.to_string()).collect())
    }
}

impl ClientConfig {
    pub fn new(servers: impl Into<Servers>) -> Self {
        Self {
            servers: servers.into().0,
            ..Self::default()
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_trace_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.trace_file = Some(path.into());
        self
    }

    pub fn with_timeout(mut self, timeout_secs: f64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_error_on_status(mut self, enabled: bool) -> Self {
        self.error_on_status = enabled;
        self
    }

    pub fn load(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ClientConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Zero, negative, non-finite or unrepresentable values fall back to the default
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_secs)
            .ok()
            .filter(|d| !d.is_zero())
            .unwrap_or_else(|| Duration::from_secs_f64(default_timeout_secs()))
    }

    /// Parse every server address, in configuration order
    pub fn endpoints(&self) -> Result<Vec<Endpoint>> {
        self.servers.iter().map(|s| Endpoint::parse(s)).collect()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            servers: default_servers(),
            debug: false,
            trace_file: None,
            timeout_secs: default_timeout_secs(),
            error_on_status: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_server_string() {
        let config: ClientConfig = serde_json::from_str(r#"{"servers": "es1:9200"}"#).unwrap();
        assert_eq!(config.servers, vec!["es1:9200"]);
        assert_eq!(config.timeout_secs, 5.0);
        assert!(!config.debug);
    }

    #[test]
    fn test_server_list_and_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"servers": ["es1:9200", "es2:9200"], "debug": true}"#)
                .unwrap();
        assert_eq!(config.servers.len(), 2);
        assert!(config.debug);
        assert!(config.trace_file.is_none());

        let empty: ClientConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.servers, vec!["127.0.0.1:9200"]);
    }

    #[test]
    fn test_constructor_forms() {
        assert_eq!(ClientConfig::new("a:1").servers, vec!["a:1"]);
        assert_eq!(ClientConfig::new(vec!["a:1", "b:2"]).servers.len(), 2);
        let config = ClientConfig::new("a:1").with_timeout(0.5).with_debug(true);
        assert_eq!(config.timeout(), Duration::from_millis(500));
        assert!(config.debug);
    }

    #[test]
    fn test_bad_timeout_uses_default() {
        let config = ClientConfig::new("a:1").with_timeout(-1.0);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(ClientConfig::new("a:1").with_timeout(0.0).timeout(), Duration::from_secs(5));
        assert_eq!(ClientConfig::new("a:1").with_timeout(f64::NAN).timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_huge_timeout_uses_default() {
        let config: ClientConfig = serde_json::from_str(r#"{"timeout_secs": 1e30}"#).unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(ClientConfig::new("a:1").with_timeout(f64::MAX).timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_endpoints_in_order() {
        let endpoints = ClientConfig::new(vec!["b:2", "a:1"]).endpoints().unwrap();
        assert_eq!(endpoints[0].host(), "b");
        assert_eq!(endpoints[1].port(), Some(1));
    }
}
