use std::fmt;

use url::Url;

use crate::error::{Error, Result};

/// One addressable cluster node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    address: String,
    scheme: String,
    host: String,
    port: Option<u16>,
}

impl Endpoint {
    /// Parse `host`, `host:port` or `scheme://host[:port]`.
    /// Addresses without a scheme are taken as `http`.
    pub fn parse(address: &str) -> Result<Self> {
        let trimmed = address.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidEndpoint {
                address: address.to_string(),
                reason: "empty address".to_string(),
            });
        }

        let candidate = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("http://{}", trimmed)
        };

        let url = Url::parse(&candidate).map_err(|e| Error::InvalidEndpoint {
            address: address.to_string(),
            reason: e.to_string(),
        })?;

        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| Error::InvalidEndpoint {
                address: address.to_string(),
                reason: "missing host".to_string(),
            })?
            .to_string();

        Ok(Self {
            address: trimmed.to_string(),
            scheme: url.scheme().to_string(),
            host,
            // `Url::port` already hides a port equal to the scheme default
            port: url.port(),
        })
    }

    /// The configuration string this endpoint was parsed from
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// `None` means the transport applies the scheme default
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// `scheme://host[:port]` without a trailing slash
    pub fn base_url(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}", self.scheme, self.host, port),
            None => format!("{}://{}", self.scheme, self.host),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_host_port() {
        let endpoint = Endpoint::parse("127.0.0.1:9200").unwrap();
        assert_eq!(endpoint.scheme(), "http");
        assert_eq!(endpoint.host(), "127.0.0.1");
        assert_eq!(endpoint.port(), Some(9200));
        assert_eq!(endpoint.base_url(), "http://127.0.0.1:9200");
        assert_eq!(endpoint.address(), "127.0.0.1:9200");
    }

    #[test]
    fn test_parse_missing_port() {
        let endpoint = Endpoint::parse("search.local").unwrap();
        assert_eq!(endpoint.port(), None);
        assert_eq!(endpoint.base_url(), "http://search.local");
    }

    #[test]
    fn test_parse_with_scheme() {
        let endpoint = Endpoint::parse("https://es.example.com:9243").unwrap();
        assert_eq!(endpoint.scheme(), "https");
        assert_eq!(endpoint.port(), Some(9243));
        assert_eq!(endpoint.to_string(), "https://es.example.com:9243");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Endpoint::parse(""),
            Err(Error::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            Endpoint::parse("http://host:notaport"),
            Err(Error::InvalidEndpoint { .. })
        ));
    }
}
