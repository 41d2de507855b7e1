//! HTTP transport seam
//!
//! A [`Transport`] performs one blocking HTTP exchange against the endpoint it
//! is bound to. [`HttpTransport`] wraps a `reqwest` blocking client, which
//! keeps its own keep-alive pool and can be shared by concurrent callers.

use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client as HttpClient;
use reqwest::header::CONTENT_TYPE;

use crate::endpoint::Endpoint;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Head,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
            Method::Head => reqwest::Method::HEAD,
        }
    }
}

/// Undecoded reply from the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// A reusable connection to one endpoint.
///
/// Implementations must tolerate concurrent calls: the pool hands the same
/// transport to every request routed to its endpoint.
pub trait Transport: Send + Sync {
    fn perform(&self, method: Method, path_and_query: &str, body: Option<&str>)
        -> Result<RawResponse>;
}

/// `reqwest`-backed transport bound to a single endpoint
pub struct HttpTransport {
    client: HttpClient,
    base_url: String,
}

impl HttpTransport {
    pub fn new(endpoint: &Endpoint, timeout: Duration) -> Result<Self> {
        let client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::transport(endpoint.address(), e))?;

        Ok(Self {
            client,
            base_url: endpoint.base_url(),
        })
    }
}

impl Transport for HttpTransport {
    fn perform(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<&str>,
    ) -> Result<RawResponse> {
        let url = format!("{}{}", self.base_url, path_and_query);

        let mut request = self.client.request(method.into(), &url);
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }

        let response = request
            .send()
            .map_err(|e| Error::transport(&self.base_url, e))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| Error::transport(&self.base_url, e))?;

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_names() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Delete.as_str(), "DELETE");
        assert_eq!(reqwest::Method::from(Method::Put), reqwest::Method::PUT);
    }

    #[test]
    fn test_unreachable_endpoint_is_transport_error() {
        // Port 1 on loopback is closed on any sane test host
        let endpoint = Endpoint::parse("127.0.0.1:1").unwrap();
        let transport = HttpTransport::new(&endpoint, Duration::from_secs(2)).unwrap();
        let err = transport.perform(Method::Get, "/", None).unwrap_err();
        assert!(err.is_transport());
    }
}
