use serde_json::Value;

use crate::codec;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::logging::{RequestLogger, LOG_TARGET};
use crate::models::{QueryParams, Request, Response};
use crate::path::ensure_leading_slash;
use crate::pool::ConnectionPool;
use crate::transport::Method;

/// Turns one logical operation into one HTTP exchange.
///
/// Single attempt against a single endpoint: transport and decode failures
/// are returned to the caller as-is, with no retry and no failover.
pub struct Dispatcher {
    pool: ConnectionPool,
    logger: RequestLogger,
    error_on_status: bool,
}

impl Dispatcher {
    pub fn new(pool: ConnectionPool, logger: RequestLogger) -> Self {
        Self {
            pool,
            logger,
            error_on_status: false,
        }
    }

    /// Connect to every configured endpoint and build the configured logger
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let pool = ConnectionPool::connect(config.endpoints()?, config.timeout())?;
        let logger = RequestLogger::from_config(config)?;
        Ok(Self::new(pool, logger).with_error_on_status(config.error_on_status))
    }

    pub fn with_error_on_status(mut self, enabled: bool) -> Self {
        self.error_on_status = enabled;
        self
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    pub fn logger(&self) -> &RequestLogger {
        &self.logger
    }

    /// Send a request and return the decoded body
    pub fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        params: &QueryParams,
    ) -> Result<Value> {
        let response = self.send_request(method, path, body, params)?;

        if self.error_on_status && !response.is_success() {
            return Err(Error::Status {
                status: response.status,
                body: response.body,
            });
        }

        Ok(response.body)
    }

    pub fn execute(&self, request: &Request) -> Result<Value> {
        self.send(
            request.method,
            &request.path,
            request.body.as_ref(),
            &request.params,
        )
    }

    /// Like [`send`](Self::send) but keeps the status code and never
    /// turns a non-2xx status into an error
    pub fn send_request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        params: &QueryParams,
    ) -> Result<Response> {
        let mut target = ensure_leading_slash(path);
        if !params.is_empty() {
            target.push('?');
            target.push_str(&params.to_query_string());
        }

        let encoded = match body.filter(|b| !is_blank(b)) {
            Some(body) => Some(codec::encode(body)?),
            None => None,
        };

        let connection = self.pool.select();
        let endpoint = connection.endpoint();

        self.logger.in_scope(|| {
            tracing::debug!(
                target: LOG_TARGET,
                method = %method,
                endpoint = %endpoint,
                path = %target,
                body = encoded.as_deref().unwrap_or(""),
                "sending request"
            );
            tracing::trace!(
                target: LOG_TARGET,
                "{}",
                curl_command(method, &endpoint.base_url(), &target, encoded.as_deref())
            );
        });

        let raw = connection
            .transport()
            .perform(method, &target, encoded.as_deref())
            .inspect_err(|e| {
                self.logger.in_scope(|| {
                    tracing::warn!(target: LOG_TARGET, endpoint = %endpoint, error = %e, "request failed");
                })
            })?;

        self.logger.in_scope(|| {
            tracing::debug!(target: LOG_TARGET, status = raw.status, "response status");
        });

        let body = codec::decode(&raw.body)?;
        Ok(Response {
            status: raw.status,
            body,
        })
    }
}

/// Bodies that carry nothing are not sent
fn is_blank(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
    }
}

/// Shell-pasteable reproduction of a request
fn curl_command(method: Method, base_url: &str, target: &str, body: Option<&str>) -> String {
    match body {
        Some(body) => format!(
            "curl -X{} '{}{}' -d '{}'",
            method,
            base_url,
            target,
            body.replace('\'', "'\\''")
        ),
        None => format!("curl -X{} '{}{}'", method, base_url, target),
    }
}
