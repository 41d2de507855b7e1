use serde_json::Value;

/// Boxed lower-level error carried by [`Error::Transport`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An enumerated parameter was outside its allowed set.
    /// Raised before any request is sent.
    #[error("invalid {parameter}: '{value}' (expected one of: {})", .allowed.join(", "))]
    Validation {
        parameter: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },

    #[error("transport error talking to {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: BoxError,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid endpoint '{address}': {reason}")]
    InvalidEndpoint { address: String, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no endpoints configured")]
    NoEndpoints,

    /// Only produced when `error_on_status` is enabled in the client config
    #[error("server returned status {status}")]
    Status { status: u16, body: Value },
}

impl Error {
    pub fn transport(endpoint: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Error::Transport {
            endpoint: endpoint.into(),
            source: source.into(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    pub fn is_serialization(&self) -> bool {
        matches!(self, Error::Serialization(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
