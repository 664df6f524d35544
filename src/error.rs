use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

/// Underlying cause of a connection-level failure, as reported by the transport.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Scheme is neither http nor https (or the URL does not parse) and no
    /// engine override was given.
    #[error("unrecognized protocol in URL {0}")]
    UnrecognizedProtocol(String),

    #[error("unknown response encoding: {0}")]
    UnknownEncoding(String),

    /// DNS, TCP or TLS failure, or the body stream broke off.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("request failed with HTTP status {code} {message}")]
    HttpStatus { code: u16, message: String },

    #[error("invalid json body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("capture failed")]
    NoMatch,
}

impl FetchError {
    pub(crate) fn transport(url: &str, source: impl Into<TransportError>) -> Self {
        FetchError::Transport {
            url: url.to_string(),
            source: source.into(),
        }
    }

    /// HTTP status code, when the server answered with something other than 200.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FetchError::HttpStatus { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport { .. })
    }
}
