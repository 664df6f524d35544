use crate::error::{Result, TransportError};
use crate::tools::{extract, fetch};
use crate::types::FetchOptions;
use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;

/// Transport seam: issues one GET and hands back the status line plus a body stream.
///
/// The built-in HTTP and HTTPS engines live in `tools::fetch`; callers may
/// supply their own through [`FetchOptions::with_engine`] (stubs in tests,
/// other protocols, other verbs).
#[async_trait]
pub trait RequestEngine: Send + Sync {
    fn name(&self) -> &'static str;

    /// Connect and read the response head. Connection-level failures are
    /// reported here; the body is read lazily through [`ResponseBody`].
    async fn get(&self, url: &str) -> std::result::Result<EngineResponse, TransportError>;
}

/// Streaming response body.
#[async_trait]
pub trait ResponseBody: Send {
    /// Next chunk of raw bytes, or `None` once the stream has ended.
    async fn chunk(&mut self) -> std::result::Result<Option<Vec<u8>>, TransportError>;
}

pub struct EngineResponse {
    pub status: u16,
    pub status_message: String,
    pub body: Box<dyn ResponseBody>,
}

impl std::fmt::Debug for EngineResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineResponse")
            .field("status", &self.status)
            .field("status_message", &self.status_message)
            .finish_non_exhaustive()
    }
}

/// Holds one set of options and runs the three fetch operations with it.
#[derive(Clone, Default)]
pub struct Fetcher {
    pub options: FetchOptions,
}

impl Fetcher {
    pub fn new(options: FetchOptions) -> Self {
        Self { options }
    }

    pub async fn body(&self, url: &str) -> Result<String> {
        fetch::fetch_body(url, &self.options).await
    }

    pub async fn json(&self, url: &str) -> Result<Value> {
        extract::fetch_json(url, &self.options).await
    }

    pub async fn capture(&self, url: &str, pattern: &Regex) -> Result<String> {
        extract::fetch_capture(url, pattern, &self.options).await
    }
}
