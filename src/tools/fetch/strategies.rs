use super::client::build_client;
use crate::engine::{EngineResponse, RequestEngine, ResponseBody};
use crate::error::{FetchError, Result, TransportError};
use crate::types::FetchOptions;
use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

/// Schemes with a built-in engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    /// Scheme of `url` when it literally starts with `http://` or `https://`
    /// and parses as a URL. The prefix is case-sensitive.
    pub fn of(url: &str) -> Option<Self> {
        let scheme = if url.starts_with("http://") {
            Self::Http
        } else if url.starts_with("https://") {
            Self::Https
        } else {
            return None;
        };
        Url::parse(url).ok().map(|_| scheme)
    }

    /// Built-in engine for this scheme.
    pub fn engine(self) -> Arc<dyn RequestEngine> {
        match self {
            Self::Http => Arc::new(HttpEngine),
            Self::Https => Arc::new(HttpsEngine),
        }
    }
}

/// Plain HTTP via reqwest.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpEngine;

/// HTTPS via reqwest (rustls); refuses to downgrade to plain HTTP.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpsEngine;

#[async_trait]
impl RequestEngine for HttpEngine {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn get(&self, url: &str) -> std::result::Result<EngineResponse, TransportError> {
        send(Scheme::Http, url).await
    }
}

#[async_trait]
impl RequestEngine for HttpsEngine {
    fn name(&self) -> &'static str {
        "https"
    }

    async fn get(&self, url: &str) -> std::result::Result<EngineResponse, TransportError> {
        send(Scheme::Https, url).await
    }
}

async fn send(scheme: Scheme, url: &str) -> std::result::Result<EngineResponse, TransportError> {
    let client = build_client(scheme)?;
    let response = client.get(url).send().await?;
    let status = response.status();

    Ok(EngineResponse {
        status: status.as_u16(),
        status_message: status.canonical_reason().unwrap_or_default().to_string(),
        body: Box::new(ReqwestBody(response)),
    })
}

struct ReqwestBody(reqwest::Response);

#[async_trait]
impl ResponseBody for ReqwestBody {
    async fn chunk(&mut self) -> std::result::Result<Option<Vec<u8>>, TransportError> {
        Ok(self.0.chunk().await?.map(|bytes| bytes.to_vec()))
    }
}

/// Pick the engine for one call: explicit override first, then the URL scheme.
pub(super) fn select_engine(url: &str, options: &FetchOptions) -> Result<Arc<dyn RequestEngine>> {
    if let Some(engine) = &options.request_engine {
        return Ok(Arc::clone(engine));
    }

    Scheme::of(url)
        .map(Scheme::engine)
        .ok_or_else(|| FetchError::UnrecognizedProtocol(url.to_string()))
}
