//! Extract Tools
//!
//! Fetch a body and pull something out of it: a decoded JSON value, or the
//! first capture group of a single regex match.


use crate::error::{FetchError, Result};
use crate::tools::fetch::fetch_body;
use crate::types::FetchOptions;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

const CAPTURE_GROUP: usize = 1;

/// Decode `body` as JSON.
pub fn parse_json(body: &str) -> Result<Value> {
    serde_json::from_str(body).map_err(FetchError::Decode)
}

/// Text of capture group 1 from the first match of `pattern` in `body`.
///
/// Returns `None` when nothing matches, when the pattern has no capturing
/// group, or when group 1 is optional and did not take part in the match.
pub fn capture_first<'h>(pattern: &Regex, body: &'h str) -> Option<&'h str> {
    pattern
        .captures(body)
        .and_then(|captured| captured.get(CAPTURE_GROUP))
        .map(|matched| matched.as_str())
}

/// Fetch `url` and decode the body as JSON.
///
/// Fetch failures come back unchanged; a body that is not JSON is a `Decode` error.
///
/// # Examples
/// ```no_run
/// use getbody::{fetch_json, FetchOptions};
///
/// # async fn example() -> getbody::Result<()> {
/// let value = fetch_json("https://httpbin.org/uuid", &FetchOptions::default()).await?;
/// println!("{}", value["uuid"]);
/// # Ok(())
/// # }
/// ```
pub async fn fetch_json(url: &str, options: &FetchOptions) -> Result<Value> {
    let body = fetch_body(url, options).await?;
    parse_json(&body).map_err(|e| {
        warn!(url, "{e}");
        e
    })
}

/// Like [`fetch_json`], deserializing straight into `T`.
pub async fn fetch_json_as<T: DeserializeOwned>(url: &str, options: &FetchOptions) -> Result<T> {
    let body = fetch_body(url, options).await?;
    serde_json::from_str(&body).map_err(|e| {
        warn!(url, error = %e, "json decode failed");
        FetchError::Decode(e)
    })
}

/// Fetch `url`, match `pattern` once against the whole body and return
/// capture group 1 exactly as matched.
///
/// # Examples
/// ```no_run
/// use getbody::{fetch_capture, FetchOptions};
/// use regex::Regex;
///
/// # async fn example() -> getbody::Result<()> {
/// let pattern = Regex::new(r"Download v{0,1}(\S+)\s+Current").unwrap();
/// let version = fetch_capture("https://nodejs.org/en/", &pattern, &FetchOptions::default()).await?;
/// println!("{version}");
/// # Ok(())
/// # }
/// ```
pub async fn fetch_capture(url: &str, pattern: &Regex, options: &FetchOptions) -> Result<String> {
    let body = fetch_body(url, options).await?;
    match capture_first(pattern, &body) {
        Some(text) => Ok(text.to_string()),
        None => {
            warn!(url, pattern = pattern.as_str(), "capture failed");
            Err(FetchError::NoMatch)
        }
    }
}
