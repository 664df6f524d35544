mod client;
mod strategies;
mod utils;


pub use strategies::{HttpEngine, HttpsEngine, Scheme};

use crate::error::{FetchError, Result};
use crate::types::FetchOptions;
use tracing::{debug, warn};

/// Fetch `url` with one GET and return the body as text.
///
/// The engine is `options.request_engine` when set, otherwise the built-in
/// HTTP or HTTPS engine picked from the URL scheme. The body is decoded with
/// `options.config.response_encoding` (UTF-8 by default).
///
/// Fails with:
/// - `UnrecognizedProtocol` for a non-http(s) or malformed URL (no request is made)
/// - `UnknownEncoding` for an encoding label nobody knows (no request is made)
/// - `Transport` when the connection or body stream fails
/// - `HttpStatus` for any status other than 200, redirects included
///
/// # Examples
/// ```no_run
/// use getbody::{fetch_body, FetchOptions};
///
/// # async fn example() -> getbody::Result<()> {
/// let html = fetch_body("https://example.com", &FetchOptions::default()).await?;
/// println!("{} bytes", html.len());
/// # Ok(())
/// # }
/// ```
pub async fn fetch_body(url: &str, options: &FetchOptions) -> Result<String> {
    let engine = strategies::select_engine(url, options).map_err(|e| {
        warn!(url, "{e}");
        e
    })?;
    let encoding = options.config.encoding()?;

    debug!(url, engine = engine.name(), "GET");
    let response = engine.get(url).await.map_err(|e| {
        warn!(url, error = %e, "transport error");
        FetchError::transport(url, e)
    })?;

    // Fail and stop: the unread body is dropped here, releasing the connection.
    if let Err(e) = utils::check_status(response.status, &response.status_message) {
        warn!(url, "{e}");
        return Err(e);
    }

    let text = utils::read_body(url, response.body, encoding)
        .await
        .map_err(|e| {
            warn!(url, "{e}");
            e
        })?;

    debug!(url, bytes = text.len(), "body complete");
    Ok(text)
}
