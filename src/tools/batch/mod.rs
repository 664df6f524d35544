//! Batch Tools


use crate::error::Result;
use crate::tools::fetch::fetch_body;
use crate::types::FetchOptions;
use futures_util::stream::{self, StreamExt};

/// Batch execute async operations with bounded concurrency.
///
/// Results arrive in completion order, not input order.
pub async fn batch<T, F, Fut, R>(items: Vec<T>, concurrency: usize, operation: F) -> Vec<R>
where
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = R> + Send + 'static,
    R: Send + 'static,
{
    stream::iter(items)
        .map(operation)
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await
}

/// Fetch several URLs at once, at most `concurrency` in flight.
///
/// Each result is paired with the URL it came from; one failure does not
/// affect the others.
pub async fn fetch_bodies(
    urls: Vec<String>,
    concurrency: usize,
    options: &FetchOptions,
) -> Vec<(String, Result<String>)> {
    let options = options.clone();
    batch(urls, concurrency, move |url| {
        let options = options.clone();
        async move {
            let result = fetch_body(&url, &options).await;
            (url, result)
        }
    })
    .await
}
