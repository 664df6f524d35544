#![doc = include_str!("../README.md")]

pub mod cli;
pub mod engine;
pub mod error;
pub mod runtime;
pub mod targets;
pub mod tools;
pub mod types;

#[cfg(test)]
mod testing;

pub use engine::{EngineResponse, Fetcher, RequestEngine, ResponseBody};
pub use error::{FetchError, Result, TransportError};
pub use tools::batch::fetch_bodies;
pub use tools::extract::{capture_first, fetch_capture, fetch_json, fetch_json_as, parse_json};
pub use tools::fetch::{fetch_body, HttpEngine, HttpsEngine, Scheme};
pub use types::{resolve_encoding, BodyEncoding, FetchConfig, FetchOptions};
