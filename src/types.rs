use crate::engine::RequestEngine;
use crate::error::{FetchError, Result};
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

pub const DEFAULT_RESPONSE_ENCODING: &str = "utf8";

/// Serializable part of the fetch options.
///
/// Unknown keys are rejected when loading from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct FetchConfig {
    /// Charset used to decode the response body (default `utf8`).
    pub response_encoding: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            response_encoding: DEFAULT_RESPONSE_ENCODING.to_string(),
        }
    }
}

impl FetchConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading {}: {e}", path.display()))?;
        Ok(Self::from_json(&raw)?)
    }

    pub fn encoding(&self) -> Result<BodyEncoding> {
        resolve_encoding(&self.response_encoding)
    }
}

/// Per-call options: the config plus an optional transport override.
#[derive(Clone, Default)]
pub struct FetchOptions {
    pub config: FetchConfig,
    /// Used instead of scheme-based engine selection when set.
    pub request_engine: Option<Arc<dyn RequestEngine>>,
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: FetchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_encoding(mut self, label: &str) -> Self {
        self.config.response_encoding = label.to_string();
        self
    }

    pub fn with_engine(mut self, engine: Arc<dyn RequestEngine>) -> Self {
        self.request_engine = Some(engine);
        self
    }
}

impl std::fmt::Debug for FetchOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchOptions")
            .field("config", &self.config)
            .field(
                "request_engine",
                &self.request_engine.as_ref().map(|e| e.name()),
            )
            .finish()
    }
}

/// How response bytes become text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyEncoding {
    /// Each byte becomes the char with the same value, 0x80-0x9F included.
    Latin1,
    /// Any encoding `encoding_rs` knows by label.
    Whatwg(&'static Encoding),
}

/// Map an encoding label to a [`BodyEncoding`].
///
/// `latin1`, `binary` and `iso-8859-1` are byte-for-byte and never go through
/// windows-1252. Everything else is a WHATWG label, plus the short names
/// scripts tend to use (`utf8`, `utf16le`, `ucs2`).
pub fn resolve_encoding(label: &str) -> Result<BodyEncoding> {
    let normalized = label.trim().to_ascii_lowercase();
    let whatwg = match normalized.as_str() {
        "latin1" | "binary" | "iso-8859-1" | "iso8859-1" => return Ok(BodyEncoding::Latin1),
        "utf16le" | "ucs2" | "ucs-2" => "utf-16le",
        other => other,
    };
    Encoding::for_label(whatwg.as_bytes())
        .map(BodyEncoding::Whatwg)
        .ok_or_else(|| FetchError::UnknownEncoding(label.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_utf8() {
        let cfg = FetchConfig::default();
        assert_eq!(cfg.response_encoding, "utf8");
        assert_eq!(cfg.encoding().unwrap(), BodyEncoding::Whatwg(encoding_rs::UTF_8));
    }

    #[test]
    fn config_from_json_fills_defaults() {
        let cfg = FetchConfig::from_json("{}").unwrap();
        assert_eq!(cfg, FetchConfig::default());

        let cfg = FetchConfig::from_json(r#"{"response_encoding":"latin1"}"#).unwrap();
        assert_eq!(cfg.encoding().unwrap(), BodyEncoding::Latin1);
    }

    #[test]
    fn config_rejects_unknown_fields() {
        let err = FetchConfig::from_json(r#"{"responseEncoding":"utf8"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn config_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("getbody.json");
        std::fs::write(&path, r#"{"response_encoding":"utf16le"}"#).unwrap();
        let cfg = FetchConfig::load(&path).unwrap();
        assert_eq!(cfg.encoding().unwrap(), BodyEncoding::Whatwg(encoding_rs::UTF_16LE));
    }

    #[test]
    fn resolves_script_style_labels() {
        let utf8 = BodyEncoding::Whatwg(encoding_rs::UTF_8);
        assert_eq!(resolve_encoding("utf8").unwrap(), utf8);
        assert_eq!(resolve_encoding("UTF-8").unwrap(), utf8);
        assert_eq!(
            resolve_encoding("ucs2").unwrap(),
            BodyEncoding::Whatwg(encoding_rs::UTF_16LE)
        );
        assert_eq!(
            resolve_encoding("windows-1252").unwrap(),
            BodyEncoding::Whatwg(encoding_rs::WINDOWS_1252)
        );
    }

    #[test]
    fn latin1_family_is_byte_for_byte() {
        for label in ["latin1", "binary", "ISO-8859-1", "iso8859-1"] {
            assert_eq!(resolve_encoding(label).unwrap(), BodyEncoding::Latin1, "{label}");
        }
    }

    #[test]
    fn unknown_label_is_an_error() {
        let err = resolve_encoding("klingon").unwrap_err();
        assert!(matches!(err, FetchError::UnknownEncoding(ref l) if l == "klingon"));
    }

    #[test]
    fn options_builder() {
        let opts = FetchOptions::new().with_encoding("latin1");
        assert_eq!(opts.config.response_encoding, "latin1");
        assert!(opts.request_engine.is_none());
    }
}
