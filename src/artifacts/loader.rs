//! Two-tier artifact loading
//!
//! Exported artifacts drift with the exporter version. The strict decoder is
//! tried first; on any failure the bytes are re-read leniently (BOM stripped,
//! exporter envelope unwrapped). A file that defeats both yields `None`.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use thiserror::Error;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Which decoder produced the artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeStrategy {
    Primary,
    Fallback,
}

/// Load outcome of one artifact file, reported by `/health`
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactStatus {
    pub name: &'static str,
    pub path: String,
    pub loaded: bool,
    pub strategy: Option<DecodeStrategy>,
    pub sha256: Option<String>,
    pub loaded_at: Option<DateTime<Utc>>,
}

/// Strict decoding of the raw file bytes
fn decode_primary<T: DeserializeOwned>(bytes: &[u8]) -> serde_json::Result<T> {
    serde_json::from_slice(bytes)
}

/// Permissive decoding: tolerate a BOM and the `{format_version, payload}` envelope
fn decode_fallback<T: DeserializeOwned>(bytes: &[u8]) -> serde_json::Result<T> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let doc: Value = serde_json::from_slice(bytes)?;

    let doc = match doc {
        Value::Object(mut map) if map.contains_key("format_version") => match map.remove("payload") {
            Some(payload) => payload,
            None => Value::Object(map),
        },
        other => other,
    };

    serde_json::from_value(doc)
}

fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Decode `bytes` with the primary strategy, falling back to the lenient one
pub fn decode_artifact<T: DeserializeOwned>(path: &str, bytes: &[u8]) -> Result<(T, DecodeStrategy), LoadError> {
    match decode_primary(bytes) {
        Ok(value) => Ok((value, DecodeStrategy::Primary)),
        Err(e) => {
            tracing::warn!("Could not load {}: {}", path, e);
            decode_fallback(bytes)
                .map(|value| (value, DecodeStrategy::Fallback))
                .map_err(|source| LoadError::Decode {
                    path: path.to_string(),
                    source,
                })
        }
    }
}

/// Load one artifact. Never fails: problems are logged and reported as `None`.
pub fn load_artifact<T: DeserializeOwned>(name: &'static str, path: &Path) -> (Option<T>, ArtifactStatus) {
    let path_str = path.display().to_string();
    let mut status = ArtifactStatus {
        name,
        path: path_str.clone(),
        loaded: false,
        strategy: None,
        sha256: None,
        loaded_at: None,
    };

    let result = std::fs::read(path)
        .map_err(|source| LoadError::Io {
            path: path_str.clone(),
            source,
        })
        .and_then(|bytes| {
            status.sha256 = Some(sha256_hex(&bytes));
            decode_artifact::<T>(&path_str, &bytes)
        });

    match result {
        Ok((value, strategy)) => {
            tracing::info!("Loaded {} from {} ({:?} decoder)", name, path_str, strategy);
            status.loaded = true;
            status.strategy = Some(strategy);
            status.loaded_at = Some(Utc::now());
            (Some(value), status)
        }
        Err(e) => {
            tracing::error!("Model load failed: {}", e);
            (None, status)
        }
    }
}
