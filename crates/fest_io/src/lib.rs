//! fest_io - snapshot I/O for the fest engine.
//!
//! Single source of truth for reading input snapshots: manifest resolution,
//! Draft 2020-12 schema validation, typed loading/normalization, canonical
//! JSON bytes, and SHA-256 digests. Strictly offline; paths with a scheme
//! are rejected at the manifest layer.
//!
//! The loaded `Snapshot` is handed to `fest_pipeline`; nothing in this
//! crate computes points.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for fest_io (manifest/schema/loader/canonical/hasher).
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem and path errors.
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON parse/serialize errors with an optional JSON Pointer hint.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// JSON Schema validation failures.
    #[error("schema validation failed for {doc}: {detail}")]
    Schema { doc: &'static str, detail: String },

    /// Manifest shape / offline policy / digest expectation failures.
    #[error("manifest error: {0}")]
    Manifest(String),

    /// Scoring configuration domain violations.
    #[error("config error: {0}")]
    Config(String),

    /// Hashing / canonicalization failures.
    #[error("hash error: {0}")]
    Hash(String),

    /// Snapshot-level invariants (duplicate keys and the like).
    #[error("invalid snapshot: {0}")]
    Invalid(String),
}

pub type IoResult<T> = Result<T, IoError>;

/* ---------------- From conversions (used by file modules) ---------------- */

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json does not keep a pointer; callers may enrich at higher
        // layers.
        IoError::Json { pointer: "/".to_string(), msg: e.to_string() }
    }
}

/* ---------------- Public modules (single source of truth) ---------------- */

pub mod canonical_json;
pub mod hasher;
pub mod manifest;
pub mod schema;
pub mod loader;

/// Returns true if `s` looks like a URL (any `<scheme>://`). Manifest
/// loading follows a strict offline posture.
#[inline]
pub fn looks_like_url_strict(s: &str) -> bool {
    s.trim().contains("://")
}

pub mod prelude {
    pub use crate::loader::{LoadedSnapshot, Snapshot, SnapshotPaths};
    pub use crate::{looks_like_url_strict, IoError, IoResult};
}
