//! Snapshot error types.

use thiserror::Error;

/// Errors that can occur during snapshot operations
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Serialization failed
    #[error("serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization failed
    #[error("deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot format version is not supported by this build
    #[error("unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}
