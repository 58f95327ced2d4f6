//! The `error` module defines the error type used within the `sensorhub` application.
//!
//! Malformed message payloads are deliberately absent: the subscriber recovers
//! from them locally and never surfaces them as an `Error`.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The initial connection of a client was refused or could not be made.
    #[error("connection failed for {client_id}: {reason}")]
    Connect { client_id: String, reason: String },

    /// A single publish call failed. Callers report it and keep going.
    #[error("publish failed: {0}")]
    Publish(String),

    /// The subscriber lost its broker connection.
    #[error("connection lost: {0}")]
    Connection(String),

    #[error("failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
}
