//! Common error types for Warden components.

use thiserror::Error;

/// Result alias used throughout Warden
pub type Result<T, E = WardenError> = std::result::Result<T, E>;

/// Common errors across Warden components
#[derive(Debug, Error)]
pub enum WardenError {
    /// Session could not be established or authenticated
    #[error("Connection error: {0}")]
    Connection(String),

    /// TLS certificate material could not be read
    #[error("Failed to load TLS material from {path}: {source}")]
    TlsLoad {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Backend rejected an admin command
    #[error("Admin command {command} failed: {message}")]
    AdminCommand { command: String, message: String },

    /// Backend rejected a reconfiguration (stale version, quorum, change size)
    #[error("Reconfigure to version {version} rejected: {message}")]
    Reconfigure { version: u64, message: String },

    /// Bootstrap reconfiguration kept failing until the retry budget ran out
    #[error("Replica set initialization gave up after {attempts} attempts: {last_error}")]
    InitializationTimeout {
        attempts: u32,
        #[source]
        last_error: Box<WardenError>,
    },

    /// Backend reply could not be decoded
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl WardenError {
    /// Returns true if the failed operation may succeed on a later cycle
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::AdminCommand { .. } | Self::Reconfigure { .. }
        )
    }
}
