//! Error types for the statline client.
//!
//! Establishment and receive errors never crash the process: they are
//! logged, reflected in the session status where applicable, and leave
//! recovery to an explicit reconnect.

use std::path::PathBuf;

use statline_core::DomainError;
use thiserror::Error;

/// Client errors.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Opening the TCP connection failed.
    ///
    /// Stored in `SessionStatus::Failed`; there is no automatic retry,
    /// recovery requires an explicit new connect.
    #[error("Failed to connect to {endpoint}: {reason}")]
    Establish { endpoint: String, reason: String },

    /// A receive on an established connection failed.
    ///
    /// Halts the session's read loop. The session status is deliberately
    /// left untouched; see the session module for this documented
    /// fragility.
    #[error("Receive failed on {endpoint}: {reason}")]
    Receive { endpoint: String, reason: String },

    /// Config file could not be read.
    #[error("Failed to read config file {path}: {reason}")]
    ConfigRead { path: PathBuf, reason: String },

    /// Config file could not be parsed as TOML.
    #[error("Failed to parse config file {path}: {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    /// Domain validation error passthrough (bad endpoint values).
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Convenience Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
