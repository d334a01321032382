//! Statline Core - Shared types for the status-polling client
//!
//! This crate provides the domain types shared between the client
//! (statline-client), the wire format (statline-protocol), and the
//! companion servers (statlined).
//!
//! All code follows the panic-free policy: no `.unwrap()`, `.expect()`,
//! `panic!()`, `unreachable!()`, `todo!()`, or direct indexing `[i]`.

pub mod endpoint;
pub mod error;
pub mod report;
pub mod session;

// Re-exports for convenience
pub use endpoint::Endpoint;
pub use error::{DomainError, DomainResult};
pub use report::StatusReport;
pub use session::{SessionName, SessionStatus, DEFAULT_SYSTEM_PORT, DEFAULT_TIME_PORT};
