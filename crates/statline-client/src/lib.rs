//! Statline Client - persistent status-polling TCP client
//!
//! This crate provides the client core:
//! - `session` - one TCP connection's lifecycle and receive loop
//! - `registry` - the two fixed named sessions, connect/disconnect by name
//! - `sink` - the publication seam towards the consumer
//! - `config` - endpoint configuration from statline.toml
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐  connect/disconnect  ┌─────────────────────┐
//! │ SessionRegistry  │─────────────────────▶│  ConnectionSession  │
//! │ (time + system)  │                      │ (socket + read loop)│
//! └──────────────────┘                      └──────────┬──────────┘
//!                                                      │ StatusReport
//!                                                      ▼
//!                                           ┌─────────────────────┐
//!                                           │      StateSink      │
//!                                           │ (single event chan) │
//!                                           └─────────────────────┘
//! ```
//!
//! # Panic-Free Guarantees
//!
//! All production code in this crate follows the panic-free policy:
//! - No `.unwrap()`, `.expect()`, `panic!()`, `unreachable!()`, `todo!()`
//! - All fallible operations return `Result` or `Option`
//! - Channel operations handle closure gracefully

pub mod config;
pub mod error;
pub mod registry;
pub mod session;
pub mod sink;

pub use config::{ClientConfig, ServerConfig};
pub use error::{ClientError, Result};
pub use registry::SessionRegistry;
pub use statline_core::{DEFAULT_SYSTEM_PORT, DEFAULT_TIME_PORT};
pub use session::{ConnectionSession, RECV_BUFFER_SIZE};
pub use sink::{ChannelSink, SessionEvent, StateSink};
