//! Statlined - companion status servers
//!
//! Two TCP broadcast servers that feed the statline client:
//! - `time` - timezone, uptime of the serving session, wall-clock time
//!   (default port 8080)
//! - `system` - free memory share, user-mode CPU time, wall-clock time
//!   (default port 8081)
//!
//! Both are instances of one change-driven [`broadcast::BroadcastServer`]:
//! a 1-second ticker samples a [`broadcast::ReportSource`] and, whenever
//! the sampled values differ from the last broadcast, renders a fresh
//! three-line report and writes it to every connected client.
//!
//! # Panic-Free Guarantees
//!
//! All production code in this crate follows the panic-free policy:
//! - No `.unwrap()`, `.expect()`, `panic!()`, `unreachable!()`, `todo!()`
//! - All fallible operations return `Result` or `Option`
//! - Failed client writes drop that client, never the server

pub mod broadcast;
pub mod system;
pub mod time;

pub use broadcast::{BroadcastServer, ReportSource, ServeError, SAMPLE_INTERVAL};
pub use system::SystemSource;
pub use time::TimeSource;
