//! Statline Protocol - Wire format for status reports
//!
//! The wire format is plaintext: newline-separated `label: value` lines,
//! three per report. This crate provides the parser used by the client
//! and the rendering helpers used by the servers, so both sides agree on
//! the exact byte format.

pub mod parse;
pub mod render;

pub use parse::{ParseError, ReportParser, DEFAULT_SENTINEL};
pub use render::render_report;
