//! Session identity and lifecycle status.

use std::fmt;

/// Default port of the time server.
pub const DEFAULT_TIME_PORT: u16 = 8080;

/// Default port of the system-data server.
pub const DEFAULT_SYSTEM_PORT: u16 = 8081;

/// Identifier for one of the two fixed sessions.
///
/// The registry holds exactly these two; adding a server means adding a
/// variant here, never branching on port numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionName {
    /// Session polling the time server (default port 8080).
    Time,
    /// Session polling the system-data server (default port 8081).
    System,
}

impl SessionName {
    /// Both session names, in registry order.
    pub const ALL: [SessionName; 2] = [SessionName::Time, SessionName::System];

    /// Returns a short identifier for logs and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::System => "system",
        }
    }
}

impl fmt::Display for SessionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of one session.
///
/// Transitions: `Disconnected → Connecting → Connected`, then back to
/// `Disconnected` on explicit disconnect or peer close, or to `Failed` when
/// establishment fails. `Failed` is terminal until the next explicit
/// connect; there is no automatic retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// No socket held; the initial and post-disconnect state.
    Disconnected,
    /// Connect requested; establishment in flight.
    Connecting,
    /// Socket established; the receive loop is running.
    Connected,
    /// Establishment failed with the given reason.
    Failed(String),
}

impl SessionStatus {
    /// Returns true while a live socket is held.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Returns a short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(reason) => write!(f, "failed: {reason}"),
            _ => f.write_str(self.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_name_display() {
        assert_eq!(SessionName::Time.to_string(), "time");
        assert_eq!(SessionName::System.to_string(), "system");
    }

    #[test]
    fn test_session_name_all_covers_both() {
        assert_eq!(SessionName::ALL.len(), 2);
        assert!(SessionName::ALL.contains(&SessionName::Time));
        assert!(SessionName::ALL.contains(&SessionName::System));
    }

    #[test]
    fn test_status_is_connected() {
        assert!(SessionStatus::Connected.is_connected());
        assert!(!SessionStatus::Disconnected.is_connected());
        assert!(!SessionStatus::Connecting.is_connected());
        assert!(!SessionStatus::Failed("refused".to_string()).is_connected());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(SessionStatus::Connecting.to_string(), "connecting");
        assert_eq!(
            SessionStatus::Failed("connection refused".to_string()).to_string(),
            "failed: connection refused"
        );
    }
}
