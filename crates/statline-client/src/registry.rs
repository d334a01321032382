//! The two fixed named sessions.
//!
//! The registry is deliberately minimal: exactly two sessions, keyed by
//! [`SessionName`], no dynamic add/remove and no pooling. Sessions are
//! parameterized by endpoint and parser, so adding a third server would
//! mean a new name variant and endpoint - never branching on ports.

use std::sync::Arc;

use statline_core::{Endpoint, SessionName, SessionStatus, DEFAULT_SYSTEM_PORT, DEFAULT_TIME_PORT};
use statline_protocol::ReportParser;
use tracing::debug;

use crate::session::ConnectionSession;
use crate::sink::StateSink;

/// Holds the two named sessions and routes operations by name.
///
/// The two sessions share nothing but the sink: each owns its socket and
/// read loop, so a stall or failure in one never delays the other.
pub struct SessionRegistry {
    time: ConnectionSession,
    system: ConnectionSession,
}

impl SessionRegistry {
    /// Builds the registry from explicit endpoints.
    pub fn new(
        time_endpoint: Endpoint,
        system_endpoint: Endpoint,
        sink: Arc<dyn StateSink>,
    ) -> Self {
        Self {
            time: ConnectionSession::new(
                SessionName::Time,
                time_endpoint,
                ReportParser::new(),
                Arc::clone(&sink),
            ),
            system: ConnectionSession::new(
                SessionName::System,
                system_endpoint,
                ReportParser::new(),
                sink,
            ),
        }
    }

    /// Builds the registry with the default loopback endpoints
    /// (`127.0.0.1:8080` and `127.0.0.1:8081`).
    pub fn with_defaults(sink: Arc<dyn StateSink>) -> Self {
        Self::new(
            Endpoint::localhost(DEFAULT_TIME_PORT),
            Endpoint::localhost(DEFAULT_SYSTEM_PORT),
            sink,
        )
    }

    /// Connects the named session. Fire-and-forget; see
    /// [`ConnectionSession::connect`].
    pub fn connect(&mut self, name: SessionName) {
        debug!(session = %name, "Connect requested");
        self.session_mut(name).connect();
    }

    /// Disconnects the named session. Idempotent.
    pub fn disconnect(&mut self, name: SessionName) {
        debug!(session = %name, "Disconnect requested");
        self.session_mut(name).disconnect();
    }

    /// Connects both sessions.
    pub fn connect_all(&mut self) {
        for name in SessionName::ALL {
            self.connect(name);
        }
    }

    /// Disconnects both sessions.
    pub fn disconnect_all(&mut self) {
        for name in SessionName::ALL {
            self.disconnect(name);
        }
    }

    /// Returns the named session's current status.
    pub fn status(&self, name: SessionName) -> SessionStatus {
        self.session(name).status()
    }

    /// Returns the named session's endpoint.
    pub fn endpoint(&self, name: SessionName) -> &Endpoint {
        self.session(name).endpoint()
    }

    fn session(&self, name: SessionName) -> &ConnectionSession {
        match name {
            SessionName::Time => &self.time,
            SessionName::System => &self.system,
        }
    }

    fn session_mut(&mut self, name: SessionName) -> &mut ConnectionSession {
        match name {
            SessionName::Time => &mut self.time,
            SessionName::System => &mut self.system,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::ChannelSink;

    fn test_registry() -> SessionRegistry {
        let (sink, _rx) = ChannelSink::new();
        SessionRegistry::with_defaults(Arc::new(sink))
    }

    #[test]
    fn test_default_endpoints() {
        let registry = test_registry();

        assert_eq!(
            registry.endpoint(SessionName::Time).to_string(),
            "127.0.0.1:8080"
        );
        assert_eq!(
            registry.endpoint(SessionName::System).to_string(),
            "127.0.0.1:8081"
        );
    }

    #[test]
    fn test_sessions_start_disconnected() {
        let registry = test_registry();

        for name in SessionName::ALL {
            assert_eq!(registry.status(name), SessionStatus::Disconnected);
        }
    }

    #[tokio::test]
    async fn test_disconnect_all_is_idempotent() {
        let mut registry = test_registry();

        registry.disconnect_all();
        registry.disconnect_all();

        for name in SessionName::ALL {
            assert_eq!(registry.status(name), SessionStatus::Disconnected);
        }
    }

    #[tokio::test]
    async fn test_connect_affects_only_named_session() {
        let mut registry = test_registry();

        registry.connect(SessionName::Time);

        assert_ne!(registry.status(SessionName::Time), SessionStatus::Disconnected);
        assert_eq!(
            registry.status(SessionName::System),
            SessionStatus::Disconnected
        );

        registry.disconnect_all();
    }
}
