//! One TCP client connection and its continuous receive loop.
//!
//! A `ConnectionSession` owns the full lifecycle of a single connection:
//! `Disconnected → Connecting → Connected → {Disconnected, Failed}`.
//! Establishment and the receive loop run on a background tokio task, so
//! `connect` is fire-and-forget and never blocks the caller. `disconnect`
//! cancels the task through a `CancellationToken`; cancellation is
//! observed at the next loop iteration boundary.
//!
//! # Known fragility
//!
//! A receive error (anything other than a clean peer close) halts the
//! read loop without touching the session status, so the session can be
//! left looking Connected while dead. This mirrors the original client
//! behavior on purpose; recovery is an explicit disconnect/connect cycle.

use std::sync::{Arc, Mutex};

use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use statline_core::{Endpoint, SessionName, SessionStatus};
use statline_protocol::ReportParser;

use crate::error::ClientError;
use crate::sink::StateSink;

/// Upper bound for a single receive. Reports are three short lines, so
/// one chunk always holds a whole report in practice.
pub const RECV_BUFFER_SIZE: usize = 1024;

/// One logical TCP client connection plus its receive loop.
///
/// At most one live socket at a time: `connect` tears down any previous
/// task before spawning a fresh one, so a reconnect never reuses a stale
/// socket.
pub struct ConnectionSession {
    endpoint: Endpoint,
    parser: ReportParser,
    cell: StatusCell,
    cancel_token: Option<CancellationToken>,
    task: Option<JoinHandle<()>>,
}

impl ConnectionSession {
    /// Creates a session in the `Disconnected` state. No socket is opened
    /// until `connect` is called.
    pub fn new(
        name: SessionName,
        endpoint: Endpoint,
        parser: ReportParser,
        sink: Arc<dyn StateSink>,
    ) -> Self {
        Self {
            endpoint,
            parser,
            cell: StatusCell {
                name,
                status: Arc::new(Mutex::new(SessionStatus::Disconnected)),
                sink,
            },
            cancel_token: None,
            task: None,
        }
    }

    /// Returns this session's name.
    pub fn name(&self) -> SessionName {
        self.cell.name
    }

    /// Returns the fixed endpoint this session targets.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the current lifecycle status.
    pub fn status(&self) -> SessionStatus {
        self.cell.get()
    }

    /// Opens the connection and starts the receive loop.
    ///
    /// No-op when already `Connected`. Otherwise any previous task is
    /// torn down first, then establishment runs on a background task:
    /// the caller never waits for completion. Failures land in
    /// `SessionStatus::Failed` and are not retried.
    pub fn connect(&mut self) {
        if self.status().is_connected() {
            debug!(session = %self.cell.name, "Already connected, ignoring connect");
            return;
        }

        // Fresh token and socket for every attempt.
        self.teardown();

        let token = CancellationToken::new();
        self.cell.set(SessionStatus::Connecting);

        let task = tokio::spawn(run_session(
            self.endpoint.clone(),
            self.parser.clone(),
            self.cell.clone(),
            token.clone(),
        ));

        self.cancel_token = Some(token);
        self.task = Some(task);
    }

    /// Cancels any in-flight receive and releases the socket.
    ///
    /// Idempotent: calling this while already disconnected is a no-op.
    /// The socket itself drops when the task observes cancellation at its
    /// next iteration boundary.
    pub fn disconnect(&mut self) {
        self.teardown();
        self.cell.set(SessionStatus::Disconnected);
    }

    fn teardown(&mut self) {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
        // The task exits on its own after cancellation; dropping the
        // handle detaches it rather than aborting mid-read.
        self.task = None;
    }
}

impl Drop for ConnectionSession {
    fn drop(&mut self) {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
    }
}

/// Shared status slot plus the sink used to announce transitions.
///
/// Cloned into the connection task so both sides (caller operations and
/// the task itself) update one place. Transitions are only announced when
/// the status actually changes.
#[derive(Clone)]
struct StatusCell {
    name: SessionName,
    status: Arc<Mutex<SessionStatus>>,
    sink: Arc<dyn StateSink>,
}

impl StatusCell {
    fn get(&self) -> SessionStatus {
        self.status
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set(&self, next: SessionStatus) {
        let changed = {
            let mut guard = self
                .status
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if *guard == next {
                false
            } else {
                *guard = next.clone();
                true
            }
        };

        if changed {
            self.sink.status_changed(self.name, next);
        }
    }

    /// Like `set`, but only while the token is uncancelled, with both
    /// decided under the status lock. Disconnect cancels the token before
    /// writing `Disconnected`, so a transition racing with it either
    /// lands before that write or is refused here; a cancelled task can
    /// never overwrite the disconnect. Returns whether the transition
    /// was applied.
    fn set_unless_cancelled(&self, next: SessionStatus, token: &CancellationToken) -> bool {
        let changed = {
            let mut guard = self
                .status
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if token.is_cancelled() {
                return false;
            }
            if *guard == next {
                false
            } else {
                *guard = next.clone();
                true
            }
        };

        if changed {
            self.sink.status_changed(self.name, next);
        }
        true
    }
}

/// Connection task: establish, then read until cancellation, peer close,
/// or a receive error.
async fn run_session(
    endpoint: Endpoint,
    parser: ReportParser,
    cell: StatusCell,
    token: CancellationToken,
) {
    let mut stream = tokio::select! {
        _ = token.cancelled() => {
            debug!(session = %cell.name, "Connect cancelled before establishment");
            return;
        }
        result = TcpStream::connect(endpoint.address()) => match result {
            Ok(stream) => stream,
            Err(e) => {
                let err = ClientError::Establish {
                    endpoint: endpoint.to_string(),
                    reason: e.to_string(),
                };
                warn!(session = %cell.name, error = %err, "Connection failed");
                cell.set_unless_cancelled(SessionStatus::Failed(e.to_string()), &token);
                return;
            }
        }
    };

    if !cell.set_unless_cancelled(SessionStatus::Connected, &token) {
        // Disconnected while the handshake completed; drop the socket.
        return;
    }

    info!(session = %cell.name, endpoint = %endpoint, "Connected");

    read_loop(&mut stream, &endpoint, &parser, &cell, &token).await;
}

/// Continuous receive loop.
///
/// Each iteration issues one bounded read; the `select!` makes
/// cancellation observable at every iteration boundary. The loop ends on
/// cancellation, peer close, or a receive error - it never reissues a
/// read after an error.
async fn read_loop(
    stream: &mut TcpStream,
    endpoint: &Endpoint,
    parser: &ReportParser,
    cell: &StatusCell,
    token: &CancellationToken,
) {
    let mut buf = [0u8; RECV_BUFFER_SIZE];

    loop {
        tokio::select! {
            _ = token.cancelled() => {
                debug!(session = %cell.name, "Receive loop cancelled");
                return;
            }
            result = stream.read(&mut buf) => match result {
                Ok(0) => {
                    info!(session = %cell.name, "Peer closed the stream");
                    cell.set(SessionStatus::Disconnected);
                    return;
                }
                Ok(n) => {
                    // Invalid UTF-8 gets replacement characters; decoding
                    // never terminates the loop.
                    let chunk = String::from_utf8_lossy(buf.get(..n).unwrap_or_default());
                    match parser.parse(&chunk) {
                        Ok(report) => {
                            debug!(session = %cell.name, report = %report, "Received report");
                            cell.sink.publish(cell.name, report);
                        }
                        Err(e) => {
                            // Stale over broken: keep the last published
                            // report and keep reading.
                            debug!(session = %cell.name, error = %e, "Ignoring unparseable chunk");
                        }
                    }
                }
                Err(e) => {
                    let err = ClientError::Receive {
                        endpoint: endpoint.to_string(),
                        reason: e.to_string(),
                    };
                    // Known fragility carried from the original client: the
                    // loop halts but the status stays Connected until an
                    // explicit disconnect/connect cycle.
                    warn!(session = %cell.name, error = %err, "Receive failed, halting reads");
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{ChannelSink, SessionEvent};

    fn test_session() -> (
        ConnectionSession,
        tokio::sync::mpsc::UnboundedReceiver<SessionEvent>,
    ) {
        let (sink, rx) = ChannelSink::new();
        let endpoint = Endpoint::localhost(8080);
        let session = ConnectionSession::new(
            SessionName::Time,
            endpoint,
            ReportParser::new(),
            Arc::new(sink),
        );
        (session, rx)
    }

    #[test]
    fn test_session_starts_disconnected() {
        let (session, _rx) = test_session();
        assert_eq!(session.status(), SessionStatus::Disconnected);
        assert_eq!(session.name(), SessionName::Time);
        assert_eq!(session.endpoint().port(), 8080);
    }

    #[tokio::test]
    async fn test_disconnect_is_idempotent() {
        let (mut session, mut rx) = test_session();

        session.disconnect();
        session.disconnect();

        assert_eq!(session.status(), SessionStatus::Disconnected);
        // Already Disconnected, so no status change was ever announced.
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_connect_announces_connecting() {
        let (mut session, mut rx) = test_session();

        session.connect();

        match rx.try_recv() {
            Ok(SessionEvent::StatusChanged { name, status }) => {
                assert_eq!(name, SessionName::Time);
                assert_eq!(status, SessionStatus::Connecting);
            }
            other => panic!("Expected status change, got {other:?}"),
        }

        session.disconnect();
    }

    #[test]
    fn test_status_cell_set_skips_no_op_transitions() {
        let (sink, mut rx) = ChannelSink::new();
        let cell = StatusCell {
            name: SessionName::System,
            status: Arc::new(Mutex::new(SessionStatus::Disconnected)),
            sink: Arc::new(sink),
        };

        cell.set(SessionStatus::Disconnected);
        assert!(rx.try_recv().is_err());

        cell.set(SessionStatus::Connecting);
        assert!(matches!(
            rx.try_recv(),
            Ok(SessionEvent::StatusChanged {
                status: SessionStatus::Connecting,
                ..
            })
        ));
        assert_eq!(cell.get(), SessionStatus::Connecting);
    }

    #[test]
    fn test_status_cell_refuses_set_after_cancellation() {
        let (sink, mut rx) = ChannelSink::new();
        let cell = StatusCell {
            name: SessionName::Time,
            status: Arc::new(Mutex::new(SessionStatus::Disconnected)),
            sink: Arc::new(sink),
        };
        let token = CancellationToken::new();

        // Cancellation racing in between establishment and the Connected
        // transition must win: the status stays Disconnected and nothing
        // is announced.
        token.cancel();
        assert!(!cell.set_unless_cancelled(SessionStatus::Connected, &token));
        assert_eq!(cell.get(), SessionStatus::Disconnected);
        assert!(rx.try_recv().is_err());

        let live = CancellationToken::new();
        assert!(cell.set_unless_cancelled(SessionStatus::Connected, &live));
        assert_eq!(cell.get(), SessionStatus::Connected);
        assert!(matches!(
            rx.try_recv(),
            Ok(SessionEvent::StatusChanged {
                status: SessionStatus::Connected,
                ..
            })
        ));
    }
}
