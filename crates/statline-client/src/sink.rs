//! Publication seam between sessions and their consumer.
//!
//! Every session publishes through the same [`StateSink`], and the
//! channel-backed implementation funnels all events into one unbounded
//! channel. The receiving half is the consumer's single delivery context:
//! reports arrive whole (all three fields together) and, per session, in
//! receipt order.

use statline_core::{SessionName, SessionStatus, StatusReport};
use tokio::sync::mpsc;
use tracing::debug;

/// Event delivered to the consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A freshly parsed report from one session.
    Report {
        name: SessionName,
        report: StatusReport,
    },
    /// A session's lifecycle status changed.
    StatusChanged {
        name: SessionName,
        status: SessionStatus,
    },
}

/// Consumer-facing sink for session updates.
///
/// The core publishes into this and knows nothing about rendering.
/// Implementations must deliver events on a single consistent context so
/// the consumer never races with loop execution or observes torn reports.
pub trait StateSink: Send + Sync {
    /// Publishes a complete report for one session.
    fn publish(&self, name: SessionName, report: StatusReport);

    /// Reports a session status transition.
    fn status_changed(&self, name: SessionName, status: SessionStatus);
}

/// Channel-backed sink.
///
/// Cheap to clone; all clones feed the same receiver. Send errors mean
/// the consumer has gone away and are ignored - sessions keep running
/// until explicitly disconnected.
#[derive(Clone)]
pub struct ChannelSink {
    event_tx: mpsc::UnboundedSender<SessionEvent>,
}

impl ChannelSink {
    /// Creates the sink and the consumer's receiving half.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        (Self { event_tx }, event_rx)
    }
}

impl StateSink for ChannelSink {
    fn publish(&self, name: SessionName, report: StatusReport) {
        if self
            .event_tx
            .send(SessionEvent::Report { name, report })
            .is_err()
        {
            debug!(session = %name, "Consumer gone, dropping report");
        }
    }

    fn status_changed(&self, name: SessionName, status: SessionStatus) {
        if self
            .event_tx
            .send(SessionEvent::StatusChanged { name, status })
            .is_err()
        {
            debug!(session = %name, "Consumer gone, dropping status change");
        }
    }
}
