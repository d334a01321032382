//! Change-driven TCP broadcast server.
//!
//! The server keeps a plain list of connected clients, samples its
//! [`ReportSource`] once per second, and only broadcasts when the sampled
//! values actually changed. Every broadcast appends a `Current Time` line
//! so the three-line wire format from `statline-protocol` is produced
//! verbatim.

use std::time::Duration;

use chrono::Local;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::interval;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use statline_core::Endpoint;
use statline_protocol::render_report;

/// How often the source is sampled for changes.
pub const SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// Label of the timestamp line appended to every report.
const CURRENT_TIME_LABEL: &str = "Current Time";

/// Produces the two changing lines of a three-line report.
///
/// `sample` is called once per tick on the server's own task, so sources
/// may keep mutable state (counters, sysinfo handles) without locking.
pub trait ReportSource: Send {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Labels of the two sampled lines, in wire order.
    fn labels(&self) -> [&'static str; 2];

    /// Current values of the two sampled lines.
    fn sample(&mut self) -> [String; 2];
}

/// Errors that can occur while serving.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("Failed to bind {endpoint}: {reason}")]
    Bind { endpoint: String, reason: String },
}

/// TCP broadcast server around one [`ReportSource`].
pub struct BroadcastServer<S> {
    listener: TcpListener,
    endpoint: Endpoint,
    source: S,
    cancel_token: CancellationToken,
}

impl<S: ReportSource> BroadcastServer<S> {
    /// Binds the listener. Port 0 asks the OS for a free port; the
    /// resolved address is available via [`Self::local_endpoint`].
    pub async fn bind(
        endpoint: Endpoint,
        source: S,
        cancel_token: CancellationToken,
    ) -> Result<Self, ServeError> {
        let listener = TcpListener::bind(endpoint.address())
            .await
            .map_err(|e| ServeError::Bind {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })?;

        let endpoint = match listener.local_addr() {
            Ok(addr) => Endpoint::new(endpoint.host(), addr.port()),
            Err(_) => endpoint,
        };

        Ok(Self {
            listener,
            endpoint,
            source,
            cancel_token,
        })
    }

    /// Returns the bound address, with any port-0 request resolved.
    pub fn local_endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Runs the accept/broadcast loop until the token is cancelled.
    pub async fn run(mut self) {
        info!(
            source = self.source.name(),
            endpoint = %self.endpoint,
            "Broadcast server listening"
        );

        let mut clients: Vec<TcpStream> = Vec::new();
        let mut last_sent: Option<[String; 2]> = None;
        let mut ticker = interval(SAMPLE_INTERVAL);

        loop {
            tokio::select! {
                _ = self.cancel_token.cancelled() => {
                    info!(source = self.source.name(), "Broadcast server shutting down");
                    break;
                }

                result = self.listener.accept() => match result {
                    Ok((stream, addr)) => {
                        info!(
                            source = self.source.name(),
                            peer = %addr,
                            clients = clients.len() + 1,
                            "Client connected"
                        );
                        clients.push(stream);
                    }
                    Err(e) => {
                        error!(source = self.source.name(), error = %e, "Accept failed");
                        // Keep serving existing clients.
                    }
                },

                _ = ticker.tick() => {
                    let values = self.source.sample();
                    if last_sent.as_ref() == Some(&values) {
                        continue;
                    }

                    let report = render(self.source.labels(), &values);
                    debug!(source = self.source.name(), report = %report.trim_end(), "Broadcasting");
                    broadcast(&mut clients, report.as_bytes(), self.source.name()).await;
                    last_sent = Some(values);
                }
            }
        }
    }
}

/// Renders the full three-line report: the two sampled lines plus the
/// timestamp line, ctime-style.
fn render(labels: [&str; 2], values: &[String; 2]) -> String {
    let now = Local::now().format("%a %b %e %H:%M:%S %Y").to_string();
    let [first_label, second_label] = labels;
    let [first, second] = values;
    render_report(&[
        (first_label, first),
        (second_label, second),
        (CURRENT_TIME_LABEL, &now),
    ])
}

/// Writes the payload to every client, dropping clients whose write fails.
async fn broadcast(clients: &mut Vec<TcpStream>, payload: &[u8], source: &str) {
    let mut kept = Vec::with_capacity(clients.len());

    for mut stream in clients.drain(..) {
        match stream.write_all(payload).await {
            Ok(()) => {
                let _ = stream.flush().await;
                kept.push(stream);
            }
            Err(e) => {
                warn!(source, error = %e, "Dropping client after failed send");
            }
        }
    }

    *clients = kept;
}
