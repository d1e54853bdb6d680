//! The instrumentation seam: a [`Probe`] connects to a target, stamps each
//! phase, and hands back the measurement together with any replies.

use super::measurement::{Measurement, Phases};
use crate::base::neterror::NetError;
use crate::dns::{HickoryResolver, Resolve};
use crate::http::HeaderSet;
use crate::socket::connectjob::ConnectJob;
use crate::socket::tls::TlsConfig;
use crate::ws::{Message, WebSocket};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Default deadline for a whole probe, connection setup included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const PING_PAYLOAD: &[u8] = b"wsstat";

/// What to send once the connection is upgraded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outgoing {
    /// A ping control frame, answered by a pong.
    Ping,
    /// A text frame, answered by the next data frame.
    Text(String),
}

/// Inputs of a single probe.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    pub url: Url,
    pub headers: HeaderSet,
    pub outgoing: Outgoing,
    /// How many times `outgoing` is sent; 1 unless bursting.
    pub count: u32,
}

/// What a successful probe returns.
#[derive(Debug, Clone)]
pub struct Probed {
    pub measurement: Measurement,
    /// Data frames received in reply, in order. Empty for pings.
    pub replies: Vec<Message>,
}

/// Alias for the `Future` type returned by a probe.
pub type Measuring<'a> = Pin<Box<dyn Future<Output = Result<Probed, NetError>> + Send + 'a>>;

/// Measures one target. Implementations must not retry: a failure is
/// reported as is.
pub trait Probe: Send + Sync {
    fn measure(&self, request: ProbeRequest) -> Measuring<'_>;
}

/// The network probe: DNS, TCP, optional TLS, WebSocket upgrade, then
/// `count` request/reply exchanges over the same connection.
#[derive(Clone)]
pub struct WsProbe {
    resolver: Arc<dyn Resolve>,
    tls: TlsConfig,
    timeout: Duration,
}

impl Default for WsProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl WsProbe {
    pub fn new() -> Self {
        Self {
            resolver: Arc::new(HickoryResolver::new()),
            tls: TlsConfig::websocket(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn Resolve>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(&self, request: ProbeRequest) -> Result<Probed, NetError> {
        let ProbeRequest {
            url,
            headers,
            outgoing,
            count,
        } = request;
        let count = count.max(1);

        let connected = ConnectJob::new(self.resolver.as_ref(), &self.tls)
            .connect(&url)
            .await?;
        tracing::debug!(
            peer = ?connected.socket.peer_addr().ok(),
            secure = connected.socket.is_secure(),
            "connected"
        );

        let started = Instant::now();
        let upgraded = WebSocket::upgrade(&url, connected.socket, &headers).await?;
        let ws_handshake = started.elapsed();
        tracing::debug!(elapsed_ms = ws_handshake.as_millis() as u64, "ws handshake done");

        let mut ws = upgraded.socket;
        let mut replies = Vec::new();
        let mut round_trips = Duration::ZERO;
        for seq in 0..count {
            let started = Instant::now();
            match &outgoing {
                Outgoing::Ping => {
                    ws.ping(PING_PAYLOAD.to_vec()).await?;
                    ws.recv_pong().await?;
                }
                Outgoing::Text(text) => {
                    ws.send_text(text.as_str()).await?;
                    replies.push(ws.recv_data().await?);
                }
            }
            let rtt = started.elapsed();
            tracing::debug!(seq, elapsed_ms = rtt.as_millis() as u64, "message round trip");
            round_trips += rtt;
        }

        if let Err(e) = ws.close().await {
            tracing::warn!(error = %e, "failed to send close frame");
        }

        let phases = Phases {
            dns_lookup: connected.dns_lookup,
            tcp_connection: connected.tcp_connection,
            tls_handshake: connected.tls_handshake,
            ws_handshake,
            message_round_trip: round_trips / count,
        };
        let mut measurement = Measurement::new(url, phases, count)
            .with_ips(connected.ips)
            .with_headers(upgraded.request_headers, upgraded.response_headers);
        if let Some(tls_state) = connected.tls_state {
            measurement = measurement.with_tls_state(tls_state);
        }

        Ok(Probed {
            measurement,
            replies,
        })
    }
}

impl Probe for WsProbe {
    fn measure(&self, request: ProbeRequest) -> Measuring<'_> {
        Box::pin(async move {
            match tokio::time::timeout(self.timeout, self.run(request)).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::debug!(timeout_ms = self.timeout.as_millis() as u64, "probe deadline hit");
                    Err(NetError::ConnectionTimedOut)
                }
            }
        })
    }
}
