use crate::http::HeaderSet;
use crate::socket::tls::TlsState;
use std::net::IpAddr;
use std::time::Duration;
use url::Url;

/// One ordered step of establishing and using a WebSocket connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    DnsLookup,
    TcpConnection,
    TlsHandshake,
    WsHandshake,
    MessageRoundTrip,
}

/// Per-phase durations as measured by a probe.
///
/// `tls_handshake` is `None` for `ws://` targets. Under a burst,
/// `message_round_trip` holds the mean round trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Phases {
    pub dns_lookup: Duration,
    pub tcp_connection: Duration,
    pub tls_handshake: Option<Duration>,
    pub ws_handshake: Duration,
    pub message_round_trip: Duration,
}

/// A single entry of the timeline: how long a phase took and when, measured
/// from the start of the probe, it finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTiming {
    pub phase: Phase,
    pub duration: Duration,
    pub done_at: Duration,
}

/// Everything captured by one probe of a target.
///
/// Cumulative markers are not stored: they are derived from the phase
/// durations, so each marker is always the sum of the durations before it
/// and the last one is the total time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    pub url: Url,
    phases: Phases,
    /// Resolved addresses of the target, in resolver order.
    pub ips: Vec<IpAddr>,
    pub tls_state: Option<TlsState>,
    pub request_headers: HeaderSet,
    pub response_headers: HeaderSet,
    /// Number of messages sent; greater than one under a burst.
    pub message_count: u32,
}

impl Measurement {
    pub fn new(url: Url, phases: Phases, message_count: u32) -> Self {
        Self {
            url,
            phases,
            ips: Vec::new(),
            tls_state: None,
            request_headers: HeaderSet::new(),
            response_headers: HeaderSet::new(),
            message_count: message_count.max(1),
        }
    }

    pub fn with_ips(mut self, ips: Vec<IpAddr>) -> Self {
        self.ips = ips;
        self
    }

    pub fn with_tls_state(mut self, tls_state: TlsState) -> Self {
        self.tls_state = Some(tls_state);
        self
    }

    pub fn with_headers(mut self, request: HeaderSet, response: HeaderSet) -> Self {
        self.request_headers = request;
        self.response_headers = response;
        self
    }

    pub fn phases(&self) -> &Phases {
        &self.phases
    }

    pub fn is_burst(&self) -> bool {
        self.message_count > 1
    }

    pub fn dns_lookup(&self) -> Duration {
        self.phases.dns_lookup
    }

    pub fn tcp_connection(&self) -> Duration {
        self.phases.tcp_connection
    }

    /// Zero when no TLS handshake took place.
    pub fn tls_handshake(&self) -> Duration {
        self.phases.tls_handshake.unwrap_or_default()
    }

    pub fn ws_handshake(&self) -> Duration {
        self.phases.ws_handshake
    }

    pub fn message_round_trip(&self) -> Duration {
        self.phases.message_round_trip
    }

    pub fn dns_lookup_done(&self) -> Duration {
        self.dns_lookup()
    }

    pub fn tcp_connected(&self) -> Duration {
        self.dns_lookup_done() + self.tcp_connection()
    }

    pub fn tls_handshake_done(&self) -> Duration {
        self.tcp_connected() + self.tls_handshake()
    }

    pub fn ws_handshake_done(&self) -> Duration {
        self.tls_handshake_done() + self.ws_handshake()
    }

    pub fn first_message_response(&self) -> Duration {
        self.ws_handshake_done() + self.message_round_trip()
    }

    pub fn total_time(&self) -> Duration {
        self.first_message_response()
    }

    /// Ordered phases with their cumulative markers. The TLS phase is listed
    /// only when `with_tls` is set.
    pub fn timeline(&self, with_tls: bool) -> Vec<PhaseTiming> {
        let mut steps = vec![
            (Phase::DnsLookup, self.dns_lookup()),
            (Phase::TcpConnection, self.tcp_connection()),
        ];
        if with_tls {
            steps.push((Phase::TlsHandshake, self.tls_handshake()));
        }
        steps.push((Phase::WsHandshake, self.ws_handshake()));
        steps.push((Phase::MessageRoundTrip, self.message_round_trip()));

        let mut done_at = Duration::ZERO;
        steps
            .into_iter()
            .map(|(phase, duration)| {
                done_at += duration;
                PhaseTiming {
                    phase,
                    duration,
                    done_at,
                }
            })
            .collect()
    }
}
