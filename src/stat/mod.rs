//! Latency instrumentation.
//!
//! - [`Probe`]: the contract the command-line core measures through
//! - [`WsProbe`]: the network implementation (DNS → TCP → TLS → WS → RTT)
//! - [`Measurement`]: phase durations and cumulative markers of one probe
//! - [`Response`]: the decoded reply payload

mod measurement;
mod probe;
mod response;

pub use crate::socket::tls::{CertificateInfo, TlsState};
pub use measurement::{Measurement, Phase, PhaseTiming, Phases};
pub use probe::{Measuring, Outgoing, Probe, ProbeRequest, Probed, WsProbe, DEFAULT_TIMEOUT};
pub use response::Response;
