use std::io;
use std::sync::Arc;
use thiserror::Error;

/// Transport-level failures raised while measuring a WebSocket endpoint.
///
/// The contextual variants carry the host or domain the failure relates to
/// so the report can name it.
#[derive(Debug, Error, Clone)]
pub enum NetError {
    // Connection Errors
    #[error("Connection closed (TCP FIN)")]
    ConnectionClosed,
    #[error("Connection reset (TCP RST)")]
    ConnectionReset,
    #[error("Connection refused")]
    ConnectionRefused,
    #[error("Connection failed")]
    ConnectionFailed,
    #[error("SSL protocol error")]
    SslProtocolError,
    #[error("Connection timed out")]
    ConnectionTimedOut,

    // URL / response errors
    #[error("Invalid URL")]
    InvalidUrl,
    #[error("Unknown URL scheme")]
    UnknownUrlScheme,
    #[error("Empty response")]
    EmptyResponse,

    // Contextual errors
    #[error("Name not resolved for {domain}: {source}")]
    NameNotResolvedFor {
        domain: String,
        #[source]
        source: Arc<io::Error>,
    },
    #[error("Connection to {host}:{port} failed: {source}")]
    ConnectionFailedTo {
        host: String,
        port: u16,
        #[source]
        source: Arc<io::Error>,
    },
    /// The peer answered the ClientHello with something that is not TLS,
    /// typically a plaintext HTTP/WebSocket server on the target port.
    #[error("first record from {host} does not look like a TLS handshake")]
    TlsHandshakeMismatch { host: String },
    #[error("TLS handshake with {host} failed: {reason}")]
    TlsHandshakeFailed { host: String, reason: String },
    #[error("WebSocket handshake failed: {reason}")]
    WsHandshakeFailed { reason: String },
}

impl NetError {
    /// Wrap an IO error raised while connecting to `host:port`.
    pub fn connection_failed_to(host: &str, port: u16, source: io::Error) -> Self {
        NetError::ConnectionFailedTo {
            host: host.to_string(),
            port,
            source: Arc::new(source),
        }
    }

    /// Wrap an IO error raised while resolving `domain`.
    pub fn dns_failed(domain: &str, source: io::Error) -> Self {
        NetError::NameNotResolvedFor {
            domain: domain.to_string(),
            source: Arc::new(source),
        }
    }

    /// Map an IO error from an established socket onto the closest variant.
    pub fn from_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionRefused => NetError::ConnectionRefused,
            io::ErrorKind::ConnectionReset => NetError::ConnectionReset,
            io::ErrorKind::UnexpectedEof | io::ErrorKind::BrokenPipe => {
                NetError::ConnectionClosed
            }
            io::ErrorKind::TimedOut => NetError::ConnectionTimedOut,
            _ => NetError::ConnectionFailed,
        }
    }
}
