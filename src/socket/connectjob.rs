use crate::base::neterror::NetError;
use crate::dns::{Name, Resolve};
use crate::socket::client::SocketType;
use crate::socket::tls::{TlsConfig, TlsState};
use boring::ssl::{SslConnector, SslMethod};
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::{Duration, Instant};
use tokio::net::TcpStream;
use tokio_boring::SslStream;
use url::{Host, Url};

/// A socket ready for the WebSocket upgrade, plus what it took to get there.
#[derive(Debug)]
pub struct Connected {
    pub socket: SocketType,
    /// Every address the name resolved to, in resolver order.
    pub ips: Vec<IpAddr>,
    pub tls_state: Option<TlsState>,
    pub dns_lookup: Duration,
    pub tcp_connection: Duration,
    /// `None` for `ws://` targets.
    pub tls_handshake: Option<Duration>,
}

/// Manages the connection process: DNS -> TCP -> SSL, timing each step.
/// Roughly equivalent to net::ConnectJob.
pub struct ConnectJob<'a> {
    resolver: &'a dyn Resolve,
    tls: &'a TlsConfig,
}

impl<'a> ConnectJob<'a> {
    pub fn new(resolver: &'a dyn Resolve, tls: &'a TlsConfig) -> Self {
        Self { resolver, tls }
    }

    pub async fn connect(&self, url: &Url) -> Result<Connected, NetError> {
        let secure = match url.scheme() {
            "wss" => true,
            "ws" => false,
            _ => return Err(NetError::UnknownUrlScheme),
        };
        let host = url.host().ok_or(NetError::InvalidUrl)?;
        let port = url.port_or_known_default().ok_or(NetError::InvalidUrl)?;

        // 1. DNS Resolution
        let started = Instant::now();
        let (host_name, ips) = match host {
            Host::Domain(domain) => {
                let addrs = self.resolver.resolve(Name::new(domain)).await?;
                (domain.to_string(), addrs.map(|a| a.ip()).collect::<Vec<_>>())
            }
            Host::Ipv4(ip) => (ip.to_string(), vec![IpAddr::V4(ip)]),
            Host::Ipv6(ip) => (ip.to_string(), vec![IpAddr::V6(ip)]),
        };
        let dns_lookup = started.elapsed();
        tracing::debug!(host = %host_name, count = ips.len(), elapsed_ms = dns_lookup.as_millis() as u64, "dns phase done");

        // 2. TCP Connect, first address that accepts wins
        let started = Instant::now();
        let stream = connect_any(&ips, port)
            .await
            .map_err(|e| NetError::connection_failed_to(&host_name, port, e))?;
        let tcp_connection = started.elapsed();
        tracing::debug!(peer = ?stream.peer_addr().ok(), elapsed_ms = tcp_connection.as_millis() as u64, "tcp phase done");

        // 3. SSL Handshake (if wss)
        if !secure {
            return Ok(Connected {
                socket: SocketType::Tcp(stream),
                ips,
                tls_state: None,
                dns_lookup,
                tcp_connection,
                tls_handshake: None,
            });
        }

        let started = Instant::now();
        let tls_stream = self.handshake(&host_name, stream).await?;
        let tls_handshake = started.elapsed();
        let tls_state = TlsState::capture(tls_stream.ssl());
        tracing::debug!(
            version = %tls_state.version,
            cipher = %tls_state.cipher_suite,
            elapsed_ms = tls_handshake.as_millis() as u64,
            "tls phase done"
        );

        Ok(Connected {
            socket: SocketType::Ssl(tls_stream),
            ips,
            tls_state: Some(tls_state),
            dns_lookup,
            tcp_connection,
            tls_handshake: Some(tls_handshake),
        })
    }

    async fn handshake(
        &self,
        host: &str,
        stream: TcpStream,
    ) -> Result<SslStream<TcpStream>, NetError> {
        let mut builder =
            SslConnector::builder(SslMethod::tls()).map_err(|_| NetError::SslProtocolError)?;
        self.tls.apply_to_builder(&mut builder)?;

        let connector = builder.build();
        let mut config = connector.configure().map_err(|_| NetError::SslProtocolError)?;
        if !TlsConfig::should_set_sni(host) {
            config.set_use_server_name_indication(false);
        }
        if !self.tls.verify_peer {
            config.set_verify_hostname(false);
        }

        tokio_boring::connect(config, host, stream).await.map_err(|e| {
            let reason = e.to_string();
            tracing::debug!(host, error = %reason, "TLS handshake failed");
            if is_plaintext_reply(&reason) {
                NetError::TlsHandshakeMismatch {
                    host: host.to_string(),
                }
            } else {
                NetError::TlsHandshakeFailed {
                    host: host.to_string(),
                    reason,
                }
            }
        })
    }
}

/// Connect to the first address that accepts, in resolver order.
async fn connect_any(ips: &[IpAddr], port: u16) -> io::Result<TcpStream> {
    let mut last_err = None;
    for ip in ips {
        let addr = SocketAddr::new(*ip, port);
        match TcpStream::connect(addr).await {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                tracing::debug!(%addr, error = %e, "tcp connect attempt failed");
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| {
        io::Error::new(io::ErrorKind::AddrNotAvailable, "no addresses to connect to")
    }))
}

/// BoringSSL reports a peer that answers the ClientHello in plaintext (an
/// HTTP server, usually) as a record with a bogus version. This is the only
/// place that inspects the diagnostic text; everything downstream matches on
/// [`NetError::TlsHandshakeMismatch`].
fn is_plaintext_reply(diagnostic: &str) -> bool {
    let diagnostic = diagnostic.to_ascii_uppercase();
    diagnostic.contains("WRONG_VERSION_NUMBER") || diagnostic.contains("WRONG VERSION NUMBER")
}
