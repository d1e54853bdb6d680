use crate::base::neterror::NetError;
use boring::ssl::{SslConnectorBuilder, SslRef, SslVerifyMode, SslVersion};
use boring::x509::{X509NameRef, X509Ref};

/// Client TLS settings used for `wss://` probes.
///
/// ALPN only offers `http/1.1`: the WebSocket upgrade is an HTTP/1.1
/// exchange and a server that picks `h2` would break it.
#[derive(Debug, Clone)]
pub struct TlsConfig {
    pub min_version: Option<SslVersion>,
    pub max_version: Option<SslVersion>,
    pub alpn_protos: Vec<String>,
    pub curves: Vec<String>, // Curve names like "X25519", "P-256"
    pub verify_peer: bool,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self::websocket()
    }
}

impl TlsConfig {
    /// Configuration for a WebSocket upgrade over TLS 1.2/1.3.
    pub fn websocket() -> Self {
        Self {
            min_version: Some(SslVersion::TLS1_2),
            max_version: Some(SslVersion::TLS1_3),
            alpn_protos: vec!["http/1.1".to_string()],
            curves: vec!["X25519".to_string(), "P-256".to_string(), "P-384".to_string()],
            verify_peer: true,
        }
    }

    /// Apply this configuration to an SSL connector builder.
    pub fn apply_to_builder(&self, builder: &mut SslConnectorBuilder) -> Result<(), NetError> {
        if let Some(min) = self.min_version {
            builder.set_min_proto_version(Some(min)).map_err(|_| NetError::SslProtocolError)?;
        }
        if let Some(max) = self.max_version {
            builder.set_max_proto_version(Some(max)).map_err(|_| NetError::SslProtocolError)?;
        }

        if !self.alpn_protos.is_empty() {
            let mut alpn_wire = Vec::new();
            for proto in &self.alpn_protos {
                if proto.len() > 255 {
                    return Err(NetError::SslProtocolError);
                }
                alpn_wire.push(proto.len() as u8);
                alpn_wire.extend_from_slice(proto.as_bytes());
            }
            builder.set_alpn_protos(&alpn_wire).map_err(|_| NetError::SslProtocolError)?;
        }

        if !self.curves.is_empty() {
            let curves_str = self.curves.join(":");
            builder.set_curves_list(&curves_str).map_err(|_| NetError::SslProtocolError)?;
        }

        if self.verify_peer {
            builder.set_verify(SslVerifyMode::PEER);
        } else {
            builder.set_verify(SslVerifyMode::NONE);
        }

        Ok(())
    }

    /// Check if SNI (Server Name Indication) should be set for this host.
    /// Per RFC 6066, SNI MUST NOT be set for raw IP addresses.
    pub fn should_set_sni(host: &str) -> bool {
        host.parse::<std::net::IpAddr>().is_err()
    }
}

/// TLS session details captured right after the handshake.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsState {
    /// Negotiated protocol, e.g. `TLSv1.3`.
    pub version: String,
    /// Negotiated cipher suite, IANA name when BoringSSL knows it.
    pub cipher_suite: String,
    /// Peer chain as sent by the server, leaf first.
    pub peer_certificates: Vec<CertificateInfo>,
}

/// The fields of a peer certificate shown in verbose output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateInfo {
    pub subject: String,
    pub issuer: String,
    pub not_before: String,
    pub not_after: String,
}

impl TlsState {
    /// Read the negotiated session parameters off an established connection.
    pub fn capture(ssl: &SslRef) -> Self {
        let cipher_suite = ssl
            .current_cipher()
            .map(|c| c.standard_name().unwrap_or_else(|| c.name()).to_string())
            .unwrap_or_default();

        let peer_certificates = ssl
            .peer_cert_chain()
            .map(|chain| chain.iter().map(CertificateInfo::from_x509).collect())
            .unwrap_or_default();

        Self {
            version: ssl.version_str().to_string(),
            cipher_suite,
            peer_certificates,
        }
    }
}

impl CertificateInfo {
    fn from_x509(cert: &X509Ref) -> Self {
        Self {
            subject: format_name(cert.subject_name()),
            issuer: format_name(cert.issuer_name()),
            not_before: cert.not_before().to_string(),
            not_after: cert.not_after().to_string(),
        }
    }
}

/// Render a distinguished name as `CN=host, O=Org, C=US`.
fn format_name(name: &X509NameRef) -> String {
    name.entries()
        .map(|entry| {
            let key = entry.object().nid().short_name().unwrap_or("?");
            let value = entry
                .data()
                .as_utf8()
                .map(|s| s.to_string())
                .unwrap_or_default();
            format!("{key}={value}")
        })
        .collect::<Vec<_>>()
        .join(", ")
}
