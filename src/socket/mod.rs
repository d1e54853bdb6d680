//! Socket and connection setup.
//!
//! Mirrors the parts of Chromium's `net/socket/` a single probe needs:
//! - [`connectjob`]: DNS → TCP → TLS connection flow, timed per step
//! - [`client`]: the resulting plain or TLS socket
//! - [`tls`]: TLS configuration with BoringSSL and session capture

pub mod client;
pub mod connectjob;
pub mod tls;
