use super::color::Palette;
use crate::http::headerset::{display_name, join_values};
use crate::http::HeaderSet;
use crate::stat::Measurement;
use std::io::{self, Write};

fn host(m: &Measurement) -> &str {
    m.url.host_str().unwrap_or_default()
}

/// Host and first address.
pub fn write_basic(out: &mut impl Write, m: &Measurement, p: Palette) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}: {}", p.green("URL"), host(m))?;
    if let Some(ip) = m.ips.first() {
        writeln!(out, "{}:  {}", p.green("IP"), ip)?;
    }
    Ok(())
}

/// Target, addresses, negotiated WebSocket and TLS versions.
pub fn write_standard(out: &mut impl Write, m: &Measurement, p: Palette) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}: {}", p.orange("Target"), host(m))?;
    for ip in &m.ips {
        writeln!(out, "{}: {}", p.orange("IP"), ip)?;
    }
    if let Some(version) = m.request_headers.joined("sec-websocket-version") {
        writeln!(out, "{}: {}", p.orange("WS version"), version)?;
    }
    if let Some(tls) = &m.tls_state {
        writeln!(out, "{}: {}", p.orange("TLS version"), tls.version)?;
    }
    Ok(())
}

/// Everything captured: addresses, TLS session and certificate chain, and
/// both sides of the upgrade handshake.
pub fn write_verbose(out: &mut impl Write, m: &Measurement, p: Palette) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", p.orange("Target"))?;
    writeln!(out, "  {}:  {}", p.green("URL"), host(m))?;
    for ip in &m.ips {
        writeln!(out, "  {}: {}", p.green("IP"), ip)?;
    }
    writeln!(out)?;

    if let Some(tls) = &m.tls_state {
        writeln!(out, "{}", p.orange("TLS"))?;
        writeln!(out, "  {}: {}", p.green("Version"), tls.version)?;
        writeln!(out, "  {}: {}", p.green("Cipher Suite"), tls.cipher_suite)?;
        for (i, cert) in tls.peer_certificates.iter().enumerate() {
            writeln!(out, "  {}: {}", p.green("Certificate"), i + 1)?;
            writeln!(out, "    Subject: {}", cert.subject)?;
            writeln!(out, "    Issuer: {}", cert.issuer)?;
            writeln!(out, "    Not Before: {}", cert.not_before)?;
            writeln!(out, "    Not After: {}", cert.not_after)?;
        }
        writeln!(out)?;
    }

    write_headers(out, "Request headers", &m.request_headers, p)?;
    write_headers(out, "Response headers", &m.response_headers, p)
}

fn write_headers(
    out: &mut impl Write,
    title: &str,
    headers: &HeaderSet,
    p: Palette,
) -> io::Result<()> {
    writeln!(out, "{}", p.orange(title))?;
    for (name, values) in headers.iter() {
        writeln!(out, "  {}: {}", p.green(&display_name(name)), join_values(values))?;
    }
    Ok(())
}
