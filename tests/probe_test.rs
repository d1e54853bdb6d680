//! Probe Tests
//!
//! Drives `WsProbe` against loopback servers:
//! - an echo server accepting the WebSocket upgrade
//! - a plaintext server answering a TLS ClientHello
//! - a server that accepts and then stays silent
//! - a closed port

use futures::{SinkExt, StreamExt};
use wsstat::base::neterror::NetError;
use wsstat::cli::{classify, ConnectionError};
use wsstat::dns::{Addrs, Name, Resolve, Resolving};
use wsstat::http::HeaderSet;
use wsstat::stat::{Outgoing, Probe, ProbeRequest, WsProbe};
use wsstat::ws::Message;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite;
use url::Url;

struct LoopbackResolver;

impl Resolve for LoopbackResolver {
    fn resolve(&self, _name: Name) -> Resolving {
        let addrs = vec![SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0)];
        Box::pin(async move { Ok(Box::new(addrs.into_iter()) as Addrs) })
    }
}

/// Echo every data frame back; pings are answered by tungstenite itself.
async fn spawn_echo_server() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let Ok(mut ws) = tokio_tungstenite::accept_async(stream).await else {
                    return;
                };
                while let Some(Ok(msg)) = ws.next().await {
                    match msg {
                        tungstenite::Message::Text(_) | tungstenite::Message::Binary(_) => {
                            if ws.send(msg).await.is_err() {
                                break;
                            }
                        }
                        tungstenite::Message::Close(_) => break,
                        _ => {}
                    }
                }
            });
        }
    });
    port
}

fn request(url: &str, outgoing: Outgoing, count: u32) -> ProbeRequest {
    ProbeRequest {
        url: Url::parse(url).unwrap(),
        headers: HeaderSet::new(),
        outgoing,
        count,
    }
}

#[tokio::test]
async fn test_ping_over_loopback() {
    let port = spawn_echo_server().await;
    let probe = WsProbe::new();

    let probed = probe
        .measure(request(&format!("ws://127.0.0.1:{port}/"), Outgoing::Ping, 1))
        .await
        .unwrap();

    let m = &probed.measurement;
    assert!(probed.replies.is_empty());
    assert_eq!(m.ips, vec![IpAddr::V4(Ipv4Addr::LOCALHOST)]);
    assert!(m.tls_state.is_none());
    assert_eq!(m.phases().tls_handshake, None);
    assert_eq!(m.dns_lookup_done(), m.dns_lookup());
    assert_eq!(m.request_headers.joined("sec-websocket-version").as_deref(), Some("13"));
    assert_eq!(m.response_headers.joined("upgrade").as_deref(), Some("websocket"));
    assert!(m.total_time() >= m.ws_handshake_done());
}

#[tokio::test]
async fn test_text_burst_over_loopback() {
    let port = spawn_echo_server().await;
    let probe = WsProbe::new().with_resolver(Arc::new(LoopbackResolver));

    let mut req = request(
        &format!("ws://echo.test:{port}/feed"),
        Outgoing::Text(r#"{"echo":"hello"}"#.into()),
        3,
    );
    req.headers.append("X-Probe", "wsstat").unwrap();
    let probed = probe.measure(req).await.unwrap();

    assert_eq!(probed.measurement.message_count, 3);
    assert!(probed.measurement.is_burst());
    assert_eq!(probed.replies.len(), 3);
    assert!(probed
        .replies
        .iter()
        .all(|m| *m == Message::Text(r#"{"echo":"hello"}"#.into())));
    assert_eq!(
        probed.measurement.request_headers.joined("x-probe").as_deref(),
        Some("wsstat")
    );
}

#[tokio::test]
async fn test_plaintext_server_classified_as_tls_expected() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        if let Ok((mut stream, _)) = listener.accept().await {
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf).await;
            let _ = stream
                .write_all(b"HTTP/1.1 400 Bad Request\r\nContent-Length: 0\r\n\r\n")
                .await;
        }
    });

    let url = Url::parse(&format!("wss://127.0.0.1:{port}/")).unwrap();
    let err = WsProbe::new()
        .measure(request(url.as_str(), Outgoing::Ping, 1))
        .await
        .unwrap_err();
    assert!(
        matches!(err, NetError::TlsHandshakeMismatch { .. }),
        "unexpected error: {err:?}"
    );

    let classified = classify(err, &url);
    assert!(matches!(classified, ConnectionError::TlsExpectedButAbsent { .. }));
    assert!(classified.to_string().contains("--insecure"));
}

#[tokio::test]
async fn test_silent_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        let held = listener.accept().await;
        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(held);
    });

    let err = WsProbe::new()
        .with_timeout(Duration::from_millis(200))
        .measure(request(&format!("ws://127.0.0.1:{port}/"), Outgoing::Ping, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, NetError::ConnectionTimedOut));
}

#[tokio::test]
async fn test_closed_port_is_generic_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let url = Url::parse(&format!("ws://127.0.0.1:{port}/")).unwrap();
    let err = WsProbe::new()
        .measure(request(url.as_str(), Outgoing::Ping, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, NetError::ConnectionFailedTo { port: p, .. } if p == port));
    assert!(matches!(classify(err, &url), ConnectionError::Generic { .. }));
}
