//! WebSocket upgrade and frame exchange over an already connected socket.
//!
//! The socket comes from [`ConnectJob`](crate::socket::connectjob::ConnectJob)
//! so that DNS, TCP and TLS are timed separately from the upgrade itself.

use super::message::{CloseCode, CloseFrame, Message};
use crate::base::neterror::NetError;
use crate::http::HeaderSet;
use crate::socket::client::SocketType;
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::{client_async, tungstenite, WebSocketStream};
use url::Url;

/// An upgraded WebSocket connection.
pub struct WebSocket {
    stream: WebSocketStream<SocketType>,
}

/// The result of a successful upgrade, with both sides of the handshake.
pub struct Upgraded {
    pub socket: WebSocket,
    /// Headers exactly as sent, including the ones tungstenite generates.
    pub request_headers: HeaderSet,
    pub response_headers: HeaderSet,
}

impl WebSocket {
    /// Perform the HTTP/1.1 upgrade on `socket`, sending `headers` on top of
    /// the mandatory handshake headers.
    pub async fn upgrade(
        url: &Url,
        socket: SocketType,
        headers: &HeaderSet,
    ) -> Result<Upgraded, NetError> {
        let mut request = url
            .as_str()
            .into_client_request()
            .map_err(|_| NetError::InvalidUrl)?;
        headers.apply_to(request.headers_mut());
        let request_headers = HeaderSet::from(request.headers());

        let (stream, response) = client_async(request, socket).await.map_err(|e| {
            tracing::debug!("WebSocket upgrade error: {:?}", e);
            handshake_error(e)
        })?;

        Ok(Upgraded {
            socket: Self { stream },
            request_headers,
            response_headers: HeaderSet::from(response.headers()),
        })
    }

    /// Send a message.
    pub async fn send(&mut self, msg: Message) -> Result<(), NetError> {
        self.stream.send(message_to_tungstenite(msg)).await.map_err(|e| {
            tracing::debug!("WebSocket send error: {:?}", e);
            NetError::ConnectionClosed
        })
    }

    /// Send a text message.
    pub async fn send_text(&mut self, text: impl Into<String>) -> Result<(), NetError> {
        self.send(Message::Text(text.into())).await
    }

    /// Ping the server.
    pub async fn ping(&mut self, data: Vec<u8>) -> Result<(), NetError> {
        self.send(Message::Ping(data)).await
    }

    /// Receive a message.
    ///
    /// Returns `None` if the connection is closed.
    pub async fn recv(&mut self) -> Result<Option<Message>, NetError> {
        match self.stream.next().await {
            Some(Ok(msg)) => Ok(Some(tungstenite_to_message(msg))),
            Some(Err(e)) => {
                tracing::debug!("WebSocket recv error: {:?}", e);
                Err(NetError::ConnectionClosed)
            }
            None => Ok(None),
        }
    }

    /// Wait for the next text or binary frame, skipping control frames.
    pub async fn recv_data(&mut self) -> Result<Message, NetError> {
        loop {
            match self.recv().await? {
                Some(msg @ (Message::Text(_) | Message::Binary(_))) => return Ok(msg),
                Some(Message::Close(frame)) => {
                    tracing::debug!(?frame, "server closed before replying");
                    return Err(NetError::ConnectionClosed);
                }
                Some(_) => continue,
                None => return Err(NetError::EmptyResponse),
            }
        }
    }

    /// Wait for the pong answering a ping, ignoring anything else.
    pub async fn recv_pong(&mut self) -> Result<(), NetError> {
        loop {
            match self.recv().await? {
                Some(Message::Pong(_)) => return Ok(()),
                Some(Message::Close(_)) => return Err(NetError::ConnectionClosed),
                Some(_) => continue,
                None => return Err(NetError::EmptyResponse),
            }
        }
    }

    /// Close the connection normally.
    pub async fn close(&mut self) -> Result<(), NetError> {
        let frame = CloseFrame::new(CloseCode::NORMAL, "");
        self.send(Message::Close(Some(frame))).await
    }
}

fn handshake_error(err: tungstenite::Error) -> NetError {
    match err {
        tungstenite::Error::Io(e) => NetError::from_io(&e),
        tungstenite::Error::Http(response) => NetError::WsHandshakeFailed {
            reason: format!("server answered {}", response.status()),
        },
        other => NetError::WsHandshakeFailed {
            reason: other.to_string(),
        },
    }
}

/// Convert our Message to tungstenite Message.
fn message_to_tungstenite(msg: Message) -> tungstenite::Message {
    match msg {
        Message::Text(s) => tungstenite::Message::Text(s),
        Message::Binary(b) => tungstenite::Message::Binary(b.to_vec()),
        Message::Ping(d) => tungstenite::Message::Ping(d),
        Message::Pong(d) => tungstenite::Message::Pong(d),
        Message::Close(frame) => {
            let tung_frame = frame.map(|f| tungstenite::protocol::CloseFrame {
                code: tungstenite::protocol::frame::coding::CloseCode::from(f.code.0),
                reason: f.reason.into(),
            });
            tungstenite::Message::Close(tung_frame)
        }
    }
}

/// Convert tungstenite Message to our Message.
fn tungstenite_to_message(msg: tungstenite::Message) -> Message {
    match msg {
        tungstenite::Message::Text(s) => Message::Text(s.to_string()),
        tungstenite::Message::Binary(b) => Message::Binary(Bytes::from(b)),
        tungstenite::Message::Ping(d) => Message::Ping(d.to_vec()),
        tungstenite::Message::Pong(d) => Message::Pong(d.to_vec()),
        tungstenite::Message::Close(frame) => {
            let our_frame = frame.map(|f| CloseFrame {
                code: CloseCode(f.code.into()),
                reason: f.reason.to_string(),
            });
            Message::Close(our_frame)
        }
        tungstenite::Message::Frame(_) => Message::Binary(Bytes::new()),
    }
}
