//! WebSocket client support.
//!
//! Upgrades an already connected [`SocketType`](crate::socket::client::SocketType)
//! with tokio-tungstenite, so the handshake is timed on its own.
//!
//! # Example
//! ```ignore
//! use wsstat::ws::WebSocket;
//!
//! let upgraded = WebSocket::upgrade(&url, socket, &headers).await?;
//! let mut ws = upgraded.socket;
//! ws.send_text("Hello").await?;
//! let reply = ws.recv_data().await?;
//! ```

mod connection;
mod message;

pub use connection::{Upgraded, WebSocket};
pub use message::{CloseCode, CloseFrame, Message};
