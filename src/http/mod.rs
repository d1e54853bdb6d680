//! HTTP header handling for the WebSocket upgrade request.

pub mod headerset;

pub use headerset::{HeaderSet, InvalidHeader};
