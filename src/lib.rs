//! # wsstat
//!
//! Measure and visualize the latency of establishing and using a WebSocket
//! connection, phase by phase: DNS lookup, TCP connect, TLS handshake,
//! WebSocket upgrade and message round trip.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wsstat::cli::{run, Config, MeasurementMode};
//! use wsstat::stat::WsProbe;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let target = wsstat::cli::resolve_target("echo.websocket.org", false).unwrap();
//!     let config = Config::new(target, MeasurementMode::Ping);
//!     run(&config, &WsProbe::new(), &mut std::io::stdout()).await.unwrap();
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Transport error definitions
//! - [`dns`] - Pluggable name resolution
//! - [`socket`] - TCP and TLS connection setup
//! - [`http`] - Header sets for the upgrade handshake
//! - [`ws`] - WebSocket upgrade and frames
//! - [`stat`] - The probe and what it measures
//! - [`cli`] - Argument validation, mode selection and orchestration
//! - [`report`] - Terminal rendering of details, timings and responses

pub mod base;
pub mod cli;
pub mod dns;
pub mod http;
pub mod report;
pub mod socket;
pub mod stat;
pub mod ws;
