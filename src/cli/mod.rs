//! The command-line core: turn arguments into a validated [`Config`], probe
//! the target once, and print the report.
//!
//! Input problems ([`InputError`]) are detected before any network activity.
//! Probe failures are classified into a [`ConnectionError`].

pub mod args;
pub mod classify;
pub mod config;
pub mod error;
pub mod headers;
pub mod invoker;
pub mod mode;
pub mod run;
pub mod uri;

pub use args::Cli;
pub use classify::classify;
pub use config::{Config, Verbosity};
pub use error::{AppError, ConnectionError, InputError};
pub use headers::parse_headers;
pub use invoker::{invoke, probe_request};
pub use mode::MeasurementMode;
pub use run::{execute, run, write_report};
pub use uri::resolve_target;
