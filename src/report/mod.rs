//! Terminal output: the request details block, the timing diagram and the
//! response line.

pub mod color;
pub mod details;
pub mod response;
pub mod timing;

pub use color::Palette;
pub use response::{format_response, write_response, ResponseStyle};
pub use timing::{Labels, RenderedPhase, TimingReport};
