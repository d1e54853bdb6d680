//! Transport errors.
//!
//! [`NetError`](neterror::NetError) is what every network step returns.

pub mod neterror;
