//! Name resolution for the DNS phase.
//!
//! [`HickoryResolver`] is the default; anything implementing [`Resolve`] can
//! replace it.
//!
//! ```rust,ignore
//! use wsstat::dns::{HickoryResolver, Name, Resolve};
//!
//! let addrs = HickoryResolver::new().resolve(Name::new("example.org")).await?;
//! ```

mod hickory;
mod resolve;

pub use hickory::HickoryResolver;
pub use resolve::{Addrs, Name, Resolve, Resolving};
