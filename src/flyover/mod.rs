//! Flyover lookup subsystem.
//!
//! Resolves the caller's public IP, geolocates it, and asks the pass
//! prediction service for upcoming ISS passes over that position.

pub mod providers;
pub mod resolver;
#[cfg(test)]
pub(crate) mod stub;
pub mod transport;
pub mod types;

pub use resolver::{Located, PassResolver};
pub use transport::{HttpResponse, Transport, TransportError, UreqTransport};
pub use types::{Coordinates, FlyoverWindow, IpAddress, LookupError, Step};
