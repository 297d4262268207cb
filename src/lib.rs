//! Upcoming ISS passes over the caller's current location.
//!
//! The lookup chain lives in [`flyover`]; [`config`], [`render`] and
//! [`server`] wrap it for the command line and the HTTP API.

pub mod config;
pub mod flyover;
pub mod logging;
pub mod render;
pub mod server;
