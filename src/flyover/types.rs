//! Core types for the flyover lookup chain.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Caller's public IP as echoed back by the IP service. Not validated.
pub type IpAddress = String;

/// Geographic position resolved from an IP.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// True when both values are inside the usual lat/lon ranges.
    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.latitude >= 0.0 { 'N' } else { 'S' };
        let ew = if self.longitude >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "{:.4}\u{00B0} {}, {:.4}\u{00B0} {}",
            self.latitude.abs(),
            ns,
            self.longitude.abs(),
            ew
        )
    }
}

/// One predicted pass: when the station rises and how long it stays visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlyoverWindow {
    /// Epoch seconds.
    pub risetime: i64,
    /// Seconds.
    pub duration: i64,
}

/// Which lookup of the chain an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    FetchIp,
    FetchCoords,
    FetchFlyovers,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchIp => write!(f, "fetching IP"),
            Self::FetchCoords => write!(f, "fetching coordinates for IP"),
            Self::FetchFlyovers => write!(f, "fetching fly over times"),
        }
    }
}

/// Lookup errors. None of them are recovered from; the first one ends the chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Network error when {step}: {message}")]
    Network { step: Step, message: String },

    #[error("Status Code {status} when {step}. Response: {body}")]
    HttpStatus { step: Step, status: u16, body: String },

    #[error("There was no body when {step}")]
    EmptyBody { step: Step },

    #[error("Invalid response when {step}: {message}")]
    Parse { step: Step, message: String },
}

impl LookupError {
    /// The lookup that failed.
    pub fn step(&self) -> Step {
        match self {
            Self::Network { step, .. }
            | Self::HttpStatus { step, .. }
            | Self::EmptyBody { step }
            | Self::Parse { step, .. } => *step,
        }
    }
}
