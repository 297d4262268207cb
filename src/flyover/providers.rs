//! The three lookups: IP echo, IP geolocation, ISS pass prediction.
//!
//! Each one performs exactly one GET and maps the outcome onto
//! [`LookupError`] the same way: transport failure, then status, then
//! empty body, then JSON shape.

use super::transport::Transport;
use super::types::{Coordinates, FlyoverWindow, IpAddress, LookupError, Step};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

// ─── Shared request handling ────────────────────────────────────

fn fetch_body(transport: &dyn Transport, step: Step, url: &str) -> Result<String, LookupError> {
    debug!(%url, "{}", step);

    let response = transport.get(url).map_err(|e| LookupError::Network {
        step,
        message: e.to_string(),
    })?;

    if response.status != 200 {
        return Err(LookupError::HttpStatus {
            step,
            status: response.status,
            body: response.body,
        });
    }

    if response.body.trim().is_empty() {
        return Err(LookupError::EmptyBody { step });
    }

    Ok(response.body)
}

fn parse_body<T: DeserializeOwned>(step: Step, body: &str) -> Result<T, LookupError> {
    serde_json::from_str(body).map_err(|e| LookupError::Parse {
        step,
        message: e.to_string(),
    })
}

// ─── IP echo ────────────────────────────────────────────────────

#[derive(Deserialize)]
struct IpResult {
    ip: String,
}

/// Ask the IP-echo service for the caller's public address.
pub fn fetch_my_ip(transport: &dyn Transport, url: &str) -> Result<IpAddress, LookupError> {
    let body = fetch_body(transport, Step::FetchIp, url)?;
    let r: IpResult = parse_body(Step::FetchIp, &body)?;
    Ok(r.ip)
}

// ─── IP geolocation ─────────────────────────────────────────────

/// Some geolocation services send degrees as strings ("40.7128").
#[derive(Deserialize)]
#[serde(untagged)]
enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    fn value(self, field: &str) -> Result<f64, LookupError> {
        match self {
            Self::Number(v) => Ok(v),
            Self::Text(s) => s.trim().parse().map_err(|_| LookupError::Parse {
                step: Step::FetchCoords,
                message: format!("{} is not a number: '{}'", field, s),
            }),
        }
    }
}

#[derive(Deserialize)]
struct GeoData {
    latitude: Degrees,
    longitude: Degrees,
}

#[derive(Deserialize)]
struct GeoResult {
    data: GeoData,
}

pub fn coords_url(root: &str, ip: &str) -> String {
    format!("{}/{}", root.trim_end_matches('/'), ip)
}

/// Geolocate an IP. The IP is used as-is in the path.
pub fn fetch_coords_by_ip(
    transport: &dyn Transport,
    root: &str,
    ip: &str,
) -> Result<Coordinates, LookupError> {
    let url = coords_url(root, ip);
    let body = fetch_body(transport, Step::FetchCoords, &url)?;
    let r: GeoResult = parse_body(Step::FetchCoords, &body)?;
    Ok(Coordinates {
        latitude: r.data.latitude.value("latitude")?,
        longitude: r.data.longitude.value("longitude")?,
    })
}

// ─── ISS passes ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct FlyoverResult {
    response: Vec<FlyoverWindow>,
}

pub fn flyover_url(root: &str, coords: Coordinates, passes: Option<u32>) -> String {
    let sep = if root.contains('?') { '&' } else { '?' };
    let mut url = format!(
        "{}{}lat={}&lon={}",
        root, sep, coords.latitude, coords.longitude
    );
    if let Some(n) = passes {
        url.push_str(&format!("&n={}", n));
    }
    url
}

/// Upcoming passes over `coords`, in the order the service lists them.
pub fn fetch_flyover_times(
    transport: &dyn Transport,
    root: &str,
    coords: Coordinates,
    passes: Option<u32>,
) -> Result<Vec<FlyoverWindow>, LookupError> {
    let url = flyover_url(root, coords, passes);
    let body = fetch_body(transport, Step::FetchFlyovers, &url)?;
    let r: FlyoverResult = parse_body(Step::FetchFlyovers, &body)?;
    Ok(r.response)
}
