use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::flyover::{Coordinates, FlyoverWindow, IpAddress, LookupError, PassResolver, Step};
use crate::render::format_rise;

use super::state::AppState;

const MAX_PASSES: u32 = 100;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    step: Option<Step>,
}

#[derive(Debug)]
pub struct ApiError {
    pub(super) status: StatusCode,
    pub(super) message: String,
    pub(super) step: Option<Step>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.message,
            code: self.status.as_u16(),
            step: self.step,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Upstream lookups failed; we are a gateway for them.
impl From<LookupError> for ApiError {
    fn from(e: LookupError) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            step: Some(e.step()),
            message: e.to_string(),
        }
    }
}

fn bad_request(msg: impl Into<String>) -> ApiError {
    ApiError {
        status: StatusCode::BAD_REQUEST,
        message: msg.into(),
        step: None,
    }
}

// ─── GET /api/health ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ─── GET /api/passes ─────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct PassesQuery {
    pub ip: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub n: Option<u32>,
    pub tz: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PassEntry {
    pub risetime: i64,
    pub duration: i64,
    pub rise_local: String,
}

#[derive(Debug, Serialize)]
pub struct PassesResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<IpAddress>,
    pub coords: Coordinates,
    pub tz: String,
    pub passes: Vec<PassEntry>,
}

/// How much of the chain a request needs.
enum Start {
    MyLocation,
    Ip(String),
    Coords(Coordinates),
}

fn plan(params: &PassesQuery) -> Result<Start, ApiError> {
    match (params.lat, params.lon) {
        (Some(lat), Some(lon)) => {
            let coords = Coordinates::new(lat, lon);
            if !coords.in_range() {
                return Err(bad_request("Invalid coordinates. Lat: -90..90, Lon: -180..180"));
            }
            Ok(Start::Coords(coords))
        }
        (Some(_), None) | (None, Some(_)) => Err(bad_request("Provide both 'lat' and 'lon'")),
        (None, None) => match params.ip.as_deref().map(str::trim) {
            Some("") => Err(bad_request("Empty 'ip' parameter")),
            Some(ip) => Ok(Start::Ip(ip.to_string())),
            None => Ok(Start::MyLocation),
        },
    }
}

type Lookup = (Option<IpAddress>, Coordinates, Vec<FlyoverWindow>);

fn run(resolver: &PassResolver, start: Start) -> Result<Lookup, LookupError> {
    let (ip, coords) = match start {
        Start::MyLocation => {
            let located = resolver.locate()?;
            (Some(located.ip), located.coords)
        }
        Start::Ip(ip) => {
            let coords = resolver.fetch_coords_by_ip(&ip)?;
            (Some(ip), coords)
        }
        Start::Coords(coords) => (None, coords),
    };
    let passes = resolver.passes_for_coords(coords)?;
    Ok((ip, coords, passes))
}

pub async fn passes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PassesQuery>,
) -> Result<Json<PassesResponse>, ApiError> {
    let started = Instant::now();

    let tz_name = params.tz.clone().unwrap_or_else(|| state.default_tz.clone());
    let tz: Tz = tz_name
        .parse()
        .map_err(|_| bad_request(format!("Unknown timezone '{}'", tz_name)))?;

    let mut resolver = state.resolver.clone();
    if let Some(n) = params.n {
        if !(1..=MAX_PASSES).contains(&n) {
            return Err(bad_request(format!("'n' must be 1-{}", MAX_PASSES)));
        }
        resolver = resolver.with_passes(Some(n));
    }

    let start = plan(&params)?;

    // ureq blocks; keep it off the async workers.
    let (ip, coords, windows) = tokio::task::spawn_blocking(move || run(&resolver, start))
        .await
        .map_err(|e| ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Lookup task failed: {}", e),
            step: None,
        })?
        .map_err(|e| {
            warn!(step = ?e.step(), "GET /api/passes failed: {}", e);
            ApiError::from(e)
        })?;

    info!(
        %coords,
        count = windows.len(),
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "GET /api/passes"
    );

    Ok(Json(PassesResponse {
        ip,
        coords,
        tz: tz_name,
        passes: windows
            .iter()
            .map(|w| PassEntry {
                risetime: w.risetime,
                duration: w.duration,
                rise_local: format_rise(w.risetime, tz),
            })
            .collect(),
    }))
}
