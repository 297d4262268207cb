//! Pass resolver — chains the three lookups.
//!
//! Full flow:  IP echo → geolocation → pass prediction
//! The first failing lookup ends the chain; its error is returned untouched.

use std::sync::Arc;

use tracing::{debug, info};

use super::providers;
use super::transport::{Transport, UreqTransport};
use super::types::{Coordinates, FlyoverWindow, IpAddress, LookupError};
use crate::config::{Config, Endpoints};

/// Where the caller is, as far as the lookups could tell.
#[derive(Debug, Clone, PartialEq)]
pub struct Located {
    pub ip: IpAddress,
    pub coords: Coordinates,
}

/// Holds no per-call state, so repeated calls are independent.
#[derive(Clone)]
pub struct PassResolver {
    transport: Arc<dyn Transport>,
    endpoints: Endpoints,
    passes: Option<u32>,
}

impl PassResolver {
    /// Resolver over the real network, configured from `config`.
    pub fn from_config(config: &Config) -> Self {
        let transport = UreqTransport::new(config.timeout(), &config.user_agent);
        Self::with_transport(Arc::new(transport), config.endpoints.clone())
            .with_passes(config.passes)
    }

    pub fn with_transport(transport: Arc<dyn Transport>, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints,
            passes: None,
        }
    }

    pub fn with_passes(mut self, passes: Option<u32>) -> Self {
        self.passes = passes;
        self
    }

    pub fn fetch_my_ip(&self) -> Result<IpAddress, LookupError> {
        providers::fetch_my_ip(self.transport.as_ref(), &self.endpoints.ip_url)
    }

    pub fn fetch_coords_by_ip(&self, ip: &str) -> Result<Coordinates, LookupError> {
        providers::fetch_coords_by_ip(self.transport.as_ref(), &self.endpoints.geo_url, ip)
    }

    pub fn fetch_flyover_times(&self, coords: Coordinates) -> Result<Vec<FlyoverWindow>, LookupError> {
        providers::fetch_flyover_times(
            self.transport.as_ref(),
            &self.endpoints.flyover_url,
            coords,
            self.passes,
        )
    }

    /// Steps 1 and 2.
    pub fn locate(&self) -> Result<Located, LookupError> {
        let ip = self.fetch_my_ip()?;
        debug!(%ip, "resolved public IP");
        let coords = self.fetch_coords_by_ip(&ip)?;
        debug!(%coords, "resolved coordinates");
        Ok(Located { ip, coords })
    }

    /// Steps 2 and 3, for a known IP.
    pub fn passes_for_ip(&self, ip: &str) -> Result<Vec<FlyoverWindow>, LookupError> {
        let coords = self.fetch_coords_by_ip(ip)?;
        debug!(%coords, "resolved coordinates");
        self.passes_for_coords(coords)
    }

    /// Step 3 only.
    pub fn passes_for_coords(&self, coords: Coordinates) -> Result<Vec<FlyoverWindow>, LookupError> {
        let passes = self.fetch_flyover_times(coords)?;
        info!(count = passes.len(), %coords, "fetched upcoming passes");
        Ok(passes)
    }

    /// The whole chain: upcoming passes over wherever this machine appears to be.
    pub fn next_passes_for_my_location(&self) -> Result<Vec<FlyoverWindow>, LookupError> {
        let located = self.locate()?;
        self.passes_for_coords(located.coords)
    }
}
