//! Runtime configuration: built-in defaults, overridden by an optional
//! JSON file at `<config dir>/iss-flyover/config.json`, overridden by CLI flags.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_IP_URL: &str = "https://api.ipify.org?format=json";
pub const DEFAULT_GEO_URL: &str = "https://ipvigilante.com";
pub const DEFAULT_FLYOVER_URL: &str = "http://api.open-notify.org/iss-pass.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where the three lookups are sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub ip_url: String,
    /// The IP is appended as a path segment.
    pub geo_url: String,
    /// `lat`, `lon` and optionally `n` are appended as query parameters.
    pub flyover_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            ip_url: DEFAULT_IP_URL.into(),
            geo_url: DEFAULT_GEO_URL.into(),
            flyover_url: DEFAULT_FLYOVER_URL.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoints: Endpoints,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Number of passes to request; the service default when unset.
    pub passes: Option<u32>,
    /// IANA zone used when printing rise times.
    pub tz: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("iss-flyover/{}", env!("CARGO_PKG_VERSION")),
            passes: None,
            tz: "UTC".into(),
        }
    }
}

/// Values given on the command line; `None` leaves the loaded value alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub ip_url: Option<String>,
    pub geo_url: Option<String>,
    pub flyover_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub passes: Option<u32>,
    pub tz: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unknown timezone '{0}'. Use IANA format (e.g. Europe/Oslo).")]
    Timezone(String),
}

impl Config {
    /// `~/.config/iss-flyover/config.json` on Linux, platform equivalent elsewhere.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("iss-flyover")
            .join("config.json")
    }

    /// Load from `path` if given (must exist), else from the default path
    /// if it exists, else built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::read_file(p),
            None => {
                let p = Self::default_path();
                if p.exists() {
                    Self::read_file(&p)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply(mut self, o: Overrides) -> Self {
        if let Some(v) = o.ip_url {
            self.endpoints.ip_url = v;
        }
        if let Some(v) = o.geo_url {
            self.endpoints.geo_url = v;
        }
        if let Some(v) = o.flyover_url {
            self.endpoints.flyover_url = v;
        }
        if let Some(v) = o.timeout_secs {
            self.timeout_secs = v;
        }
        if o.passes.is_some() {
            self.passes = o.passes;
        }
        if let Some(v) = o.tz {
            self.tz = v;
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        self.tz
            .parse()
            .map_err(|_| ConfigError::Timezone(self.tz.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, json: &str) -> PathBuf {
        let path = dir.path().join("config.json");
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let c = Config::default();
        assert_eq!(c.endpoints.ip_url, DEFAULT_IP_URL);
        assert_eq!(c.endpoints.flyover_url, DEFAULT_FLYOVER_URL);
        assert_eq!(c.timeout(), Duration::from_secs(10));
        assert_eq!(c.passes, None);
        assert_eq!(c.timezone().unwrap(), chrono_tz::UTC);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"{ "endpoints": { "geo_url": "https://geo.example" }, "passes": 3 }"#,
        );
        let c = Config::load(Some(&path)).unwrap();
        assert_eq!(c.endpoints.geo_url, "https://geo.example");
        assert_eq!(c.endpoints.ip_url, DEFAULT_IP_URL);
        assert_eq!(c.passes, Some(3));
        assert_eq!(c.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.json");
        assert!(matches!(Config::load(Some(&path)), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_bad_json_is_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "{ not json");
        assert!(matches!(Config::load(Some(&path)), Err(ConfigError::Json { .. })));
    }

    #[test]
    fn test_overrides_win() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{ "timeout_secs": 30, "tz": "Europe/Oslo" }"#);
        let c = Config::load(Some(&path))
            .unwrap()
            .apply(Overrides {
                flyover_url: Some("http://iss.example".into()),
                tz: Some("America/New_York".into()),
                ..Default::default()
            });
        assert_eq!(c.endpoints.flyover_url, "http://iss.example");
        assert_eq!(c.timeout_secs, 30);
        assert_eq!(c.timezone().unwrap(), chrono_tz::America::New_York);
    }

    #[test]
    fn test_unknown_timezone() {
        let c = Config::default().apply(Overrides {
            tz: Some("Mars/Olympus".into()),
            ..Default::default()
        });
        assert!(matches!(c.timezone(), Err(ConfigError::Timezone(_))));
    }
}
