//! Pipeline and provider configuration.
//!
//! # Design
//!
//! Every recognised option is a named field with a default, so an empty JSON
//! object `{}` deserialises to [`IsoConfig::default`].  Callers layer their
//! sources (request body, CLI flags, query string) onto one value and call
//! [`IsoConfig::validate`] once before handing it to the pipeline.
//!
//! | Field           | Default | Meaning                                        |
//! |-----------------|---------|------------------------------------------------|
//! | `resolution`    | 0.2     | Sample-grid spacing, km                         |
//! | `hex_size`      | 0.5     | Hex cell side, km; 0 disables hex-fitting       |
//! | `profile`       | car     | Travel mode passed to the router                |
//! | `provider`      | osrm    | Which router backs the distance queries         |
//! | `deintersect`   | false   | Turn nested rings into disjoint bands           |
//! | `chunk_size`    | 1000    | Router queries in flight per batch              |
//! | `max_attempts`  | 10      | Tracing attempts before giving up on kinks      |
//! | `growth_factor` | 2.0     | Resolution multiplier applied after a kink      |

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, RoutingProfile};

pub const DEFAULT_RESOLUTION_KM: f64 = 0.2;
pub const DEFAULT_HEX_SIZE_KM: f64 = 0.5;
pub const DEFAULT_CHUNK_SIZE: usize = 1_000;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;
pub const DEFAULT_GROWTH_FACTOR: f64 = 2.0;

pub const DEFAULT_OSRM_ENDPOINT: &str = "http://127.0.0.1:5000/route/v1/";
pub const DEFAULT_VALHALLA_ENDPOINT: &str = "http://127.0.0.1:8002/route";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ── ProviderKind ──────────────────────────────────────────────────────────────

/// Which routing backend answers distance queries.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// In-process Dijkstra over a road network loaded from OSM.
    Embedded,
    /// OSRM HTTP service.
    #[default]
    Osrm,
    /// Valhalla HTTP service.
    Valhalla,
}

impl ProviderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Embedded => "embedded",
            ProviderKind::Osrm     => "osrm",
            ProviderKind::Valhalla => "valhalla",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "embedded" => Ok(ProviderKind::Embedded),
            "osrm"     => Ok(ProviderKind::Osrm),
            "valhalla" => Ok(ProviderKind::Valhalla),
            other => Err(CoreError::Validation(format!("invalid provider ({other})"))),
        }
    }
}

// ── IsoConfig ─────────────────────────────────────────────────────────────────

/// Options for one isodistance computation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IsoConfig {
    /// Sample-grid spacing in km.  Must be `> 0`.
    pub resolution: f64,

    /// Hex cell side in km.  `0` returns the clipped hull without fitting.
    pub hex_size: f64,

    pub profile: RoutingProfile,

    pub provider: ProviderKind,

    /// Convert nested rings into pairwise-disjoint bands.
    pub deintersect: bool,

    /// Router queries issued concurrently per batch.  Must be `> 0`.
    pub chunk_size: usize,

    /// Total tracing attempts (the first one included).  Must be `> 0`.
    pub max_attempts: u32,

    /// Resolution multiplier applied after a kinked attempt.  Must be `> 1`.
    pub growth_factor: f64,
}

impl Default for IsoConfig {
    fn default() -> Self {
        Self {
            resolution:    DEFAULT_RESOLUTION_KM,
            hex_size:      DEFAULT_HEX_SIZE_KM,
            profile:       RoutingProfile::default(),
            provider:      ProviderKind::default(),
            deintersect:   false,
            chunk_size:    DEFAULT_CHUNK_SIZE,
            max_attempts:  DEFAULT_MAX_ATTEMPTS,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        }
    }
}

impl IsoConfig {
    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(CoreError::validation(format!(
                "resolution must be greater than 0 (got {})",
                self.resolution
            )));
        }
        if !(self.hex_size.is_finite() && self.hex_size >= 0.0) {
            return Err(CoreError::validation(format!(
                "hex size must be 0 or greater (got {})",
                self.hex_size
            )));
        }
        if self.chunk_size == 0 {
            return Err(CoreError::validation("chunk size must be greater than 0"));
        }
        if self.max_attempts == 0 {
            return Err(CoreError::validation("max attempts must be greater than 0"));
        }
        if !(self.growth_factor.is_finite() && self.growth_factor > 1.0) {
            return Err(CoreError::validation(format!(
                "growth factor must be greater than 1 (got {})",
                self.growth_factor
            )));
        }
        Ok(())
    }

    /// `true` when traced hulls are snapped onto a hex tessellation.
    #[inline]
    pub fn hex_fitting(&self) -> bool {
        self.hex_size > 0.0
    }
}

// ── ProviderConfig ────────────────────────────────────────────────────────────

/// Where each routing backend lives.  Only the entry matching the selected
/// [`ProviderKind`] is consulted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderConfig {
    /// Base URL; `{profile}/{lon},{lat};{lon},{lat}` is appended.
    pub osrm_endpoint: String,

    /// Full URL of the Valhalla `/route` action.
    pub valhalla_endpoint: String,

    /// OSM PBF extract for the embedded router.
    pub network_path: Option<PathBuf>,

    /// Per-request HTTP timeout.
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            osrm_endpoint:     DEFAULT_OSRM_ENDPOINT.to_string(),
            valhalla_endpoint: DEFAULT_VALHALLA_ENDPOINT.to_string(),
            network_path:      None,
            timeout_secs:      DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ProviderConfig {
    /// Override the endpoint of `kind`.  Has no effect for
    /// [`ProviderKind::Embedded`], which reads `network_path` instead.
    pub fn set_endpoint(&mut self, kind: ProviderKind, endpoint: impl Into<String>) {
        match kind {
            ProviderKind::Osrm     => self.osrm_endpoint = endpoint.into(),
            ProviderKind::Valhalla => self.valhalla_endpoint = endpoint.into(),
            ProviderKind::Embedded => {}
        }
    }
}
