//! Travel profile enum passed opaquely to every router.
//!
//! All variants are always compiled in.  Routers that cannot serve a profile
//! answer with an `InvalidProfile` error per query rather than refusing to
//! start, so a bad profile degrades to "nothing reachable" like any other
//! per-point routing failure.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// The travel mode a distance is measured for.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingProfile {
    /// Private car (default).
    #[default]
    #[serde(alias = "auto")]
    Car,
    /// Motorbike; follows car access rules where the router has no own model.
    #[serde(alias = "motorcycle")]
    Motorbike,
    #[serde(alias = "bike")]
    Bicycle,
    /// On foot.
    #[serde(alias = "foot", alias = "walk")]
    Pedestrian,
}

impl RoutingProfile {
    pub const ALL: [RoutingProfile; 4] = [
        RoutingProfile::Car,
        RoutingProfile::Motorbike,
        RoutingProfile::Bicycle,
        RoutingProfile::Pedestrian,
    ];

    /// Canonical lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            RoutingProfile::Car        => "car",
            RoutingProfile::Motorbike  => "motorbike",
            RoutingProfile::Bicycle    => "bicycle",
            RoutingProfile::Pedestrian => "pedestrian",
        }
    }

    /// `true` for profiles that use the motor-vehicle road network.
    #[inline]
    pub fn is_motorised(self) -> bool {
        matches!(self, RoutingProfile::Car | RoutingProfile::Motorbike)
    }
}

impl fmt::Display for RoutingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoutingProfile {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "car" | "auto"                    => Ok(RoutingProfile::Car),
            "motorbike" | "motorcycle"        => Ok(RoutingProfile::Motorbike),
            "bicycle" | "bike"                => Ok(RoutingProfile::Bicycle),
            "pedestrian" | "foot" | "walk"    => Ok(RoutingProfile::Pedestrian),
            other => Err(CoreError::Parse(format!(
                "unknown routing profile {other:?}: expected car, motorbike, bicycle or pedestrian"
            ))),
        }
    }
}
