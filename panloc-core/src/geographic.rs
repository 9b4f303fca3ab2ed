use derive_more::{From, Into};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A geographic coordinate in degrees.
///
/// Values come from sensors or panorama metadata and are treated as immutable
/// once obtained. No range validation is performed; out-of-range latitudes or
/// longitudes produce whatever the geodesic primitive produces for them.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct GeographicPoint {
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees, positive east.
    pub longitude: f64,
}

impl GeographicPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A metric displacement on the local tangent plane relative to some
/// reference [`GeographicPoint`].
///
/// Offsets are derived values, recomputed per solve, and never stored
/// long-term. Which reference they are relative to is the caller's
/// bookkeeping, as is the sign convention: the documented per-axis conversion
/// produces unsigned components (see the geodesy crate).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct LocalOffset {
    /// Displacement along the east axis in meters.
    pub east: f64,
    /// Displacement along the north axis in meters.
    pub north: f64,
}

impl LocalOffset {
    pub fn new(east: f64, north: f64) -> Self {
        Self { east, north }
    }

    /// Euclidean length of the offset in meters.
    pub fn magnitude(self) -> f64 {
        self.east.hypot(self.north)
    }

    /// The true compass bearing of this offset in degrees clockwise from
    /// north, quadrant-correct via `atan2`.
    pub fn compass_bearing(self) -> f64 {
        self.east.atan2(self.north).to_degrees()
    }
}
