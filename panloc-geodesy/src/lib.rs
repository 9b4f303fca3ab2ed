//! Conversions between geographic coordinates and local tangent-plane
//! offsets, plus the geodesic destination problem, on the WGS-84 ellipsoid.
//!
//! Every distance here is a true geodesic distance (Karney's algorithms via
//! `geographiclib`), not a flat-Earth or great-circle-chord approximation.
//! The per-axis offset decomposition is only meaningful over the short ranges
//! where the tangent plane is a valid approximation.

use std::sync::OnceLock;

use geographiclib_rs::{DirectGeodesic, Geodesic, InverseGeodesic};
use panloc_core::{GeographicPoint, LocalOffset};

fn wgs84() -> &'static Geodesic {
    static WGS84: OnceLock<Geodesic> = OnceLock::new();
    WGS84.get_or_init(Geodesic::wgs84)
}

/// Geodesic distance between two geographic points in meters.
pub fn geodesic_distance(a: GeographicPoint, b: GeographicPoint) -> f64 {
    wgs84().inverse(a.latitude, a.longitude, b.latitude, b.longitude)
}

/// The east/north displacement of `target` relative to `reference`, with each
/// axis measured independently as a geodesic distance.
///
/// The north component is the distance from `reference` to
/// `(target.latitude, reference.longitude)` and the east component the
/// distance to `(reference.latitude, target.longitude)`. Both components are
/// **unsigned**: a target south-west of the reference produces the same
/// offset as its mirror to the north-east, and callers must track
/// sign/quadrant themselves. Use [`to_local_offset_signed`] when a
/// quadrant-correct offset is wanted.
pub fn to_local_offset(reference: GeographicPoint, target: GeographicPoint) -> LocalOffset {
    let north = geodesic_distance(
        reference,
        GeographicPoint::new(target.latitude, reference.longitude),
    );
    let east = geodesic_distance(
        reference,
        GeographicPoint::new(reference.latitude, target.longitude),
    );
    LocalOffset::new(east, north)
}

/// The quadrant-correct variant of [`to_local_offset`]: the same per-axis
/// geodesic distances, with the sign of each component taken from the
/// corresponding coordinate delta.
pub fn to_local_offset_signed(reference: GeographicPoint, target: GeographicPoint) -> LocalOffset {
    let unsigned = to_local_offset(reference, target);
    LocalOffset::new(
        unsigned
            .east
            .copysign(target.longitude - reference.longitude),
        unsigned.north.copysign(target.latitude - reference.latitude),
    )
}

/// The point reached by travelling `meters` along the geodesic leaving
/// `origin` at `bearing` degrees clockwise from north.
pub fn destination(origin: GeographicPoint, meters: f64, bearing: f64) -> GeographicPoint {
    let (latitude, longitude, _azimuth): (f64, f64, f64) =
        wgs84().direct(origin.latitude, origin.longitude, bearing, meters);
    GeographicPoint::new(latitude, longitude)
}

/// Tangent-plane offsets of every location relative to the first one.
///
/// The first element of the result is always the zero offset. The frame is
/// anchored at `locations[0]`; re-anchoring at a different element changes
/// the result and is unsupported.
pub fn local_frame(locations: &[GeographicPoint]) -> Vec<LocalOffset> {
    let Some(&reference) = locations.first() else {
        return Vec::new();
    };
    locations
        .iter()
        .map(|&location| to_local_offset(reference, location))
        .collect()
}
