use panloc::geodesy::{destination, geodesic_distance, local_frame};
use panloc::{estimate_location, GeographicPoint, LocalOffset, LocalizeError};

const REFERENCE: GeographicPoint = GeographicPoint {
    latitude: 34.0600,
    longitude: -118.4370,
};

/// Tangent-plane angle of the ray from `from` towards `target`.
fn angle_towards(from: LocalOffset, target: LocalOffset) -> f64 {
    (target.north - from.north).atan2(target.east - from.east)
}

#[test]
fn crossing_bearings_resolve_the_target() {
    // Two panoramas 10 m apart, rays built to cross at a point 6 m east and
    // 14 m north of the first.
    let locations = [REFERENCE, destination(REFERENCE, 10.0, 90.0)];
    let target_offset = LocalOffset::new(6.0, 14.0);
    let angles: Vec<f64> = local_frame(&locations)
        .into_iter()
        .map(|offset| angle_towards(offset, target_offset))
        .collect();

    let estimate = estimate_location(&locations, &angles, 10.0).unwrap();

    let truth = destination(
        REFERENCE,
        target_offset.magnitude(),
        target_offset.compass_bearing(),
    );
    let error = geodesic_distance(estimate, truth);
    assert!(error < 0.01, "estimate is {} m from the target", error);
}

#[test]
fn parallel_bearings_fail_rather_than_fabricate() {
    let locations = [REFERENCE, destination(REFERENCE, 10.0, 90.0)];
    let angles = [1.1, 1.1];
    assert_eq!(
        estimate_location(&locations, &angles, 10.0),
        Err(LocalizeError::SingularRayIntersection)
    );
}

#[test]
fn a_single_location_cannot_intersect() {
    assert_eq!(
        estimate_location(&[REFERENCE], &[0.3], 10.0),
        Err(LocalizeError::InsufficientObservations { needed: 2, got: 1 })
    );
}
