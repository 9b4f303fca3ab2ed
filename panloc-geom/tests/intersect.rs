use panloc_core::{LocalOffset, LocalizeError};
use panloc_geom::intersect_bearing_rays;

/// Tangent-plane angle of the ray from `from` towards `target`.
fn angle_towards(from: LocalOffset, target: LocalOffset) -> f64 {
    (target.north - from.north).atan2(target.east - from.east)
}

#[test]
fn crossing_rays_resolve_to_the_crossing_point() {
    let target = LocalOffset::new(6.0, 14.0);
    let offsets = [LocalOffset::new(0.0, 0.0), LocalOffset::new(10.0, 0.0)];
    let angles: Vec<f64> = offsets
        .iter()
        .map(|&offset| angle_towards(offset, target))
        .collect();

    let hit = intersect_bearing_rays(&offsets, &angles, 10.0).unwrap();
    assert!((hit.east - target.east).abs() < 1e-9, "east {}", hit.east);
    assert!((hit.north - target.north).abs() < 1e-9, "north {}", hit.north);
}

#[test]
fn chained_rays_use_the_final_pair() {
    let target = LocalOffset::new(-3.0, 22.0);
    let offsets = [
        LocalOffset::new(0.0, 0.0),
        LocalOffset::new(8.0, 1.0),
        LocalOffset::new(17.0, -2.0),
    ];
    let angles: Vec<f64> = offsets
        .iter()
        .map(|&offset| angle_towards(offset, target))
        .collect();

    let hit = intersect_bearing_rays(&offsets, &angles, 25.0).unwrap();
    assert!((hit.east - target.east).abs() < 1e-9);
    assert!((hit.north - target.north).abs() < 1e-9);
}

#[test]
fn parallel_rays_are_a_typed_error() {
    let offsets = [LocalOffset::new(0.0, 0.0), LocalOffset::new(10.0, 0.0)];
    let angles = [std::f64::consts::FRAC_PI_2; 2];
    assert_eq!(
        intersect_bearing_rays(&offsets, &angles, 10.0),
        Err(LocalizeError::SingularRayIntersection)
    );
}

#[test]
fn degenerate_inputs_are_rejected() {
    assert_eq!(
        intersect_bearing_rays(&[LocalOffset::new(0.0, 0.0)], &[0.4], 10.0),
        Err(LocalizeError::InsufficientObservations { needed: 2, got: 1 })
    );
    assert_eq!(
        intersect_bearing_rays(
            &[LocalOffset::new(0.0, 0.0), LocalOffset::new(1.0, 0.0)],
            &[0.4],
            10.0
        ),
        Err(LocalizeError::MismatchedCorrespondences { left: 2, right: 1 })
    );
}
