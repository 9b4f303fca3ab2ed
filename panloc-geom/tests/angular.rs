use panloc_core::nalgebra::{Point2, Vector2};
use panloc_core::{CameraIntrinsics, CameraPose, KeyPoint, LocalOffset, SceneObjectPoint};
use panloc_geom::bearing_azimuth_error;

fn panorama_intrinsics() -> CameraIntrinsics {
    CameraIntrinsics::identity()
        .focals(Vector2::new(1200.0, 1150.0))
        .principal_point(Point2::new(640.0, 360.0))
        .panorama_variant()
}

fn pose() -> CameraPose {
    CameraPose::panorama(LocalOffset::new(2.0, 7.0), 25.0, 3.0, 2.4)
}

/// The observation that reproduces the projection exactly: the raw x/y of
/// `K·(pose·y)`, matching the error model's notion of a predicted point.
fn exact_observation(
    pose: CameraPose,
    intrinsics: &CameraIntrinsics,
    point: SceneObjectPoint,
) -> KeyPoint {
    let projected = intrinsics.matrix() * pose.transform(&point.0);
    KeyPoint::new(projected.x, projected.y)
}

#[test]
fn error_is_zero_for_the_exact_projection() {
    let intrinsics = panorama_intrinsics();
    let point = SceneObjectPoint::new(4.0, 1.0, 30.0);
    let observed = exact_observation(pose(), &intrinsics, point);
    let error = bearing_azimuth_error(pose(), &intrinsics, point, observed).unwrap();
    assert!(error.abs() < 1e-12, "error {}", error);
}

#[test]
fn error_grows_with_angular_perturbation() {
    let intrinsics = panorama_intrinsics();
    let point = SceneObjectPoint::new(4.0, 1.0, 30.0);
    let observed = exact_observation(pose(), &intrinsics, point);

    let mut last = 0.0;
    for pixels in [2.0, 4.0, 8.0, 16.0, 32.0] {
        let perturbed = KeyPoint::new(observed.x, observed.y + pixels);
        let error = bearing_azimuth_error(pose(), &intrinsics, point, perturbed).unwrap();
        assert!(
            error > last,
            "error {} did not grow past {} at {} px",
            error,
            last,
            pixels
        );
        last = error;
    }
}

#[test]
fn error_is_symmetric_in_prediction_and_observation() {
    // Two scene points that project to each other's observations swap the
    // roles of predicted and observed ray, leaving the error unchanged.
    let intrinsics = panorama_intrinsics();
    let a = SceneObjectPoint::new(4.0, 1.0, 30.0);
    let b = SceneObjectPoint::new(-3.0, 2.5, 28.0);
    let obs_a = exact_observation(pose(), &intrinsics, a);
    let obs_b = exact_observation(pose(), &intrinsics, b);
    let ab = bearing_azimuth_error(pose(), &intrinsics, a, obs_b).unwrap();
    let ba = bearing_azimuth_error(pose(), &intrinsics, b, obs_a).unwrap();
    assert!((ab - ba).abs() < 1e-12);
}
