use panloc_core::nalgebra::{Vector2, Vector3};
use panloc_core::{CameraIntrinsics, CameraPose, KeyPoint, LocalizeError, SceneObjectPoint};

/// Forward components smaller than this leave the azimuth angle undefined.
const MIN_FORWARD_COMPONENT: f64 = 1e-12;

/// The polar angle θ (from the optical axis) and azimuthal angle φ of a
/// camera-space ray.
fn ray_angles(ray: Vector3<f64>) -> Result<(f64, f64), LocalizeError> {
    if ray.z.abs() < MIN_FORWARD_COMPONENT {
        return Err(LocalizeError::DegenerateAngularProjection);
    }
    let theta = (ray.z / ray.norm()).acos();
    let phi = (ray.y / ray.z).atan();
    Ok((theta, phi))
}

/// The bearing/azimuth discrepancy between an observed image point and the
/// projection of a scene point under a camera pose.
///
/// The scene point is mapped through the pose and the intrinsic matrix; the
/// raw x/y of that projection form the predicted image point. Both the
/// predicted and the observed point are then lifted through `K⁻¹·[u, v, 1]`
/// to rays, and the error is the Euclidean norm of their (θ, φ) angle
/// differences.
///
/// Working in angle space rather than pixel space makes the error invariant
/// to the scale ambiguity of an unscaled panorama tile: the panorama acts as
/// a bearing sensor, not a metric one. Note that the predicted image point
/// keeps the projection's raw x/y with the homogeneous component reset to 1,
/// so the comparison is between image directions about the principal axis.
pub fn bearing_azimuth_error(
    pose: CameraPose,
    intrinsics: &CameraIntrinsics,
    scene_point: SceneObjectPoint,
    observed: KeyPoint,
) -> Result<f64, LocalizeError> {
    let projected = intrinsics.matrix() * pose.transform(&scene_point.0);
    let predicted = KeyPoint::new(projected.x, projected.y);

    let (theta_predicted, phi_predicted) = ray_angles(intrinsics.pixel_ray(predicted))?;
    let (theta_observed, phi_observed) = ray_angles(intrinsics.pixel_ray(observed))?;

    Ok(Vector2::new(
        theta_predicted - theta_observed,
        phi_predicted - phi_observed,
    )
    .norm())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_ray_is_an_error() {
        assert_eq!(
            ray_angles(Vector3::new(1.0, 1.0, 0.0)),
            Err(LocalizeError::DegenerateAngularProjection)
        );
        assert!(ray_angles(Vector3::new(1.0, 1.0, 1e-3)).is_ok());
    }
}
