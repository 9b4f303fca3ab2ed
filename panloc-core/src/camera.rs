use crate::KeyPoint;
use nalgebra::{Matrix3, Point2, Unit, UnitVector3, Vector2, Vector3};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Minimum forward component for a camera-space point to project to a pixel.
const MIN_PROJECTION_DEPTH: f64 = 1e-12;

/// Intrinsic parameters of a pinhole camera as per
/// [this Wikipedia page](https://en.wikipedia.org/wiki/Camera_resectioning#Intrinsic_parameters).
///
/// Two variants of the same intrinsics participate in every localization
/// solve: the phone camera's own intrinsics (principal point meaningful, used
/// for pose recovery) and the panorama-side copy produced by
/// [`CameraIntrinsics::panorama_variant`], whose principal point is forced to
/// zero because panorama bearings are measured about the image center. The
/// two are separate immutable values; neither is ever mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CameraIntrinsics {
    pub focals: Vector2<f64>,
    pub principal_point: Point2<f64>,
    pub skew: f64,
}

impl CameraIntrinsics {
    /// Creates intrinsics with unit focal lengths, origin principal point,
    /// and no skew, producing an identity intrinsic matrix.
    pub fn identity() -> Self {
        Self {
            focals: Vector2::new(1.0, 1.0),
            principal_point: Point2::new(0.0, 0.0),
            skew: 0.0,
        }
    }

    pub fn focals(self, focals: Vector2<f64>) -> Self {
        Self { focals, ..self }
    }

    pub fn focal(self, focal: f64) -> Self {
        Self {
            focals: Vector2::new(focal, focal),
            ..self
        }
    }

    pub fn principal_point(self, principal_point: Point2<f64>) -> Self {
        Self {
            principal_point,
            ..self
        }
    }

    pub fn skew(self, skew: f64) -> Self {
        Self { skew, ..self }
    }

    /// The panorama-side copy of these intrinsics: the last column of the
    /// intrinsic matrix is zeroed except for the homogeneous 1, which for a
    /// pinhole matrix means the principal point becomes the image center.
    ///
    /// The receiver is unaffected; keep using it for phone-side pose
    /// recovery.
    #[must_use]
    pub fn panorama_variant(self) -> Self {
        Self {
            principal_point: Point2::new(0.0, 0.0),
            ..self
        }
    }

    #[rustfmt::skip]
    pub fn matrix(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.focals.x,  self.skew,      self.principal_point.x,
            0.0,            self.focals.y,  self.principal_point.y,
            0.0,            0.0,            1.0,
        )
    }

    /// Lifts a pixel coordinate through the inverse intrinsic matrix to the
    /// unnormalized camera-space ray `K⁻¹·[u, v, 1]`.
    ///
    /// The ray's X axis points right, Y axis down, and Z axis forwards; its
    /// forward component is always 1 for well-formed intrinsics.
    pub fn pixel_ray(&self, point: KeyPoint) -> Vector3<f64> {
        let centered = point.0 - self.principal_point;
        let y = centered.y / self.focals.y;
        let x = (centered.x - self.skew * y) / self.focals.x;
        Vector3::new(x, y, 1.0)
    }

    /// Lifts a pixel coordinate to a unit bearing out of the optical center.
    pub fn bearing(&self, point: KeyPoint) -> UnitVector3<f64> {
        Unit::new_normalize(self.pixel_ray(point))
    }

    /// Perspective projection of a camera-space point onto the image.
    ///
    /// Returns `None` when the point has no positive forward component, as
    /// there is no pixel through which its light could have passed.
    pub fn project(&self, point: &Vector3<f64>) -> Option<KeyPoint> {
        if point.z < MIN_PROJECTION_DEPTH {
            return None;
        }
        let x = point.x / point.z;
        let y = point.y / point.z;
        Some(KeyPoint(Point2::new(
            self.focals.x * x + self.skew * y + self.principal_point.x,
            self.focals.y * y + self.principal_point.y,
        )))
    }
}
