use crate::LocalOffset;
use derive_more::{AsRef, From, Into};
use nalgebra::{
    IsometryMatrix3, Matrix3x4, Point3, Rotation3, Translation3, Vector3, Vector6,
};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A world-to-camera pose: the rigid map `x ↦ R·x + t` taking points in the
/// shared local tangent-plane frame into a camera's frame.
///
/// For panorama views this is a derived, read-only input built by
/// [`CameraPose::panorama`]; the phone camera's pose is the *output* of pose
/// recovery, never an input.
#[derive(Debug, Clone, Copy, PartialEq, AsRef, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CameraPose(pub IsometryMatrix3<f64>);

impl CameraPose {
    /// A pose with no change in position or orientation.
    pub fn identity() -> Self {
        Self(IsometryMatrix3::identity())
    }

    pub fn from_parts(translation: Vector3<f64>, rotation: Rotation3<f64>) -> Self {
        Self(IsometryMatrix3::from_parts(
            Translation3::from(translation),
            rotation,
        ))
    }

    /// Builds the pose of a panorama view from its tangent-plane offset, its
    /// heading and pitch in degrees, and the camera height in meters.
    ///
    /// The rotation is `Ry(-heading)·Rx(pitch)` and the translation is
    /// `(east, height, north)`, used directly as the `t` of `[R|t]`. Heading
    /// is the panorama yaw clockwise from north; pitch tilts about the east
    /// axis.
    pub fn panorama(offset: LocalOffset, heading: f64, pitch: f64, height: f64) -> Self {
        let rotation =
            Rotation3::from_euler_angles(pitch.to_radians(), -heading.to_radians(), 0.0);
        let translation = Vector3::new(offset.east, height, offset.north);
        Self::from_parts(translation, rotation)
    }

    #[inline(always)]
    pub fn isometry(self) -> IsometryMatrix3<f64> {
        self.0
    }

    pub fn rotation(self) -> Rotation3<f64> {
        self.0.rotation
    }

    pub fn translation(self) -> Vector3<f64> {
        self.0.translation.vector
    }

    /// The pose as the 3×4 matrix `[R|t]`.
    pub fn matrix3x4(self) -> Matrix3x4<f64> {
        let rot = self.0.rotation;
        let rot = rot.matrix();
        let trans = self.0.translation.vector;
        Matrix3x4::from_columns(&[rot.column(0), rot.column(1), rot.column(2), trans.column(0)])
    }

    /// Maps a world point into this camera's frame.
    pub fn transform(self, point: &Point3<f64>) -> Vector3<f64> {
        (self.0 * point).coords
    }

    /// The se(3) representation of the pose: translation components followed
    /// by the scaled rotation axis.
    pub fn se3(self) -> Vector6<f64> {
        let t = self.0.translation.vector;
        let r = self.0.rotation.scaled_axis();
        Vector6::new(t.x, t.y, t.z, r.x, r.y, r.z)
    }

    /// Reconstructs a pose from its se(3) representation.
    pub fn from_se3(se3: Vector6<f64>) -> Self {
        let translation = se3.xyz();
        let rotation = Rotation3::new(Vector3::new(se3[3], se3[4], se3[5]));
        Self::from_parts(translation, rotation)
    }
}
