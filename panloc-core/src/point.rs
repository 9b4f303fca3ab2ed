use derive_more::{AsRef, Deref, DerefMut, From, Into};
use nalgebra::{Point3, Vector4};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// An initially-unknown 3d scene point in the local tangent-plane frame,
/// produced by the triangulation solver, one per consolidated frame point.
///
/// Scene points live only for the duration of a single solve: they are
/// consumed by pose recovery and carry no meaning across calls, since the
/// tangent frame is re-anchored per location sequence.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SceneObjectPoint(pub Point3<f64>);

impl SceneObjectPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(Point3::new(x, y, z))
    }

    /// The homogeneous coordinate of the point.
    pub fn homogeneous(self) -> Vector4<f64> {
        self.0.to_homogeneous()
    }
}
