use derive_more::{AsRef, Deref, DerefMut, From, Into};
use nalgebra::{Point2, UnitVector3};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A point on an image in raw pixel coordinates, neither undistorted nor
/// normalized.
///
/// Upstream correspondence detection emits these; lift them through
/// [`CameraIntrinsics::pixel_ray`](crate::CameraIntrinsics::pixel_ray) or
/// [`CameraIntrinsics::bearing`](crate::CameraIntrinsics::bearing) to reach
/// camera space.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct KeyPoint(pub Point2<f64>);

impl KeyPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self(Point2::new(x, y))
    }
}

/// A pair of calibrated unit bearings observing the same feature from two
/// cameras, in the order (first view, second view).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureMatch(pub UnitVector3<f64>, pub UnitVector3<f64>);

/// The correspondences of one panorama view: `frame_points[i]` on the phone
/// frame was matched to `pano_points[i]` on this panorama.
///
/// The two sequences are index-aligned; iteration with [`ViewMatches::pairs`]
/// stops at the shorter one.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ViewMatches {
    pub frame_points: Vec<KeyPoint>,
    pub pano_points: Vec<KeyPoint>,
}

impl ViewMatches {
    pub fn new(frame_points: Vec<KeyPoint>, pano_points: Vec<KeyPoint>) -> Self {
        Self {
            frame_points,
            pano_points,
        }
    }

    pub fn pairs(&self) -> impl Iterator<Item = (KeyPoint, KeyPoint)> + '_ {
        self.frame_points
            .iter()
            .copied()
            .zip(self.pano_points.iter().copied())
    }
}

/// Consolidated correspondences across every panorama view.
///
/// `frame_points` holds the frame points present in all views, in one fixed
/// order, and `pano_points[view][i]` is the panorama point that view matched
/// to `frame_points[i]`. Every inner vector has `frame_points.len()` entries.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ConsolidatedMatches {
    pub frame_points: Vec<KeyPoint>,
    pub pano_points: Vec<Vec<KeyPoint>>,
}

impl ConsolidatedMatches {
    /// Number of consolidated frame points.
    pub fn len(&self) -> usize {
        self.frame_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame_points.is_empty()
    }
}
