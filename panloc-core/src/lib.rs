//! # panloc core
//!
//! This crate provides the common types shared by the `panloc` family of
//! crates: geographic coordinates and tangent-plane offsets, pinhole camera
//! intrinsics, world-to-camera poses, pixel keypoints, correspondence
//! containers, triangulated scene points, and the typed failures of the
//! localization pipeline. The crate is deliberately small so that every
//! `panloc` crate can interoperate through it without pulling in solver or
//! geodesy dependencies.
//!
//! Two coordinate conventions run through these types:
//!
//! * The **local tangent-plane frame** is anchored at a reference geographic
//!   point, with x pointing east, z pointing north, and y carrying the camera
//!   height. Offsets in this frame are always relative to the first element
//!   of a location sequence and are not symmetric under swapping the
//!   reference.
//! * **Camera space** follows the pinhole convention: the pose maps a world
//!   point `x` to `R·x + t`, and the intrinsic matrix maps camera rays to
//!   pixels.

mod camera;
mod error;
mod geographic;
mod matches;
mod point;
mod pose;

pub use camera::*;
pub use error::*;
pub use geographic::*;
pub use matches::*;
pub use nalgebra;
pub use point::*;
pub use pose::*;
