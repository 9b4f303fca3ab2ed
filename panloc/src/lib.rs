//! # `panloc`
//!
//! Batteries-included cross-view geographic localization: given matched 2d
//! feature correspondences between a handheld camera's frame and one or more
//! geo-referenced panoramas, estimate where the camera is.
//!
//! The heavy lifting lives in the focused member crates and is re-exported
//! here; this crate adds the two end-to-end pipelines on top of them:
//!
//! * [`localize`] consolidates per-view correspondences, triangulates the
//!   shared scene points against the known panorama poses in angular error
//!   space, recovers the camera pose from the triangulated points, and
//!   converts the resulting offset back to geographic coordinates.
//! * [`estimate_location`] is the independent alternative that intersects 2d
//!   bearing rays emitted from the known panorama locations.
//!
//! The two methods are deliberately separate and are never reconciled with
//! each other; they answer the same question from different inputs.
//!
//! ## Modules
//! * [`epipolar`] - two-view relative orientation via the essential matrix
//! * [`geodesy`] - geographic ↔ tangent-plane conversions on WGS-84
//! * [`geom`] - angular reprojection error and bearing-ray geometry
//! * [`optimize`] - the triangulation and pose-recovery solvers

pub use panloc_core::*;

pub use panloc_epipolar as epipolar;
pub use panloc_geodesy as geodesy;
pub use panloc_geom as geom;
pub use panloc_optimize as optimize;

mod consolidate;
mod localize;
mod map;

pub use consolidate::*;
pub use localize::*;
pub use map::*;
