//! Two-view relative orientation from point correspondences.
//!
//! This crate recovers the relative rotation and translation between two
//! calibrated views by estimating an essential matrix with the eight-point
//! algorithm under a robust consensus process, then decomposing it. The
//! translation is recovered only up to scale, a fundamental limitation of
//! any two-view method, documented here rather than solved.
//!
//! No triangulation and no geographic conversion happen here; this is a
//! lower-level primitive the localization pipelines can use for relative
//! orientation only.

mod eight_point;
mod essential;

pub use eight_point::*;
pub use essential::*;

use arrsac::Arrsac;
use log::info;
use panloc_core::nalgebra::{Matrix3x2, Rotation3, Vector3};
use panloc_core::{CameraIntrinsics, FeatureMatch, KeyPoint, LocalizeError};
use float_ord::FloatOrd;
use rand::{rngs::SmallRng, SeedableRng};
use sample_consensus::{Consensus, Estimator};

/// Maximum epipolar residual for a match to count as a consensus inlier.
const CONSENSUS_THRESHOLD: f64 = 1e-4;
/// Epsilon handed to the SVD/eigen routines.
const DECOMPOSITION_EPSILON: f64 = 1e-12;
/// Iteration cap handed to the SVD/eigen routines.
const DECOMPOSITION_ITERATIONS: usize = 1000;
/// Smallest depth accepted by the cheirality vote.
const MIN_CHEIRALITY_DEPTH: f64 = 1e-9;

/// A relative pose between two views: `x_b = rotation·x_a + translation`.
///
/// The translation's length carries no meaning; only its direction is
/// determined by the essential matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativePose {
    pub rotation: Rotation3<f64>,
    pub translation: Vector3<f64>,
}

/// Estimates the relative pose between the views that produced `points_a`
/// and `points_b`.
///
/// Both point sets are calibrated with the same (phone) intrinsics, assumed
/// distortion-free. Robust estimation is delegated to ARRSAC over the
/// eight-point estimator; the essential matrix is then decomposed and the
/// candidate pose with the best cheirality support over all matches is
/// returned.
pub fn estimate_relative_pose(
    points_a: &[KeyPoint],
    points_b: &[KeyPoint],
    intrinsics: &CameraIntrinsics,
) -> Result<RelativePose, LocalizeError> {
    if points_a.len() != points_b.len() {
        return Err(LocalizeError::MismatchedCorrespondences {
            left: points_a.len(),
            right: points_b.len(),
        });
    }
    if points_a.len() < EightPoint::MIN_SAMPLES {
        return Err(LocalizeError::InsufficientObservations {
            needed: EightPoint::MIN_SAMPLES,
            got: points_a.len(),
        });
    }

    let matches: Vec<FeatureMatch> = points_a
        .iter()
        .zip(points_b.iter())
        .map(|(&a, &b)| FeatureMatch(intrinsics.bearing(a), intrinsics.bearing(b)))
        .collect();

    info!(
        "estimating an essential matrix from {} matches",
        matches.len()
    );
    let mut consensus = Arrsac::new(CONSENSUS_THRESHOLD, SmallRng::seed_from_u64(0));
    let essential = consensus
        .model(&EightPoint::new(), matches.iter().copied())
        .ok_or(LocalizeError::EssentialEstimationFailed)?;

    let (rotation_a, rotation_b, translation) = essential
        .possible_rotations_unscaled_translation(DECOMPOSITION_EPSILON, DECOMPOSITION_ITERATIONS)
        .ok_or(LocalizeError::EssentialEstimationFailed)?;

    let candidates = [
        (rotation_a, translation),
        (rotation_b, translation),
        (rotation_a, -translation),
        (rotation_b, -translation),
    ];
    let (rotation, translation) = select_by_cheirality(&candidates, &matches);
    Ok(RelativePose {
        rotation,
        translation,
    })
}

/// Depths of a match under a candidate pose, from the normal equations of
/// `λ_b·b = λ_a·R·a + t`.
fn match_depths(
    rotation: &Rotation3<f64>,
    translation: &Vector3<f64>,
    m: &FeatureMatch,
) -> Option<(f64, f64)> {
    let FeatureMatch(a, b) = m;
    let rotated = rotation * a.into_inner();
    let system = Matrix3x2::from_columns(&[rotated, -b.into_inner()]);
    let normal = system.transpose() * system;
    let rhs = system.transpose() * (-translation);
    let depths = normal.lu().solve(&rhs)?;
    (depths.x.is_finite() && depths.y.is_finite()).then(|| (depths.x, depths.y))
}

/// Picks the candidate pose with the most matches in front of both cameras,
/// breaking ties by bearing alignment.
///
/// The tie-break matters at zero baseline: the depth system is singular for
/// every match there, no candidate collects votes, and alignment alone
/// distinguishes the true rotation from its twisted pair.
fn select_by_cheirality(
    candidates: &[(Rotation3<f64>, Vector3<f64>); 4],
    matches: &[FeatureMatch],
) -> (Rotation3<f64>, Vector3<f64>) {
    candidates
        .iter()
        .copied()
        .max_by_key(|&(rotation, translation)| {
            let votes = matches
                .iter()
                .filter_map(|m| match_depths(&rotation, &translation, m))
                .filter(|&(da, db)| da > MIN_CHEIRALITY_DEPTH && db > MIN_CHEIRALITY_DEPTH)
                .count();
            let misalignment: f64 = matches
                .iter()
                .map(|&FeatureMatch(a, b)| 1.0 - b.dot(&(rotation * a)))
                .sum();
            (votes, FloatOrd(-misalignment))
        })
        .expect("the candidate pose list is never empty")
}
