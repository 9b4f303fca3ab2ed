use std::path::PathBuf;

use log::{info, warn};
use panloc_core::{
    CameraIntrinsics, CameraPose, GeographicPoint, LocalOffset, LocalizeError, ViewMatches,
};
use panloc_geodesy::{destination, local_frame};
use panloc_geom::intersect_bearing_rays;
use panloc_optimize::{
    recover_camera_pose, triangulate_scene, triangulate_scene_nelder_mead, SolveBudget,
    SolveReport,
};

use crate::{consolidate_matches, HtmlMapRenderer, MapRenderer};

/// Which formulation of the triangulation objective the pipeline solves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriangulationMethod {
    /// Levenberg-Marquardt over the per-observation residual vector.
    #[default]
    LevenbergMarquardt,
    /// Nelder-Mead over the summed scalar objective.
    NelderMead,
}

/// Knobs of the [`localize`] pipeline.
#[derive(Debug, Clone)]
pub struct LocalizationSettings {
    pub triangulation: TriangulationMethod,
    /// Iteration/tolerance budget shared by the triangulation and pose
    /// solves.
    pub budget: SolveBudget,
    /// Initial simplex spread, in meters, of the Nelder-Mead formulation.
    pub nelder_mead_spread: f64,
    /// Iteration cap of the Nelder-Mead formulation.
    pub nelder_mead_iterations: u64,
    /// Where to write the map artifact, if anywhere.
    pub artifact_path: Option<PathBuf>,
}

impl Default for LocalizationSettings {
    fn default() -> Self {
        Self {
            triangulation: TriangulationMethod::default(),
            budget: SolveBudget::default(),
            nelder_mead_spread: 10.0,
            nelder_mead_iterations: 2000,
            artifact_path: None,
        }
    }
}

/// A localization result: the geographic estimate together with the solver
/// diagnostics that produced it.
///
/// The estimate is the solvers' best iterate and is not guaranteed to be the
/// global error minimum; consult the reports.
#[derive(Debug, Clone)]
pub struct LocalizationEstimate {
    pub position: GeographicPoint,
    /// The tangent-plane offset from the first panorama location that
    /// produced `position`.
    pub offset: LocalOffset,
    pub triangulation: SolveReport,
    pub pose_recovery: SolveReport,
    /// Path of the rendered map artifact, when one was requested and written.
    pub artifact: Option<PathBuf>,
}

/// Estimates the camera's geographic position from per-view correspondences
/// against panoramas at known locations.
///
/// `views[i]` holds the correspondences against the panorama at
/// `locations[i]`; `heading` and `pitch` are the panorama orientation in
/// degrees and `height` the panorama camera height in meters. The local
/// tangent frame is anchored at `locations[0]`.
///
/// The pipeline consolidates the correspondences, triangulates one scene
/// point per consolidated frame point against the fixed panorama poses
/// (panorama-side intrinsics with the principal point cleared), recovers the
/// phone pose from the triangulated points under the unmodified phone
/// intrinsics, and converts the x/y of the recovered translation into a
/// geodesic destination from `locations[0]`.
pub fn localize(
    views: &[ViewMatches],
    locations: &[GeographicPoint],
    intrinsics: &CameraIntrinsics,
    heading: f64,
    pitch: f64,
    height: f64,
    settings: &LocalizationSettings,
) -> Result<LocalizationEstimate, LocalizeError> {
    if views.len() != locations.len() {
        return Err(LocalizeError::MismatchedCorrespondences {
            left: views.len(),
            right: locations.len(),
        });
    }
    if locations.len() < 2 {
        return Err(LocalizeError::InsufficientObservations {
            needed: 2,
            got: locations.len(),
        });
    }

    let consolidated = consolidate_matches(views);
    if consolidated.is_empty() {
        return Err(LocalizeError::EmptyCorrespondenceIntersection);
    }

    let offsets = local_frame(locations);
    let panorama_intrinsics = intrinsics.panorama_variant();
    let poses: Vec<CameraPose> = offsets
        .iter()
        .map(|&offset| CameraPose::panorama(offset, heading, pitch, height))
        .collect();

    let (scene_points, triangulation) = match settings.triangulation {
        TriangulationMethod::LevenbergMarquardt => triangulate_scene(
            &poses,
            &consolidated.pano_points,
            &panorama_intrinsics,
            settings.budget,
        )?,
        TriangulationMethod::NelderMead => triangulate_scene_nelder_mead(
            &poses,
            &consolidated.pano_points,
            &panorama_intrinsics,
            settings.nelder_mead_spread,
            settings.nelder_mead_iterations,
        )?,
    };

    let (pose, pose_report) = recover_camera_pose(
        &scene_points,
        &consolidated.frame_points,
        intrinsics,
        settings.budget,
    )?;

    // The offset is the x and y components of the recovered translation with
    // the raw single-argument arctangent bearing. Targets that would need
    // quadrant correction are out of contract here; see the geodesy crate
    // for the quadrant-correct conversions.
    let translation = pose.translation();
    let offset = LocalOffset::new(translation.x, translation.y);
    let bearing = (translation.x / translation.y).atan().to_degrees();
    let position = destination(locations[0], offset.magnitude(), bearing);

    let artifact = settings.artifact_path.as_ref().and_then(|path| {
        match HtmlMapRenderer.render(locations, position, path) {
            Ok(()) => Some(path.clone()),
            Err(error) => {
                warn!("map artifact at {} failed: {}", path.display(), error);
                None
            }
        }
    });

    info!(
        "localized to ({:.6}, {:.6}), {:.2} m from the reference panorama",
        position.latitude,
        position.longitude,
        offset.magnitude()
    );

    Ok(LocalizationEstimate {
        position,
        offset,
        triangulation,
        pose_recovery: pose_report,
        artifact,
    })
}

/// Estimates a location by intersecting bearing rays from known locations:
/// the non-optimization alternative to [`localize`].
///
/// `angles[i]` is the tangent-plane direction (radians, counterclockwise
/// from east) of the ray leaving `locations[i]`; rays are intersected
/// pairwise in sequence and the final intersection, expressed as an offset
/// from `locations[0]`, is converted to a geodesic destination.
pub fn estimate_location(
    locations: &[GeographicPoint],
    angles: &[f64],
    ray_length: f64,
) -> Result<GeographicPoint, LocalizeError> {
    let offsets = local_frame(locations);
    let hit = intersect_bearing_rays(&offsets, angles, ray_length)?;
    info!(
        "bearing rays intersect {:.2} m east, {:.2} m north of the reference",
        hit.east, hit.north
    );
    Ok(destination(
        locations[0],
        hit.magnitude(),
        hit.compass_bearing(),
    ))
}
