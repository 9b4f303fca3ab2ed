use levenberg_marquardt::LeastSquaresProblem;
use log::info;
use panloc_core::nalgebra::{
    dimension::{Dynamic, U1},
    DMatrix, DVector, Rotation3, VecStorage, Vector3, Vector6,
};
use panloc_core::{CameraIntrinsics, CameraPose, KeyPoint, LocalizeError, SceneObjectPoint};

use crate::numeric::central_difference_jacobian;
use crate::{SolveBudget, SolveReport};

/// The perspective-n-point problem: the pose of a single camera given known
/// 3d scene points and their observed pixel projections.
///
/// The six free parameters are the se(3) coordinates of the world-to-camera
/// pose; each correspondence contributes a two-component pixel reprojection
/// residual under the camera's own (non-zeroed) intrinsics, with no lens
/// distortion.
pub struct PnpProblem {
    matches: Vec<(SceneObjectPoint, KeyPoint)>,
    intrinsics: CameraIntrinsics,
    pose: CameraPose,
}

impl PnpProblem {
    pub fn new(
        matches: Vec<(SceneObjectPoint, KeyPoint)>,
        intrinsics: CameraIntrinsics,
        initial_pose: CameraPose,
    ) -> Self {
        Self {
            matches,
            intrinsics,
            pose: initial_pose,
        }
    }

    /// The pose described by the current parameters.
    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    fn residuals_for(&self, pose: CameraPose) -> Option<DVector<f64>> {
        let mut residuals = DVector::zeros(2 * self.matches.len());
        for (index, &(scene_point, observed)) in self.matches.iter().enumerate() {
            let projected = self.intrinsics.project(&pose.transform(&scene_point.0))?;
            residuals[2 * index] = projected.x - observed.x;
            residuals[2 * index + 1] = projected.y - observed.y;
        }
        Some(residuals)
    }
}

impl LeastSquaresProblem<f64, Dynamic, Dynamic> for PnpProblem {
    type ResidualStorage = VecStorage<f64, Dynamic, U1>;
    type JacobianStorage = VecStorage<f64, Dynamic, Dynamic>;
    type ParameterStorage = VecStorage<f64, Dynamic, U1>;

    fn set_params(&mut self, params: &DVector<f64>) {
        self.pose = CameraPose::from_se3(Vector6::from_iterator(params.iter().copied()));
    }

    fn params(&self) -> DVector<f64> {
        DVector::from_iterator(6, self.pose.se3().iter().copied())
    }

    fn residuals(&self) -> Option<DVector<f64>> {
        self.residuals_for(self.pose)
    }

    fn jacobian(&self) -> Option<DMatrix<f64>> {
        central_difference_jacobian(&self.params(), 2 * self.matches.len(), |params| {
            self.residuals_for(CameraPose::from_se3(Vector6::from_iterator(
                params.iter().copied(),
            )))
        })
    }
}

/// Recovers the camera pose that reprojects `scene_points` onto
/// `frame_points` under `intrinsics`.
///
/// The initial pose looks down the optical axis with the camera retreated
/// far enough that the whole point cloud is in front of it; a cloud that
/// still fails to project at the start (zero or negative depth) is a
/// [`LocalizeError::DegenerateAngularProjection`]. Non-convergence within
/// the budget returns the best iterate with `converged` cleared.
pub fn recover_camera_pose(
    scene_points: &[SceneObjectPoint],
    frame_points: &[KeyPoint],
    intrinsics: &CameraIntrinsics,
    budget: SolveBudget,
) -> Result<(CameraPose, SolveReport), LocalizeError> {
    if scene_points.len() != frame_points.len() {
        return Err(LocalizeError::MismatchedCorrespondences {
            left: scene_points.len(),
            right: frame_points.len(),
        });
    }
    if scene_points.len() < 3 {
        return Err(LocalizeError::InsufficientObservations {
            needed: 3,
            got: scene_points.len(),
        });
    }

    let mean_radius = scene_points
        .iter()
        .map(|point| point.0.coords.norm())
        .sum::<f64>()
        / scene_points.len() as f64;
    let initial_pose = CameraPose::from_parts(
        Vector3::new(0.0, 0.0, 1.0 + 2.0 * mean_radius),
        Rotation3::identity(),
    );

    let matches = scene_points
        .iter()
        .copied()
        .zip(frame_points.iter().copied())
        .collect();
    let problem = PnpProblem::new(matches, *intrinsics, initial_pose);
    if problem.residuals().is_none() {
        return Err(LocalizeError::DegenerateAngularProjection);
    }

    info!(
        "recovering camera pose from {} correspondences",
        scene_points.len()
    );
    let (problem, report) = budget.minimizer().minimize(problem);
    info!(
        "Levenberg-Marquardt terminated with reason {:?}",
        report.termination
    );

    Ok((problem.pose(), SolveReport::from(report)))
}
