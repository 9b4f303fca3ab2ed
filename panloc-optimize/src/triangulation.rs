use argmin::core::{ArgminOp, Error, Executor};
use argmin::solver::neldermead::NelderMead;
use levenberg_marquardt::LeastSquaresProblem;
use log::info;
use panloc_core::nalgebra::{
    dimension::{Dynamic, U1},
    DMatrix, DVector, Point3, VecStorage,
};
use panloc_core::{CameraIntrinsics, CameraPose, KeyPoint, LocalizeError, SceneObjectPoint};
use panloc_geom::bearing_azimuth_error;

use crate::numeric::central_difference_jacobian;
use crate::{SolveBudget, SolveReport};

fn validate_observations(
    poses: &[CameraPose],
    observations: &[Vec<KeyPoint>],
) -> Result<usize, LocalizeError> {
    if poses.len() != observations.len() {
        return Err(LocalizeError::MismatchedCorrespondences {
            left: poses.len(),
            right: observations.len(),
        });
    }
    if poses.len() < 2 {
        return Err(LocalizeError::InsufficientObservations {
            needed: 2,
            got: poses.len(),
        });
    }
    let points = observations[0].len();
    if points == 0 {
        return Err(LocalizeError::EmptyCorrespondenceIntersection);
    }
    for view in observations {
        if view.len() != points {
            return Err(LocalizeError::MismatchedCorrespondences {
                left: points,
                right: view.len(),
            });
        }
    }
    Ok(points)
}

fn scene_points_from_params(params: &[f64]) -> Vec<SceneObjectPoint> {
    params
        .chunks_exact(3)
        .map(|chunk| SceneObjectPoint(Point3::new(chunk[0], chunk[1], chunk[2])))
        .collect()
}

/// The multi-view triangulation problem in residual-vector form.
///
/// The free parameters are the `3·n` coordinates of the `n` scene points, one
/// per consolidated frame point; the panorama poses are fixed. Each
/// (view, point) observation contributes one residual, its angular
/// reprojection error, so Levenberg-Marquardt minimizes the sum of squared
/// angular errors. The initial guess places every scene point at the local
/// origin.
pub struct TriangulationProblem {
    poses: Vec<CameraPose>,
    observations: Vec<Vec<KeyPoint>>,
    intrinsics: CameraIntrinsics,
    points: usize,
    params: DVector<f64>,
}

impl TriangulationProblem {
    /// Creates the problem. `observations[view][point]` must be the panorama
    /// point that `view` matched to consolidated frame point `point`; the
    /// intrinsics are the panorama-side (zeroed principal point) variant.
    pub fn new(
        poses: Vec<CameraPose>,
        observations: Vec<Vec<KeyPoint>>,
        intrinsics: CameraIntrinsics,
    ) -> Result<Self, LocalizeError> {
        let points = validate_observations(&poses, &observations)?;
        Ok(Self {
            poses,
            observations,
            intrinsics,
            points,
            params: DVector::zeros(3 * points),
        })
    }

    /// The scene points described by the current parameters.
    pub fn scene_points(&self) -> Vec<SceneObjectPoint> {
        scene_points_from_params(self.params.as_slice())
    }

    fn residuals_at(&self, params: &DVector<f64>) -> Option<DVector<f64>> {
        let mut residuals = DVector::zeros(self.poses.len() * self.points);
        for (view, (&pose, observations)) in
            self.poses.iter().zip(self.observations.iter()).enumerate()
        {
            for (point, &observed) in observations.iter().enumerate() {
                let scene_point = SceneObjectPoint(Point3::new(
                    params[3 * point],
                    params[3 * point + 1],
                    params[3 * point + 2],
                ));
                residuals[view * self.points + point] =
                    bearing_azimuth_error(pose, &self.intrinsics, scene_point, observed).ok()?;
            }
        }
        Some(residuals)
    }
}

impl LeastSquaresProblem<f64, Dynamic, Dynamic> for TriangulationProblem {
    type ResidualStorage = VecStorage<f64, Dynamic, U1>;
    type JacobianStorage = VecStorage<f64, Dynamic, Dynamic>;
    type ParameterStorage = VecStorage<f64, Dynamic, U1>;

    fn set_params(&mut self, params: &DVector<f64>) {
        self.params.copy_from(params);
    }

    fn params(&self) -> DVector<f64> {
        self.params.clone()
    }

    fn residuals(&self) -> Option<DVector<f64>> {
        self.residuals_at(&self.params)
    }

    fn jacobian(&self) -> Option<DMatrix<f64>> {
        central_difference_jacobian(&self.params, self.poses.len() * self.points, |params| {
            self.residuals_at(params)
        })
    }
}

/// Solves the triangulation problem with Levenberg-Marquardt and returns the
/// scene points of the best iterate.
///
/// Non-convergence is reported through [`SolveReport::converged`], not as an
/// error; a degenerate projection at the initial guess is.
pub fn triangulate_scene(
    poses: &[CameraPose],
    observations: &[Vec<KeyPoint>],
    intrinsics: &CameraIntrinsics,
    budget: SolveBudget,
) -> Result<(Vec<SceneObjectPoint>, SolveReport), LocalizeError> {
    let problem =
        TriangulationProblem::new(poses.to_vec(), observations.to_vec(), *intrinsics)?;
    if problem.residuals().is_none() {
        return Err(LocalizeError::DegenerateAngularProjection);
    }

    info!(
        "triangulating {} scene points over {} views with Levenberg-Marquardt",
        problem.points,
        poses.len()
    );
    let (problem, report) = budget.minimizer().minimize(problem);
    info!(
        "Levenberg-Marquardt terminated with reason {:?}",
        report.termination
    );

    Ok((problem.scene_points(), SolveReport::from(report)))
}

/// The multi-view triangulation objective as a single summed scalar: the
/// total squared angular reprojection error over all (view, point) pairs.
///
/// This is the alternate formulation of [`TriangulationProblem`] for scalar
/// minimizers; pair it with [`triangulation_nelder_mead`].
#[derive(Clone)]
pub struct TriangulationObjective {
    poses: Vec<CameraPose>,
    observations: Vec<Vec<KeyPoint>>,
    intrinsics: CameraIntrinsics,
    points: usize,
}

impl TriangulationObjective {
    pub fn new(
        poses: Vec<CameraPose>,
        observations: Vec<Vec<KeyPoint>>,
        intrinsics: CameraIntrinsics,
    ) -> Result<Self, LocalizeError> {
        let points = validate_observations(&poses, &observations)?;
        Ok(Self {
            poses,
            observations,
            intrinsics,
            points,
        })
    }

    /// Number of scene points, which is a third of the parameter count.
    pub fn points(&self) -> usize {
        self.points
    }
}

impl ArgminOp for TriangulationObjective {
    type Param = Vec<f64>;
    type Output = f64;
    type Hessian = ();
    type Jacobian = ();
    type Float = f64;

    fn apply(&self, params: &Self::Param) -> Result<Self::Output, Error> {
        let mut total = 0.0;
        for (&pose, observations) in self.poses.iter().zip(self.observations.iter()) {
            for (point, &observed) in observations.iter().enumerate() {
                let scene_point = SceneObjectPoint(Point3::new(
                    params[3 * point],
                    params[3 * point + 1],
                    params[3 * point + 2],
                ));
                let error =
                    bearing_azimuth_error(pose, &self.intrinsics, scene_point, observed)?;
                total += error * error;
            }
        }
        Ok(total)
    }
}

/// A Nelder-Mead solver whose initial simplex surrounds the local origin,
/// perturbing one scene-point coordinate per vertex by `spread` meters.
pub fn triangulation_nelder_mead(points: usize, spread: f64) -> NelderMead<Vec<f64>, f64> {
    let dimensions = 3 * points;
    let mut variants = vec![vec![0.0; dimensions]; dimensions + 1];
    #[allow(clippy::needless_range_loop)]
    for i in 0..dimensions {
        variants[i][i] += spread;
    }
    NelderMead::new().with_initial_params(variants)
}

/// Solves the triangulation problem by minimizing the summed scalar objective
/// with Nelder-Mead.
pub fn triangulate_scene_nelder_mead(
    poses: &[CameraPose],
    observations: &[Vec<KeyPoint>],
    intrinsics: &CameraIntrinsics,
    spread: f64,
    max_iters: u64,
) -> Result<(Vec<SceneObjectPoint>, SolveReport), LocalizeError> {
    let objective =
        TriangulationObjective::new(poses.to_vec(), observations.to_vec(), *intrinsics)?;
    let solver = triangulation_nelder_mead(objective.points(), spread).sd_tolerance(1e-12);

    info!(
        "triangulating {} scene points over {} views with Nelder-Mead",
        objective.points(),
        poses.len()
    );
    // The initial parameter is empty because Nelder-Mead is passed its own
    // initial simplex directly.
    let state = Executor::new(objective, solver, vec![])
        .max_iters(max_iters)
        .run()
        .map_err(|error| {
            error
                .downcast::<LocalizeError>()
                .unwrap_or(LocalizeError::DegenerateAngularProjection)
        })?
        .state;
    info!(
        "Nelder-Mead finished after {} iterations with cost {}",
        state.iter, state.best_cost
    );

    let report = SolveReport {
        converged: state.iter < max_iters,
        objective: state.best_cost,
        evaluations: state.iter as usize,
    };
    Ok((scene_points_from_params(&state.best_param), report))
}
