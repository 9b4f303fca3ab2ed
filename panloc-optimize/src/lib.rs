//! Nonlinear solvers for the localization pipeline.
//!
//! Two problems live here. [`TriangulationProblem`] solves for the unknown
//! 3d scene points that minimize the total angular reprojection error across
//! all panorama views, with the panorama poses held fixed. It exists in two
//! formulations: a residual-vector least-squares problem for
//! Levenberg-Marquardt, and a summed-scalar objective
//! ([`TriangulationObjective`]) for Nelder-Mead. [`PnpProblem`] then recovers
//! the phone camera's pose from the triangulated points and their phone-frame
//! observations by pixel-reprojection least squares.
//!
//! Neither solver promises convergence: both return their best iterate
//! together with a [`SolveReport`], and only geometric degeneracies are
//! errors.

mod numeric;
mod report;
mod single_view;
mod triangulation;

pub use report::*;
pub use single_view::*;
pub use triangulation::*;
