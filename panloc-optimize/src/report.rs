use levenberg_marquardt::{LevenbergMarquardt, MinimizationReport};

/// Iteration and tolerance budget for the nonlinear solvers, bounding the
/// worst-case latency of a solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveBudget {
    /// Maximum number of Levenberg-Marquardt iterations.
    pub patience: usize,
    /// Relative reduction of the objective below which the solve converged.
    pub ftol: f64,
    /// Relative parameter change below which the solve converged.
    pub xtol: f64,
}

impl Default for SolveBudget {
    fn default() -> Self {
        Self {
            patience: 300,
            ftol: 1e-14,
            xtol: 1e-14,
        }
    }
}

impl SolveBudget {
    /// A Levenberg-Marquardt instance configured with this budget.
    pub(crate) fn minimizer(&self) -> LevenbergMarquardt<f64> {
        LevenbergMarquardt::new()
            .with_patience(self.patience)
            .with_ftol(self.ftol)
            .with_xtol(self.xtol)
    }
}

/// Outcome diagnostics of a minimizer run.
///
/// `converged` being false is not a failure: the accompanying estimate is the
/// minimizer's best iterate and may still be usable, which is the caller's
/// judgement to make from `objective`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveReport {
    /// Whether the minimizer reached one of its convergence criteria before
    /// exhausting its budget.
    pub converged: bool,
    /// Final value of the objective function (sum of squared residuals).
    pub objective: f64,
    /// Number of objective evaluations spent.
    pub evaluations: usize,
}

impl From<MinimizationReport<f64>> for SolveReport {
    fn from(report: MinimizationReport<f64>) -> Self {
        Self {
            converged: report.termination.was_successful(),
            objective: report.objective_function,
            evaluations: report.number_of_evaluations,
        }
    }
}
