use panloc_core::nalgebra::{DMatrix, DVector};

/// Relative step used for central differences.
const DIFFERENTIATION_STEP: f64 = 1e-6;

/// Central-difference Jacobian of `residuals` at `params`.
///
/// Returns `None` as soon as any perturbed evaluation fails, which the
/// least-squares problems surface as an invalid trial step.
pub(crate) fn central_difference_jacobian(
    params: &DVector<f64>,
    residual_count: usize,
    residuals: impl Fn(&DVector<f64>) -> Option<DVector<f64>>,
) -> Option<DMatrix<f64>> {
    let mut jacobian = DMatrix::zeros(residual_count, params.len());
    for parameter in 0..params.len() {
        let step = DIFFERENTIATION_STEP * params[parameter].abs().max(1.0);
        let mut forward = params.clone();
        forward[parameter] += step;
        let mut backward = params.clone();
        backward[parameter] -= step;
        let difference = (residuals(&forward)? - residuals(&backward)?) / (2.0 * step);
        jacobian.set_column(parameter, &difference);
    }
    Some(jacobian)
}
