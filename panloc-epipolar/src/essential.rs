use derive_more::{AsRef, Deref, DerefMut, From, Into};
use panloc_core::nalgebra::{Matrix3, Rotation3, UnitVector3, Vector3, SVD};
use panloc_core::FeatureMatch;
use sample_consensus::Model;

/// An essential matrix, satisfying `transpose(b)·E·a = 0` for homogeneous
/// normalized image coordinates `a` and `b` of the same feature in the first
/// and second view.
///
/// The essential matrix encodes the relative rotation and the *direction* of
/// translation between two calibrated views; the translation's magnitude is
/// unrecoverable from it.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, AsRef, Deref, DerefMut, From, Into)]
pub struct EssentialMatrix(pub Matrix3<f64>);

impl EssentialMatrix {
    /// Decomposes the matrix into its two possible rotations and a
    /// translation of arbitrary length and undetermined sign.
    ///
    /// `epsilon` and `max_iterations` bound the singular value
    /// decomposition. Returns `None` when the SVD fails to converge.
    pub fn possible_rotations_unscaled_translation(
        &self,
        epsilon: f64,
        max_iterations: usize,
    ) -> Option<(Rotation3<f64>, Rotation3<f64>, Vector3<f64>)> {
        let Self(essential) = *self;

        // `W` from https://en.wikipedia.org/wiki/Essential_matrix#Finding_one_solution.
        let w = Matrix3::new(0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0);
        let wt = w.transpose();

        let svd = SVD::try_new(essential, true, true, epsilon, max_iterations)?;
        let mut u = svd.u?;
        let mut v_t = svd.v_t?;

        // Force positive determinants so both derived rotations are proper.
        // The flipped column/row is the one attached to the null singular
        // value, so the matrix is still a valid decomposition.
        if u.determinant() < 0.0 {
            for n in u.column_mut(2).iter_mut() {
                *n = -*n;
            }
        }
        if v_t.determinant() < 0.0 {
            for n in v_t.row_mut(2).iter_mut() {
                *n = -*n;
            }
        }

        Some((
            Rotation3::from_matrix_unchecked(u * w * v_t),
            Rotation3::from_matrix_unchecked(u * wt * v_t),
            u.column(2).into_owned(),
        ))
    }
}

impl Model<FeatureMatch> for EssentialMatrix {
    fn residual(&self, data: &FeatureMatch) -> f64 {
        let Self(mat) = *self;
        let &FeatureMatch(a, b) = data;
        let normalized = |p: UnitVector3<f64>| p.into_inner() / p.z;

        // The result is a 1x1 matrix which we must get element 0 from.
        (normalized(b).transpose() * mat * normalized(a))[0].abs()
    }
}
