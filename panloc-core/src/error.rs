use thiserror::Error;

/// The typed failures of the localization pipeline.
///
/// Geometry-level degeneracies are detected where they arise and converted
/// into these variants instead of letting NaN or infinity propagate through
/// later arithmetic. Solver non-convergence is deliberately *not* an error:
/// the minimizers return their best iterate together with a convergence flag
/// in their report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocalizeError {
    /// No frame point occurs in every view's correspondence set, so there is
    /// nothing to triangulate.
    #[error("no frame point is common to every panorama view")]
    EmptyCorrespondenceIntersection,

    /// A projected or observed ray has no forward component, leaving its
    /// azimuth undefined.
    #[error("ray has a zero forward component; bearing/azimuth angles are undefined")]
    DegenerateAngularProjection,

    /// Two consecutive bearing rays are parallel, so their intersection
    /// system is singular.
    #[error("consecutive bearing rays are parallel and do not intersect")]
    SingularRayIntersection,

    /// The robust essential-matrix estimation or its decomposition failed to
    /// produce a model.
    #[error("essential matrix estimation failed to produce a relative pose")]
    EssentialEstimationFailed,

    /// Too few observations for the requested operation.
    #[error("{needed} observations required, got {got}")]
    InsufficientObservations { needed: usize, got: usize },

    /// Input sequences that must be index-aligned have different lengths.
    #[error("mismatched input lengths: {left} vs {right}")]
    MismatchedCorrespondences { left: usize, right: usize },
}
