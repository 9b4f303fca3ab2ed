use panloc_core::nalgebra::{Matrix2, Vector2};
use panloc_core::{LocalOffset, LocalizeError};

/// Determinant threshold (relative to the squared ray length) below which two
/// rays are treated as parallel.
const PARALLEL_TOLERANCE: f64 = 1e-12;

/// Intersects the bearing rays of a sequence of tangent-plane locations,
/// successively, each with the previous one, and returns the final
/// intersection point as an offset from the frame origin.
///
/// Each location emits the ray `p + t·l·(cos a, sin a)` where `p` is its
/// `(east, north)` offset, `a` its bearing angle in tangent-plane math
/// convention (radians, counterclockwise from the east axis), and `l` the
/// nominal ray length. Consecutive rays are intersected with a 2×2 solve for
/// the two ray parameters; this is a pairwise chain, not a global
/// least-squares fit over all rays, so with more than two rays only the last
/// pair determines the result.
///
/// Parallel consecutive rays make the system singular and are reported as
/// [`LocalizeError::SingularRayIntersection`].
pub fn intersect_bearing_rays(
    offsets: &[LocalOffset],
    angles: &[f64],
    ray_length: f64,
) -> Result<LocalOffset, LocalizeError> {
    if offsets.len() != angles.len() {
        return Err(LocalizeError::MismatchedCorrespondences {
            left: offsets.len(),
            right: angles.len(),
        });
    }
    if offsets.len() < 2 {
        return Err(LocalizeError::InsufficientObservations {
            needed: 2,
            got: offsets.len(),
        });
    }

    let segment = |offset: LocalOffset, angle: f64| {
        let start = Vector2::new(offset.east, offset.north);
        let end = start + ray_length * Vector2::new(angle.cos(), angle.sin());
        (start, end)
    };

    let mut previous = segment(offsets[0], angles[0]);
    let mut intersection = None;
    for (&offset, &angle) in offsets.iter().zip(angles.iter()).skip(1) {
        let current = segment(offset, angle);
        // Solve current.0 + t·(current.1 - current.0)
        //     = previous.0 + s·(previous.1 - previous.0) for (t, s).
        let system =
            Matrix2::from_columns(&[current.1 - current.0, previous.0 - previous.1]);
        if system.determinant().abs() < PARALLEL_TOLERANCE * ray_length * ray_length {
            return Err(LocalizeError::SingularRayIntersection);
        }
        let parameters = system
            .lu()
            .solve(&(previous.0 - current.0))
            .ok_or(LocalizeError::SingularRayIntersection)?;
        let s = parameters.y;
        intersection = Some((1.0 - s) * previous.0 + s * previous.1);
        previous = current;
    }

    // The length check above guarantees at least one loop iteration.
    let point = intersection.ok_or(LocalizeError::InsufficientObservations {
        needed: 2,
        got: offsets.len(),
    })?;
    Ok(LocalOffset::new(point.x, point.y))
}
