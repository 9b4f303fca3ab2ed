//! Pure geometry used by the localization solvers: the angular (bearing and
//! azimuth) reprojection error, and successive pairwise intersection of 2d
//! bearing rays on the tangent plane.
//!
//! Everything in this crate is a pure function of its inputs. Degenerate
//! configurations (rays with no forward component, parallel bearing rays)
//! are reported as typed errors rather than propagated as NaN.

mod angular;
mod intersect;

pub use angular::*;
pub use intersect::*;
