use log::info;
use panloc_core::{ConsolidatedMatches, KeyPoint, ViewMatches};

/// Reduces per-view correspondence sets to one aligned set: the frame points
/// that appear in *every* view, each with exactly one panorama point per
/// view.
///
/// Frame points are compared by exact pixel equality, as they all originate
/// from the same upstream detection on the one camera frame. The output
/// order is the first view's order restricted to the intersection, and stays
/// fixed for the rest of the pipeline. Within each view the *first* pano
/// point paired with an equal frame point is taken.
///
/// An empty intersection produces an empty result; callers that intend to
/// solve must treat that as a hard precondition failure
/// ([`LocalizeError::EmptyCorrespondenceIntersection`](panloc_core::LocalizeError::EmptyCorrespondenceIntersection)),
/// not feed it onward.
pub fn consolidate_matches(views: &[ViewMatches]) -> ConsolidatedMatches {
    let Some((first, rest)) = views.split_first() else {
        return ConsolidatedMatches::default();
    };

    let mut common: Vec<KeyPoint> = Vec::new();
    for &point in &first.frame_points {
        if common.contains(&point) {
            continue;
        }
        if rest.iter().all(|view| view.frame_points.contains(&point)) {
            common.push(point);
        }
    }

    let mut unique: Vec<KeyPoint> = Vec::new();
    for view in views {
        for &point in &view.frame_points {
            if !unique.contains(&point) {
                unique.push(point);
            }
        }
    }
    info!(
        "frame points common to all views: {}, total unique points: {}",
        common.len(),
        unique.len()
    );

    let pano_points = views
        .iter()
        .map(|view| {
            common
                .iter()
                .map(|target| {
                    view.pairs()
                        .find(|(frame, _)| frame == target)
                        .map(|(_, pano)| pano)
                        .expect("consolidated frame point missing from a view")
                })
                .collect()
        })
        .collect();

    ConsolidatedMatches {
        frame_points: common,
        pano_points,
    }
}
