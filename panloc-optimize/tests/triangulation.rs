use panloc_core::nalgebra::Vector2;
use panloc_core::{CameraIntrinsics, CameraPose, KeyPoint, LocalOffset, LocalizeError, SceneObjectPoint};
use panloc_optimize::{
    triangulate_scene, triangulate_scene_nelder_mead, SolveBudget, TriangulationProblem,
};

fn panorama_intrinsics() -> CameraIntrinsics {
    // The phone intrinsics with the principal point cleared for the
    // panorama side, as the pipeline builds them.
    CameraIntrinsics::identity()
        .focals(Vector2::new(1000.0, 1000.0))
        .principal_point(panloc_core::nalgebra::Point2::new(640.0, 360.0))
        .panorama_variant()
}

/// Panorama poses at three locations with three different headings, so the
/// views jointly constrain all three scene-point coordinates.
fn poses() -> Vec<CameraPose> {
    vec![
        CameraPose::panorama(LocalOffset::new(0.0, 0.0), 0.0, 0.0, 2.5),
        CameraPose::panorama(LocalOffset::new(30.0, 0.0), 90.0, 0.0, 2.5),
        CameraPose::panorama(LocalOffset::new(-20.0, 10.0), 45.0, 0.0, 2.5),
    ]
}

/// Noiseless observations: the raw x/y of `K·(pose·y)`, which is what the
/// angular error model compares against.
fn observe(poses: &[CameraPose], points: &[SceneObjectPoint]) -> Vec<Vec<KeyPoint>> {
    let intrinsics = panorama_intrinsics();
    poses
        .iter()
        .map(|pose| {
            points
                .iter()
                .map(|point| {
                    let projected = intrinsics.matrix() * pose.transform(&point.0);
                    KeyPoint::new(projected.x, projected.y)
                })
                .collect()
        })
        .collect()
}

#[test]
fn levenberg_marquardt_recovers_known_points() {
    let truth = [
        SceneObjectPoint::new(4.0, 1.0, 25.0),
        SceneObjectPoint::new(-6.0, 2.0, 18.0),
    ];
    let poses = poses();
    let observations = observe(&poses, &truth);

    let (estimate, report) = triangulate_scene(
        &poses,
        &observations,
        &panorama_intrinsics(),
        SolveBudget::default(),
    )
    .unwrap();

    assert!(report.objective < 1e-8, "objective {}", report.objective);
    for (estimated, expected) in estimate.iter().zip(truth.iter()) {
        let distance = (estimated.0 - expected.0).norm();
        assert!(
            distance < 1e-3,
            "estimated {:?} expected {:?} ({} m apart)",
            estimated,
            expected,
            distance
        );
    }
}

#[test]
fn nelder_mead_recovers_a_known_point() {
    let truth = [SceneObjectPoint::new(4.0, 1.0, 25.0)];
    let poses = poses();
    let observations = observe(&poses, &truth);

    let (estimate, report) = triangulate_scene_nelder_mead(
        &poses,
        &observations,
        &panorama_intrinsics(),
        10.0,
        4000,
    )
    .unwrap();

    let distance = (estimate[0].0 - truth[0].0).norm();
    assert!(distance < 1e-2, "{} m apart", distance);
    assert!(report.converged);
}

#[test]
fn problem_starts_at_the_local_origin() {
    let truth = [SceneObjectPoint::new(4.0, 1.0, 25.0)];
    let poses = poses();
    let observations = observe(&poses, &truth);
    let problem =
        TriangulationProblem::new(poses, observations, panorama_intrinsics()).unwrap();
    for point in problem.scene_points() {
        assert_eq!(point, SceneObjectPoint::new(0.0, 0.0, 0.0));
    }
}

#[test]
fn malformed_inputs_are_rejected() {
    let intrinsics = panorama_intrinsics();
    let poses = poses();

    // One view too few observation sets.
    let short: Vec<Vec<KeyPoint>> = vec![vec![KeyPoint::new(0.0, 0.0)]; 2];
    assert!(matches!(
        triangulate_scene(&poses, &short, &intrinsics, SolveBudget::default()),
        Err(LocalizeError::MismatchedCorrespondences { .. })
    ));

    // Fewer than two views.
    assert!(matches!(
        triangulate_scene(
            &poses[..1],
            &[vec![KeyPoint::new(0.0, 0.0)]],
            &intrinsics,
            SolveBudget::default()
        ),
        Err(LocalizeError::InsufficientObservations { needed: 2, got: 1 })
    ));

    // No consolidated points at all.
    let empty: Vec<Vec<KeyPoint>> = vec![Vec::new(); 3];
    assert!(matches!(
        triangulate_scene(&poses, &empty, &intrinsics, SolveBudget::default()),
        Err(LocalizeError::EmptyCorrespondenceIntersection)
    ));
}
