use panloc::{consolidate_matches, KeyPoint, ViewMatches};

fn kp(x: f64, y: f64) -> KeyPoint {
    KeyPoint::new(x, y)
}

/// Three shared frame points plus per-view noise, inserted in a different
/// order in every view.
fn noisy_views() -> Vec<ViewMatches> {
    let a = kp(10.0, 20.0);
    let b = kp(30.0, 40.0);
    let c = kp(50.0, 60.0);
    vec![
        ViewMatches::new(
            vec![a, kp(1.0, 1.0), b, c],
            vec![kp(100.0, 0.0), kp(900.0, 0.0), kp(101.0, 0.0), kp(102.0, 0.0)],
        ),
        ViewMatches::new(
            vec![c, b, kp(2.0, 2.0), a],
            vec![kp(202.0, 0.0), kp(201.0, 0.0), kp(901.0, 0.0), kp(200.0, 0.0)],
        ),
        ViewMatches::new(
            vec![kp(3.0, 3.0), b, a, c, kp(4.0, 4.0)],
            vec![
                kp(902.0, 0.0),
                kp(301.0, 0.0),
                kp(300.0, 0.0),
                kp(302.0, 0.0),
                kp(903.0, 0.0),
            ],
        ),
    ]
}

#[test]
fn intersection_survives_insertion_order() {
    let consolidated = consolidate_matches(&noisy_views());

    assert_eq!(consolidated.len(), 3);
    // Order is the first view's order restricted to the intersection.
    assert_eq!(
        consolidated.frame_points,
        vec![kp(10.0, 20.0), kp(30.0, 40.0), kp(50.0, 60.0)]
    );

    // Every view's pano points are realigned to that order.
    assert_eq!(consolidated.pano_points.len(), 3);
    assert_eq!(
        consolidated.pano_points[0],
        vec![kp(100.0, 0.0), kp(101.0, 0.0), kp(102.0, 0.0)]
    );
    assert_eq!(
        consolidated.pano_points[1],
        vec![kp(200.0, 0.0), kp(201.0, 0.0), kp(202.0, 0.0)]
    );
    assert_eq!(
        consolidated.pano_points[2],
        vec![kp(300.0, 0.0), kp(301.0, 0.0), kp(302.0, 0.0)]
    );
}

#[test]
fn duplicate_frame_points_take_the_first_pano_point() {
    let a = kp(10.0, 20.0);
    let views = vec![
        ViewMatches::new(vec![a, a], vec![kp(100.0, 0.0), kp(111.0, 0.0)]),
        ViewMatches::new(vec![a], vec![kp(200.0, 0.0)]),
    ];
    let consolidated = consolidate_matches(&views);
    assert_eq!(consolidated.frame_points, vec![a]);
    assert_eq!(consolidated.pano_points[0], vec![kp(100.0, 0.0)]);
}

#[test]
fn disjoint_views_consolidate_to_nothing() {
    let views = vec![
        ViewMatches::new(vec![kp(1.0, 1.0)], vec![kp(100.0, 0.0)]),
        ViewMatches::new(vec![kp(2.0, 2.0)], vec![kp(200.0, 0.0)]),
    ];
    let consolidated = consolidate_matches(&views);
    assert!(consolidated.is_empty());

    assert!(consolidate_matches(&[]).is_empty());
}
