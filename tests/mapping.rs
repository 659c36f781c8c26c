//! End-to-end scenarios for the mapping engine, driven through the
//! public `Resolver` API the way the surrounding rig would drive it.

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use wallmap::{AdmissionPolicy, MapperConfig, Point2D, Resolver, SegmentState};

fn resolver(config: MapperConfig) -> Resolver {
    Resolver::new(config).expect("config should validate")
}

#[test]
fn scenario_single_wall_left_to_right() {
    // Four colinear samples along y = 0 collapse to one wall spanning them
    let mut r = resolver(MapperConfig::default());
    for x in [0.0_f32, 1.0, 2.0, 3.0] {
        r.step(Point2D::new(x, 0.0)).unwrap();
    }

    let records = r.store().records();
    assert_eq!(records.len(), 1);
    let wall = &records[0];
    assert_relative_eq!(wall.slope.unwrap(), 0.0, epsilon = 1e-4);
    assert_relative_eq!(wall.intercept.unwrap(), 0.0, epsilon = 1e-4);
    assert_eq!(wall.point_count, 4);

    let (left, right) = if wall.endpoint_a.x < wall.endpoint_b.x {
        (wall.endpoint_a, wall.endpoint_b)
    } else {
        (wall.endpoint_b, wall.endpoint_a)
    };
    assert!(left.approx_eq(Point2D::new(0.0, 0.0), 1e-4));
    assert!(right.approx_eq(Point2D::new(3.0, 0.0), 1e-4));
}

#[test]
fn scenario_distant_clusters_stay_disjoint() {
    // Tight radius: the second cluster is far out of reach and the two
    // parallel walls must never merge
    let mut r = resolver(MapperConfig::default().with_radius(1.2));
    for p in [
        Point2D::new(0.0, 0.0),
        Point2D::new(1.0, 0.0),
        Point2D::new(5.0, 5.0),
        Point2D::new(6.0, 5.0),
    ] {
        r.step(p).unwrap();
    }

    let records = r.store().records();
    assert_eq!(records.len(), 2);
    for wall in &records {
        assert_eq!(wall.point_count, 2);
        assert_relative_eq!(wall.slope.unwrap(), 0.0, epsilon = 1e-4);
    }
}

#[test]
fn scenario_outlier_rejected_transactionally() {
    // Default admission: a rejected sample leaves no trace at all
    let mut r = resolver(MapperConfig::default());
    for i in 0..10 {
        r.step(Point2D::new(i as f32, i as f32)).unwrap();
    }
    r.step(Point2D::new(15.0, 0.0)).unwrap();

    let records = r.store().records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].point_count, 10);
    assert_relative_eq!(records[0].slope.unwrap(), 1.0, epsilon = 1e-3);
}

#[test]
fn scenario_outlier_still_folds_under_legacy_admission() {
    // fold_always preserves the legacy update-then-validate ordering:
    // the rejected sample still increments n and perturbs the sums,
    // while the cached fit stays put
    let mut r = resolver(MapperConfig::default().with_admission(AdmissionPolicy::FoldAlways));
    for i in 0..10 {
        r.step(Point2D::new(i as f32, i as f32)).unwrap();
    }
    r.step(Point2D::new(15.0, 0.0)).unwrap();

    let records = r.store().records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].point_count, 11);
    assert_relative_eq!(records[0].slope.unwrap(), 1.0, epsilon = 1e-3);
}

#[test]
fn property_gap_smaller_than_radius_merges_to_one_wall() {
    let mut r = resolver(MapperConfig::default().with_radius(1.0));
    // Two clusters of the same wall, initially out of reach
    for x in [0.0_f32, 0.3, 0.6, 0.9] {
        r.ingest(Point2D::new(x, 0.0)).unwrap();
    }
    for x in [2.5_f32, 2.8, 3.1] {
        r.ingest(Point2D::new(x, 0.0)).unwrap();
    }
    assert_eq!(r.store().len(), 2);

    // The left cluster grows until the gap drops below the radius
    r.ingest(Point2D::new(1.2, 0.0)).unwrap();
    r.ingest(Point2D::new(1.55, 0.0)).unwrap();
    r.consolidate();

    let records = r.store().records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].point_count, 9);
    let max_x = records[0].endpoint_a.x.max(records[0].endpoint_b.x);
    assert_relative_eq!(max_x, 3.1, epsilon = 1e-3);
}

#[test]
fn property_perpendicular_walls_bridge_to_shared_corner() {
    let mut r = resolver(MapperConfig::default().with_radius(1.0));

    // Wall A along y = x towards (2.5, 2.5)
    for i in 0..6 {
        let t = i as f32 * 0.5;
        r.ingest(Point2D::new(t, t)).unwrap();
    }
    // Wall B along y = -x + 6, starting out of reach of A
    for i in 0..6 {
        let t = 3.7 + i as f32 * 0.5;
        r.ingest(Point2D::new(t, 6.0 - t)).unwrap();
    }
    assert_eq!(r.store().len(), 2);

    r.consolidate();

    // Still two walls, but both gained the synthetic corner sample at
    // the line intersection (3, 3) and their endpoints moved to it
    let records = r.store().records();
    assert_eq!(records.len(), 2);
    for wall in &records {
        assert_eq!(wall.point_count, 7);
        let corner = if wall.endpoint_a.distance(Point2D::new(3.0, 3.0))
            < wall.endpoint_b.distance(Point2D::new(3.0, 3.0))
        {
            wall.endpoint_a
        } else {
            wall.endpoint_b
        };
        assert!(corner.approx_eq(Point2D::new(3.0, 3.0), 1e-2));
    }
}

#[test]
fn property_isolated_point_stays_nascent() {
    let mut r = resolver(MapperConfig::default());
    r.step(Point2D::new(1000.0, 1000.0)).unwrap();
    for i in 0..8 {
        r.step(Point2D::new(i as f32 * 10.0, 0.0)).unwrap();
    }

    let records = r.store().records();
    assert_eq!(records.len(), 2);
    let lone = records
        .iter()
        .find(|w| w.point_count == 1)
        .expect("isolated point must survive consolidation");
    assert_eq!(lone.state, SegmentState::Nascent);
    assert!(lone.slope.is_none());
}

#[test]
fn property_identical_streams_yield_identical_maps() {
    let run = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut r = resolver(MapperConfig::default().with_radius(8.0));
        for _ in 0..300 {
            // Noisy samples along the walls of a 100x100 room
            let t = rng.gen_range(0.0_f32..100.0);
            let noise = rng.gen_range(-0.5_f32..0.5);
            let p = match rng.gen_range(0..4) {
                0 => Point2D::new(t, noise),
                1 => Point2D::new(t, 100.0 + noise),
                2 => Point2D::new(noise, t),
                _ => Point2D::new(100.0 + noise, t),
            };
            r.step(p).unwrap();
        }
        r.store().records()
    };

    let first = run(42);
    let second = run(42);
    assert_eq!(first, second);

    // And the map is sane: bounded segment count for a four-wall room
    assert!(!first.is_empty());
    assert!(first.len() <= 40);
}

#[test]
fn colinear_points_recover_the_analytic_line() {
    // y = -0.25x + 7 through a fresh resolver
    let mut r = resolver(MapperConfig::default());
    for i in 0..6 {
        let x = i as f32 * 4.0;
        r.step(Point2D::new(x, -0.25 * x + 7.0)).unwrap();
    }

    let records = r.store().records();
    assert_eq!(records.len(), 1);
    assert_relative_eq!(records[0].slope.unwrap(), -0.25, epsilon = 1e-4);
    assert_relative_eq!(records[0].intercept.unwrap(), 7.0, epsilon = 1e-3);
}
