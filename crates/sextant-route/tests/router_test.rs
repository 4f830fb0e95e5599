use futures::future::{AbortHandle, Aborted};
use sextant_geom::{RectExt, point, rect};
use sextant_route::{
    Path, PathRequest, PathRouter, Point, Rect, RouterOptions, RouterStats, force_orthogonal,
    path_length, simplify_path,
};

fn assert_clear(path: &Path, obstacles: &[Rect]) {
    for (a, b) in path.segments() {
        for o in obstacles {
            assert!(!o.blocks_segment(a, b), "segment {a:?} -> {b:?} crosses {o:?}");
        }
    }
}

#[test]
fn route_without_obstacles_is_the_straight_segment() {
    let router = PathRouter::default();
    let (s, e) = (point(0.0, 0.0), point(100.0, 50.0));
    let path = router.find_path(s, e, &[]);
    assert_eq!(path.points(), &[s, e]);
    assert!((path.length() - (s - e).length()).abs() < 1e-9);
}

#[test]
fn route_starts_and_ends_on_the_request_points() {
    let router = PathRouter::default();
    let obstacles = [rect(40.0, -30.0, 30.0, 60.0)];
    let (s, e) = (point(3.0, 1.0), point(151.0, 7.0));
    let path = router.find_path(s, e, &obstacles);
    assert_eq!(path.start(), Some(s));
    assert_eq!(path.end(), Some(e));
}

#[test]
fn route_detours_around_a_blocking_obstacle() {
    let router = PathRouter::default();
    let obstacle = rect(80.0, -20.0, 40.0, 40.0);
    let path = router.find_path(point(0.0, 0.0), point(200.0, 0.0), &[obstacle]);

    assert!(path.len() > 2, "{path:?}");
    assert_clear(&path, &[obstacle]);

    // Sample every segment: inside the obstacle's x span the path stays above or below it.
    for (a, b) in path.segments() {
        for step in 0..=100 {
            let t = step as f64 / 100.0;
            let p = a.lerp(b, t);
            if p.x > 80.0 && p.x < 120.0 {
                assert!(p.y <= -20.0 + 1e-9 || p.y >= 20.0 - 1e-9, "{p:?} in {path:?}");
            }
        }
    }
}

#[test]
fn route_avoids_a_field_of_obstacles() {
    let router = PathRouter::default();
    let obstacles = [
        rect(50.0, -40.0, 20.0, 80.0),
        rect(110.0, -10.0, 20.0, 90.0),
        rect(170.0, -60.0, 20.0, 70.0),
    ];
    let path = router.find_path(point(0.0, 0.0), point(240.0, 20.0), &obstacles);
    assert_clear(&path, &obstacles);
    assert_eq!(path.end(), Some(point(240.0, 20.0)));
}

#[test]
fn route_falls_back_to_direct_segment_when_the_goal_is_walled_in() {
    let router = PathRouter::default();
    let goal = point(100.0, 100.0);
    let walls = [
        rect(80.0, 80.0, 40.0, 5.0),
        rect(80.0, 115.0, 40.0, 5.0),
        rect(80.0, 80.0, 5.0, 40.0),
        rect(115.0, 80.0, 5.0, 40.0),
    ];
    let path = router.find_path(point(0.0, 0.0), goal, &walls);
    assert_eq!(path.points(), &[point(0.0, 0.0), goal]);
}

#[test]
fn repeated_request_is_served_from_cache() {
    let router = PathRouter::default();
    let obstacles = [rect(80.0, -20.0, 40.0, 40.0)];
    let first = router.find_path(point(0.0, 0.0), point(200.0, 0.0), &obstacles);
    let second = router.find_path(point(0.0, 0.0), point(200.0, 0.0), &obstacles);
    assert_eq!(first, second);
    assert_eq!(
        router.stats(),
        RouterStats {
            requests: 2,
            cache_hits: 1,
            searches: 1,
        }
    );
    assert_eq!(router.cache_len(), 1);
}

#[test]
fn cache_hit_pins_jittered_endpoints() {
    let router = PathRouter::default();
    let obstacles = [rect(80.0, -20.0, 40.0, 40.0)];
    router.find_path(point(0.0, 0.0), point(200.0, 0.0), &obstacles);
    let jittered = router.find_path(point(1.0, 2.0), point(199.0, -1.0), &obstacles);
    assert_eq!(router.stats().cache_hits, 1);
    assert_eq!(jittered.start(), Some(point(1.0, 2.0)));
    assert_eq!(jittered.end(), Some(point(199.0, -1.0)));
}

#[test]
fn cache_hit_is_rerouted_when_pinned_endpoints_clip_an_obstacle() {
    let router = PathRouter::default();
    // Spans y 4..24, so the segment at y = 0 passes under it and y = 4.9 runs through it.
    let obstacles = [rect(40.0, 4.0, 20.0, 20.0)];
    let first = router.find_path(point(0.0, 0.0), point(100.0, 0.0), &obstacles);
    assert_eq!(first.points(), &[point(0.0, 0.0), point(100.0, 0.0)]);

    // Same grid cells as the first request.
    let (s, e) = (point(0.0, 4.9), point(100.0, 4.9));
    let second = router.find_path(s, e, &obstacles);
    assert_eq!(second.start(), Some(s));
    assert_eq!(second.end(), Some(e));
    assert_clear(&second, &obstacles);
    let stats = router.stats();
    assert_eq!(stats.cache_hits, 0);
    assert_eq!(stats.searches, 2);

    // The rerouted path replaced the entry and serves the next identical request.
    assert_eq!(router.find_path(s, e, &obstacles), second);
    assert_eq!(router.stats().cache_hits, 1);
    assert_eq!(router.cache_len(), 1);
}

#[test]
fn cached_fallback_through_obstacles_is_still_a_hit() {
    let router = PathRouter::default();
    let goal = point(100.0, 100.0);
    let walls = [
        rect(80.0, 80.0, 40.0, 5.0),
        rect(80.0, 115.0, 40.0, 5.0),
        rect(80.0, 80.0, 5.0, 40.0),
        rect(115.0, 80.0, 5.0, 40.0),
    ];
    let first = router.find_path(point(0.0, 0.0), goal, &walls);
    let second = router.find_path(point(0.0, 0.0), goal, &walls);
    assert_eq!(first.points(), &[point(0.0, 0.0), goal]);
    assert_eq!(first, second);
    assert_eq!(router.stats().cache_hits, 1);
    assert_eq!(router.stats().searches, 1);
}

#[test]
fn invalidate_cache_forces_a_new_search() {
    let router = PathRouter::default();
    router.find_path(point(0.0, 0.0), point(50.0, 50.0), &[]);
    router.invalidate_cache();
    assert_eq!(router.cache_len(), 0);
    router.find_path(point(0.0, 0.0), point(50.0, 50.0), &[]);
    assert_eq!(router.stats().searches, 2);
}

#[test]
fn cache_capacity_bounds_occupancy() {
    let router = PathRouter::new(RouterOptions {
        cache_capacity: 2,
        ..Default::default()
    });
    for i in 0..5 {
        router.find_path(point(0.0, 0.0), point(100.0, i as f64 * 30.0), &[]);
    }
    assert_eq!(router.cache_len(), 2);
}

#[test]
fn batch_routing_preserves_request_order() {
    let router = PathRouter::default();
    let obstacle = rect(80.0, -20.0, 40.0, 40.0);
    let requests: Vec<PathRequest> = (0..16)
        .map(|i| {
            let y = i as f64 * 10.0;
            PathRequest::new(point(0.0, y), point(200.0, y), vec![obstacle])
        })
        .collect();
    let paths = router.find_paths(&requests);
    assert_eq!(paths.len(), requests.len());
    for (req, path) in requests.iter().zip(&paths) {
        assert_eq!(path.start(), Some(req.start));
        assert_eq!(path.end(), Some(req.end));
        assert_clear(path, &req.obstacles);
    }
}

#[test]
fn async_route_matches_blocking_route() {
    let router = PathRouter::default();
    let obstacles = [rect(80.0, -20.0, 40.0, 40.0)];
    let (_handle, registration) = AbortHandle::new_pair();
    let routed = futures::executor::block_on(router.find_path_async(
        point(0.0, 0.0),
        point(200.0, 0.0),
        &obstacles,
        registration,
    ));
    let expected = PathRouter::default().find_path(point(0.0, 0.0), point(200.0, 0.0), &obstacles);
    assert_eq!(routed, Ok(expected));
}

#[test]
fn async_route_aborted_before_poll_does_not_search() {
    let router = PathRouter::default();
    let (handle, registration) = AbortHandle::new_pair();
    handle.abort();
    let routed = futures::executor::block_on(router.find_path_async(
        point(0.0, 0.0),
        point(10.0, 10.0),
        &[],
        registration,
    ));
    assert_eq!(routed, Err(Aborted));
    assert_eq!(router.stats().requests, 0);
}

#[test]
fn non_finite_endpoints_route_directly() {
    let router = PathRouter::default();
    let path = router.find_path(point(f64::NAN, 0.0), point(10.0, 0.0), &[]);
    assert_eq!(path.len(), 2);
    assert_eq!(router.stats().searches, 0);
}

#[test]
fn unusable_grid_routes_directly_without_searching() {
    for grid_size in [0.0, -5.0, f64::INFINITY] {
        let router = PathRouter::new(RouterOptions {
            grid_size,
            ..Default::default()
        });
        let obstacles = [rect(80.0, -20.0, 40.0, 40.0)];
        let path = router.find_path(point(0.0, 0.0), point(200.0, 0.0), &obstacles);
        assert_eq!(path.points(), &[point(0.0, 0.0), point(200.0, 0.0)]);
        assert_eq!(router.stats().searches, 0);
    }
}

#[test]
fn identical_endpoints_give_a_two_point_path() {
    let router = PathRouter::default();
    let p = point(5.0, 5.0);
    assert_eq!(router.find_path(p, p, &[]).points(), &[p, p]);
}

#[test]
fn simplify_path_is_idempotent() {
    let raw: Vec<Point> = vec![
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(20.0, 0.3),
        point(30.0, 0.0),
        point(30.0, 40.0),
        point(30.0, 80.0),
        point(90.0, 80.0),
    ];
    let once = simplify_path(&raw, 1.0);
    assert_eq!(once, vec![point(0.0, 0.0), point(30.0, 0.0), point(30.0, 80.0), point(90.0, 80.0)]);
    assert_eq!(simplify_path(&once, 1.0), once);
}

#[test]
fn force_orthogonal_bends_along_the_dominant_axis_first() {
    let out = force_orthogonal(&[point(0.0, 0.0), point(100.0, 30.0), point(80.0, 130.0)]);
    assert_eq!(
        out,
        vec![
            point(0.0, 0.0),
            point(100.0, 0.0),
            point(100.0, 30.0),
            point(100.0, 130.0),
            point(80.0, 130.0),
        ]
    );
    assert!(out.windows(2).all(|w| w[0].x == w[1].x || w[0].y == w[1].y));
}

#[test]
fn path_length_sums_segments() {
    assert_eq!(path_length(&[point(0.0, 0.0), point(3.0, 4.0), point(3.0, 10.0)]), 11.0);
    assert_eq!(path_length(&[point(1.0, 1.0)]), 0.0);
    assert_eq!(path_length(&[]), 0.0);
}

#[test]
fn legacy_diagonal_mode_still_returns_endpoints() {
    let router = PathRouter::new(RouterOptions {
        check_diagonals: false,
        ..Default::default()
    });
    let path = router.find_path(point(0.0, 0.0), point(200.0, 0.0), &[rect(80.0, -20.0, 40.0, 40.0)]);
    assert_eq!(path.start(), Some(point(0.0, 0.0)));
    assert_eq!(path.end(), Some(point(200.0, 0.0)));
}
