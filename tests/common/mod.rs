#![allow(dead_code)]

use floorsketch::math::Point2;
use floorsketch::{Polygon, PolygonId, Scene};

/// Installs a fmt subscriber honoring `RUST_LOG`, at most once per binary.
pub fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .try_init();
}

#[allow(clippy::unwrap_used)]
pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
    Polygon::from_points(vec![
        Point2::new(x0, y0),
        Point2::new(x1, y0),
        Point2::new(x1, y1),
        Point2::new(x0, y1),
    ])
    .unwrap()
}

/// First room in the scene that reports a fault, with the fault position.
#[allow(clippy::unwrap_used)]
pub fn faulty_room(scene: &Scene) -> Option<(PolygonId, Point2)> {
    scene
        .polygons()
        .find_map(|(id, _)| scene.polygon_intersection(id).unwrap().map(|hit| (id, hit)))
}

/// Stroke around a 500×500 square from the origin, sampled every 50 units
/// with one extra sample just past each corner.
pub fn square_stroke(offset: f64) -> Vec<Point2> {
    let corners = [
        Point2::new(0.0, 0.0),
        Point2::new(500.0, 0.0),
        Point2::new(500.0, 500.0),
        Point2::new(0.0, 500.0),
    ];
    let mut pts = Vec::new();
    for i in 0..4 {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        let dir = (b - a) / 500.0;
        pts.push(a);
        pts.push(a + dir * 5.0);
        for k in 1..10 {
            pts.push(a + dir * (50.0 * f64::from(k)));
        }
    }
    pts.into_iter()
        .map(|p| Point2::new(p.x + offset, p.y + offset))
        .collect()
}
