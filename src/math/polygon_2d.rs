use std::f64::consts::PI;

use super::{Point2, Vector2};

/// Sum of the cross products of consecutive vertex pairs (twice the signed
/// area).
///
/// Positive for counter-clockwise in y-up coordinates, negative for clockwise.
#[must_use]
pub fn shoelace_sum(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum
}

/// Average of the vertex positions.
///
/// Returns the origin for an empty slice.
#[must_use]
pub fn centroid(points: &[Point2]) -> Point2 {
    if points.is_empty() {
        return Point2::origin();
    }
    #[allow(clippy::cast_precision_loss)]
    let n = points.len() as f64;
    let sum = points
        .iter()
        .fold(Vector2::zeros(), |acc, p| acc + p.coords);
    Point2::from(sum / n)
}

/// Even-odd point-in-polygon test.
#[must_use]
pub fn contains_point(points: &[Point2], p: &Point2) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = &points[i];
        let b = &points[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// `n` points evenly spaced on a circle, starting at angle 0.
#[must_use]
pub fn regular_polygon(n: usize, radius: f64, center: &Point2) -> Vec<Point2> {
    #[allow(clippy::cast_precision_loss)]
    let step = 2.0 * PI / n.max(1) as f64;
    let mut a: f64 = 0.0;
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        out.push(Point2::new(
            center.x + radius * a.cos(),
            center.y + radius * a.sin(),
        ));
        a += step;
    }
    out
}
