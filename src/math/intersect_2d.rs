use super::vector_2d::cross;
use super::{Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = d1.x * d2.y - d1.y * d2.x;
    if cross.abs() < TOLERANCE {
        return None;
    }
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let t = (dx * d2.y - dy * d2.x) / cross;
    let u = (dx * d1.y - dy * d1.x) / cross;
    Some((t, u))
}

/// Intersection point of the infinite lines `a0 a1` and `b0 b1`.
///
/// Returns `None` for parallel or degenerate lines.
#[must_use]
pub fn line_intersection(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> Option<Point2> {
    let da = a1 - a0;
    let db = b1 - b0;
    let (t, _) = line_line_intersect_2d(a0, &da, b0, &db)?;
    Some(a0 + da * t)
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` with `t` along `a0 → a1` and `u`
/// along `b0 → b1`, both clamped to `[0, 1]`. Endpoints count as inside.
/// Parallel (including collinear) segments report no intersection.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;
    let (t, u) = line_line_intersect_2d(a0, &da, b0, &db)?;
    let inside = |s: f64| (-TOLERANCE..=1.0 + TOLERANCE).contains(&s);
    if !inside(t) || !inside(u) {
        return None;
    }
    let t = t.clamp(0.0, 1.0);
    Some((a0 + da * t, t, u.clamp(0.0, 1.0)))
}

/// Whether both segments lie on one line: every endpoint of each is within
/// `tolerance` of the other's line. Degenerate segments never qualify.
#[must_use]
pub fn segments_collinear(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    tolerance: f64,
) -> bool {
    let off_line = |p0: &Point2, p1: &Point2, q: &Point2| {
        let d = p1 - p0;
        let len = d.norm();
        len >= TOLERANCE && cross(&d, &(q - p0)).abs() / len <= tolerance
    };
    off_line(a0, a1, b0) && off_line(a0, a1, b1) && off_line(b0, b1, a0) && off_line(b0, b1, a1)
}

/// Midpoint of the stretch two collinear segments share.
///
/// Returns `None` unless the shared stretch is longer than `min_length`, so
/// segments meeting end to end do not overlap.
#[must_use]
pub fn collinear_overlap(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
    min_length: f64,
) -> Option<Point2> {
    let da = a1 - a0;
    let len = da.norm();
    if len < TOLERANCE {
        return None;
    }
    let dir = da / len;
    let s0 = (b0 - a0).dot(&dir);
    let s1 = (b1 - a0).dot(&dir);
    let lo = s0.min(s1).max(0.0);
    let hi = s0.max(s1).min(len);
    (hi - lo > min_length).then(|| a0 + dir * (0.5 * (lo + hi)))
}
