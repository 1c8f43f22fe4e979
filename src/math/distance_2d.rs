use super::{Point2, Vector2, TOLERANCE};

/// Coordinates of `p` in the frame of the directed segment `a → b`.
///
/// `x` is the distance along the segment measured from `a`, `y` the signed
/// perpendicular distance (positive to the left of `a → b` in y-up terms).
/// For a degenerate segment, `x = 0` and `y = |p - a|`.
#[must_use]
pub fn relative_coords(a: &Point2, b: &Point2, p: &Point2) -> Vector2 {
    let d = b - a;
    let len = d.norm();
    let ap = p - a;
    if len < TOLERANCE {
        return Vector2::new(0.0, ap.norm());
    }
    let u = d / len;
    Vector2::new(ap.dot(&u), u.x * ap.y - u.y * ap.x)
}

/// Perpendicular distance from `p` to the infinite line through `a` and `b`.
#[must_use]
pub fn distance_to_line(a: &Point2, b: &Point2, p: &Point2) -> f64 {
    relative_coords(a, b, p).y.abs()
}

/// Orthogonal projection of `p` onto the infinite line through `a` and `b`.
///
/// Returns `a` when the line is degenerate.
#[must_use]
pub fn project_to_line(p: &Point2, a: &Point2, b: &Point2) -> Point2 {
    let d = b - a;
    let len_sq = d.norm_squared();
    if len_sq < TOLERANCE * TOLERANCE {
        return *a;
    }
    let t = (p - a).dot(&d) / len_sq;
    a + d * t
}

/// Component of `to - a` perpendicular to the segment `a → b`.
///
/// Shifting both endpoints by this offset keeps the segment's direction and
/// length while moving it as close to `to` as a parallel translation allows.
#[must_use]
pub fn segment_offset(a: &Point2, b: &Point2, to: &Point2) -> Vector2 {
    let delta = to - a;
    let d = b - a;
    let len_sq = d.norm_squared();
    if len_sq < TOLERANCE * TOLERANCE {
        return delta;
    }
    delta - d * (delta.dot(&d) / len_sq)
}
