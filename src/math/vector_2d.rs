use std::f64::consts::PI;

use nalgebra::Rotation2;

use super::{Point2, Vector2, TOLERANCE};

/// Direction angle of the vector from `a` to `b`, in `(-π, π]`.
#[must_use]
pub fn direction_angle(a: &Point2, b: &Point2) -> f64 {
    let d = b - a;
    d.y.atan2(d.x)
}

/// Vector of the given length pointing along `theta`.
#[must_use]
pub fn polar(theta: f64, length: f64) -> Vector2 {
    Vector2::new(theta.cos() * length, theta.sin() * length)
}

/// Rotates `v` counter-clockwise (in y-up terms) by `angle` radians.
#[must_use]
pub fn rotate(v: &Vector2, angle: f64) -> Vector2 {
    Rotation2::new(angle) * v
}

/// Rotates `p` about `center` by `angle` radians.
#[must_use]
pub fn rotate_about(p: &Point2, center: &Point2, angle: f64) -> Point2 {
    center + rotate(&(p - center), angle)
}

/// Returns `v` rescaled to `length`.
///
/// A negative length flips the direction. A zero-length input stays zero.
#[must_use]
pub fn with_length(v: &Vector2, length: f64) -> Vector2 {
    let norm = v.norm();
    if norm < TOLERANCE {
        return Vector2::zeros();
    }
    v * (length / norm)
}

/// Unsigned angle in `[0, π]` between direction `a0 → a1` and direction
/// `b0 → b1`.
///
/// Returns `0` when either direction is degenerate.
#[must_use]
pub fn angle_between(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> f64 {
    let u = a1 - a0;
    let v = b1 - b0;
    if u.norm() < TOLERANCE || v.norm() < TOLERANCE {
        return 0.0;
    }
    cross(&u, &v).abs().atan2(u.dot(&v))
}

/// Normalizes an angle into `[0, 2π)`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(2.0 * PI);
    if a >= 2.0 * PI {
        0.0
    } else {
        a
    }
}

/// Scalar cross product `a × b`.
#[must_use]
pub fn cross(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}
