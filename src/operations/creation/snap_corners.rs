use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use crate::math::distance_2d::{distance_to_line, project_to_line};
use crate::math::intersect_2d::line_intersection;
use crate::math::vector_2d::rotate;
use crate::math::Point2;

/// Directions a wall may take relative to its predecessor.
const CORNER_ANGLES: [f64; 5] = [0.0, FRAC_PI_4, FRAC_PI_2, 3.0 * FRAC_PI_4, PI];

/// Straightens a freshly simplified outline so every corner turns by a
/// multiple of 45°.
///
/// Each step looks at three consecutive corners `a`, `b`, `c` and moves `c`
/// onto the allowed line through `b` that is closest to it. The window wraps
/// around the ring, so the first corner is projected too (by the step at
/// `n - 2`). The last step places the second corner where its allowed line
/// meets the wall towards the third, instead of projecting.
#[derive(Debug)]
pub struct SnapCorners<'a> {
    points: &'a [Point2],
}

impl<'a> SnapCorners<'a> {
    #[must_use]
    pub fn new(points: &'a [Point2]) -> Self {
        Self { points }
    }

    /// Executes the pass and returns the adjusted corners.
    ///
    /// Inputs with fewer than 3 points are returned unchanged.
    #[must_use]
    pub fn execute(&self) -> Vec<Point2> {
        let mut p = self.points.to_vec();
        let n = p.len();
        if n < 3 {
            return p;
        }

        for i in 0..n {
            let a = p[i];
            let b = p[(i + 1) % n];
            let c = p[(i + 2) % n];
            let (l0, l1) = best_direction(&a, &b, &c);
            p[(i + 2) % n] = if i < n - 1 {
                project_to_line(&c, &l0, &l1)
            } else {
                let d = p[(i + 3) % n];
                line_intersection(&c, &d, &l0, &l1).unwrap_or(c)
            };
        }
        p
    }
}

/// Line through `b` whose direction, taken from `b → a` rotated by one of
/// the allowed corner angles, passes closest to `c`.
fn best_direction(a: &Point2, b: &Point2, c: &Point2) -> (Point2, Point2) {
    let back = a - b;
    let mut best = (*b, *a);
    let mut best_dist = f64::MAX;
    for angle in CORNER_ANGLES {
        let end = b + rotate(&back, angle);
        let dist = distance_to_line(b, &end, c);
        if dist < best_dist {
            best_dist = dist;
            best = (*b, end);
        }
    }
    best
}
