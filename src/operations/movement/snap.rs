use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_8};

use crate::math::distance_2d::{distance_to_line, project_to_line, relative_coords};
use crate::math::intersect_2d::line_intersection;
use crate::math::vector_2d::{direction_angle, polar};
use crate::math::{Point2, Vector2};
use crate::scene::{Polygon, PolygonId, Scene};

/// Rotations tried against a neighboring wall when snapping a single corner.
pub const POINT_SNAP_ANGLES: [f64; 5] = [0.0, FRAC_PI_8, FRAC_PI_4, FRAC_PI_2, 3.0 * FRAC_PI_4];

/// Priority of the corner where both neighboring alignment lines meet.
pub const INTERSECTION_PRIORITY: f64 = 0.5;

/// Priority of a wall segment landing on another room's wall.
pub const SEGMENT_PRIORITY: f64 = 1.0;

/// Priority of a projection onto a single alignment line.
pub const PROJECTION_PRIORITY: f64 = 2.0;

/// Tuning for the movement corrector.
#[derive(Debug, Clone, Copy)]
pub struct SnapParams {
    /// Alignment lines and weighted candidate distances must stay below this.
    pub radius: f64,
    /// The binary search stops once its interval is narrower than this.
    pub search_precision: f64,
}

impl Default for SnapParams {
    fn default() -> Self {
        Self {
            radius: 50.0,
            search_precision: 1.0,
        }
    }
}

/// A line the UI draws to show what a move snapped to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideLine {
    pub start: Point2,
    pub end: Point2,
}

impl GuideLine {
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }
}

/// A position the moved vertex may snap to.
///
/// Lower priority wins ties: candidates are ranked by distance times
/// priority.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionCandidate {
    pub position: Point2,
    pub guides: Vec<GuideLine>,
    pub priority: f64,
}

impl CorrectionCandidate {
    /// Distance from `point` weighted by the candidate's priority.
    #[must_use]
    pub fn weighted_distance(&self, point: &Point2) -> f64 {
        (self.position - point).norm() * self.priority
    }
}

/// Line through `pivot` closest to `target`, among the directions
/// `pivot → toward` rotated by each of [`POINT_SNAP_ANGLES`].
///
/// Only lines nearer than `radius` qualify.
#[must_use]
pub fn closest_direction(
    pivot: &Point2,
    toward: &Point2,
    target: &Point2,
    radius: f64,
) -> Option<(Point2, Point2)> {
    let start = direction_angle(pivot, toward);
    let mut best = None;
    let mut best_dist = radius;
    for angle in POINT_SNAP_ANGLES {
        let end = pivot + polar(start + angle, 1.0);
        let dist = distance_to_line(pivot, &end, target);
        if dist < best_dist {
            best_dist = dist;
            best = Some((*pivot, end));
        }
    }
    best
}

/// Snap candidates for moving the single vertex at `index` to `target`.
///
/// The alignment lines pass through the predecessor (based on the wall
/// before it) and through the successor (based on the wall after it).
#[must_use]
pub fn point_candidates(
    polygon: &Polygon,
    index: usize,
    target: &Point2,
    radius: f64,
) -> Vec<CorrectionCandidate> {
    let prev_index = polygon.prev_index(index);
    let next_index = polygon.next_index(index);
    let prev = polygon.position(prev_index);
    let prev2 = polygon.position(polygon.prev_index(prev_index));
    let next = polygon.position(next_index);
    let next2 = polygon.position(polygon.next_index(next_index));

    let before = closest_direction(&prev, &prev2, target, radius);
    let after = closest_direction(&next, &next2, target, radius);

    let mut out = Vec::with_capacity(3);
    if let (Some((b0, b1)), Some((a0, a1))) = (before, after) {
        if let Some(c) = line_intersection(&b0, &b1, &a0, &a1) {
            out.push(CorrectionCandidate {
                position: c,
                guides: vec![GuideLine::new(prev, c), GuideLine::new(c, next)],
                priority: INTERSECTION_PRIORITY,
            });
        }
    }
    if let Some((b0, b1)) = before {
        let c = project_to_line(target, &b0, &b1);
        out.push(CorrectionCandidate {
            position: c,
            guides: vec![GuideLine::new(c, prev), GuideLine::new(prev, prev2)],
            priority: PROJECTION_PRIORITY,
        });
    }
    if let Some((a0, a1)) = after {
        let c = project_to_line(target, &a0, &a1);
        out.push(CorrectionCandidate {
            position: c,
            guides: vec![GuideLine::new(c, next), GuideLine::new(next, next2)],
            priority: PROJECTION_PRIORITY,
        });
    }
    out
}

/// Snap candidate for a wall segment of polygon `id` whose endpoint sits at
/// `point` and moves along `offset`.
///
/// Looks for the nearest wall of another room that `point` lies alongside
/// (its projection falls within the wall) and returns where the movement
/// line meets that wall.
#[must_use]
pub fn segment_candidate(
    scene: &Scene,
    id: PolygonId,
    point: &Point2,
    offset: &Vector2,
    radius: f64,
) -> Option<CorrectionCandidate> {
    let mut best = None;
    let mut best_dist = radius;
    for (other_id, other) in scene.polygons() {
        if other_id == id {
            continue;
        }
        for j in 0..other.len() {
            let a = other.position(j);
            let b = other.position(other.next_index(j));
            let rel = relative_coords(&a, &b, point);
            if rel.x >= 0.0 && rel.x <= (b - a).norm() && rel.y.abs() < best_dist {
                best_dist = rel.y.abs();
                best = Some((a, b));
            }
        }
    }

    let (a, b) = best?;
    let c = line_intersection(&a, &b, point, &(point + offset))?;
    Some(CorrectionCandidate {
        position: c,
        guides: vec![GuideLine::new(a, b)],
        priority: SEGMENT_PRIORITY,
    })
}

/// Picks the candidate with the smallest weighted distance to `point`,
/// provided it is below `radius`.
#[must_use]
pub fn select_candidate<'c>(
    candidates: &'c [CorrectionCandidate],
    point: &Point2,
    radius: f64,
) -> Option<&'c CorrectionCandidate> {
    let mut best = None;
    let mut best_dist = radius;
    for candidate in candidates {
        let dist = candidate.weighted_distance(point);
        if dist < best_dist {
            best_dist = dist;
            best = Some(candidate);
        }
    }
    best
}
