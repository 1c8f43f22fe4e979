use crate::math::vector_2d::angle_between;
use crate::math::Point2;

use super::SnapCorners;

/// Thresholds for turning a freehand stroke into polygon corners.
///
/// Distances are in screen pixels: they are divided by the view scale so the
/// tolerance feels the same at every zoom level.
#[derive(Debug, Clone, Copy)]
pub struct SimplifyParams {
    /// Minimum spacing between a new corner and the previous one.
    pub min_corner_distance: f64,
    /// A corner this close to the stroke's start closes the stroke early.
    pub close_distance: f64,
    /// Minimum turn (radians) for a point to count as a corner.
    pub min_turn_angle: f64,
}

impl Default for SimplifyParams {
    fn default() -> Self {
        Self {
            min_corner_distance: 50.0,
            close_distance: 80.0,
            min_turn_angle: 30.0_f64.to_radians(),
        }
    }
}

/// Reduces a raw stroke to the corners of a closed polygon.
#[derive(Debug)]
pub struct SimplifyPath<'a> {
    points: &'a [Point2],
    view_scale: f64,
    params: SimplifyParams,
    snap_corners: bool,
}

impl<'a> SimplifyPath<'a> {
    /// Creates a new `SimplifyPath` operation with default thresholds and
    /// corner snapping enabled.
    #[must_use]
    pub fn new(points: &'a [Point2], view_scale: f64) -> Self {
        Self {
            points,
            view_scale,
            params: SimplifyParams::default(),
            snap_corners: true,
        }
    }

    /// Sets custom thresholds.
    #[must_use]
    pub fn with_params(mut self, params: SimplifyParams) -> Self {
        self.params = params;
        self
    }

    /// Enables or disables the corner straightening pass.
    #[must_use]
    pub fn with_corner_snapping(mut self, enabled: bool) -> Self {
        self.snap_corners = enabled;
        self
    }

    /// Executes the simplification.
    ///
    /// Returns `None` if the stroke has fewer than 3 points or fewer than 3
    /// corners survive.
    #[must_use]
    pub fn execute(&self) -> Option<Vec<Point2>> {
        if self.points.len() < 3 {
            return None;
        }
        let min_dist = self.params.min_corner_distance / self.view_scale;
        let close_dist = self.params.close_distance / self.view_scale;

        let origin = self.points[0];
        let mut pivot = origin;
        let mut out = vec![origin];

        for pair in self.points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let turn = angle_between(&pivot, &a, &a, &b);
            let dist = (a - pivot)
                .norm()
                .min((b - pivot).norm())
                .min((b - origin).norm());
            if dist > min_dist && turn > self.params.min_turn_angle {
                out.push(b);
                pivot = a;
            }
            let closes = out
                .last()
                .is_some_and(|last| (last - origin).norm() < close_dist);
            if out.len() > 1 && closes {
                out.pop();
            }
        }

        if out.len() < 3 {
            return None;
        }
        if self.snap_corners {
            out = SnapCorners::new(&out).execute();
        }
        Some(out)
    }
}
