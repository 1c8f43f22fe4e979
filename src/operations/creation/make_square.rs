use crate::math::{Point2, TOLERANCE};

/// Square room dragged out from an anchor.
///
/// The side length is the horizontal distance from the anchor to the cursor.
/// The square grows upwards (towards smaller `y`) when the cursor is at or
/// above the anchor and downwards otherwise.
#[derive(Debug)]
pub struct MakeSquare {
    anchor: Point2,
    cursor: Point2,
}

impl MakeSquare {
    /// Creates a new `MakeSquare` operation.
    #[must_use]
    pub fn new(anchor: Point2, cursor: Point2) -> Self {
        Self { anchor, cursor }
    }

    /// Side length the square would get.
    #[must_use]
    pub fn side(&self) -> f64 {
        (self.cursor.x - self.anchor.x).abs()
    }

    /// Corner opposite the anchor.
    #[must_use]
    pub fn far_corner(&self) -> Point2 {
        let dy = if self.cursor.y <= self.anchor.y {
            -self.side()
        } else {
            self.side()
        };
        Point2::new(self.cursor.x, self.anchor.y + dy)
    }

    /// Executes the operation, returning the four corners starting at the
    /// anchor and walking along the horizontal side first.
    ///
    /// Returns `None` when the side length is zero.
    #[must_use]
    pub fn execute(&self) -> Option<[Point2; 4]> {
        if self.side() < TOLERANCE {
            return None;
        }
        let far = self.far_corner();
        Some([
            self.anchor,
            Point2::new(far.x, self.anchor.y),
            far,
            Point2::new(self.anchor.x, far.y),
        ])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn cursor_below_grows_down() {
        let corners = MakeSquare::new(Point2::new(10.0, 10.0), Point2::new(-30.0, 50.0))
            .execute()
            .unwrap();
        assert_eq!(
            corners,
            [
                Point2::new(10.0, 10.0),
                Point2::new(-30.0, 10.0),
                Point2::new(-30.0, 50.0),
                Point2::new(10.0, 50.0),
            ]
        );
    }

    #[test]
    fn cursor_level_with_anchor_grows_up() {
        let op = MakeSquare::new(Point2::new(0.0, 0.0), Point2::new(40.0, 0.0));
        assert_eq!(op.far_corner(), Point2::new(40.0, -40.0));
    }

    #[test]
    fn zero_side_gives_nothing() {
        let op = MakeSquare::new(Point2::new(5.0, 5.0), Point2::new(5.0, 90.0));
        assert!(op.execute().is_none());
    }
}
