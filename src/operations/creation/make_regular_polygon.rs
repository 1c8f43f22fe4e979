use crate::error::Result;
use crate::math::polygon_2d::regular_polygon;
use crate::math::Point2;
use crate::scene::Polygon;

/// Builds a room whose corners are evenly spaced on a circle.
#[derive(Debug)]
pub struct MakeRegularPolygon {
    sides: usize,
    radius: f64,
    center: Point2,
}

impl MakeRegularPolygon {
    /// Creates a new `MakeRegularPolygon` operation.
    #[must_use]
    pub fn new(sides: usize, radius: f64, center: Point2) -> Self {
        Self {
            sides,
            radius,
            center,
        }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InsufficientVertices` for fewer than 3 sides
    /// and `GeometryError::NonFinite` for a non-finite radius or center.
    pub fn execute(&self) -> Result<Polygon> {
        let points = regular_polygon(self.sides, self.radius, &self.center);
        Ok(Polygon::from_points(points)?)
    }
}
