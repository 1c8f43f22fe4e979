use crate::math::{Point2, Vector2};

/// A corner of a room polygon.
///
/// Neighbors are implicit: a vertex at index `i` of its polygon is connected
/// to `i - 1` and `i + 1` (modulo the vertex count). The bisector and the
/// outline points are derived from the three positions and are refreshed by
/// the owning [`Polygon`](super::Polygon).
#[derive(Debug, Clone)]
pub struct Vertex {
    pub(crate) position: Point2,
    pub(crate) selected: bool,
    pub(crate) bisector_dir: Vector2,
    pub(crate) bisector_length: f64,
    pub(crate) outline_a: Point2,
    pub(crate) outline_b: Point2,
}

impl Vertex {
    pub(crate) fn new(position: Point2) -> Self {
        Self {
            position,
            selected: false,
            bisector_dir: Vector2::zeros(),
            bisector_length: 0.0,
            outline_a: position,
            outline_b: position,
        }
    }

    /// Centerline position.
    #[must_use]
    pub fn position(&self) -> Point2 {
        self.position
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Unit direction of the interior-angle bisector.
    #[must_use]
    pub fn bisector_direction(&self) -> Vector2 {
        self.bisector_dir
    }

    /// Length of the bisector that keeps the wall band at constant
    /// thickness. Diverges for near-degenerate corners.
    #[must_use]
    pub fn bisector_length(&self) -> f64 {
        self.bisector_length
    }

    /// Bisector as a vector (direction times length).
    #[must_use]
    pub fn bisector(&self) -> Vector2 {
        self.bisector_dir * self.bisector_length
    }

    /// Outline point on the predecessor side.
    #[must_use]
    pub fn outline_a(&self) -> Point2 {
        self.outline_a
    }

    /// Outline point on the successor side.
    #[must_use]
    pub fn outline_b(&self) -> Point2 {
        self.outline_b
    }
}
