use std::f64::consts::PI;

use crate::error::GeometryError;
use crate::math::distance_2d::project_to_line;
use crate::math::polygon_2d::{centroid, contains_point, shoelace_sum};
use crate::math::vector_2d::{direction_angle, normalize_angle, polar, rotate_about};
use crate::math::{Point2, Vector2, TOLERANCE};

use super::vertex::Vertex;

/// Thickness of the wall band drawn outside the room centerline.
pub const WALL_THICKNESS: f64 = 30.0;

/// Maximum tolerated deviation of the interior-angle sum from `(n - 2)·π`.
pub const ANGLE_SUM_TOLERANCE: f64 = 1e-6;

/// Converts the raw shoelace sum of world coordinates into displayed area
/// units (square feet).
pub const AREA_UNIT_FACTOR: f64 = 0.000_066_006_6 * 3.280_839_895_01;

/// Scale a polygon carries when none was persisted.
pub const DEFAULT_SCALE: f64 = 0.5;

/// Smallest scale `set_scale` accepts.
pub const MIN_SCALE: f64 = 0.1;

/// Vertex ordering of a polygon, in y-down screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    CounterClockwise,
}

/// Persisted form of a polygon.
///
/// Everything derived (orientation, angles, bisectors, outlines, area) is
/// rebuilt from `path` on load.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolygonData {
    pub path: Vec<Point2>,
    pub rotation: f64,
    pub scale: f64,
    pub label: String,
    pub locked: bool,
}

impl PolygonData {
    /// Creates a record with default metadata.
    #[must_use]
    pub fn new(path: Vec<Point2>) -> Self {
        Self {
            path,
            rotation: 0.0,
            scale: DEFAULT_SCALE,
            label: String::new(),
            locked: false,
        }
    }
}

/// A room: a closed circular sequence of at least three vertices together
/// with its derived wall outline and area.
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<Vertex>,
    orientation: Orientation,
    area: f64,
    label: String,
    locked: bool,
    scale: f64,
    rotation: f64,
    pub(crate) selected: bool,
    pub(crate) drag_anchor: Option<Point2>,
}

impl Polygon {
    /// Builds a polygon from an ordered vertex list.
    ///
    /// Orientation is fixed here and never re-derived: the vertex angles are
    /// summed assuming clockwise order and, if the sum is off, the polygon is
    /// taken as counter-clockwise.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InsufficientVertices` for fewer than 3 points
    /// and `GeometryError::NonFinite` if a coordinate is NaN or infinite.
    pub fn from_points(points: Vec<Point2>) -> Result<Self, GeometryError> {
        if points.len() < 3 {
            return Err(GeometryError::InsufficientVertices {
                found: points.len(),
                required: 3,
            });
        }
        if let Some(i) = points
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(GeometryError::NonFinite(i));
        }

        let mut polygon = Self {
            vertices: points.into_iter().map(Vertex::new).collect(),
            orientation: Orientation::Clockwise,
            area: 0.0,
            label: String::new(),
            locked: false,
            scale: DEFAULT_SCALE,
            rotation: 0.0,
            selected: false,
            drag_anchor: None,
        };
        if !polygon.can_exist() {
            polygon.orientation = Orientation::CounterClockwise;
        }
        polygon.refresh_outline();
        Ok(polygon)
    }

    /// Rebuilds a polygon and its metadata from a persisted record.
    ///
    /// A persisted scale below [`MIN_SCALE`], or NaN, is raised to it.
    ///
    /// # Errors
    ///
    /// Same as [`Polygon::from_points`].
    pub fn from_data(data: &PolygonData) -> Result<Self, GeometryError> {
        let mut polygon = Self::from_points(data.path.clone())?;
        polygon.rotation = data.rotation;
        polygon.scale = data.scale.max(MIN_SCALE);
        polygon.label.clone_from(&data.label);
        polygon.locked = data.locked;
        Ok(polygon)
    }

    /// Snapshot for the serialization collaborator.
    #[must_use]
    pub fn to_data(&self) -> PolygonData {
        PolygonData {
            path: self.positions(),
            rotation: self.rotation,
            scale: self.scale,
            label: self.label.clone(),
            locked: self.locked,
        }
    }

    // --- Accessors ---

    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[must_use]
    pub fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    /// Position of the vertex at `index`, wrapping around the ring.
    #[must_use]
    pub fn position(&self, index: usize) -> Point2 {
        self.vertices[index % self.vertices.len()].position
    }

    #[must_use]
    pub fn positions(&self) -> Vec<Point2> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    #[must_use]
    pub fn prev_index(&self, index: usize) -> usize {
        let n = self.vertices.len();
        (index + n - 1) % n
    }

    #[must_use]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.vertices.len()
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub fn is_clockwise(&self) -> bool {
        self.orientation == Orientation::Clockwise
    }

    /// Area in display units, rounded to two decimals.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.area
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    #[must_use]
    pub fn centroid(&self) -> Point2 {
        centroid(&self.positions())
    }

    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        contains_point(&self.positions(), p)
    }

    /// Outline band as a closed point sequence: `a`, `b` of every vertex in
    /// order.
    #[must_use]
    pub fn outline(&self) -> Vec<Point2> {
        self.vertices
            .iter()
            .flat_map(|v| [v.outline_a, v.outline_b])
            .collect()
    }

    // --- Angles ---

    /// Interior angle at `index`, in `[0, 2π)`.
    #[must_use]
    pub fn interior_angle(&self, index: usize) -> f64 {
        let prev = self.position(self.prev_index(index));
        let cur = self.position(index);
        let next = self.position(self.next_index(index));
        let delta = direction_angle(&cur, &next) - direction_angle(&prev, &cur);
        let raw = match self.orientation {
            Orientation::Clockwise => 3.0 * PI - delta,
            Orientation::CounterClockwise => 3.0 * PI + delta,
        };
        normalize_angle(raw)
    }

    /// Interior angle at `index` as a whole-degree readout in `[0, 360)`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn interior_angle_degrees(&self, index: usize) -> u32 {
        (self.interior_angle(index).to_degrees().round() as u32) % 360
    }

    #[must_use]
    pub fn angle_sum(&self) -> f64 {
        (0..self.vertices.len())
            .map(|i| self.interior_angle(i))
            .sum()
    }

    /// Whether the interior angles add up to `(n - 2)·π`.
    ///
    /// Necessary for a simple polygon, not sufficient: callers that need a
    /// crossing-free ring also run the edge scan in
    /// [`Scene::vertex_intersection`](super::Scene::vertex_intersection).
    #[must_use]
    pub fn can_exist(&self) -> bool {
        #[allow(clippy::cast_precision_loss)]
        let expected = PI * (self.vertices.len() as f64 - 2.0);
        (self.angle_sum() - expected).abs() <= ANGLE_SUM_TOLERANCE
    }

    // --- Derived outline ---

    pub(crate) fn update_bisector(&mut self, index: usize) {
        let angle = self.interior_angle(index);
        let outer = 2.0 * PI - angle;
        let length = WALL_THICKNESS / (outer / 2.0 - PI / 2.0).cos();

        let cur = self.position(index);
        let next = self.position(self.next_index(index));
        let theta2 = direction_angle(&cur, &next);
        let theta = match self.orientation {
            Orientation::Clockwise => theta2 + angle / 2.0,
            Orientation::CounterClockwise => theta2 - angle / 2.0,
        };

        let v = &mut self.vertices[index];
        v.bisector_dir = polar(theta, 1.0);
        v.bisector_length = length;
    }

    /// The wall `from → to` shifted outwards by the wall thickness.
    fn offset_wall(&self, from: usize, to: usize) -> (Point2, Point2) {
        let a = self.position(from);
        let b = self.position(to);
        let d = b - a;
        let len = d.norm();
        if len < TOLERANCE {
            return (a, b);
        }
        let right = Vector2::new(d.y, -d.x) / len;
        let normal = match self.orientation {
            Orientation::Clockwise => right,
            Orientation::CounterClockwise => -right,
        } * WALL_THICKNESS;
        (a + normal, b + normal)
    }

    /// Outline pair of a corner.
    ///
    /// A corner whose bisector fits within twice the wall thickness gets the
    /// miter point for both. Sharper corners are capped: the bisector is cut
    /// at `2T` and the cap point is projected onto each offset wall line,
    /// which bevels the tip.
    pub(crate) fn update_outline(&mut self, index: usize) {
        let v = &self.vertices[index];
        let max = 2.0 * WALL_THICKNESS;
        let (a, b) = if v.bisector_length.is_finite() && v.bisector_length.abs() <= max {
            let miter = v.position - v.bisector_dir * v.bisector_length;
            (miter, miter)
        } else {
            let cap = v.position - v.bisector_dir * max;
            let (p0, p1) = self.offset_wall(self.prev_index(index), index);
            let (n0, n1) = self.offset_wall(index, self.next_index(index));
            (project_to_line(&cap, &p0, &p1), project_to_line(&cap, &n0, &n1))
        };
        let v = &mut self.vertices[index];
        v.outline_a = a;
        v.outline_b = b;
    }

    pub(crate) fn update_area(&mut self) {
        let raw = (shoelace_sum(&self.positions()) * AREA_UNIT_FACTOR).abs();
        self.area = (raw * 100.0).round() / 100.0;
    }

    /// Recomputes every bisector, then every outline, then the area.
    pub fn refresh_outline(&mut self) {
        for i in 0..self.vertices.len() {
            self.update_bisector(i);
        }
        for i in 0..self.vertices.len() {
            self.update_outline(i);
        }
        self.update_area();
    }

    /// Recomputes the vertices whose derived state depends on the positions
    /// of `index` and its successor: predecessor, `index`, successor and the
    /// successor's successor.
    pub(crate) fn refresh_around(&mut self, index: usize) {
        let prev = self.prev_index(index);
        let next = self.next_index(index);
        let next2 = self.next_index(next);
        let affected = [prev, index, next, next2];
        for &i in &affected {
            self.update_bisector(i);
        }
        for &i in &affected {
            self.update_outline(i);
        }
        self.update_area();
    }

    pub(crate) fn vertices_mut(&mut self) -> &mut [Vertex] {
        &mut self.vertices
    }

    pub(crate) fn set_position(&mut self, index: usize, p: Point2) {
        self.vertices[index].position = p;
    }

    // --- Whole-polygon edits ---

    /// Shifts every vertex and outline point by `delta`. Locked polygons stay
    /// put.
    pub fn translate(&mut self, delta: &Vector2) {
        if self.locked {
            return;
        }
        for v in &mut self.vertices {
            v.position += delta;
            v.outline_a += delta;
            v.outline_b += delta;
        }
    }

    /// Rescales the polygon about its centroid to `scale`, relative to the
    /// current scale. Values below [`MIN_SCALE`] are raised to it.
    pub fn set_scale(&mut self, scale: f64) {
        if self.locked {
            return;
        }
        let scale = scale.max(MIN_SCALE);
        let center = self.centroid();
        let factor = scale / self.scale;
        for v in &mut self.vertices {
            v.position = center + (v.position - center) * factor;
        }
        self.scale = scale;
        self.refresh_outline();
    }

    /// Rotates the polygon about its centroid to `rotation`, expressed as a
    /// fraction of π and applied relative to the current rotation.
    pub fn set_rotation(&mut self, rotation: f64) {
        if self.locked {
            return;
        }
        let alpha = PI * (rotation - self.rotation);
        let center = self.centroid();
        for v in &mut self.vertices {
            v.position = rotate_about(&v.position, &center, alpha);
        }
        self.rotation = rotation;
        self.refresh_outline();
    }
}
