pub mod handle;
pub mod polygon;
pub mod vertex;

pub use handle::{Handle, VertexHandle};
pub use polygon::{
    Orientation, Polygon, PolygonData, ANGLE_SUM_TOLERANCE, AREA_UNIT_FACTOR, WALL_THICKNESS,
};
pub use vertex::Vertex;

use slotmap::SlotMap;
use tracing::debug;

use crate::error::{Result, SceneError};
use crate::math::intersect_2d::{collinear_overlap, segment_segment_intersect_2d, segments_collinear};
use crate::math::polygon_2d::shoelace_sum;
use crate::math::vector_2d::{angle_between, cross};
use crate::math::{Point2, POINT_TOLERANCE, TOLERANCE};
use crate::operations::creation::{MakeSquare, SimplifyPath};
use crate::operations::movement::GuideLine;
use crate::operations::query::{Pick, PickParams, PickTarget};

slotmap::new_key_type! {
    /// Unique identifier for a polygon in the scene.
    pub struct PolygonId;
}

/// Interior angles closer than this to a full reversal count as a fault.
const SPIKE_ANGLE_DEGREES: f64 = 1.0;

/// Every room currently present, plus the active selection.
///
/// Polygons reference nothing outside themselves; operations that need to
/// look at other rooms (validity, snapping, hit testing) take the scene as a
/// parameter.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    polygons: SlotMap<PolygonId, Polygon>,
    selection: Vec<Handle>,
}

impl Scene {
    /// Creates a new, empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a scene from persisted records.
    ///
    /// # Errors
    ///
    /// Returns an error if any record has fewer than 3 or non-finite points.
    pub fn from_data(records: &[PolygonData]) -> Result<Self> {
        let mut scene = Self::new();
        for record in records {
            scene.add_polygon(Polygon::from_data(record)?);
        }
        Ok(scene)
    }

    /// Snapshot of every polygon for the serialization collaborator.
    #[must_use]
    pub fn to_data(&self) -> Vec<PolygonData> {
        self.polygons.values().map(Polygon::to_data).collect()
    }

    // --- Polygon operations ---

    /// Inserts a polygon unconditionally and returns its ID.
    pub fn add_polygon(&mut self, polygon: Polygon) -> PolygonId {
        self.polygons.insert(polygon)
    }

    /// Inserts a polygon only if none of its edges crosses itself or another
    /// room.
    pub fn add_polygon_checked(&mut self, polygon: Polygon) -> Option<PolygonId> {
        let id = self.polygons.insert(polygon);
        if let Some(hit) = self.hit_in_polygon(id) {
            debug!(x = hit.x, y = hit.y, "new polygon intersects the scene, discarded");
            self.polygons.remove(id);
            return None;
        }
        Some(id)
    }

    /// Turns a freehand stroke into a room.
    ///
    /// Returns `None` when the stroke simplifies to fewer than 3 vertices or
    /// the resulting polygon would cross an existing wall.
    pub fn add_stroke(&mut self, stroke: &[Point2], view_scale: f64) -> Option<PolygonId> {
        let Some(points) = SimplifyPath::new(stroke, view_scale).execute() else {
            debug!(points = stroke.len(), "stroke too short for a polygon");
            return None;
        };
        let polygon = Polygon::from_points(points).ok()?;
        self.add_polygon_checked(polygon)
    }

    /// Places a square room dragged out from `anchor` to `cursor`.
    pub fn add_square(&mut self, anchor: Point2, cursor: Point2) -> Option<PolygonId> {
        let corners = MakeSquare::new(anchor, cursor).execute()?;
        let polygon = Polygon::from_points(corners.to_vec()).ok()?;
        self.add_polygon_checked(polygon)
    }

    /// Removes a polygon and drops any selection entries that point at it.
    pub fn remove_polygon(&mut self, id: PolygonId) -> Option<Polygon> {
        let removed = self.polygons.remove(id)?;
        self.selection.retain(|h| h.polygon() != id);
        debug!(vertices = removed.len(), "polygon removed");
        Some(removed)
    }

    /// Returns a reference to the polygon, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the polygon is not in the scene.
    pub fn polygon(&self, id: PolygonId) -> std::result::Result<&Polygon, SceneError> {
        self.polygons.get(id).ok_or(SceneError::PolygonNotFound)
    }

    /// Returns a mutable reference to the polygon, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the polygon is not in the scene.
    pub fn polygon_mut(&mut self, id: PolygonId) -> std::result::Result<&mut Polygon, SceneError> {
        self.polygons.get_mut(id).ok_or(SceneError::PolygonNotFound)
    }

    pub fn polygons(&self) -> impl Iterator<Item = (PolygonId, &Polygon)> {
        self.polygons.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    // --- Intersection queries ---

    /// Reports a fault at a vertex: its corner folds back on itself (within
    /// 1° of a full reversal), or its outgoing edge meets another wall where
    /// it may not.
    ///
    /// Within one room only the corner shared with the neighboring wall is
    /// allowed. Against another room, walls may touch at corners or lie
    /// flush back to back, but must neither cross nor run into that room.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale.
    pub fn vertex_intersection(
        &self,
        handle: VertexHandle,
    ) -> std::result::Result<Option<Point2>, SceneError> {
        handle.check(self)?;
        Ok(self.hit_at(handle.polygon, handle.index))
    }

    /// First fault over all vertices of a polygon.
    ///
    /// # Errors
    ///
    /// Returns an error if the polygon is not in the scene.
    pub fn polygon_intersection(
        &self,
        id: PolygonId,
    ) -> std::result::Result<Option<Point2>, SceneError> {
        self.polygon(id)?;
        Ok(self.hit_in_polygon(id))
    }

    fn hit_in_polygon(&self, id: PolygonId) -> Option<Point2> {
        let n = self.polygons.get(id)?.len();
        (0..n).find_map(|i| self.hit_at(id, i))
    }

    pub(crate) fn hit_at(&self, id: PolygonId, index: usize) -> Option<Point2> {
        let polygon = self.polygons.get(id)?;
        let index = index % polygon.len();
        let p = polygon.position(index);
        let next = polygon.position(polygon.next_index(index));
        let prev = polygon.position(polygon.prev_index(index));

        if angle_between(&p, &next, &p, &prev) <= SPIKE_ANGLE_DEGREES.to_radians() {
            return Some(p);
        }

        let wall = Wall::new(p, next, winding(polygon));
        for (other_id, other) in &self.polygons {
            let other_winding = winding(other);
            for j in 0..other.len() {
                if other_id == id && j == index {
                    continue;
                }
                let against = Wall::new(
                    other.position(j),
                    other.position(other.next_index(j)),
                    other_winding,
                );
                let hit = if other_id == id {
                    wall.self_contact(&against)
                } else {
                    wall.room_contact(&against)
                };
                if hit.is_some() {
                    return hit;
                }
            }
        }
        None
    }

    // --- Selection ---

    /// Handles in the order they were selected.
    #[must_use]
    pub fn selection(&self) -> &[Handle] {
        &self.selection
    }

    pub(crate) fn selection_mut(&mut self) -> &mut Vec<Handle> {
        &mut self.selection
    }

    /// Deselects everything. Stale handles are dropped silently.
    pub fn clear_selection(&mut self) {
        for handle in self.selection.clone() {
            if handle.select(self, false).is_err() {
                debug!(?handle, "stale handle dropped from selection");
            }
        }
        self.selection.clear();
    }

    /// Selects the wall segment starting at `handle`: the vertex goes into the
    /// selection, its successor is flagged so drags move the whole segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale.
    pub fn select_segment(&mut self, handle: VertexHandle) -> Result<()> {
        Handle::Vertex(handle).select(self, true)?;
        let polygon = self.polygon_mut(handle.polygon)?;
        let next = polygon.next_index(handle.index);
        polygon.vertices_mut()[next].selected = true;
        Ok(())
    }

    /// Press at `point`: replaces the selection with whatever lies under it,
    /// using the default pick radii.
    pub fn press(&mut self, point: Point2, view_scale: f64) -> Option<Handle> {
        self.press_with(point, view_scale, &PickParams::default())
    }

    /// Press with explicit pick radii.
    pub fn press_with(
        &mut self,
        point: Point2,
        view_scale: f64,
        params: &PickParams,
    ) -> Option<Handle> {
        self.clear_selection();
        let target = Pick::new(point, view_scale)
            .with_params(*params)
            .execute(self)?;
        let selected = match target {
            PickTarget::Vertex(h) => Handle::Vertex(h).select(self, true).map(|()| Handle::Vertex(h)),
            PickTarget::Segment(h) => self.select_segment(h).map(|()| Handle::Vertex(h)),
            PickTarget::Polygon(id) => Handle::Polygon(id).select(self, true).map(|()| Handle::Polygon(id)),
        };
        selected.ok()
    }

    /// Drag tick: moves every selected handle towards `point` and returns the
    /// guide lines produced by snapping.
    ///
    /// # Errors
    ///
    /// Returns an error if a selected handle is stale.
    pub fn drag(&mut self, point: Point2) -> Result<Vec<GuideLine>> {
        let mut guides = Vec::new();
        for handle in self.selection.clone() {
            guides.extend(handle.move_to(self, point)?);
        }
        Ok(guides)
    }

    /// Removes the polygon owning the first selected handle.
    pub fn delete_selected(&mut self) -> Option<Polygon> {
        let id = self.selection.first()?.polygon();
        self.clear_selection();
        self.remove_polygon(id)
    }

    /// Toggles the lock of the polygon owning the first selected handle and
    /// returns the new state.
    pub fn toggle_lock_selected(&mut self) -> Option<bool> {
        let id = self.selection.first()?.polygon();
        let polygon = self.polygons.get_mut(id)?;
        let locked = !polygon.is_locked();
        polygon.set_locked(locked);
        Some(locked)
    }
}

/// `+1` for rooms whose shoelace sum is positive, `-1` otherwise.
fn winding(polygon: &Polygon) -> f64 {
    shoelace_sum(&polygon.positions()).signum()
}

/// A wall segment together with the side its room lies on.
#[derive(Debug, Clone, Copy)]
struct Wall {
    start: Point2,
    end: Point2,
    /// `+1` when the room lies left of `start → end` (positive cross
    /// product), `-1` otherwise.
    interior: f64,
}

impl Wall {
    fn new(start: Point2, end: Point2, interior: f64) -> Self {
        Self {
            start,
            end,
            interior,
        }
    }

    /// Signed distance of `q` from the wall's line, positive inside the room.
    fn depth(&self, q: &Point2) -> f64 {
        let d = self.end - self.start;
        let len = d.norm();
        if len < TOLERANCE {
            return 0.0;
        }
        cross(&d, &(q - self.start)) / len * self.interior
    }

    /// The opposite endpoint when `c` sits on one of the wall's endpoints.
    fn far_end(&self, c: &Point2) -> Option<Point2> {
        if (c - self.start).norm() < POINT_TOLERANCE {
            Some(self.end)
        } else if (c - self.end).norm() < POINT_TOLERANCE {
            Some(self.start)
        } else {
            None
        }
    }

    fn collinear_with(&self, other: &Wall) -> bool {
        segments_collinear(&self.start, &self.end, &other.start, &other.end, POINT_TOLERANCE)
    }

    /// Contact between two walls of one room. Anything but the corner two
    /// walls share is a fault.
    fn self_contact(&self, other: &Wall) -> Option<Point2> {
        if self.collinear_with(other) {
            return collinear_overlap(&self.start, &self.end, &other.start, &other.end, POINT_TOLERANCE);
        }
        let (c, _, _) = segment_segment_intersect_2d(&self.start, &self.end, &other.start, &other.end)?;
        let shared = [self.start, self.end].iter().any(|p| {
            (c - p).norm() < POINT_TOLERANCE
                && [other.start, other.end].iter().any(|q| (p - q).norm() < POINT_TOLERANCE)
        });
        (!shared).then_some(c)
    }

    /// Contact between walls of two rooms.
    ///
    /// Walls may touch: corner on corner, corner on wall, or flush back to
    /// back. It is a fault when they cross, or when a wall leaves the
    /// contact towards the inside of the other room. The result does not
    /// depend on which of the two walls is `self`.
    fn room_contact(&self, other: &Wall) -> Option<Point2> {
        if self.collinear_with(other) {
            let mid = collinear_overlap(&self.start, &self.end, &other.start, &other.end, POINT_TOLERANCE)?;
            let along = (self.end - self.start).dot(&(other.end - other.start));
            return (self.interior * other.interior * along > 0.0).then_some(mid);
        }
        let (c, _, _) = segment_segment_intersect_2d(&self.start, &self.end, &other.start, &other.end)?;
        match (self.far_end(&c), other.far_end(&c)) {
            (Some(_), Some(_)) => None,
            (None, None) => Some(c),
            (Some(far), None) => (other.depth(&far) > POINT_TOLERANCE).then_some(c),
            (None, Some(far)) => (self.depth(&far) > POINT_TOLERANCE).then_some(c),
        }
    }
}
