//! Interactive vertex and wall-segment movement.
//!
//! A drag tick never leaves the scene invalid: the requested move is tried
//! first, shortened by binary search if it would fold or cross a wall,
//! committed, then optionally snapped to an alignment line. A snap that
//! would break validity is dropped again.

mod search;
mod snap;

pub use search::{search_valid_length, try_search_valid_length};
pub use snap::{
    closest_direction, point_candidates, segment_candidate, select_candidate,
    CorrectionCandidate, GuideLine, SnapParams, INTERSECTION_PRIORITY, POINT_SNAP_ANGLES,
    PROJECTION_PRIORITY, SEGMENT_PRIORITY,
};

use tracing::{debug, trace};

use crate::error::{Result, SceneError};
use crate::math::distance_2d::segment_offset;
use crate::math::vector_2d::with_length;
use crate::math::{Point2, Vector2};
use crate::scene::{PolygonId, Scene, VertexHandle};

/// How far a move got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStatus {
    /// The whole requested displacement was applied.
    Full,
    /// The displacement was shortened to stay valid.
    Clamped,
    /// No displacement was valid; nothing moved.
    Blocked,
    /// The polygon is locked; nothing moved.
    Locked,
}

/// Result of one drag tick.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveOutcome {
    pub status: MoveStatus,
    /// Length of the displacement towards the destination.
    pub requested_length: f64,
    /// Length actually committed before snapping.
    pub applied_length: f64,
    /// Whether a snap candidate was applied and kept.
    pub snapped: bool,
    /// Guide lines of the kept snap, empty otherwise.
    pub guides: Vec<GuideLine>,
}

impl MoveOutcome {
    fn unmoved(status: MoveStatus, requested_length: f64) -> Self {
        Self {
            status,
            requested_length,
            applied_length: 0.0,
            snapped: false,
            guides: Vec::new(),
        }
    }
}

/// Moves a vertex towards a destination, or the wall segment starting at it
/// when its successor is selected too.
///
/// In segment mode both endpoints shift by the part of the displacement
/// perpendicular to the segment, so the wall keeps its direction and length.
#[derive(Debug)]
pub struct MoveVertex {
    handle: VertexHandle,
    destination: Point2,
    params: SnapParams,
}

impl MoveVertex {
    /// Creates a new `MoveVertex` operation with default snap settings.
    #[must_use]
    pub fn new(handle: VertexHandle, destination: Point2) -> Self {
        Self {
            handle,
            destination,
            params: SnapParams::default(),
        }
    }

    /// Sets custom snap settings.
    #[must_use]
    pub fn with_params(mut self, params: SnapParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the move against the whole scene.
    ///
    /// Geometric rejections are not errors: they show up as
    /// [`MoveStatus::Clamped`], [`MoveStatus::Blocked`] or
    /// [`MoveStatus::Locked`].
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale.
    pub fn execute(&self, scene: &mut Scene) -> Result<MoveOutcome> {
        self.handle.check(scene)?;
        let trial = Trial::new(scene, self.handle)?;
        let delta = self.destination - trial.origin;
        let requested = delta.norm();

        if scene.polygon(trial.id)?.is_locked() {
            debug!("move rejected, polygon is locked");
            return Ok(MoveOutcome::unmoved(MoveStatus::Locked, requested));
        }

        let (status, step) = if trial.test(scene, &delta)? {
            (MoveStatus::Full, delta)
        } else {
            let found = try_search_valid_length(requested, self.params.search_precision, |len| {
                trial.test(scene, &with_length(&delta, len))
            })?;
            trace!(requested, found, "move shortened by search");
            let status = if found > 0.0 {
                MoveStatus::Clamped
            } else {
                MoveStatus::Blocked
            };
            (status, with_length(&delta, found))
        };
        let applied = step.norm();

        trial.displace(scene, &step)?;
        if !trial.is_valid(scene) {
            trial.restore(scene)?;
            debug!(requested, "no valid displacement, vertex stays");
            return Ok(MoveOutcome::unmoved(MoveStatus::Blocked, requested));
        }

        let committed = trial.current(scene)?;
        let snap = if trial.segment {
            self.snap_segment(scene, &trial, committed, &trial.displacement(&step))
        } else {
            self.snap_point(scene, &trial, committed)?
        };

        let (snapped, guides) = match snap {
            Some((position, guides)) => {
                trial.place(scene, position)?;
                if trial.is_valid(scene) {
                    (true, guides)
                } else {
                    trial.place(scene, committed)?;
                    debug!("snap would invalidate the polygon, dropped");
                    (false, Vec::new())
                }
            }
            None => (false, Vec::new()),
        };

        scene.polygon_mut(trial.id)?.refresh_around(trial.index);
        debug!(?status, requested, applied, snapped, "vertex moved");

        Ok(MoveOutcome {
            status,
            requested_length: requested,
            applied_length: applied,
            snapped,
            guides,
        })
    }

    fn snap_point(
        &self,
        scene: &Scene,
        trial: &Trial,
        committed: Placement,
    ) -> Result<Option<(Placement, Vec<GuideLine>)>> {
        let polygon = scene.polygon(trial.id)?;
        let candidates = point_candidates(polygon, trial.index, &committed.vertex, self.params.radius);
        Ok(
            select_candidate(&candidates, &committed.vertex, self.params.radius).map(|c| {
                let placement = Placement {
                    vertex: c.position,
                    next: committed.next,
                };
                (placement, c.guides.clone())
            }),
        )
    }

    /// Tries the segment's start first, then its end.
    fn snap_segment(
        &self,
        scene: &Scene,
        trial: &Trial,
        committed: Placement,
        offset: &Vector2,
    ) -> Option<(Placement, Vec<GuideLine>)> {
        let radius = self.params.radius;
        let along = committed.next - committed.vertex;
        let pick = |point: &Point2| {
            let candidate = segment_candidate(scene, trial.id, point, offset, radius)?;
            select_candidate(std::slice::from_ref(&candidate), point, radius)?;
            Some(candidate)
        };

        if let Some(c) = pick(&committed.vertex) {
            let placement = Placement {
                vertex: c.position,
                next: c.position + along,
            };
            return Some((placement, c.guides));
        }
        pick(&committed.next).map(|c| {
            let placement = Placement {
                vertex: c.position - along,
                next: c.position,
            };
            (placement, c.guides)
        })
    }
}

/// Positions of the moved vertex and its successor.
#[derive(Debug, Clone, Copy)]
struct Placement {
    vertex: Point2,
    next: Point2,
}

/// Apply, test and restore helper for one moving vertex or segment.
#[derive(Debug)]
struct Trial {
    id: PolygonId,
    index: usize,
    next: usize,
    segment: bool,
    origin: Point2,
    next_origin: Point2,
}

impl Trial {
    fn new(scene: &Scene, handle: VertexHandle) -> std::result::Result<Self, SceneError> {
        let polygon = scene.polygon(handle.polygon)?;
        let next = polygon.next_index(handle.index);
        Ok(Self {
            id: handle.polygon,
            index: handle.index,
            next,
            segment: polygon.vertices()[next].is_selected(),
            origin: polygon.position(handle.index),
            next_origin: polygon.position(next),
        })
    }

    /// Displacement actually applied for a requested `delta`.
    fn displacement(&self, delta: &Vector2) -> Vector2 {
        if self.segment {
            segment_offset(&self.origin, &self.next_origin, &(self.origin + delta))
        } else {
            *delta
        }
    }

    fn current(&self, scene: &Scene) -> std::result::Result<Placement, SceneError> {
        let polygon = scene.polygon(self.id)?;
        Ok(Placement {
            vertex: polygon.position(self.index),
            next: polygon.position(self.next),
        })
    }

    fn place(&self, scene: &mut Scene, at: Placement) -> std::result::Result<(), SceneError> {
        let polygon = scene.polygon_mut(self.id)?;
        polygon.set_position(self.index, at.vertex);
        if self.segment {
            polygon.set_position(self.next, at.next);
        }
        Ok(())
    }

    fn displace(&self, scene: &mut Scene, delta: &Vector2) -> std::result::Result<(), SceneError> {
        let d = self.displacement(delta);
        self.place(
            scene,
            Placement {
                vertex: self.origin + d,
                next: self.next_origin + d,
            },
        )
    }

    fn restore(&self, scene: &mut Scene) -> std::result::Result<(), SceneError> {
        self.place(
            scene,
            Placement {
                vertex: self.origin,
                next: self.next_origin,
            },
        )
    }

    /// Angle sum holds and none of the four vertices around the move reports
    /// a fold or crossing.
    fn is_valid(&self, scene: &Scene) -> bool {
        let Ok(polygon) = scene.polygon(self.id) else {
            return false;
        };
        if !polygon.can_exist() {
            return false;
        }
        let prev = polygon.prev_index(self.index);
        let next2 = polygon.next_index(self.next);
        [prev, self.index, self.next, next2]
            .into_iter()
            .all(|i| scene.hit_at(self.id, i).is_none())
    }

    fn test(&self, scene: &mut Scene, delta: &Vector2) -> std::result::Result<bool, SceneError> {
        self.displace(scene, delta)?;
        let valid = self.is_valid(scene);
        self.restore(scene)?;
        Ok(valid)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::scene::Polygon;
    use approx::assert_relative_eq;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
        Polygon::from_points(vec![
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ])
        .unwrap()
    }

    /// Room A at the origin with room B a short gap to its right.
    fn two_rooms() -> (Scene, PolygonId) {
        let mut scene = Scene::new();
        let a = scene.add_polygon(rect(0.0, 0.0, 100.0, 100.0));
        scene.add_polygon(rect(200.0, -50.0, 300.0, 150.0));
        (scene, a)
    }

    #[test]
    fn free_move_without_snap_is_full() {
        let mut scene = Scene::new();
        let id = scene.add_polygon(rect(0.0, 0.0, 100.0, 100.0));
        let out = MoveVertex::new(VertexHandle::new(id, 2), Point2::new(170.0, 230.0))
            .execute(&mut scene)
            .unwrap();
        assert_eq!(out.status, MoveStatus::Full);
        assert!(!out.snapped);
        assert!(out.guides.is_empty());
        assert_relative_eq!(out.applied_length, out.requested_length);
        assert_eq!(scene.polygon(id).unwrap().position(2), Point2::new(170.0, 230.0));
    }

    #[test]
    fn blocked_drag_stops_at_wall() {
        let (mut scene, a) = two_rooms();
        let out = MoveVertex::new(VertexHandle::new(a, 2), Point2::new(210.0, 100.0))
            .execute(&mut scene)
            .unwrap();
        assert_eq!(out.status, MoveStatus::Clamped);
        let p = scene.polygon(a).unwrap().position(2);
        assert!(p.x <= 200.0);
        assert!(200.0 - p.x < 1.0);
        assert_relative_eq!(p.y, 100.0, epsilon = 1e-9);
        assert!(scene.polygon_intersection(a).unwrap().is_none());
    }

    #[test]
    fn extension_snap_lands_on_wall_line() {
        let mut scene = Scene::new();
        let id = scene.add_polygon(rect(0.0, 0.0, 100.0, 100.0));
        let out = MoveVertex::new(VertexHandle::new(id, 2), Point2::new(110.0, 300.0))
            .execute(&mut scene)
            .unwrap();
        assert!(out.snapped);
        assert!(!out.guides.is_empty());
        let p = scene.polygon(id).unwrap().position(2);
        assert_relative_eq!(p.x, 100.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 300.0, epsilon = 1e-9);
    }

    #[test]
    fn segment_snaps_flush_to_neighbor() {
        let (mut scene, a) = two_rooms();
        scene.select_segment(VertexHandle::new(a, 1)).unwrap();
        let out = MoveVertex::new(VertexHandle::new(a, 1), Point2::new(170.0, 0.0))
            .execute(&mut scene)
            .unwrap();
        assert_eq!(out.status, MoveStatus::Full);
        assert!(out.snapped);
        assert_eq!(out.guides.len(), 1);
        let poly = scene.polygon(a).unwrap();
        assert_relative_eq!(poly.position(1).x, 200.0, epsilon = 1e-9);
        assert_relative_eq!(poly.position(1).y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(poly.position(2).x, 200.0, epsilon = 1e-9);
        assert_relative_eq!(poly.position(2).y, 100.0, epsilon = 1e-9);
        for (id, _) in scene.polygons() {
            assert!(scene.polygon_intersection(id).unwrap().is_none());
        }
    }

    #[test]
    fn segment_stops_against_neighbor_corner() {
        let mut scene = Scene::new();
        let a = scene.add_polygon(rect(0.0, 0.0, 100.0, 100.0));
        let b = scene.add_polygon(
            Polygon::from_points(vec![
                Point2::new(150.0, 50.0),
                Point2::new(250.0, 0.0),
                Point2::new(250.0, 100.0),
            ])
            .unwrap(),
        );
        scene.select_segment(VertexHandle::new(a, 1)).unwrap();
        let out = MoveVertex::new(VertexHandle::new(a, 1), Point2::new(200.0, 0.0))
            .execute(&mut scene)
            .unwrap();
        assert_eq!(out.status, MoveStatus::Clamped);
        assert!(!out.snapped);
        // The wall may rest on the neighbor's tip, never past it.
        let poly = scene.polygon(a).unwrap();
        assert_relative_eq!(poly.position(1).x, 150.0, epsilon = 1e-9);
        assert_relative_eq!(poly.position(2).x, 150.0, epsilon = 1e-9);
        assert!(scene.polygon_intersection(a).unwrap().is_none());
        assert!(scene.polygon_intersection(b).unwrap().is_none());
    }

    #[test]
    fn segment_moves_perpendicular_only() {
        let mut scene = Scene::new();
        let id = scene.add_polygon(rect(0.0, 0.0, 100.0, 100.0));
        scene.select_segment(VertexHandle::new(id, 1)).unwrap();
        MoveVertex::new(VertexHandle::new(id, 1), Point2::new(180.0, 40.0))
            .execute(&mut scene)
            .unwrap();
        let poly = scene.polygon(id).unwrap();
        assert_relative_eq!(poly.position(1).x, 180.0, epsilon = 1e-9);
        assert_relative_eq!(poly.position(1).y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(poly.position(2).x, 180.0, epsilon = 1e-9);
        assert_relative_eq!(poly.position(2).y, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn fold_through_opposite_wall_is_blocked() {
        let mut scene = Scene::new();
        let id = scene.add_polygon(rect(0.0, 0.0, 100.0, 100.0));
        let out = MoveVertex::new(VertexHandle::new(id, 2), Point2::new(-80.0, -80.0))
            .execute(&mut scene)
            .unwrap();
        assert_ne!(out.status, MoveStatus::Full);
        let poly = scene.polygon(id).unwrap();
        assert!(poly.can_exist());
        assert!(scene.polygon_intersection(id).unwrap().is_none());
    }

    #[test]
    fn locked_polygon_does_not_move() {
        let mut scene = Scene::new();
        let id = scene.add_polygon(rect(0.0, 0.0, 100.0, 100.0));
        scene.polygon_mut(id).unwrap().set_locked(true);
        let out = MoveVertex::new(VertexHandle::new(id, 0), Point2::new(-20.0, -20.0))
            .execute(&mut scene)
            .unwrap();
        assert_eq!(out.status, MoveStatus::Locked);
        assert_eq!(scene.polygon(id).unwrap().position(0), Point2::new(0.0, 0.0));
    }

    #[test]
    fn outline_and_area_follow_the_move() {
        let mut scene = Scene::new();
        let id = scene.add_polygon(rect(0.0, 0.0, 100.0, 100.0));
        let before = scene.polygon(id).unwrap().area();
        MoveVertex::new(VertexHandle::new(id, 2), Point2::new(170.0, 230.0))
            .execute(&mut scene)
            .unwrap();
        let poly = scene.polygon(id).unwrap();
        assert!(poly.area() > before);
        let mut fresh = poly.clone();
        fresh.refresh_outline();
        for (v, f) in poly.vertices().iter().zip(fresh.vertices()) {
            assert_relative_eq!(v.outline_a().x, f.outline_a().x, epsilon = 1e-9);
            assert_relative_eq!(v.outline_b().y, f.outline_b().y, epsilon = 1e-9);
        }
    }

    #[test]
    fn stale_handle_errors() {
        let mut scene = Scene::new();
        let id = scene.add_polygon(rect(0.0, 0.0, 100.0, 100.0));
        assert!(MoveVertex::new(VertexHandle::new(id, 4), Point2::origin())
            .execute(&mut scene)
            .is_err());
    }
}
