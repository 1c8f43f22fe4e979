use crate::math::distance_2d::relative_coords;
use crate::math::Point2;
use crate::scene::{PolygonId, Scene, VertexHandle};

/// Pick radii in screen pixels, divided by the view scale at query time.
#[derive(Debug, Clone, Copy)]
pub struct PickParams {
    pub vertex_radius: f64,
    pub segment_radius: f64,
}

impl Default for PickParams {
    fn default() -> Self {
        Self {
            vertex_radius: 50.0,
            segment_radius: 30.0,
        }
    }
}

/// What a press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickTarget {
    Vertex(VertexHandle),
    /// The wall segment starting at this vertex.
    Segment(VertexHandle),
    Polygon(PolygonId),
}

/// A nearby vertex or edge together with its distance from the query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    pub handle: VertexHandle,
    pub distance: f64,
}

/// Nearest vertex of any polygon within `radius` of `point`.
#[must_use]
pub fn nearest_vertex(scene: &Scene, point: &Point2, radius: f64) -> Option<Nearest> {
    let mut best = None;
    let mut best_dist = radius;
    for (id, polygon) in scene.polygons() {
        for (i, v) in polygon.vertices().iter().enumerate() {
            let dist = (v.position() - point).norm();
            if dist < best_dist {
                best_dist = dist;
                best = Some(Nearest {
                    handle: VertexHandle::new(id, i),
                    distance: dist,
                });
            }
        }
    }
    best
}

/// Nearest edge within `radius` of `point` whose span covers the point's
/// projection. The handle names the edge's start vertex.
#[must_use]
pub fn nearest_edge(scene: &Scene, point: &Point2, radius: f64) -> Option<Nearest> {
    let mut best = None;
    let mut best_dist = radius;
    for (id, polygon) in scene.polygons() {
        for i in 0..polygon.len() {
            let a = polygon.position(i);
            let b = polygon.position(polygon.next_index(i));
            let rel = relative_coords(&a, &b, point);
            let dist = rel.y.abs();
            if rel.x >= 0.0 && rel.x <= (b - a).norm() && dist < best_dist {
                best_dist = dist;
                best = Some(Nearest {
                    handle: VertexHandle::new(id, i),
                    distance: dist,
                });
            }
        }
    }
    best
}

/// Resolves a press: a vertex beats a wall segment, which beats the room
/// the point lies in.
#[derive(Debug)]
pub struct Pick {
    point: Point2,
    view_scale: f64,
    params: PickParams,
}

impl Pick {
    #[must_use]
    pub fn new(point: Point2, view_scale: f64) -> Self {
        Self {
            point,
            view_scale,
            params: PickParams::default(),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: PickParams) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn execute(&self, scene: &Scene) -> Option<PickTarget> {
        let vertex_radius = self.params.vertex_radius / self.view_scale;
        if let Some(hit) = nearest_vertex(scene, &self.point, vertex_radius) {
            return Some(PickTarget::Vertex(hit.handle));
        }
        let segment_radius = self.params.segment_radius / self.view_scale;
        if let Some(hit) = nearest_edge(scene, &self.point, segment_radius) {
            return Some(PickTarget::Segment(hit.handle));
        }
        scene
            .polygons()
            .find(|(_, polygon)| polygon.contains(&self.point))
            .map(|(id, _)| PickTarget::Polygon(id))
    }
}
