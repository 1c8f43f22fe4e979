use crate::error::{Result, SceneError};
use crate::math::Point2;
use crate::operations::movement::{GuideLine, MoveVertex};

use super::{PolygonId, Scene};

/// Address of one vertex: its polygon plus its position in the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexHandle {
    pub polygon: PolygonId,
    pub index: usize,
}

impl VertexHandle {
    #[must_use]
    pub fn new(polygon: PolygonId, index: usize) -> Self {
        Self { polygon, index }
    }

    /// Verifies the handle still addresses a vertex.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::PolygonNotFound` or `SceneError::VertexOutOfRange`.
    pub fn check(&self, scene: &Scene) -> std::result::Result<(), SceneError> {
        let len = scene.polygon(self.polygon)?.len();
        if self.index >= len {
            return Err(SceneError::VertexOutOfRange {
                index: self.index,
                len,
            });
        }
        Ok(())
    }
}

/// Something the user can select and drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    Vertex(VertexHandle),
    Polygon(PolygonId),
}

impl Handle {
    /// Polygon the handle belongs to.
    #[must_use]
    pub fn polygon(&self) -> PolygonId {
        match self {
            Self::Vertex(h) => h.polygon,
            Self::Polygon(id) => *id,
        }
    }

    /// Sets the selection flag and keeps the scene's selection list in sync.
    ///
    /// Deselecting a vertex whose successor is also flagged deselects the
    /// successor as well, ending segment mode. Selecting or deselecting a
    /// polygon resets its drag anchor.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale.
    pub fn select(self, scene: &mut Scene, selected: bool) -> Result<()> {
        let was_selected = match self {
            Self::Vertex(h) => {
                h.check(scene)?;
                let polygon = scene.polygon_mut(h.polygon)?;
                let next = polygon.next_index(h.index);
                let vertices = polygon.vertices_mut();
                let was = vertices[h.index].selected;
                if was && !selected && vertices[next].selected {
                    vertices[next].selected = false;
                }
                vertices[h.index].selected = selected;
                was
            }
            Self::Polygon(id) => {
                let polygon = scene.polygon_mut(id)?;
                let was = polygon.selected;
                polygon.selected = selected;
                polygon.drag_anchor = None;
                was
            }
        };

        let list = scene.selection_mut();
        if selected && !was_selected {
            list.push(self);
        } else if !selected && was_selected {
            list.retain(|h| *h != self);
        }
        Ok(())
    }

    /// One drag tick towards `point`.
    ///
    /// A vertex goes through the movement corrector. A polygon is translated
    /// by the cursor motion since the previous tick, without validity checks.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale.
    pub fn move_to(self, scene: &mut Scene, point: Point2) -> Result<Vec<GuideLine>> {
        match self {
            Self::Vertex(h) => Ok(MoveVertex::new(h, point).execute(scene)?.guides),
            Self::Polygon(id) => {
                let polygon = scene.polygon_mut(id)?;
                if polygon.is_locked() {
                    return Ok(Vec::new());
                }
                if let Some(anchor) = polygon.drag_anchor {
                    polygon.translate(&(point - anchor));
                }
                polygon.drag_anchor = Some(point);
                Ok(Vec::new())
            }
        }
    }
}
