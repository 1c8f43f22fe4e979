pub mod error;
pub mod math;
pub mod operations;
pub mod scene;

pub use error::{FloorplanError, Result};
pub use scene::{Handle, Polygon, PolygonData, PolygonId, Scene, Vertex, VertexHandle};
