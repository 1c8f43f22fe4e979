use thiserror::Error;

/// Top-level error type for the floorsketch kernel.
#[derive(Debug, Error)]
pub enum FloorplanError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Errors related to geometric construction.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("a polygon needs at least {required} vertices, got {found}")]
    InsufficientVertices { found: usize, required: usize },

    #[error("non-finite coordinate at index {0}")]
    NonFinite(usize),
}

/// Errors raised when a handle no longer refers to anything in the scene.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("polygon not found in scene")]
    PolygonNotFound,

    #[error("vertex index {index} out of range for polygon with {len} vertices")]
    VertexOutOfRange { index: usize, len: usize },
}

/// Convenience type alias for results using [`FloorplanError`].
pub type Result<T> = std::result::Result<T, FloorplanError>;
