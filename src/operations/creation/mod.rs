mod make_regular_polygon;
mod make_square;
mod simplify_path;
mod snap_corners;

pub use make_regular_polygon::MakeRegularPolygon;
pub use make_square::MakeSquare;
pub use simplify_path::{SimplifyParams, SimplifyPath};
pub use snap_corners::SnapCorners;
