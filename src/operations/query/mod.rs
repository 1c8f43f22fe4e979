mod pick;

pub use pick::{nearest_edge, nearest_vertex, Nearest, Pick, PickParams, PickTarget};
