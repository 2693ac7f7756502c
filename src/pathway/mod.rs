mod combined;
mod graph;
mod load;

pub use combined::{Contribution, GraphModel, NodeHandle};
pub use graph::{PathwayEdge, PathwayGraph, PathwayVertex, VertexId, VertexKind};
pub use load::load_pathway;
