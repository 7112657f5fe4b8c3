//! Graph data shared by the search page, the editor and the backends.

mod category;
mod graph;
pub mod sample;

pub use category::{EdgeCategory, NodeCategory};
pub use graph::{Edge, GraphDataset, Node, NodeId, edge_id};
