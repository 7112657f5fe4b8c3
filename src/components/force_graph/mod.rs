mod component;
mod render;
mod state;
mod types;
pub mod viewport;

pub use component::ForceGraphCanvas;
pub use types::{GraphView, ViewEdge, ViewNode, ViewportCommand, ViewportOp};
