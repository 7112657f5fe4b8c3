pub mod force_graph;
pub mod legend;
pub mod notice;
pub mod recommendations;
