//! Built-in demo dataset, served by the demo backend and shown on first load.

use super::category::{EdgeCategory, NodeCategory};
use super::graph::{Edge, GraphDataset, Node};

pub const EXAMPLE_QUERIES: [&str; 3] = [
	"John Smith, Mary Johnson",
	"David Brown, Sarah Davis",
	"Michael Wilson, Jennifer Taylor",
];

const RECOMMENDED: usize = 10;

pub fn sample_dataset() -> GraphDataset {
	let mut nodes = vec![
		Node::new("q1", "John Smith", NodeCategory::Query),
		Node::new("q2", "Mary Johnson", NodeCategory::Query),
		Node::new("c1", "Community Node 1", NodeCategory::Community),
		Node::new("c2", "Community Node 2", NodeCategory::Community),
	];
	nodes.extend((1..=RECOMMENDED).map(|i| {
		Node::new(format!("i{i}"), format!("Insert Node {i}"), NodeCategory::Insert)
	}));
	nodes.extend((1..=RECOMMENDED).map(|i| {
		Node::new(format!("d{i}"), format!("Delete Node {i}"), NodeCategory::Delete)
	}));
	nodes.push(Node::new("n1", "Normal Node 1", NodeCategory::Normal));

	GraphDataset {
		nodes,
		edges: vec![
			Edge::new("q1", "q2", EdgeCategory::Normal),
			Edge::new("q1", "c1", EdgeCategory::Community),
			Edge::new("q2", "c2", EdgeCategory::Community),
			Edge::new("c1", "c2", EdgeCategory::Community),
		],
		recommend_insert: (1..=RECOMMENDED).map(|i| format!("i{i}")).collect(),
		recommend_delete: (1..=RECOMMENDED).map(|i| format!("d{i}")).collect(),
	}
}
