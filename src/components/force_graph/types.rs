use std::collections::{HashMap, HashSet};

use crate::model::{Edge, Node, NodeId};

/// A node as the canvas draws it.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewNode {
	pub id: NodeId,
	pub label: String,
	pub color: &'static str,
	/// Graph-space position the user dropped this node at, if any.
	pub pinned: Option<(f64, f64)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewEdge {
	pub source: NodeId,
	pub target: NodeId,
	pub color: &'static str,
	pub label: Option<String>,
}

/// Read-only projection of a graph handed to [`super::ForceGraphCanvas`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphView {
	pub nodes: Vec<ViewNode>,
	pub edges: Vec<ViewEdge>,
}

impl GraphView {
	/// Attaches display attributes to each node and edge. Edges with a
	/// missing endpoint are left out.
	pub fn project(nodes: &[Node], edges: &[Edge], moved: &HashMap<NodeId, (f64, f64)>) -> Self {
		let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
		Self {
			nodes: nodes
				.iter()
				.map(|n| ViewNode {
					id: n.id.clone(),
					label: n.label.clone(),
					color: n.color(),
					pinned: moved.get(&n.id).copied(),
				})
				.collect(),
			edges: edges
				.iter()
				.filter(|e| ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()))
				.map(|e| ViewEdge {
					source: e.source.clone(),
					target: e.target.clone(),
					color: e.color(),
					label: e.label.clone(),
				})
				.collect(),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportOp {
	ZoomIn,
	ZoomOut,
	Fit,
}

/// Latest viewport request. `seq` grows with every request so repeated
/// clicks on the same button are all seen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewportCommand {
	pub seq: u64,
	pub op: Option<ViewportOp>,
}

impl ViewportCommand {
	pub fn next(self, op: ViewportOp) -> Self {
		Self {
			seq: self.seq + 1,
			op: Some(op),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::sample::sample_dataset;
	use crate::model::{EdgeCategory, NodeCategory};

	#[test]
	fn projection_colors_follow_category() {
		let g = sample_dataset();
		let view = GraphView::project(&g.nodes, &g.edges, &HashMap::new());
		assert_eq!(view.nodes.len(), g.nodes.len());
		for (v, n) in view.nodes.iter().zip(&g.nodes) {
			assert_eq!(v.color, n.category.color());
			assert_eq!(v.pinned, None);
		}
		assert_eq!(view.edges[1].color, EdgeCategory::Community.color());
	}

	#[test]
	fn projection_skips_dangling_edges_and_carries_pins() {
		let nodes = vec![Node::new("a", "A", NodeCategory::Normal)];
		let edges = vec![
			Edge::new("a", "b", EdgeCategory::Normal),
			Edge::new("a", "a", EdgeCategory::Normal).with_label("self"),
		];
		let moved = HashMap::from([("a".to_string(), (4.0, 2.0))]);
		let view = GraphView::project(&nodes, &edges, &moved);
		assert_eq!(view.edges.len(), 1);
		assert_eq!(view.edges[0].label.as_deref(), Some("self"));
		assert_eq!(view.nodes[0].pinned, Some((4.0, 2.0)));
	}

	#[test]
	fn commands_are_sequenced() {
		let c = ViewportCommand::default().next(ViewportOp::ZoomIn);
		let d = c.next(ViewportOp::ZoomIn);
		assert_ne!(c, d);
		assert_eq!(d.seq, 2);
	}
}
