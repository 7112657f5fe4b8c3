//! Graph held by the editor demo.

use std::collections::HashMap;

use log::info;

use crate::error::GraphError;
use crate::model::{Edge, EdgeCategory, Node, NodeCategory, NodeId, edge_id};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditorGraph {
	pub nodes: Vec<Node>,
	pub edges: Vec<Edge>,
	/// Where the user dropped nodes on the canvas.
	pub moved: HashMap<NodeId, (f64, f64)>,
}

impl EditorGraph {
	pub fn contains(&self, id: &str) -> bool {
		self.nodes.iter().any(|n| n.id == id)
	}

	/// Adds a node with an id derived from `now_ms`. Ids stay unique even if
	/// two nodes are added within the same millisecond.
	pub fn add_node(&mut self, label: &str, now_ms: f64) -> Result<&Node, GraphError> {
		let label = label.trim();
		if label.is_empty() {
			return Err(GraphError::EmptyLabel);
		}

		let base = format!("node-{}", now_ms as u64);
		let mut id = base.clone();
		let mut n = 1;
		while self.contains(&id) {
			id = format!("{base}-{n}");
			n += 1;
		}

		info!("Adding node {id} ({label})");
		self.nodes.push(Node::new(id, label, NodeCategory::Normal));
		Ok(&self.nodes[self.nodes.len() - 1])
	}

	/// Removes a node and every edge that starts or ends at it.
	pub fn remove_node(&mut self, id: &str) -> Result<Node, GraphError> {
		let idx = self
			.nodes
			.iter()
			.position(|n| n.id == id)
			.ok_or_else(|| GraphError::UnknownNode(id.to_string()))?;
		let node = self.nodes.remove(idx);

		let before = self.edges.len();
		self.edges.retain(|e| !e.touches(id));
		self.moved.remove(id);
		info!("Removed node {id} and {} incident edges", before - self.edges.len());
		Ok(node)
	}

	/// Adds a directed edge. A blank `label` leaves it unlabelled.
	pub fn add_edge(&mut self, source: &str, target: &str, label: &str) -> Result<String, GraphError> {
		let id = edge_id(source, target);
		if let Some(missing) = [source, target].into_iter().find(|n| !self.contains(n)) {
			return Err(GraphError::DanglingEdge {
				edge: id,
				endpoint: missing.to_string(),
			});
		}
		if self.edges.iter().any(|e| e.source == source && e.target == target) {
			return Err(GraphError::DuplicateEdge(id));
		}

		info!("Adding edge {id}");
		self.edges
			.push(Edge::new(source, target, EdgeCategory::Normal).with_label(label));
		Ok(id)
	}

	/// Removes the edge whose derived id is exactly `edge_id`.
	pub fn remove_edge(&mut self, edge_id: &str) -> Result<Edge, GraphError> {
		let idx = self
			.edges
			.iter()
			.position(|e| e.id() == edge_id)
			.ok_or_else(|| GraphError::UnknownEdge(edge_id.to_string()))?;
		info!("Removing edge {edge_id}");
		Ok(self.edges.remove(idx))
	}

	pub fn record_move(&mut self, id: &str, position: (f64, f64)) {
		if self.contains(id) {
			self.moved.insert(id.to_string(), position);
		}
	}
}
