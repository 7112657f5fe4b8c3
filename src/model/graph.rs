use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::category::{EdgeCategory, NodeCategory};
use crate::error::GraphError;

/// Node identifier as handed out by the backend.
pub type NodeId = String;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
	pub id: NodeId,
	pub label: String,
	#[serde(rename = "type")]
	pub category: NodeCategory,
}

impl Node {
	pub fn new(id: impl Into<NodeId>, label: impl Into<String>, category: NodeCategory) -> Self {
		Self {
			id: id.into(),
			label: label.into(),
			category,
		}
	}

	pub fn color(&self) -> &'static str {
		self.category.color()
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
	pub source: NodeId,
	pub target: NodeId,
	#[serde(rename = "type", default)]
	pub category: EdgeCategory,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
}

impl Edge {
	pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>, category: EdgeCategory) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			category,
			label: None,
		}
	}

	/// Attaches a caption; blank text leaves the edge unlabelled.
	pub fn with_label(mut self, label: &str) -> Self {
		let label = label.trim();
		self.label = (!label.is_empty()).then(|| label.to_string());
		self
	}

	/// Derived identity. Parallel edges collapse onto the same id.
	pub fn id(&self) -> String {
		edge_id(&self.source, &self.target)
	}

	pub fn touches(&self, node: &str) -> bool {
		self.source == node || self.target == node
	}

	pub fn color(&self) -> &'static str {
		self.category.color()
	}
}

pub fn edge_id(source: &str, target: &str) -> String {
	format!("{source}-{target}")
}

/// A search result: the graph plus the backend's recommendations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDataset {
	pub nodes: Vec<Node>,
	pub edges: Vec<Edge>,
	#[serde(default)]
	pub recommend_insert: Vec<NodeId>,
	#[serde(default)]
	pub recommend_delete: Vec<NodeId>,
}

impl GraphDataset {
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Label shown for `id`, or the id itself when the node is gone.
	pub fn label_of<'a>(&'a self, id: &'a str) -> &'a str {
		self.node(id).map(|n| n.label.as_str()).unwrap_or(id)
	}

	/// Checks id uniqueness and that edges and recommendations only
	/// reference existing nodes.
	pub fn validate(&self) -> Result<(), GraphError> {
		let mut ids = HashSet::with_capacity(self.nodes.len());
		for node in &self.nodes {
			if !ids.insert(node.id.as_str()) {
				return Err(GraphError::DuplicateNode(node.id.clone()));
			}
		}

		let mut edge_ids = HashSet::with_capacity(self.edges.len());
		for edge in &self.edges {
			let id = edge.id();
			for endpoint in [&edge.source, &edge.target] {
				if !ids.contains(endpoint.as_str()) {
					return Err(GraphError::DanglingEdge {
						edge: id,
						endpoint: endpoint.clone(),
					});
				}
			}
			if !edge_ids.insert(id.clone()) {
				return Err(GraphError::DuplicateEdge(id));
			}
		}

		self.recommend_insert
			.iter()
			.chain(&self.recommend_delete)
			.find(|id| !ids.contains(id.as_str()))
			.map_or(Ok(()), |id| Err(GraphError::DanglingRecommendation(id.clone())))
	}

	/// Changes the category of a single node. Nothing else is touched.
	pub fn reclassify(&mut self, id: &str, category: NodeCategory) -> Result<(), GraphError> {
		let node = self
			.nodes
			.iter_mut()
			.find(|n| n.id == id)
			.ok_or_else(|| GraphError::UnknownNode(id.to_string()))?;
		node.category = category;
		Ok(())
	}
}
