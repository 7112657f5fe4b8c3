//! Node and edge roles. Every role maps to fixed display attributes.

use serde::{Deserialize, Serialize};

/// Role of a node in the current search result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeCategory {
	/// One of the names the user searched for.
	Query,
	/// Member of the found community.
	Community,
	/// Recommended for insertion into the community.
	Insert,
	/// Recommended for removal from the community.
	Delete,
	/// Anything else.
	Normal,
}

impl NodeCategory {
	/// All categories in legend order.
	pub const ALL: [NodeCategory; 5] = [
		NodeCategory::Query,
		NodeCategory::Community,
		NodeCategory::Insert,
		NodeCategory::Delete,
		NodeCategory::Normal,
	];

	pub const fn color(self) -> &'static str {
		match self {
			NodeCategory::Query => "#3498db",
			NodeCategory::Community => "#9b59b6",
			NodeCategory::Insert => "#e67e22",
			NodeCategory::Delete => "#e74c3c",
			NodeCategory::Normal => "#7f8c8d",
		}
	}

	pub const fn legend_label(self) -> &'static str {
		match self {
			NodeCategory::Query => "Query Node",
			NodeCategory::Community => "Community Node",
			NodeCategory::Insert => "Insert Node",
			NodeCategory::Delete => "Delete Node",
			NodeCategory::Normal => "Normal Node",
		}
	}
}

/// Role of an edge: inside the community or not.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeCategory {
	Community,
	#[default]
	Normal,
}

impl EdgeCategory {
	pub const ALL: [EdgeCategory; 2] = [EdgeCategory::Community, EdgeCategory::Normal];

	pub const fn color(self) -> &'static str {
		match self {
			EdgeCategory::Community => "#8e44ad",
			EdgeCategory::Normal => "#bdc3c7",
		}
	}

	pub const fn legend_label(self) -> &'static str {
		match self {
			EdgeCategory::Community => "Community Edge",
			EdgeCategory::Normal => "Normal Edge",
		}
	}
}
