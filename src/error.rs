//! Error types shared by the model, the backends and the pages.

use thiserror::Error;

/// Structural-integrity and lookup errors on a graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
	/// Two nodes share an id.
	#[error("duplicate node id `{0}`")]
	DuplicateNode(String),

	/// Two edges share the derived `source-target` id.
	#[error("duplicate edge `{0}`")]
	DuplicateEdge(String),

	/// An edge endpoint does not reference an existing node.
	#[error("edge `{edge}` references missing node `{endpoint}`")]
	DanglingEdge { edge: String, endpoint: String },

	/// A recommendation list references a missing node.
	#[error("recommendation references missing node `{0}`")]
	DanglingRecommendation(String),

	/// No node with this id.
	#[error("unknown node `{0}`")]
	UnknownNode(String),

	/// No edge with this id.
	#[error("unknown edge `{0}`")]
	UnknownEdge(String),

	/// Node labels must contain something besides whitespace.
	#[error("node label is empty")]
	EmptyLabel,
}

/// Rejections of the query text before it is dispatched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
	#[error("enter at least one name to search for")]
	Empty,

	#[error("unknown dataset `{0}`")]
	UnknownDataset(String),

	#[error("unknown search model `{0}`")]
	UnknownModel(String),
}

/// Failures of a backend call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
	/// Transport-level failure (connection refused, CORS, ...).
	#[error("network error: {0}")]
	Network(String),

	/// The server answered with a non-success status.
	#[error("HTTP {status}: {text}")]
	Status { status: u16, text: String },

	/// The response body was not a valid dataset.
	#[error("invalid response: {0}")]
	Decode(String),

	/// The backend is not usable in this build.
	#[error("backend unavailable: {0}")]
	Unavailable(&'static str),

	/// The returned or targeted graph violates an invariant.
	#[error(transparent)]
	Graph(#[from] GraphError),
}

/// Problems reading the inline configuration block.
#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("malformed configuration: {0}")]
	Parse(#[from] serde_json::Error),
}
