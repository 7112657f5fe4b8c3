//! The three calls the search page makes: search, insert and delete.

mod demo;
mod http;

pub use demo::DemoBackend;
pub use http::HttpBackend;

use crate::config::BackendConfig;
use crate::error::ApiError;
use crate::model::GraphDataset;
use crate::query::SearchRequest;

/// Which recommendation action the user clicked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeAction {
	Insert,
	Delete,
}

/// Backend answering the search page. Cheap to clone.
#[derive(Clone, Debug)]
pub enum Backend {
	Demo(DemoBackend),
	Http(HttpBackend),
}

impl Backend {
	pub fn from_config(config: &BackendConfig) -> Self {
		match config {
			BackendConfig::Demo => Backend::Demo(DemoBackend::default()),
			BackendConfig::Http { base_url } => Backend::Http(HttpBackend::new(base_url.clone())),
		}
	}

	pub async fn search(&self, request: &SearchRequest) -> Result<GraphDataset, ApiError> {
		let dataset = match self {
			Backend::Demo(b) => b.search(request).await?,
			Backend::Http(b) => b.search(request).await?,
		};
		dataset.validate()?;
		Ok(dataset)
	}

	pub async fn insert_node(&self, node_id: &str) -> Result<GraphDataset, ApiError> {
		let dataset = match self {
			Backend::Demo(b) => b.insert_node(node_id).await?,
			Backend::Http(b) => b.insert_node(node_id).await?,
		};
		dataset.validate()?;
		Ok(dataset)
	}

	pub async fn delete_node(&self, node_id: &str) -> Result<GraphDataset, ApiError> {
		let dataset = match self {
			Backend::Demo(b) => b.delete_node(node_id).await?,
			Backend::Http(b) => b.delete_node(node_id).await?,
		};
		dataset.validate()?;
		Ok(dataset)
	}

	pub async fn apply(&self, action: NodeAction, node_id: &str) -> Result<GraphDataset, ApiError> {
		match action {
			NodeAction::Insert => self.insert_node(node_id).await,
			NodeAction::Delete => self.delete_node(node_id).await,
		}
	}
}

#[cfg(test)]
mod tests {
	use pollster::block_on;

	use super::*;
	use crate::error::GraphError;
	use crate::model::sample::sample_dataset;
	use crate::model::{Edge, EdgeCategory};
	use crate::query::{Dataset, SearchModel};

	#[test]
	fn invalid_dataset_from_backend_is_rejected() {
		let mut broken = sample_dataset();
		broken.edges.push(Edge::new("q1", "nowhere", EdgeCategory::Normal));
		let backend = Backend::Demo(DemoBackend::with_dataset(broken));

		let err = block_on(backend.apply(NodeAction::Insert, "i1")).unwrap_err();
		assert!(matches!(err, ApiError::Graph(GraphError::DanglingEdge { .. })));
	}

	#[test]
	fn config_selects_backend() {
		assert!(matches!(
			Backend::from_config(&BackendConfig::Demo),
			Backend::Demo(_)
		));
		let http = Backend::from_config(&BackendConfig::Http {
			base_url: "/api".into(),
		});
		assert!(matches!(http, Backend::Http(_)));
	}

	#[test]
	fn demo_search_is_validated_sample() {
		let backend = Backend::Demo(DemoBackend::default());
		let req = SearchRequest::parse("David Brown", Dataset::Other, SearchModel::Acq).unwrap();
		assert_eq!(block_on(backend.search(&req)).unwrap(), sample_dataset());
	}
}
