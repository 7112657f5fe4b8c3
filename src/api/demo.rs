use std::sync::{Arc, Mutex, MutexGuard};

use log::info;

use crate::error::ApiError;
use crate::model::sample::sample_dataset;
use crate::model::{GraphDataset, NodeCategory};
use crate::query::SearchRequest;

/// In-memory backend. Every search answers with the sample dataset; insert
/// and delete reclassify a node of the current session.
#[derive(Clone, Debug)]
pub struct DemoBackend {
	session: Arc<Mutex<GraphDataset>>,
}

impl Default for DemoBackend {
	fn default() -> Self {
		Self::with_dataset(sample_dataset())
	}
}

impl DemoBackend {
	pub fn with_dataset(dataset: GraphDataset) -> Self {
		Self {
			session: Arc::new(Mutex::new(dataset)),
		}
	}

	fn session(&self) -> MutexGuard<'_, GraphDataset> {
		// A poisoned lock only means a previous holder panicked; the dataset is still whole.
		self.session.lock().unwrap_or_else(|e| e.into_inner())
	}

	pub async fn search(&self, request: &SearchRequest) -> Result<GraphDataset, ApiError> {
		info!("Demo search {request}");
		let mut session = self.session();
		*session = sample_dataset();
		Ok(session.clone())
	}

	pub async fn insert_node(&self, node_id: &str) -> Result<GraphDataset, ApiError> {
		self.reclassify(node_id, NodeCategory::Community)
	}

	pub async fn delete_node(&self, node_id: &str) -> Result<GraphDataset, ApiError> {
		self.reclassify(node_id, NodeCategory::Normal)
	}

	fn reclassify(&self, node_id: &str, category: NodeCategory) -> Result<GraphDataset, ApiError> {
		info!("Demo reclassify {node_id} as {category:?}");
		let mut session = self.session();
		session.reclassify(node_id, category)?;
		Ok(session.clone())
	}
}
