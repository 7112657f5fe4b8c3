//! State container for the search page.
//!
//! Every call that replaces the dataset is tagged with a [`RequestId`]. Only
//! the most recently issued request may write its result; anything older
//! that resolves later is dropped.

use std::collections::HashMap;

use log::{debug, info, warn};

use crate::api::NodeAction;
use crate::config::AppConfig;
use crate::error::{ApiError, QueryError};
use crate::model::sample::sample_dataset;
use crate::model::{GraphDataset, NodeId};
use crate::query::{Dataset, SearchModel, SearchRequest};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
	Search,
	Node(NodeAction),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
	Info,
	Error,
}

/// A dismissible message shown above the graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
	pub level: NoticeLevel,
	pub message: String,
}

impl Notice {
	pub fn error(message: impl Into<String>) -> Self {
		Self {
			level: NoticeLevel::Error,
			message: message.into(),
		}
	}
}

/// What [`SearchStore::finish_request`] did with a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
	Applied,
	Failed,
	Stale,
}

#[derive(Clone, Debug)]
pub struct SearchStore {
	pub dataset: GraphDataset,
	pub dataset_choice: Dataset,
	pub model: SearchModel,
	pub query: String,
	pub notice: Option<Notice>,
	/// Positions of nodes the user dragged, keyed by node id.
	pub moved: HashMap<NodeId, (f64, f64)>,
	/// Bumped whenever the view should be fitted and centered.
	pub fit_epoch: u64,
	issued: u64,
	pending: Option<(RequestId, RequestKind)>,
}

impl Default for SearchStore {
	fn default() -> Self {
		Self::new(&AppConfig::default())
	}
}

impl SearchStore {
	pub fn new(config: &AppConfig) -> Self {
		Self {
			dataset: sample_dataset(),
			dataset_choice: config.default_dataset,
			model: config.default_model,
			query: String::new(),
			notice: None,
			moved: HashMap::new(),
			fit_epoch: 0,
			issued: 0,
			pending: None,
		}
	}

	pub fn is_loading(&self) -> bool {
		self.pending.is_some()
	}

	pub fn pending_kind(&self) -> Option<RequestKind> {
		self.pending.map(|(_, kind)| kind)
	}

	/// Issues a new request id; any request still in flight becomes stale.
	pub fn begin_request(&mut self, kind: RequestKind) -> RequestId {
		self.issued += 1;
		let id = RequestId(self.issued);
		if let Some((old, old_kind)) = self.pending.replace((id, kind)) {
			debug!("{old_kind:?} request {old:?} superseded by {id:?}");
		}
		id
	}

	/// Validates the current query and issues a search request for it.
	/// Rejected queries leave an error notice and issue nothing.
	pub fn begin_search(&mut self) -> Result<(RequestId, SearchRequest), QueryError> {
		match SearchRequest::parse(&self.query, self.dataset_choice, self.model) {
			Ok(request) => {
				info!("Searching {request}");
				Ok((self.begin_request(RequestKind::Search), request))
			}
			Err(e) => {
				warn!("Rejected query {:?}: {e}", self.query);
				self.notice = Some(Notice::error(e.to_string()));
				Err(e)
			}
		}
	}

	/// Applies a response if it belongs to the latest request.
	pub fn finish_request(
		&mut self,
		id: RequestId,
		result: Result<GraphDataset, ApiError>,
	) -> Outcome {
		let kind = match self.pending {
			Some((latest, kind)) if latest == id => kind,
			_ => {
				debug!("Dropping stale response for {id:?}");
				return Outcome::Stale;
			}
		};
		self.pending = None;

		match result {
			Ok(dataset) => {
				info!(
					"{kind:?} returned {} nodes, {} edges",
					dataset.nodes.len(),
					dataset.edges.len()
				);
				self.notice = None;
				if kind == RequestKind::Search {
					if dataset.nodes.is_empty() {
						self.notice = Some(Notice {
							level: NoticeLevel::Info,
							message: "No community found for this query".to_string(),
						});
					}
					self.moved.clear();
					self.request_fit();
				}
				self.dataset = dataset;
				Outcome::Applied
			}
			Err(e) => {
				warn!("{kind:?} failed: {e}");
				self.notice = Some(Notice::error(e.to_string()));
				Outcome::Failed
			}
		}
	}

	pub fn request_fit(&mut self) {
		self.fit_epoch += 1;
	}

	pub fn dismiss_notice(&mut self) {
		self.notice = None;
	}

	/// Records where the user dropped a node; ignored for unknown ids.
	pub fn record_move(&mut self, id: &str, position: (f64, f64)) {
		if self.dataset.node(id).is_some() {
			self.moved.insert(id.to_string(), position);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::GraphError;
	use crate::model::{Node, NodeCategory};

	fn tiny(label: &str) -> GraphDataset {
		GraphDataset {
			nodes: vec![Node::new("x", label, NodeCategory::Query)],
			..Default::default()
		}
	}

	fn store_with_query(q: &str) -> SearchStore {
		let mut store = SearchStore::default();
		store.query = q.to_string();
		store
	}

	#[test]
	fn search_replaces_dataset_exactly() {
		let mut store = store_with_query("John Smith");
		store.record_move("q1", (1.0, 2.0));
		let (id, _) = store.begin_search().unwrap();
		assert!(store.is_loading());

		assert_eq!(store.finish_request(id, Ok(tiny("X"))), Outcome::Applied);
		assert_eq!(store.dataset, tiny("X"));
		assert!(store.moved.is_empty());
		assert_eq!(store.fit_epoch, 1);
		assert!(!store.is_loading());
	}

	#[test]
	fn stale_response_is_dropped() {
		let mut store = store_with_query("A");
		let (first, _) = store.begin_search().unwrap();
		let (second, _) = store.begin_search().unwrap();

		assert_eq!(store.finish_request(second, Ok(tiny("second"))), Outcome::Applied);
		assert_eq!(store.finish_request(first, Ok(tiny("first"))), Outcome::Stale);
		assert_eq!(store.dataset, tiny("second"));
	}

	#[test]
	fn failure_keeps_previous_graph() {
		let mut store = store_with_query("A");
		let before = store.dataset.clone();
		let (id, _) = store.begin_search().unwrap();

		let outcome = store.finish_request(id, Err(ApiError::Network("offline".into())));
		assert_eq!(outcome, Outcome::Failed);
		assert_eq!(store.dataset, before);
		assert_eq!(store.notice.as_ref().map(|n| n.level), Some(NoticeLevel::Error));

		store.dismiss_notice();
		assert!(store.notice.is_none());
	}

	#[test]
	fn blank_query_never_dispatches() {
		let mut store = store_with_query("  ,  ");
		assert_eq!(store.begin_search().unwrap_err(), QueryError::Empty);
		assert!(!store.is_loading());
		assert!(store.notice.is_some());
	}

	#[test]
	fn node_action_keeps_moves_and_view() {
		let mut store = SearchStore::default();
		store.record_move("i1", (10.0, -4.0));
		let mut next = store.dataset.clone();
		next.reclassify("i1", NodeCategory::Community).unwrap();

		let id = store.begin_request(RequestKind::Node(NodeAction::Insert));
		assert_eq!(store.finish_request(id, Ok(next.clone())), Outcome::Applied);
		assert_eq!(store.dataset, next);
		assert_eq!(store.moved.get("i1"), Some(&(10.0, -4.0)));
		assert_eq!(store.fit_epoch, 0);
	}

	#[test]
	fn unknown_node_failure_is_reported() {
		let mut store = SearchStore::default();
		let id = store.begin_request(RequestKind::Node(NodeAction::Delete));
		let err = ApiError::Graph(GraphError::UnknownNode("ghost".into()));
		assert_eq!(store.finish_request(id, Err(err)), Outcome::Failed);
		assert!(store.notice.unwrap().message.contains("ghost"));
	}

	#[test]
	fn empty_result_leaves_info_notice() {
		let mut store = store_with_query("Nobody");
		let (id, _) = store.begin_search().unwrap();
		store.finish_request(id, Ok(GraphDataset::default()));
		assert!(store.dataset.nodes.is_empty());
		assert_eq!(store.notice.map(|n| n.level), Some(NoticeLevel::Info));
	}

	#[test]
	fn moves_of_unknown_nodes_are_ignored() {
		let mut store = SearchStore::default();
		store.record_move("ghost", (0.0, 0.0));
		assert!(store.moved.is_empty());
	}
}
