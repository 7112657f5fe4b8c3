//! JSON-over-HTTP backend.
//!
//! Only functional in the browser; native builds get a stub that reports
//! [`ApiError::Unavailable`].

use serde::Serialize;

use crate::error::ApiError;
use crate::model::GraphDataset;
use crate::query::SearchRequest;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NodeAction<'a> {
	node_id: &'a str,
}

#[derive(Clone, Debug)]
pub struct HttpBackend {
	base_url: String,
}

impl HttpBackend {
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into().trim_end_matches('/').to_string(),
		}
	}

	pub fn endpoint(&self, path: &str) -> String {
		format!("{}/{}", self.base_url, path)
	}

	pub async fn search(&self, request: &SearchRequest) -> Result<GraphDataset, ApiError> {
		self.post(&self.endpoint("search"), request).await
	}

	pub async fn insert_node(&self, node_id: &str) -> Result<GraphDataset, ApiError> {
		self.post(&self.endpoint("insert"), &NodeAction { node_id }).await
	}

	pub async fn delete_node(&self, node_id: &str) -> Result<GraphDataset, ApiError> {
		self.post(&self.endpoint("delete"), &NodeAction { node_id }).await
	}

	#[cfg(target_arch = "wasm32")]
	async fn post<T: Serialize>(&self, url: &str, body: &T) -> Result<GraphDataset, ApiError> {
		use gloo_net::http::Request;

		let resp = Request::post(url)
			.json(body)
			.map_err(|e| ApiError::Decode(e.to_string()))?
			.send()
			.await
			.map_err(|e| ApiError::Network(e.to_string()))?;

		if !resp.ok() {
			return Err(ApiError::Status {
				status: resp.status(),
				text: resp.status_text(),
			});
		}

		resp.json::<GraphDataset>()
			.await
			.map_err(|e| ApiError::Decode(e.to_string()))
	}

	#[cfg(not(target_arch = "wasm32"))]
	async fn post<T: Serialize>(&self, url: &str, _body: &T) -> Result<GraphDataset, ApiError> {
		log::warn!("HTTP backend called outside the browser: {url}");
		Err(ApiError::Unavailable("HTTP backend requires a wasm32 build"))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn endpoint_joins_without_double_slash() {
		assert_eq!(HttpBackend::new("/api/").endpoint("search"), "/api/search");
		assert_eq!(
			HttpBackend::new("https://gics.example").endpoint("insert"),
			"https://gics.example/insert"
		);
	}

	#[test]
	fn node_action_body_is_camel_case() {
		let body = serde_json::to_string(&NodeAction { node_id: "i1" }).unwrap();
		assert_eq!(body, r#"{"nodeId":"i1"}"#);
	}

	#[test]
	fn native_build_reports_unavailable() {
		let err = pollster::block_on(HttpBackend::new("/api").delete_node("d1")).unwrap_err();
		assert!(matches!(err, ApiError::Unavailable(_)));
	}
}
