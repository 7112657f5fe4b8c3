//! Runtime configuration.
//!
//! The page may carry an inline block such as
//!
//! ```html
//! <script id="gics-config" type="application/json">
//!   {"backend": {"kind": "http", "base_url": "/api"}, "default_model": "ACQ"}
//! </script>
//! ```
//!
//! Every field is optional; anything missing falls back to [`AppConfig::default`].

use log::{debug, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use crate::error::ConfigError;
use crate::model::sample::EXAMPLE_QUERIES;
use crate::query::{Dataset, SearchModel};

/// Id of the `<script>` element holding the JSON configuration.
pub const CONFIG_ELEMENT_ID: &str = "gics-config";

/// Which implementation answers search / insert / delete.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackendConfig {
	/// In-memory stand-in seeded with the sample dataset.
	#[default]
	Demo,
	/// JSON over HTTP, rooted at `base_url`.
	Http { base_url: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	pub title: String,
	pub backend: BackendConfig,
	pub default_dataset: Dataset,
	pub default_model: SearchModel,
	pub example_queries: Vec<String>,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			title: "Interactive Community Search System (GICS)".to_string(),
			backend: BackendConfig::Demo,
			default_dataset: Dataset::Dblp,
			default_model: SearchModel::Gnn,
			example_queries: EXAMPLE_QUERIES.iter().map(|q| q.to_string()).collect(),
		}
	}
}

impl AppConfig {
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		Ok(serde_json::from_str(json)?)
	}

	/// Reads the inline block from the current document. Falls back to the
	/// defaults when the block is absent or malformed.
	pub fn load() -> Self {
		let text = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
			.and_then(|el| el.dyn_into::<HtmlScriptElement>().ok())
			.and_then(|script| script.text().ok());

		let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
			debug!("No #{CONFIG_ELEMENT_ID} block, using defaults");
			return Self::default();
		};

		match Self::from_json(&text) {
			Ok(config) => {
				debug!("Loaded configuration: {config:?}");
				config
			}
			Err(e) => {
				warn!("Ignoring #{CONFIG_ELEMENT_ID}: {e}");
				Self::default()
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_object_gives_defaults() {
		assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
	}

	#[test]
	fn partial_override() {
		let config = AppConfig::from_json(
			r#"{"backend": {"kind": "http", "base_url": "/api"}, "default_model": "WCS"}"#,
		)
		.unwrap();
		assert_eq!(
			config.backend,
			BackendConfig::Http {
				base_url: "/api".into()
			}
		);
		assert_eq!(config.default_model, SearchModel::Wcs);
		assert_eq!(config.default_dataset, Dataset::Dblp);
		assert_eq!(config.example_queries.len(), 3);
	}

	#[test]
	fn malformed_block_is_an_error() {
		assert!(AppConfig::from_json(r#"{"backend": {"kind": "grpc"}}"#).is_err());
		assert!(AppConfig::from_json("not json").is_err());
	}
}
