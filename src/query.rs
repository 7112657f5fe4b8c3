//! Search parameters collected by the control panel.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dataset {
	#[default]
	#[serde(rename = "DBLP")]
	Dblp,
	#[serde(rename = "OTHER")]
	Other,
}

impl Dataset {
	pub const ALL: [Dataset; 2] = [Dataset::Dblp, Dataset::Other];

	/// Wire value, also used as the `<option>` value.
	pub const fn code(self) -> &'static str {
		match self {
			Dataset::Dblp => "DBLP",
			Dataset::Other => "OTHER",
		}
	}

	pub const fn display_name(self) -> &'static str {
		match self {
			Dataset::Dblp => "DBLP",
			Dataset::Other => "Other Dataset",
		}
	}
}

impl FromStr for Dataset {
	type Err = QueryError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|d| d.code() == s)
			.ok_or_else(|| QueryError::UnknownDataset(s.to_string()))
	}
}

/// Community search model run by the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SearchModel {
	#[default]
	Gnn,
	Acq,
	Wcs,
}

impl SearchModel {
	pub const ALL: [SearchModel; 3] = [SearchModel::Gnn, SearchModel::Acq, SearchModel::Wcs];

	pub const fn code(self) -> &'static str {
		match self {
			SearchModel::Gnn => "GNN",
			SearchModel::Acq => "ACQ",
			SearchModel::Wcs => "WCS",
		}
	}
}

impl FromStr for SearchModel {
	type Err = QueryError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|m| m.code() == s)
			.ok_or_else(|| QueryError::UnknownModel(s.to_string()))
	}
}

/// A validated search: at least one name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
	#[serde(rename = "query")]
	pub names: Vec<String>,
	pub dataset: Dataset,
	pub model: SearchModel,
}

impl SearchRequest {
	/// Splits the free text on commas. Blank segments are dropped.
	pub fn parse(text: &str, dataset: Dataset, model: SearchModel) -> Result<Self, QueryError> {
		let names: Vec<String> = text
			.split(',')
			.map(str::trim)
			.filter(|s| !s.is_empty())
			.map(String::from)
			.collect();
		if names.is_empty() {
			return Err(QueryError::Empty);
		}
		Ok(Self {
			names,
			dataset,
			model,
		})
	}
}

impl fmt::Display for SearchRequest {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"[{}] on {} with {}",
			self.names.join(", "),
			self.dataset.code(),
			self.model.code()
		)
	}
}
