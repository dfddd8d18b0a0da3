//! Error types for loading a dataset and turning it into a graph.

use thiserror::Error;

/// The dataset could not be obtained or decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
	/// No browser window, or the request itself was rejected.
	#[error("dataset unavailable: {0}")]
	Unavailable(String),
	/// The server answered with a non-success status.
	#[error("fetching {url} failed with HTTP {status}")]
	Status { url: String, status: u16 },
	/// The body was not a JSON array of artist records.
	#[error("dataset is not valid JSON: {0}")]
	Parse(String),
}

/// A record does not meet the minimal shape the graph builder needs.
///
/// Positions are zero-based indices into the bounded record list and into the
/// record's `concerts` array.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedRecordError {
	#[error("record {record} has no `{field}`")]
	MissingField { record: usize, field: &'static str },
	#[error("concert {concert} of record {record} has no `id`")]
	MissingConcertId { record: usize, concert: usize },
	#[error("concert {concert} of record {record} has an `id` that is neither string nor number")]
	InvalidConcertId { record: usize, concert: usize },
	/// The same id text was used once as a JSON number and once as a string.
	#[error("concert {concert} of record {record} reuses id {id:?} with a different JSON type")]
	ConflictingConcertId {
		record: usize,
		concert: usize,
		id: String,
	},
}

/// Anything that ends a load attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
	#[error(transparent)]
	Fetch(#[from] FetchError),
	#[error(transparent)]
	Malformed(#[from] MalformedRecordError),
}
