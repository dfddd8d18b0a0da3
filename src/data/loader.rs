use log::{debug, info};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use super::builder::build;
use super::graph::Graph;
use super::record::ArtistRecord;
use crate::error::{FetchError, LoadError};

/// Records kept for layout; anything past this is dropped.
pub const MAX_RECORDS: usize = 100;

/// Keeps the first [`MAX_RECORDS`] records in their original order.
pub fn bound(records: Vec<ArtistRecord>) -> Vec<ArtistRecord> {
	bound_to(records, MAX_RECORDS)
}

/// Positional truncation to at most `limit` records.
pub fn bound_to(mut records: Vec<ArtistRecord>, limit: usize) -> Vec<ArtistRecord> {
	records.truncate(limit);
	records
}

/// Parses a dataset body: a JSON array of artist records.
pub fn parse_records(text: &str) -> Result<Vec<ArtistRecord>, FetchError> {
	serde_json::from_str(text).map_err(|e| FetchError::Parse(e.to_string()))
}

/// Fetches and parses the dataset at `url`.
pub async fn load(url: &str) -> Result<Vec<ArtistRecord>, FetchError> {
	let window = web_sys::window().ok_or_else(|| FetchError::Unavailable("no browser window".into()))?;
	info!("Fetching dataset from {url}");

	let response: Response = JsFuture::from(window.fetch_with_str(url))
		.await
		.map_err(unavailable)?
		.dyn_into()
		.map_err(unavailable)?;
	if !response.ok() {
		return Err(FetchError::Status {
			url: url.to_string(),
			status: response.status(),
		});
	}

	let body = body_text(
		JsFuture::from(response.text().map_err(unavailable)?)
			.await
			.map_err(unavailable)?,
	)?;

	let records = parse_records(&body)?;
	debug!("Parsed {} artist records", records.len());
	Ok(records)
}

/// Loads the dataset, keeps the first `limit` records and builds the graph.
pub async fn load_graph(url: String, limit: usize) -> Result<Graph, LoadError> {
	let records = bound_to(load(&url).await?, limit);
	let graph = build(&records)?;
	info!(
		"Built graph with {} nodes and {} links from {} records",
		graph.nodes.len(),
		graph.links.len(),
		records.len()
	);
	Ok(graph)
}

/// The resolved value of `Response::text()`.
pub fn body_text(value: JsValue) -> Result<String, FetchError> {
	value
		.as_string()
		.ok_or_else(|| FetchError::Parse("response body is not text".into()))
}

fn unavailable(err: JsValue) -> FetchError {
	FetchError::Unavailable(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn named(n: usize) -> Vec<ArtistRecord> {
		(0..n)
			.map(|i| ArtistRecord {
				firstname: Some(format!("A{i}")),
				surname: Some(String::new()),
				concerts: Some(vec![]),
				..Default::default()
			})
			.collect()
	}

	#[test]
	fn bound_keeps_short_input() {
		let records = named(3);
		assert_eq!(bound(records.clone()), records);
		assert!(bound(vec![]).is_empty());
	}

	#[test]
	fn bound_truncates_to_prefix() {
		let records = named(150);
		let kept = bound(records.clone());
		assert_eq!(kept.len(), MAX_RECORDS);
		assert_eq!(kept[..], records[..MAX_RECORDS]);

		assert_eq!(bound(named(100)).len(), 100);
		assert_eq!(bound(named(101)).len(), 100);
	}

	#[test]
	fn bound_to_custom_limit() {
		let kept = bound_to(named(10), 4);
		let names: Vec<_> = kept.iter().filter_map(|r| r.firstname.as_deref()).collect();
		assert_eq!(names, ["A0", "A1", "A2", "A3"]);
	}

	#[test]
	fn parse_accepts_record_array() {
		let records = parse_records(
			r#"[{"firstname":"Ada","surname":"X","instruments":["bass"],"concerts":[{"id":"c1"}]}]"#,
		)
		.unwrap();
		assert_eq!(records.len(), 1);
		assert_eq!(records[0].instruments, ["bass"]);
	}

	#[test]
	fn parse_rejects_invalid_json() {
		assert!(matches!(parse_records("[{"), Err(FetchError::Parse(_))));
		assert!(matches!(parse_records(r#"{"firstname":"Ada"}"#), Err(FetchError::Parse(_))));
		assert!(matches!(
			parse_records(r#"[{"firstname":7}]"#),
			Err(FetchError::Parse(_))
		));
	}
}
