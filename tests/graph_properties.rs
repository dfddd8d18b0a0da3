use std::collections::HashSet;

use concert_graph::data::{ArtistRecord, GraphNode, MAX_RECORDS, bound, build, parse_records};
use concert_graph::error::{LoadError, MalformedRecordError};
use serde_json::{Value, json};

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

/// `n` artists, each playing up to four of forty concerts.
fn dataset(n: usize) -> Vec<ArtistRecord> {
	let records: Vec<Value> = (0..n)
		.map(|i| {
			let count = (rand_simple(i) * 5.0) as usize;
			let concerts: Vec<Value> = (0..count)
				.map(|j| {
					let c = (rand_simple(i * 7 + j) * 40.0) as usize;
					json!({ "id": format!("c{c}"), "year": 1972 + c })
				})
				.collect();
			json!({
				"firstname": format!("Artist{i}"),
				"surname": "Moers",
				"instruments": ["sax"],
				"concerts": concerts,
			})
		})
		.collect();
	serde_json::from_value(Value::Array(records)).unwrap()
}

#[test]
fn node_count_is_distinct_artists_plus_distinct_concerts() {
	let records = bound(dataset(250));
	let graph = build(&records).unwrap();

	let concert_ids: HashSet<String> = records
		.iter()
		.flat_map(|r| r.concerts.iter().flatten())
		.filter_map(|c| c.id.as_ref().and_then(Value::as_str).map(str::to_string))
		.collect();
	assert_eq!(graph.nodes.len(), MAX_RECORDS + concert_ids.len());

	let node_ids: HashSet<&str> = graph.nodes.iter().map(GraphNode::id).collect();
	assert_eq!(node_ids.len(), graph.nodes.len());
}

#[test]
fn degrees_match_link_counts() {
	let graph = build(&dataset(120)).unwrap();

	for node in &graph.nodes {
		let count = match node {
			GraphNode::Artist(a) => graph.links.iter().filter(|l| l.source == a.id).count(),
			GraphNode::Concert(c) => graph.links.iter().filter(|l| l.target == c.concert.id).count(),
		};
		assert_eq!(node.degree(), count, "degree of {}", node.id());
	}
}

#[test]
fn links_resolve_to_the_right_kind_of_node() {
	let graph = build(&dataset(80)).unwrap();
	let artists: HashSet<&str> = graph.artists().map(|a| a.id.as_str()).collect();
	let concerts: HashSet<&str> = graph.concerts().map(|c| c.concert.id.as_str()).collect();

	assert!(!graph.links.is_empty());
	for link in &graph.links {
		assert!(artists.contains(link.source.as_str()));
		assert!(concerts.contains(link.target.as_str()));
		assert_eq!(link.weight, 1);
	}
}

#[test]
fn rebuilding_gives_the_same_graph() {
	let records = dataset(60);
	let first = serde_json::to_value(build(&records).unwrap()).unwrap();
	let second = serde_json::to_value(build(&records).unwrap()).unwrap();
	assert_eq!(first, second);
}

#[test]
fn dataset_file_to_graph() {
	let records = parse_records(
		r#"[
			{"firstname":"Ada","surname":"X","instruments":[],"concerts":[{"id":"c1"}]},
			{"firstname":"Bob","surname":"Y","instruments":[],"concerts":[{"id":"c1"}]}
		]"#,
	)
	.unwrap();
	let graph = build(&bound(records)).unwrap();

	let value = serde_json::to_value(&graph).unwrap();
	assert_eq!(value["nodes"][0]["id"], "AdaX");
	assert_eq!(value["nodes"][0]["type"], "artist");
	assert_eq!(value["nodes"][0]["numberOfConcerts"], 1);
	assert_eq!(value["nodes"][2]["id"], "c1");
	assert_eq!(value["nodes"][2]["type"], "concert");
	assert_eq!(value["nodes"][2]["numberOfArtists"], 2);
	assert_eq!(
		value["links"],
		json!([
			{ "source": "AdaX", "target": "c1", "weight": 1 },
			{ "source": "BobY", "target": "c1", "weight": 1 }
		])
	);
}

#[test]
fn malformed_record_surfaces_as_load_error() {
	let records = parse_records(r#"[{"firstname":"Ada","surname":"X"}]"#).unwrap();
	let err: LoadError = build(&records).unwrap_err().into();
	assert_eq!(
		err,
		LoadError::Malformed(MalformedRecordError::MissingField {
			record: 0,
			field: "concerts"
		})
	);
	assert_eq!(err.to_string(), "record 0 has no `concerts`");
}
