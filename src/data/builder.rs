use std::collections::{HashMap, HashSet};

use log::warn;
use serde_json::{Map, Value};

use super::graph::{ArtistNode, Concert, ConcertNode, Graph, GraphNode, Link};
use super::record::{ArtistRecord, ConcertIdError};
use crate::error::MalformedRecordError;

/// Keys the graph writes itself. Input fields with these names are dropped.
const ARTIST_KEYS: &[&str] = &["id", "type", "numberOfConcerts"];
const CONCERT_KEYS: &[&str] = &["id", "type", "numberOfArtists"];

/// Turns artist records into an artist/concert graph.
///
/// Artist nodes come first in record order, followed by concert nodes in the
/// order their id was first seen. Links follow artist order, then each
/// artist's concert order. Either every record is valid and a full graph is
/// returned, or nothing is.
pub fn build(records: &[ArtistRecord]) -> Result<Graph, MalformedRecordError> {
	let artists = records
		.iter()
		.enumerate()
		.map(|(i, record)| artist_node(i, record))
		.collect::<Result<Vec<_>, _>>()?;
	check_concert_id_types(records)?;

	let mut concerts: Vec<ConcertNode> = Vec::new();
	let mut concert_idx: HashMap<&str, usize> = HashMap::new();
	for concert in artists.iter().flat_map(|a| &a.concerts) {
		let idx = *concert_idx.entry(concert.id.as_str()).or_insert_with(|| {
			concerts.push(ConcertNode {
				concert: concert.clone(),
				number_of_artists: 0,
			});
			concerts.len() - 1
		});
		concerts[idx].number_of_artists += 1;
	}

	let links = artists
		.iter()
		.flat_map(|artist| {
			artist.concerts.iter().map(|concert| Link {
				source: artist.id.clone(),
				target: concert.id.clone(),
				weight: 1,
			})
		})
		.collect();

	let mut seen = HashSet::with_capacity(artists.len());
	for artist in &artists {
		if !seen.insert(artist.id.as_str()) {
			warn!("artist id {:?} appears more than once", artist.id);
		}
		if concert_idx.contains_key(artist.id.as_str()) {
			warn!("artist id {:?} is also a concert id", artist.id);
		}
	}

	let nodes = artists
		.iter()
		.cloned()
		.map(GraphNode::Artist)
		.chain(concerts.into_iter().map(GraphNode::Concert))
		.collect();

	Ok(Graph { nodes, links })
}

/// Numeric ids are compared as text, so `17` and `"17"` would name the same
/// node. Reject datasets that mix the two.
fn check_concert_id_types(records: &[ArtistRecord]) -> Result<(), MalformedRecordError> {
	let mut numeric_by_id: HashMap<String, bool> = HashMap::new();
	for (record_idx, record) in records.iter().enumerate() {
		for (concert_idx, concert) in record.concerts.iter().flatten().enumerate() {
			let Ok(id) = concert.id_text() else {
				continue;
			};
			let numeric = matches!(concert.id, Some(Value::Number(_)));
			if *numeric_by_id.entry(id.clone()).or_insert(numeric) != numeric {
				return Err(MalformedRecordError::ConflictingConcertId {
					record: record_idx,
					concert: concert_idx,
					id,
				});
			}
		}
	}
	Ok(())
}

fn without_keys(fields: &Map<String, Value>, reserved: &[&str]) -> Map<String, Value> {
	fields
		.iter()
		.filter(|(key, _)| !reserved.contains(&key.as_str()))
		.map(|(key, value)| (key.clone(), value.clone()))
		.collect()
}

fn artist_node(record_idx: usize, record: &ArtistRecord) -> Result<ArtistNode, MalformedRecordError> {
	let missing = |field| MalformedRecordError::MissingField {
		record: record_idx,
		field,
	};
	let firstname = record.firstname.clone().ok_or_else(|| missing("firstname"))?;
	let surname = record.surname.clone().ok_or_else(|| missing("surname"))?;
	let refs = record.concerts.as_ref().ok_or_else(|| missing("concerts"))?;

	let concerts = refs
		.iter()
		.enumerate()
		.map(|(concert_idx, concert)| {
			let id = concert.id_text().map_err(|e| match e {
				ConcertIdError::Missing => MalformedRecordError::MissingConcertId {
					record: record_idx,
					concert: concert_idx,
				},
				ConcertIdError::Invalid => MalformedRecordError::InvalidConcertId {
					record: record_idx,
					concert: concert_idx,
				},
			})?;
			Ok(Concert {
				id,
				fields: without_keys(&concert.fields, CONCERT_KEYS),
			})
		})
		.collect::<Result<Vec<_>, _>>()?;

	Ok(ArtistNode {
		id: format!("{firstname}{surname}"),
		number_of_concerts: concerts.len(),
		firstname,
		surname,
		instruments: record.instruments.clone(),
		concerts,
		extra: without_keys(&record.extra, ARTIST_KEYS),
	})
}
