use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One artist entry as it appears in the dataset file.
///
/// Required fields are optional here so that a record missing them reaches the
/// graph builder and is reported with its position instead of failing the
/// whole parse.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtistRecord {
	#[serde(default)]
	pub firstname: Option<String>,
	#[serde(default)]
	pub surname: Option<String>,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub instruments: Vec<String>,
	#[serde(default)]
	pub concerts: Option<Vec<ConcertRef>>,
	/// Fields the graph does not interpret, carried through untouched.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A concert as listed inside an artist record. Only `id` is interpreted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConcertRef {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<Value>,
	#[serde(flatten)]
	pub fields: Map<String, Value>,
}

/// Outcome of reading a concert id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConcertIdError {
	Missing,
	Invalid,
}

impl ConcertRef {
	/// The id as text. Numeric ids are accepted and rendered in decimal.
	pub fn id_text(&self) -> Result<String, ConcertIdError> {
		match &self.id {
			None | Some(Value::Null) => Err(ConcertIdError::Missing),
			Some(Value::String(s)) => Ok(s.clone()),
			Some(Value::Number(n)) => Ok(n.to_string()),
			Some(_) => Err(ConcertIdError::Invalid),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn keeps_unknown_fields() {
		let record: ArtistRecord = serde_json::from_value(json!({
			"firstname": "Peter",
			"surname": "Brötzmann",
			"instruments": ["sax"],
			"country": "DE",
			"concerts": [{ "id": "c7", "year": 1979, "concert": "Moers" }]
		}))
		.unwrap();

		assert_eq!(record.extra.get("country"), Some(&json!("DE")));
		let concerts = record.concerts.unwrap();
		assert_eq!(concerts[0].fields.get("year"), Some(&json!(1979)));
		assert!(!concerts[0].fields.contains_key("id"));
	}

	#[test]
	fn missing_fields_deserialize_as_none() {
		let record: ArtistRecord = serde_json::from_value(json!({ "surname": "X" })).unwrap();
		assert_eq!(record.firstname, None);
		assert_eq!(record.concerts, None);
		assert!(record.instruments.is_empty());
	}

	#[test]
	fn null_instruments_read_as_empty() {
		let record: ArtistRecord = serde_json::from_value(json!({
			"firstname": "Sun",
			"surname": "Ra",
			"instruments": null,
			"concerts": []
		}))
		.unwrap();
		assert!(record.instruments.is_empty());
	}

	#[test]
	fn concert_id_text() {
		let of = |v: Value| ConcertRef {
			id: Some(v),
			fields: Map::new(),
		};
		assert_eq!(of(json!("c1")).id_text(), Ok("c1".to_string()));
		assert_eq!(of(json!(42)).id_text(), Ok("42".to_string()));
		assert_eq!(of(json!(null)).id_text(), Err(ConcertIdError::Missing));
		assert_eq!(of(json!([1])).id_text(), Err(ConcertIdError::Invalid));
		assert_eq!(ConcertRef::default().id_text(), Err(ConcertIdError::Missing));
	}
}
