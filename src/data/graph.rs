//! The artist/concert graph handed to the renderer.
//!
//! Serialises to the `{ nodes, links }` shape force layouts expect, with each
//! node tagged by `type` (`"artist"` or `"concert"`).

use serde::Serialize;
use serde_json::{Map, Value};

/// Which side of the bipartite graph a node sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
	Artist,
	Concert,
}

impl NodeKind {
	pub fn as_str(self) -> &'static str {
		match self {
			NodeKind::Artist => "artist",
			NodeKind::Concert => "concert",
		}
	}
}

/// A concert with a validated id; all other fields are opaque.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Concert {
	pub id: String,
	#[serde(flatten)]
	pub fields: Map<String, Value>,
}

impl Concert {
	/// A field rendered as display text. Strings are shown unquoted, numbers
	/// as written, anything else as empty.
	pub fn field_text(&self, key: &str) -> String {
		match self.fields.get(key) {
			Some(Value::String(s)) => s.clone(),
			Some(Value::Number(n)) => n.to_string(),
			Some(Value::Bool(b)) => b.to_string(),
			_ => String::new(),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistNode {
	/// `firstname` and `surname` joined without a separator.
	pub id: String,
	pub firstname: String,
	pub surname: String,
	pub instruments: Vec<String>,
	pub concerts: Vec<Concert>,
	pub number_of_concerts: usize,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcertNode {
	#[serde(flatten)]
	pub concert: Concert,
	/// Number of links pointing at this concert.
	pub number_of_artists: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GraphNode {
	Artist(ArtistNode),
	Concert(ConcertNode),
}

/// Text shown on the hover card.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverText {
	pub title: String,
	pub primary: String,
	pub secondary: String,
}

impl GraphNode {
	pub fn id(&self) -> &str {
		match self {
			GraphNode::Artist(a) => &a.id,
			GraphNode::Concert(c) => &c.concert.id,
		}
	}

	pub fn kind(&self) -> NodeKind {
		match self {
			GraphNode::Artist(_) => NodeKind::Artist,
			GraphNode::Concert(_) => NodeKind::Concert,
		}
	}

	/// Link count: concerts played for an artist, artists seen for a concert.
	pub fn degree(&self) -> usize {
		match self {
			GraphNode::Artist(a) => a.number_of_concerts,
			GraphNode::Concert(c) => c.number_of_artists,
		}
	}

	/// Short label drawn on the node: initials for artists, the year for
	/// concerts.
	pub fn label(&self) -> String {
		match self {
			GraphNode::Artist(a) => a
				.firstname
				.split(' ')
				.chain(std::iter::once(a.surname.as_str()))
				.filter_map(|word| word.chars().next())
				.collect(),
			GraphNode::Concert(c) => c.concert.field_text("year"),
		}
	}

	pub fn hover_text(&self) -> HoverText {
		match self {
			GraphNode::Artist(a) => HoverText {
				title: "Künstler".into(),
				primary: format!("{} {}", a.firstname, a.surname),
				secondary: a.instruments.join(", "),
			},
			GraphNode::Concert(c) => HoverText {
				title: "Konzert".into(),
				primary: c.concert.field_text("concert"),
				secondary: c.concert.field_text("starttime"),
			},
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Link {
	pub source: String,
	pub target: String,
	pub weight: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Graph {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<Link>,
}

impl Graph {
	pub fn node_by_id(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id() == id)
	}

	pub fn artists(&self) -> impl Iterator<Item = &ArtistNode> {
		self.nodes.iter().filter_map(|n| match n {
			GraphNode::Artist(a) => Some(a),
			GraphNode::Concert(_) => None,
		})
	}

	pub fn concerts(&self) -> impl Iterator<Item = &ConcertNode> {
		self.nodes.iter().filter_map(|n| match n {
			GraphNode::Concert(c) => Some(c),
			GraphNode::Artist(_) => None,
		})
	}

	/// Highest degree over all nodes, 0 for an empty graph.
	pub fn max_degree(&self) -> usize {
		self.nodes.iter().map(GraphNode::degree).max().unwrap_or(0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn artist(firstname: &str, surname: &str) -> GraphNode {
		GraphNode::Artist(ArtistNode {
			id: format!("{firstname}{surname}"),
			firstname: firstname.into(),
			surname: surname.into(),
			instruments: vec!["piano".into(), "voice".into()],
			concerts: vec![],
			number_of_concerts: 0,
			extra: Map::new(),
		})
	}

	fn concert(fields: Value) -> GraphNode {
		let Value::Object(fields) = fields else {
			panic!("fixture must be an object");
		};
		GraphNode::Concert(ConcertNode {
			concert: Concert {
				id: "c1".into(),
				fields,
			},
			number_of_artists: 3,
		})
	}

	#[test]
	fn artist_label_uses_every_firstname_word() {
		assert_eq!(artist("Anna Maria", "Jopek").label(), "AMJ");
		assert_eq!(artist("Sun", "Ra").label(), "SR");
		assert_eq!(artist("", "Ra").label(), "R");
	}

	#[test]
	fn concert_label_is_year() {
		assert_eq!(concert(json!({ "year": 1983 })).label(), "1983");
		assert_eq!(concert(json!({ "year": "1983" })).label(), "1983");
		assert_eq!(concert(json!({})).label(), "");
	}

	#[test]
	fn hover_text_per_kind() {
		let a = artist("Sun", "Ra").hover_text();
		assert_eq!(a.title, "Künstler");
		assert_eq!(a.primary, "Sun Ra");
		assert_eq!(a.secondary, "piano, voice");

		let c = concert(json!({ "concert": "Arkestra", "starttime": "21:00" })).hover_text();
		assert_eq!(c.title, "Konzert");
		assert_eq!(c.primary, "Arkestra");
		assert_eq!(c.secondary, "21:00");
	}

	#[test]
	fn serialises_with_type_tag() {
		let value = serde_json::to_value(concert(json!({ "year": 1990 }))).unwrap();
		assert_eq!(
			value,
			json!({ "type": "concert", "id": "c1", "year": 1990, "numberOfArtists": 3 })
		);

		let value = serde_json::to_value(artist("Sun", "Ra")).unwrap();
		assert_eq!(value["type"], "artist");
		assert_eq!(value["id"], "SunRa");
		assert_eq!(value["numberOfConcerts"], 0);
	}
}
