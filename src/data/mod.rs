//! Artist dataset: loading, bounding and graph construction.

mod builder;
mod graph;
mod loader;
mod record;

pub use builder::build;
pub use graph::{ArtistNode, Concert, ConcertNode, Graph, GraphNode, HoverText, Link, NodeKind};
pub use loader::{MAX_RECORDS, body_text, bound, bound_to, load, load_graph, parse_records};
pub use record::{ArtistRecord, ConcertRef};
