//! Viewer configuration and its query-string overrides.

use log::warn;

use crate::data::MAX_RECORDS;

/// Physics and cooling parameters for the layout simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
	pub force_charge: f32,
	pub force_spring: f32,
	pub force_max: f32,
	pub node_speed: f32,
	pub damping_factor: f32,
	pub node_mass: f32,
	/// Below this the simulation stops until something restarts it.
	pub alpha_min: f64,
	/// Fraction of the gap to `alpha_target` closed each tick.
	pub alpha_decay: f64,
	/// Target held while a node is being dragged.
	pub drag_alpha_target: f64,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		let alpha_min = 0.001_f64;
		Self {
			force_charge: 100.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
			node_mass: 10.0,
			alpha_min,
			// reaches alpha_min from 1.0 in 300 ticks
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			drag_alpha_target: 0.3,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphConfig {
	pub dataset_url: String,
	pub max_records: usize,
	/// Circle radius for degree 0 and for the highest degree.
	pub node_radius: (f64, f64),
	/// Label font size for degree 0 and for the highest degree.
	pub font_size: (f64, f64),
	pub width: f64,
	pub height: f64,
	pub simulation: SimulationConfig,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			dataset_url: "moers-artists.json".into(),
			max_records: MAX_RECORDS,
			node_radius: (12.0, 30.0),
			font_size: (7.0, 12.0),
			width: 1200.0,
			height: 800.0,
			simulation: SimulationConfig::default(),
		}
	}
}

impl GraphConfig {
	/// Applies `?data=` and `?limit=` overrides. A `limit` that is not a
	/// non-negative integer is ignored.
	pub fn with_query(mut self, data: Option<&str>, limit: Option<&str>) -> Self {
		if let Some(url) = data.filter(|u| !u.is_empty()) {
			self.dataset_url = url.to_string();
		}
		if let Some(raw) = limit {
			match raw.parse::<usize>() {
				Ok(n) => self.max_records = n,
				Err(e) => warn!("ignoring limit {raw:?}: {e}"),
			}
		}
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults() {
		let config = GraphConfig::default();
		assert_eq!(config.max_records, 100);
		assert_eq!(config.node_radius, (12.0, 30.0));
		let sim = config.simulation;
		let after_300 = (1.0 - sim.alpha_decay).powi(300);
		assert!((after_300 - sim.alpha_min).abs() < 1e-9);
	}

	#[test]
	fn query_overrides() {
		let config = GraphConfig::default().with_query(Some("other.json"), Some("20"));
		assert_eq!(config.dataset_url, "other.json");
		assert_eq!(config.max_records, 20);
	}

	#[test]
	fn bad_or_empty_query_values_are_ignored() {
		let config = GraphConfig::default().with_query(Some(""), Some("lots"));
		assert_eq!(config, GraphConfig::default());
	}
}
