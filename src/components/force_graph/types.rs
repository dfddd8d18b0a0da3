use force_graph::DefaultNodeIdx;

use crate::config::SimulationConfig;
use crate::data::HoverText;

/// Per-node drawing data carried inside the simulation graph.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub radius: f64,
	pub font_size: f64,
	pub color: &'static str,
	pub label: String,
	pub card: HoverText,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// The node under the pointer and the highlight around it.
///
/// `focus` outlives `node` while the highlight fades out.
#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub focus: Option<DefaultNodeIdx>,
	pub neighbors: Vec<DefaultNodeIdx>,
	pub highlight_t: f64,
}

/// Simulation temperature. `alpha` eases toward `alpha_target` every tick;
/// once it drops below `alpha_min` the simulation stops until restarted.
#[derive(Clone, Debug)]
pub struct Cooling {
	pub alpha: f64,
	pub alpha_target: f64,
	alpha_min: f64,
	alpha_decay: f64,
	running: bool,
}

impl Cooling {
	pub fn new(config: &SimulationConfig) -> Self {
		Self {
			alpha: 1.0,
			alpha_target: 0.0,
			alpha_min: config.alpha_min,
			alpha_decay: config.alpha_decay,
			running: true,
		}
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	pub fn restart(&mut self) {
		self.running = true;
	}

	/// Advances one tick. Returns the alpha for this tick, or `None` if stopped.
	pub fn step(&mut self) -> Option<f64> {
		if !self.running {
			return None;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;
		if self.alpha < self.alpha_min {
			self.running = false;
		}
		Some(self.alpha)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cools_down_and_stops() {
		let mut cooling = Cooling::new(&SimulationConfig::default());
		let ticks = std::iter::from_fn(|| cooling.step()).count();
		assert!((299..=301).contains(&ticks), "stopped after {ticks} ticks");
		assert!(!cooling.is_running());
		assert_eq!(cooling.step(), None);
	}

	#[test]
	fn target_keeps_it_warm() {
		let mut cooling = Cooling::new(&SimulationConfig::default());
		cooling.alpha_target = 0.3;
		for _ in 0..2000 {
			cooling.step();
		}
		assert!(cooling.is_running());
		assert!((cooling.alpha - 0.3).abs() < 1e-3);
	}

	#[test]
	fn restart_resumes_from_current_alpha() {
		let mut cooling = Cooling::new(&SimulationConfig::default());
		while cooling.step().is_some() {}
		let cold = cooling.alpha;
		cooling.alpha_target = 0.3;
		cooling.restart();
		let alpha = cooling.step().unwrap();
		assert!(alpha > cold);
		assert!(cooling.is_running());
	}
}
