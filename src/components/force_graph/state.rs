use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::{debug, warn};

use super::scale::{COLORS, LinearScale, OrdinalScale};
use super::types::{Cooling, DragState, HoverState, NodeInfo, PanState, ViewTransform};
use crate::config::GraphConfig;
use crate::data::{Graph, HoverText, NodeKind};

/// Radius of the ring nodes start on before the layout spreads them out.
const START_RING: f64 = 100.0;

/// Everything that changes while a loaded graph is on screen: simulation,
/// viewport, pointer interaction and cooling. Created per graph load and
/// dropped with the canvas.
pub struct GraphSession {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub cooling: Cooling,
	pub width: f64,
	pub height: f64,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
	shared_ids: Vec<String>,
	drag_alpha_target: f64,
}

/// Where and what to draw for the hover card, in screen coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverCard {
	pub x: f64,
	pub y: f64,
	pub text: HoverText,
}

impl GraphSession {
	pub fn new(data: &Graph, config: &GraphConfig, width: f64, height: f64) -> Self {
		let sim = &config.simulation;
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: sim.force_charge,
			force_spring: sim.force_spring,
			force_max: sim.force_max,
			node_speed: sim.node_speed,
			damping_factor: sim.damping_factor,
		});

		let max_degree = data.max_degree() as f64;
		let radius = LinearScale::new((0.0, max_degree), config.node_radius);
		let font = LinearScale::new((0.0, max_degree), config.font_size);
		let mut colors = OrdinalScale::new(COLORS);

		let mut id_to_idx = HashMap::new();
		for (i, node) in data.nodes.iter().enumerate() {
			let degree = node.degree() as f64;
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let idx = graph.add_node(NodeData {
				x: (START_RING * angle.cos()) as f32,
				y: (START_RING * angle.sin()) as f32,
				mass: sim.node_mass,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id().to_string(),
					radius: radius.apply(degree),
					font_size: font.apply(degree),
					color: colors.color(node.kind().as_str()),
					label: node.label(),
					card: node.hover_text(),
				},
			});
			if id_to_idx.insert((node.kind(), node.id().to_string()), idx).is_some() {
				warn!("duplicate {} id {:?}; links attach to the last one", node.kind().as_str(), node.id());
			}
		}

		let mut shared_ids: Vec<String> = data
			.artists()
			.filter(|a| id_to_idx.contains_key(&(NodeKind::Concert, a.id.clone())))
			.map(|a| a.id.clone())
			.collect();
		shared_ids.sort();
		shared_ids.dedup();
		for id in &shared_ids {
			warn!("id {id:?} names both an artist and a concert");
		}

		// links always run artist -> concert
		let mut edges = Vec::with_capacity(data.links.len());
		for link in &data.links {
			let src = id_to_idx.get(&(NodeKind::Artist, link.source.clone()));
			let tgt = id_to_idx.get(&(NodeKind::Concert, link.target.clone()));
			match (src, tgt) {
				(Some(&src), Some(&tgt)) => {
					graph.add_edge(src, tgt, EdgeData::default());
					edges.push((src, tgt));
				}
				_ => warn!("skipping link {} -> {}: endpoint not found", link.source, link.target),
			}
		}

		Self {
			graph,
			edges,
			shared_ids,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			cooling: Cooling::new(sim),
			width,
			height,
			drag_alpha_target: sim.drag_alpha_target,
		}
	}

	/// Ids that name both an artist and a concert.
	pub fn shared_ids(&self) -> &[String] {
		&self.shared_ids
	}

	/// Number of edges in the simulation graph.
	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn graph_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
		(
			gx * self.transform.k + self.transform.x,
			gy * self.transform.k + self.transform.y,
		)
	}

	/// Topmost node whose circle contains the screen point.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < node.data.user_data.radius {
				found = Some(node.index());
			}
		});
		found
	}

	/// Position and drawing data of one node.
	pub fn node(&self, idx: DefaultNodeIdx) -> Option<(f64, f64, NodeInfo)> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some((node.x() as f64, node.y() as f64, node.data.user_data.clone()));
			}
		});
		found
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		self.hover.node = node;

		let Some(idx) = node else {
			return;
		};
		if self.hover.focus != Some(idx) {
			self.hover.highlight_t = 0.0;
		}
		self.hover.focus = Some(idx);
		self.hover.neighbors = self
			.edges
			.iter()
			.filter_map(|&(src, tgt)| {
				if src == idx {
					Some(tgt)
				} else if tgt == idx {
					Some(src)
				} else {
					None
				}
			})
			.collect();

		self.cooling.alpha_target = 0.0;
		self.cooling.restart();
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.focus == Some(idx) || self.hover.neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.focus.is_some()
	}

	/// The card for the hovered node, anchored just below-right of its circle.
	pub fn hover_card(&self) -> Option<HoverCard> {
		let (x, y, info) = self.node(self.hover.node?)?;
		let (sx, sy) = self.graph_to_screen(x, y);
		let offset = info.radius * self.transform.k + 3.0;
		Some(HoverCard {
			x: sx + offset,
			y: sy + offset,
			text: info.card,
		})
	}

	pub fn is_dragging(&self) -> bool {
		self.drag.node_idx.is_some()
	}

	/// Pins the node under the pointer and warms the simulation up.
	pub fn begin_drag(&mut self, idx: DefaultNodeIdx, sx: f64, sy: f64) {
		let Some((x, y, info)) = self.node(idx) else {
			return;
		};
		debug!("dragging {}", info.id);
		self.drag = DragState {
			node_idx: Some(idx),
			start_x: sx,
			start_y: sy,
			node_start_x: x as f32,
			node_start_y: y as f32,
		};
		self.set_anchor(idx, Some((x as f32, y as f32)));
		self.cooling.alpha_target = self.drag_alpha_target;
		self.cooling.restart();
	}

	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		let Some(idx) = self.drag.node_idx else {
			return;
		};
		let (dx, dy) = (
			(sx - self.drag.start_x) / self.transform.k,
			(sy - self.drag.start_y) / self.transform.k,
		);
		let pos = (
			self.drag.node_start_x + dx as f32,
			self.drag.node_start_y + dy as f32,
		);
		self.set_anchor(idx, Some(pos));
	}

	/// Releases the dragged node back to the simulation.
	pub fn end_drag(&mut self) {
		if let Some(idx) = self.drag.node_idx.take() {
			self.set_anchor(idx, None);
			self.cooling.alpha_target = 0.0;
		}
	}

	fn set_anchor(&mut self, idx: DefaultNodeIdx, pos: Option<(f32, f32)>) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				match pos {
					Some((x, y)) => {
						node.data.x = x;
						node.data.y = y;
						node.data.is_anchor = true;
					}
					None => node.data.is_anchor = false,
				}
			}
		});
	}

	pub fn begin_pan(&mut self, sx: f64, sy: f64) {
		self.pan = PanState {
			active: true,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn pan_to(&mut self, sx: f64, sy: f64) {
		if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	pub fn end_pan(&mut self) {
		self.pan.active = false;
	}

	/// Zooms by one wheel notch around the screen point.
	pub fn zoom(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn tick(&mut self, dt: f32) {
		if let Some(alpha) = self.cooling.step() {
			self.graph.update(dt * alpha as f32);
		}

		let (target, speed) = if self.hover.node.is_some() {
			(1.0, 1.8)
		} else {
			(0.0, 1.26)
		};
		self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
		if self.hover.node.is_none() && self.hover.highlight_t < 0.01 {
			self.hover.highlight_t = 0.0;
			self.hover.focus = None;
			self.hover.neighbors.clear();
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
