use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::GraphView;
use super::viewport::{Bounds, Viewport};

pub const NODE_RADIUS: f64 = 15.0;
pub const HIT_RADIUS: f64 = 18.0;

/// Simulation steps run before a freshly built graph is first shown.
const WARMUP_TICKS: usize = 200;
const TICK_SECS: f32 = 0.016;
const SPAWN_RADIUS: f64 = 100.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub color: &'static str,
}

#[derive(Clone, Debug)]
pub struct EdgeLink {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub color: &'static str,
	pub label: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node: Option<DefaultNodeIdx>,
	pub start: (f64, f64),
	pub node_start: (f32, f32),
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start: (f64, f64),
	pub origin: (f64, f64),
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub fading_node: Option<DefaultNodeIdx>,
	pub fading_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub viewport: Viewport,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub arrows: bool,
	edges: Vec<EdgeLink>,
}

fn simulation() -> ForceGraph<NodeInfo, ()> {
	ForceGraph::new(SimulationParameters {
		force_charge: 1200.0,
		force_spring: 0.05,
		force_max: 200.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

impl ForceGraphState {
	pub fn new(view: &GraphView, width: f64, height: f64, arrows: bool) -> Self {
		let mut state = Self {
			graph: simulation(),
			viewport: Viewport::new(width, height),
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			arrows,
			edges: Vec::new(),
		};
		state.set_data(view);
		state
	}

	/// Rebuilds the simulation for `view`. Nodes whose id survives keep
	/// their position; new ones spawn around the existing layout. Only
	/// nodes with a pin in `view` stay anchored.
	pub fn set_data(&mut self, view: &GraphView) {
		let mut previous: HashMap<String, (f32, f32)> = HashMap::new();
		self.graph.visit_nodes(|node| {
			previous.insert(node.data.user_data.id.clone(), (node.x(), node.y()));
		});
		let (cx, cy) = Bounds::from_points(previous.values().map(|&(x, y)| (x as f64, y as f64)))
			.map(|b| b.center())
			.unwrap_or((0.0, 0.0));

		let mut graph = simulation();
		let mut index = HashMap::with_capacity(view.nodes.len());
		let mut carried = 0;

		for (i, node) in view.nodes.iter().enumerate() {
			let (x, y, is_anchor) = match (node.pinned, previous.get(&node.id)) {
				(Some((px, py)), _) => (px as f32, py as f32, true),
				(None, Some(&(px, py))) => {
					carried += 1;
					(px, py, false)
				}
				(None, None) => {
					let angle = i as f64 * 2.0 * PI / view.nodes.len() as f64;
					(
						(cx + SPAWN_RADIUS * angle.cos()) as f32,
						(cy + SPAWN_RADIUS * angle.sin()) as f32,
						false,
					)
				}
			};
			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone(),
					color: node.color,
				},
			});
			index.insert(node.id.as_str(), idx);
		}

		let mut edges = Vec::with_capacity(view.edges.len());
		for edge in &view.edges {
			if let (Some(&source), Some(&target)) =
				(index.get(edge.source.as_str()), index.get(edge.target.as_str()))
			{
				graph.add_edge(source, target, EdgeData::default());
				edges.push(EdgeLink {
					source,
					target,
					color: edge.color,
					label: edge.label.clone(),
				});
			}
		}

		self.graph = graph;
		self.edges = edges;
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.hover = HoverState::default();

		if carried == 0 {
			for _ in 0..WARMUP_TICKS {
				self.graph.update(TICK_SECS);
			}
		}
	}

	pub fn edges(&self) -> &[EdgeLink] {
		&self.edges
	}

	#[cfg(test)]
	pub fn node_count(&self) -> usize {
		let mut n = 0;
		self.graph.visit_nodes(|_| n += 1);
		n
	}

	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut out = HashMap::new();
		self.graph.visit_nodes(|node| {
			out.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		out
	}

	#[cfg(test)]
	pub fn position_of(&self, id: &str) -> Option<(f64, f64)> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.data.user_data.id == id {
				found = Some((node.x() as f64, node.y() as f64));
			}
		});
		found
	}

	pub fn bounds(&self) -> Option<Bounds> {
		Bounds::from_points(self.positions().into_values())
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.viewport.transform.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	/// Starts dragging the node under the pointer, or panning when there is none.
	pub fn press(&mut self, sx: f64, sy: f64) {
		match self.node_at_position(sx, sy) {
			Some(idx) => {
				let mut node_start = (0.0, 0.0);
				self.graph.visit_nodes(|node| {
					if node.index() == idx {
						node_start = (node.x(), node.y());
					}
				});
				self.drag = DragState {
					node: Some(idx),
					start: (sx, sy),
					node_start,
					moved: false,
				};
			}
			None => {
				let t = self.viewport.transform;
				self.pan = PanState {
					active: true,
					start: (sx, sy),
					origin: (t.x, t.y),
				};
			}
		}
	}

	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		if let Some(idx) = self.drag.node {
			let k = self.viewport.transform.k;
			let (dx, dy) = ((sx - self.drag.start.0) / k, (sy - self.drag.start.1) / k);
			let (nx, ny) = (
				self.drag.node_start.0 + dx as f32,
				self.drag.node_start.1 + dy as f32,
			);
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.x = nx;
					node.data.y = ny;
					node.data.is_anchor = true;
				}
			});
			self.drag.moved = true;
			return;
		}

		let hovered = self.node_at_position(sx, sy);
		self.set_hover(hovered);
		if self.pan.active {
			self.viewport.transform.x = self.pan.origin.0 + (sx - self.pan.start.0);
			self.viewport.transform.y = self.pan.origin.1 + (sy - self.pan.start.1);
		}
	}

	/// Ends a drag or pan. Returns the id and graph position of a node that
	/// was actually moved.
	pub fn release(&mut self) -> Option<(String, (f64, f64))> {
		self.pan.active = false;
		let drag = std::mem::take(&mut self.drag);
		let idx = drag.node.filter(|_| drag.moved)?;

		let mut dropped = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				dropped = Some((
					node.data.user_data.id.clone(),
					(node.x() as f64, node.y() as f64),
				));
			}
		});
		dropped
	}

	pub fn leave(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
		self.set_hover(None);
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		if was_hovering && node.is_none() {
			self.hover.fading_node = self.hover.node.take();
			self.hover.fading_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.fading_node = None;
			self.hover.fading_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		let Some(idx) = node else {
			return;
		};
		if !was_hovering {
			self.hover.delay_t = 0.0;
		}
		for link in &self.edges {
			if link.source == idx {
				self.hover.neighbors.insert(link.target);
			} else if link.target == idx {
				self.hover.neighbors.insert(link.source);
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.is_hovered(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.fading_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.fading_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.fading_node.is_some()
	}

	/// One animation frame: physics, zoom animation, pending fit, hover fade.
	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
		self.viewport.tick(dt as f64);
		if self.viewport.take_pending_fit() {
			if let Some(bounds) = self.bounds() {
				self.viewport.fit(bounds, NODE_RADIUS);
			}
		}
		self.tick_hover(dt as f64);
	}

	fn tick_hover(&mut self, dt: f64) {
		const DELAY: f64 = 0.08;

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt).min(DELAY);
			if self.hover.delay_t >= DELAY {
				self.hover.highlight_t += (1.0 - self.hover.highlight_t) * 1.8 * dt;
			}
			return;
		}

		self.hover.highlight_t -= self.hover.highlight_t * 1.26 * dt;
		if self.hover.highlight_t < 0.01 {
			self.hover.highlight_t = 0.0;
			self.hover.fading_node = None;
			self.hover.fading_neighbors.clear();
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.viewport.resize(width, height);
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;
	use crate::model::sample::sample_dataset;
	use crate::model::{Edge, EdgeCategory, Node, NodeCategory};

	fn view(nodes: &[&str], edges: &[(&str, &str)]) -> GraphView {
		let nodes: Vec<_> = nodes
			.iter()
			.map(|id| Node::new(*id, *id, NodeCategory::Normal))
			.collect();
		let edges: Vec<_> = edges
			.iter()
			.map(|(s, t)| Edge::new(*s, *t, EdgeCategory::Normal))
			.collect();
		GraphView::project(&nodes, &edges, &HashMap::new())
	}

	#[test]
	fn builds_every_node_and_edge() {
		let g = sample_dataset();
		let state = ForceGraphState::new(
			&GraphView::project(&g.nodes, &g.edges, &HashMap::new()),
			800.0,
			600.0,
			false,
		);
		assert_eq!(state.node_count(), g.nodes.len());
		assert_eq!(state.edges().len(), g.edges.len());
	}

	#[test]
	fn surviving_nodes_keep_their_position() {
		let mut state = ForceGraphState::new(&view(&["a", "b"], &[("a", "b")]), 800.0, 600.0, false);
		let before = state.position_of("a").unwrap();
		state.set_data(&view(&["a", "c"], &[("a", "c")]));

		assert_eq!(state.position_of("a"), Some(before));
		assert!(state.position_of("b").is_none());
		assert!(state.position_of("c").is_some());
		assert_eq!(state.edges().len(), 1);
	}

	#[test]
	fn pinned_nodes_start_at_their_pin() {
		let mut v = view(&["a", "b"], &[]);
		v.nodes[0].pinned = Some((42.0, -7.0));
		let mut state = ForceGraphState::new(&v, 800.0, 600.0, false);
		assert_eq!(state.position_of("a"), Some((42.0, -7.0)));
		state.tick(0.016);
		assert_eq!(state.position_of("a"), Some((42.0, -7.0)));
	}

	fn is_anchored(state: &ForceGraphState, id: &str) -> bool {
		let mut anchored = false;
		state.graph.visit_nodes(|node| {
			if node.data.user_data.id == id {
				anchored = node.data.is_anchor;
			}
		});
		anchored
	}

	#[test]
	fn cleared_pins_release_the_anchor() {
		let mut pinned = view(&["a", "b"], &[("a", "b")]);
		pinned.nodes[0].pinned = Some((42.0, -7.0));
		let mut state = ForceGraphState::new(&pinned, 800.0, 600.0, false);
		assert!(is_anchored(&state, "a"));

		state.set_data(&view(&["a", "b"], &[("a", "b")]));
		assert_eq!(state.position_of("a"), Some((42.0, -7.0)));
		assert!(!is_anchored(&state, "a"));
		assert!(!is_anchored(&state, "b"));
	}

	#[test]
	fn dragged_node_unpins_on_rebuild_without_pin() {
		let mut state = ForceGraphState::new(&view(&["a"], &[]), 800.0, 600.0, false);
		state.viewport.transform = Default::default();
		let (x, y) = state.position_of("a").unwrap();
		state.press(x, y);
		state.pointer_move(x + 10.0, y);
		assert!(is_anchored(&state, "a"));
		state.release();

		state.set_data(&view(&["a"], &[]));
		assert!(!is_anchored(&state, "a"));
	}

	#[test]
	fn drag_reports_drop_position() {
		let mut state = ForceGraphState::new(&view(&["a"], &[]), 800.0, 600.0, false);
		state.viewport.transform = Default::default();
		let (x, y) = state.position_of("a").unwrap();

		state.press(x, y);
		state.pointer_move(x + 30.0, y + 40.0);
		let (id, (nx, ny)) = state.release().unwrap();

		assert_eq!(id, "a");
		assert!((nx - (x + 30.0)).abs() < 1e-3);
		assert!((ny - (y + 40.0)).abs() < 1e-3);
	}

	#[test]
	fn click_without_move_reports_nothing() {
		let mut state = ForceGraphState::new(&view(&["a"], &[]), 800.0, 600.0, false);
		state.viewport.transform = Default::default();
		let (x, y) = state.position_of("a").unwrap();
		state.press(x, y);
		assert_eq!(state.release(), None);
	}

	#[test]
	fn background_drag_pans() {
		let mut state = ForceGraphState::new(&view(&["a"], &[]), 800.0, 600.0, false);
		state.viewport.transform = Default::default();
		state.press(-5000.0, -5000.0);
		state.pointer_move(-4990.0, -4980.0);
		state.release();
		assert_eq!(state.viewport.transform.x, 10.0);
		assert_eq!(state.viewport.transform.y, 20.0);
	}

	#[test]
	fn first_frame_fits_the_graph() {
		let mut state = ForceGraphState::new(&view(&["a", "b", "c"], &[("a", "b")]), 800.0, 600.0, false);
		state.tick(0.016);
		let b = state.bounds().unwrap();
		let t = state.viewport.transform;
		let (l, top) = t.graph_to_screen(b.min_x, b.min_y);
		let (r, bottom) = t.graph_to_screen(b.max_x, b.max_y);
		assert!(l >= 0.0 && r <= 800.0 + 1e-6);
		assert!(top >= 0.0 && bottom <= 600.0 + 1e-6);
	}

	#[test]
	fn hover_collects_neighbors() {
		let state_view = view(&["a", "b", "c"], &[("a", "b")]);
		let mut state = ForceGraphState::new(&state_view, 800.0, 600.0, false);
		let (a, b, c) = {
			let mut ids = HashMap::new();
			state.graph.visit_nodes(|n| {
				ids.insert(n.data.user_data.id.clone(), n.index());
			});
			(ids["a"], ids["b"], ids["c"])
		};
		state.set_hover(Some(a));
		assert!(state.is_highlighted(b));
		assert!(!state.is_highlighted(c));
		state.set_hover(None);
		assert!(state.is_hovered(a));
		assert!(state.has_active_highlight());
	}
}
