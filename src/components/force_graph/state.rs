//! Everything the canvas keeps between frames: layout, positions, view
//! transform, pointer gestures and the selection.

use std::collections::{HashMap, HashSet};

use log::debug;

use super::layout::{SimNode, Simulation, TickObserver, start_layout};
use super::types::{GraphData, LinkKind, NodeCategory};
use super::viewport::{Transition, ViewTransform, ZOOM_STEP, fit_transform};

/// Extra hit-test slack around a node, in graph units.
pub const HIT_PADDING: f64 = 4.0;
/// Pointer travel, in screen pixels, below which a press counts as a click.
pub const CLICK_SLOP: f64 = 4.0;

/// Per-node drawing data, index-aligned with the simulation.
#[derive(Clone, Debug)]
pub struct NodeInfo {
	/// Graph node id.
	pub id: String,
	/// Text drawn beside the node.
	pub label: String,
	/// Fill color.
	pub color: &'static str,
	/// Radius in graph units.
	pub size: f64,
	/// Category, for label rules.
	pub category: NodeCategory,
}

/// An edge as drawn: duplicates of the same (source, target, kind) collapse
/// into one stroke whose width grows with `multiplicity`.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawEdge {
	/// Source node index.
	pub source: usize,
	/// Target node index.
	pub target: usize,
	/// Relationship, picks the stroke color.
	pub kind: LinkKind,
	/// How many links of the graph this stroke stands for.
	pub multiplicity: usize,
}

/// Latest completed tick, as seen by the renderer.
#[derive(Clone, Debug, Default)]
pub struct PositionBuffer {
	/// Node centers in graph units.
	pub positions: Vec<(f64, f64)>,
	/// Whether each node is pinned.
	pub pinned: Vec<bool>,
	/// Ticks observed so far.
	pub ticks: u64,
}

impl TickObserver for PositionBuffer {
	fn on_tick(&mut self, nodes: &[SimNode]) {
		self.positions.clear();
		self.positions.extend(nodes.iter().map(|n| (n.x, n.y)));
		self.pinned.clear();
		self.pinned.extend(nodes.iter().map(SimNode::is_pinned));
		self.ticks += 1;
	}
}

/// A press that started on a node.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// Button is down over a node.
	pub active: bool,
	/// The pressed node.
	pub node_idx: Option<usize>,
	/// Press position, screen pixels.
	pub start_x: f64,
	/// Press position, screen pixels.
	pub start_y: f64,
	/// Node position at press time, graph units.
	pub node_start_x: f64,
	/// Node position at press time, graph units.
	pub node_start_y: f64,
	/// Travel exceeded [`CLICK_SLOP`]; the press is a drag, not a click.
	pub moved: bool,
}

/// A press that started on empty canvas.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// Button is down over empty canvas.
	pub active: bool,
	/// Press position, screen pixels.
	pub start_x: f64,
	/// Press position, screen pixels.
	pub start_y: f64,
	/// Transform offset at press time.
	pub transform_start_x: f64,
	/// Transform offset at press time.
	pub transform_start_y: f64,
	/// Travel exceeded [`CLICK_SLOP`]; the press is a pan, not a click.
	pub moved: bool,
}

/// Hovered node and the fade of its highlight.
#[derive(Clone, Debug, Default)]
pub struct HoverState {
	/// Node under the pointer.
	pub node: Option<usize>,
	/// Its neighbors.
	pub neighbors: HashSet<usize>,
	/// Highlight strength in [0, 1].
	pub highlight_t: f64,
	/// Node still fading out after the pointer left it.
	pub prev_node: Option<usize>,
	/// Neighbors of `prev_node`.
	pub prev_neighbors: HashSet<usize>,
	delay_t: f64,
}

/// Navigator selection state machine.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Selection {
	/// Nothing selected.
	#[default]
	Idle,
	/// `node` is pinned with `neighbors` ringed around it.
	Selected {
		/// Selected node index.
		node: usize,
		/// Its neighbors, in ring order.
		neighbors: Vec<usize>,
	},
}

/// What a pointer release amounted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerOutcome {
	/// Nothing happened.
	None,
	/// A node was dragged and stays pinned where it was dropped.
	Dragged,
	/// The view was panned.
	Panned,
	/// A node was clicked and is now selected.
	Selected(usize),
	/// Empty canvas was clicked; selection and pins were cleared.
	Cleared,
}

/// One graph on one canvas. Replaced wholesale when the graph or the
/// viewport changes.
pub struct ForceGraphState {
	/// The running layout.
	pub simulation: Simulation,
	/// Positions as of the last tick.
	pub positions: PositionBuffer,
	/// Drawing data per node.
	pub nodes: Vec<NodeInfo>,
	/// Collapsed edges to stroke.
	pub edges: Vec<DrawEdge>,
	/// Current zoom and pan.
	pub transform: ViewTransform,
	/// Animated zoom in progress, if any.
	pub transition: Option<Transition>,
	/// Node drag gesture.
	pub drag: DragState,
	/// Pan gesture.
	pub pan: PanState,
	/// Hover highlight.
	pub hover: HoverState,
	/// Selection machine.
	pub selection: Selection,
	/// Viewport width, pixels.
	pub width: f64,
	/// Viewport height, pixels.
	pub height: f64,
	/// Seconds of animation, drives the dash offset.
	pub flow_time: f64,
	adjacency: Vec<Vec<usize>>,
	/// Nodes the user dropped; they outlive selection changes.
	drag_pins: HashSet<usize>,
}

impl ForceGraphState {
	/// Start a layout for `data` in a `width` x `height` viewport.
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let simulation = start_layout(data, width, height);
		let mut positions = PositionBuffer::default();
		positions.on_tick(simulation.nodes());

		let nodes: Vec<NodeInfo> = data
			.nodes
			.iter()
			.map(|n| NodeInfo {
				id: n.id.clone(),
				label: n.label.clone(),
				color: n.color,
				size: n.size,
				category: n.category,
			})
			.collect();
		let id_to_idx: HashMap<&str, usize> = data
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.as_str(), i))
			.collect();

		let mut adjacency = vec![Vec::new(); nodes.len()];
		let mut edges: Vec<DrawEdge> = Vec::new();
		let mut edge_slot: HashMap<(usize, usize, LinkKind), usize> = HashMap::new();
		for link in &data.links {
			let (Some(&src), Some(&tgt)) = (
				id_to_idx.get(link.source.as_str()),
				id_to_idx.get(link.target.as_str()),
			) else {
				continue;
			};
			if src != tgt {
				if !adjacency[src].contains(&tgt) {
					adjacency[src].push(tgt);
				}
				if !adjacency[tgt].contains(&src) {
					adjacency[tgt].push(src);
				}
			}
			match edge_slot.get(&(src, tgt, link.kind)) {
				Some(&slot) => edges[slot].multiplicity += 1,
				None => {
					edge_slot.insert((src, tgt, link.kind), edges.len());
					edges.push(DrawEdge {
						source: src,
						target: tgt,
						kind: link.kind,
						multiplicity: 1,
					});
				}
			}
		}

		debug!(
			"Layout started: {} nodes, {} edges in {}x{}",
			nodes.len(),
			edges.len(),
			width,
			height
		);

		Self {
			simulation,
			positions,
			nodes,
			edges,
			transform: ViewTransform::IDENTITY,
			transition: None,
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			selection: Selection::Idle,
			width,
			height,
			flow_time: 0.0,
			adjacency,
			drag_pins: HashSet::new(),
		}
	}

	/// Screen pixels to graph units.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		self.transform.screen_to_graph(sx, sy)
	}

	/// Node under the screen point; the closest wins when several overlap.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.positions
			.positions
			.iter()
			.zip(&self.nodes)
			.enumerate()
			.filter_map(|(idx, (&(x, y), info))| {
				let dist = ((x - gx).powi(2) + (y - gy).powi(2)).sqrt();
				(dist < info.size + HIT_PADDING).then_some((idx, dist))
			})
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(idx, _)| idx)
	}

	/// Index of the node with `id`.
	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.nodes.iter().position(|n| n.id == id)
	}

	/// Distinct nodes sharing an edge with `idx`, in either direction.
	pub fn neighbors(&self, idx: usize) -> &[usize] {
		self.adjacency.get(idx).map(Vec::as_slice).unwrap_or_default()
	}

	/// Id of the selected node.
	pub fn selected_id(&self) -> Option<&str> {
		match &self.selection {
			Selection::Idle => None,
			Selection::Selected { node, .. } => self.nodes.get(*node).map(|n| n.id.as_str()),
		}
	}

	/// Move the hover highlight to `node`, fading out the previous one.
	pub fn set_hover(&mut self, node: Option<usize>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			if let Some(adjacent) = self.adjacency.get(idx) {
				self.hover.neighbors.extend(adjacent.iter().copied());
			}
		}
	}

	/// Whether a selection or hover is dimming the rest of the graph.
	pub fn has_active_highlight(&self) -> bool {
		matches!(self.selection, Selection::Selected { .. })
			|| self.hover.node.is_some()
			|| self.hover.prev_node.is_some()
	}

	/// Strength of the dimming effect in [0, 1]. A selection dims at once,
	/// hover fades in and out.
	pub fn highlight_strength(&self) -> f64 {
		match self.selection {
			Selection::Selected { .. } => 1.0,
			Selection::Idle => self.hover.highlight_t,
		}
	}

	/// Whether `idx` is the selected or hovered node.
	pub fn is_focused(&self, idx: usize) -> bool {
		match &self.selection {
			Selection::Selected { node, .. } => *node == idx,
			Selection::Idle => self.hover.node == Some(idx) || self.hover.prev_node == Some(idx),
		}
	}

	/// Whether `idx` is the focus or one of its neighbors.
	pub fn is_highlighted(&self, idx: usize) -> bool {
		match &self.selection {
			Selection::Selected { node, neighbors } => *node == idx || neighbors.contains(&idx),
			Selection::Idle => {
				self.is_focused(idx)
					|| self.hover.neighbors.contains(&idx)
					|| self.hover.prev_neighbors.contains(&idx)
			}
		}
	}

	/// Whether the edge touches the focused node.
	pub fn is_incident(&self, edge: &DrawEdge) -> bool {
		self.is_focused(edge.source) || self.is_focused(edge.target)
	}

	/// Enter `Selected`: pin `idx` in place, arrange its neighbors around it
	/// and briefly reheat so the move animates. The previous ring is released
	/// except for nodes the user dropped.
	pub fn select(&mut self, idx: usize) {
		if idx >= self.nodes.len() {
			return;
		}
		self.release_ring();
		let neighbors = self.neighbors(idx).to_vec();
		self.simulation.arrange_neighbors(idx, &neighbors);
		let reheat = self.simulation.config().reheat_alpha;
		self.simulation.reheat(reheat);
		self.positions.on_tick(self.simulation.nodes());
		debug!(
			"Selected {} with {} neighbors",
			self.nodes[idx].id,
			neighbors.len()
		);
		self.selection = Selection::Selected {
			node: idx,
			neighbors,
		};
	}

	/// Select by node id. Returns `false` when the id is not on screen.
	pub fn select_id(&mut self, id: &str) -> bool {
		match self.index_of(id) {
			Some(idx) => {
				self.select(idx);
				true
			}
			None => false,
		}
	}

	fn release_ring(&mut self) {
		let Selection::Selected { node, neighbors } = &self.selection else {
			return;
		};
		for &idx in std::iter::once(node).chain(neighbors) {
			if !self.drag_pins.contains(&idx) {
				self.simulation.unpin(idx);
			}
		}
	}

	/// Whether `idx` was dropped by the user and stays pinned until the
	/// selection is cleared.
	pub fn is_drag_pinned(&self, idx: usize) -> bool {
		self.drag_pins.contains(&idx)
	}

	/// Back to `Idle`: release every pin, dropped nodes included, and let the
	/// layout redistribute.
	pub fn clear_selection(&mut self) {
		self.selection = Selection::Idle;
		self.drag_pins.clear();
		self.simulation.release_all_pins();
		let reheat = self.simulation.config().reheat_alpha;
		self.simulation.reheat(reheat);
		self.positions.on_tick(self.simulation.nodes());
	}

	/// Button pressed at a canvas point: grab a node or start panning.
	pub fn pointer_down(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.node_at_position(x, y) {
			let (nx, ny) = self.positions.positions[idx];
			self.drag = DragState {
				active: true,
				node_idx: Some(idx),
				start_x: x,
				start_y: y,
				node_start_x: nx,
				node_start_y: ny,
				moved: false,
			};
		} else {
			self.pan = PanState {
				active: true,
				start_x: x,
				start_y: y,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
				moved: false,
			};
		}
	}

	/// Pointer moved: update hover, then drag or pan once past [`CLICK_SLOP`].
	pub fn pointer_move(&mut self, x: f64, y: f64) {
		// Update hover state when not dragging
		if !self.drag.active {
			let hovered = self.node_at_position(x, y);
			self.set_hover(hovered);
		}

		if self.drag.active {
			let Some(idx) = self.drag.node_idx else {
				return;
			};
			if !self.drag.moved && travel(self.drag.start_x, self.drag.start_y, x, y) < CLICK_SLOP {
				return;
			}
			if !self.drag.moved {
				self.drag.moved = true;
				self.drag_pins.insert(idx);
				self.simulation.set_alpha_target(self.simulation.config().reheat_alpha);
			}
			let k = self.transform.k;
			let (nx, ny) = (
				self.drag.node_start_x + (x - self.drag.start_x) / k,
				self.drag.node_start_y + (y - self.drag.start_y) / k,
			);
			self.simulation.pin(idx, nx, ny);
			self.positions.on_tick(self.simulation.nodes());
		} else if self.pan.active {
			if travel(self.pan.start_x, self.pan.start_y, x, y) >= CLICK_SLOP {
				self.pan.moved = true;
			}
			self.transition = None;
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	/// Button released: report what the gesture amounted to.
	pub fn pointer_up(&mut self) -> PointerOutcome {
		let drag = std::mem::take(&mut self.drag);
		let pan = std::mem::take(&mut self.pan);

		if drag.active {
			let Some(idx) = drag.node_idx else {
				return PointerOutcome::None;
			};
			if drag.moved {
				// Dropped nodes stay pinned until the selection is cleared.
				self.simulation.set_alpha_target(0.0);
				return PointerOutcome::Dragged;
			}
			self.select(idx);
			return PointerOutcome::Selected(idx);
		}
		if pan.active {
			if pan.moved {
				return PointerOutcome::Panned;
			}
			self.clear_selection();
			return PointerOutcome::Cleared;
		}
		PointerOutcome::None
	}

	/// Pointer left the canvas: end any gesture and the hover.
	pub fn pointer_leave(&mut self) {
		if self.drag.active && self.drag.moved {
			self.simulation.set_alpha_target(0.0);
		}
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.set_hover(None);
	}

	/// Zoom about the pointer by one wheel notch.
	pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		self.transition = None;
		self.transform = self.transform.zoomed_about(factor, (x, y));
	}

	fn animate_to(&mut self, target: ViewTransform) {
		self.transition = Some(Transition::new(self.transform, target));
	}

	fn settled_transform(&self) -> ViewTransform {
		self.transition
			.as_ref()
			.map(Transition::target)
			.unwrap_or(self.transform)
	}

	/// Animate one zoom step in about the viewport center.
	pub fn zoom_in(&mut self) {
		let center = (self.width / 2.0, self.height / 2.0);
		self.animate_to(self.settled_transform().zoomed_about(ZOOM_STEP, center));
	}

	/// Animate one zoom step out about the viewport center.
	pub fn zoom_out(&mut self) {
		let center = (self.width / 2.0, self.height / 2.0);
		self.animate_to(self.settled_transform().zoomed_about(1.0 / ZOOM_STEP, center));
	}

	/// Animate back to the identity transform.
	pub fn reset_zoom(&mut self) {
		self.animate_to(ViewTransform::IDENTITY);
	}

	/// Animate the transform so every node fits the viewport.
	pub fn fit_to_view(&mut self) {
		if let Some(bounds) = self.simulation.bounds() {
			self.animate_to(fit_transform(bounds, self.width, self.height));
		}
	}

	/// Pause or resume the physics; returns whether it is now paused.
	pub fn toggle_paused(&mut self) -> bool {
		if self.simulation.is_paused() {
			self.simulation.resume();
		} else {
			self.simulation.pause();
		}
		self.simulation.is_paused()
	}

	/// Tear down the simulation before this state is dropped or replaced.
	pub fn stop(&mut self) {
		self.simulation.stop();
	}

	/// Advance physics, zoom transition and hover fade by one frame of `dt`
	/// seconds.
	pub fn tick(&mut self, dt: f32) {
		self.simulation.tick_with(&mut self.positions);
		self.flow_time += dt as f64;

		if let Some(transition) = self.transition.as_mut() {
			self.transform = transition.advance(dt as f64);
			if transition.is_done() {
				self.transition = None;
			}
		}

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}
}

fn travel(x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
	((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
	use super::super::builder::build_graph;
	use super::super::builder::fixtures::*;
	use super::super::layout::SELECTION_RADIUS;
	use super::*;

	fn sample() -> GraphData {
		let archs = [
			architecture("seq", &["c1", "c2"], &["t1"], &["m1"]),
			architecture("hier", &["c1"], &["t1"], &["m1"]),
		];
		let components = tree(vec![component("c1", vec![]), component("c2", vec![])]);
		build_graph(
			&archs,
			&components,
			&[threat("t1", &["c1"], None)],
			&[mitigation("m1", &["t1"])],
		)
	}

	fn state() -> ForceGraphState {
		let mut s = ForceGraphState::new(&sample(), 1024.0, 768.0);
		for _ in 0..60 {
			s.tick(0.016);
		}
		s
	}

	fn screen_pos(s: &ForceGraphState, idx: usize) -> (f64, f64) {
		let (x, y) = s.positions.positions[idx];
		s.transform.graph_to_screen(x, y)
	}

	fn empty_spot(s: &ForceGraphState) -> (f64, f64) {
		let mut x = -5000.0;
		while s.node_at_position(x, -5000.0).is_some() {
			x -= 100.0;
		}
		(x, -5000.0)
	}

	#[test]
	fn duplicate_links_collapse_into_weighted_edges() {
		let s = ForceGraphState::new(&sample(), 800.0, 600.0);
		let c1 = s.index_of("c1").unwrap();
		let t1 = s.index_of("t1").unwrap();
		let edge = s
			.edges
			.iter()
			.find(|e| e.source == c1 && e.target == t1)
			.unwrap();
		assert_eq!(edge.multiplicity, 2);
		assert_eq!(s.edges.len(), 5);
	}

	#[test]
	fn neighbors_are_undirected_and_distinct() {
		let s = ForceGraphState::new(&sample(), 800.0, 600.0);
		let c1 = s.index_of("c1").unwrap();
		let names: Vec<&str> = s.neighbors(c1).iter().map(|&i| s.nodes[i].id.as_str()).collect();
		assert_eq!(names, ["seq", "t1", "hier"]);
	}

	#[test]
	fn clicking_a_node_selects_it_and_rings_its_neighbors() {
		let mut s = state();
		let c1 = s.index_of("c1").unwrap();
		let (x, y) = screen_pos(&s, c1);
		let center = s.positions.positions[c1];

		s.pointer_down(x, y);
		assert_eq!(s.pointer_up(), PointerOutcome::Selected(c1));
		assert_eq!(s.selected_id(), Some("c1"));

		for &n in s.neighbors(c1) {
			let (nx, ny) = s.positions.positions[n];
			let r = ((nx - center.0).powi(2) + (ny - center.1).powi(2)).sqrt();
			assert!((r - SELECTION_RADIUS).abs() < 1e-6);
			assert!(s.simulation.is_pinned(n));
			assert!(s.is_highlighted(n));
		}
		let m1 = s.index_of("m1").unwrap();
		assert!(!s.is_highlighted(m1));
		assert!(s.has_active_highlight());
	}

	#[test]
	fn clicking_empty_canvas_clears_selection_and_pins() {
		let mut s = state();
		s.select_id("t1");
		let (x, y) = empty_spot(&s);

		s.pointer_down(x, y);
		assert_eq!(s.pointer_up(), PointerOutcome::Cleared);
		assert_eq!(s.selection, Selection::Idle);
		assert!(s.simulation.nodes().iter().all(|n| !n.is_pinned()));
		assert!(s.simulation.is_running());
	}

	#[test]
	fn dragged_node_stays_pinned_after_release() {
		let mut s = state();
		let m1 = s.index_of("m1").unwrap();
		let (x, y) = screen_pos(&s, m1);

		s.pointer_down(x, y);
		s.pointer_move(x + 40.0, y + 30.0);
		assert_eq!(s.pointer_up(), PointerOutcome::Dragged);

		let expected = s.positions.positions[m1];
		for _ in 0..30 {
			s.tick(0.016);
		}
		assert!(s.simulation.is_pinned(m1));
		assert_eq!(s.positions.positions[m1], expected);
		assert_eq!(s.selection, Selection::Idle);
	}

	#[test]
	fn dropped_node_survives_selecting_another_node() {
		let mut s = state();
		let m1 = s.index_of("m1").unwrap();
		let (x, y) = screen_pos(&s, m1);
		s.pointer_down(x, y);
		s.pointer_move(x + 40.0, y + 30.0);
		assert_eq!(s.pointer_up(), PointerOutcome::Dragged);
		let dropped = s.positions.positions[m1];

		assert!(s.select_id("c2"));
		for _ in 0..30 {
			s.tick(0.016);
		}
		assert!(s.simulation.is_pinned(m1));
		assert!(s.is_drag_pinned(m1));
		assert_eq!(s.positions.positions[m1], dropped);

		s.clear_selection();
		assert!(!s.simulation.is_pinned(m1));
		assert!(!s.is_drag_pinned(m1));
	}

	#[test]
	fn new_selection_releases_the_previous_ring() {
		let mut s = state();
		assert!(s.select_id("c1"));
		let (c1, t1, hier, seq) = (
			s.index_of("c1").unwrap(),
			s.index_of("t1").unwrap(),
			s.index_of("hier").unwrap(),
			s.index_of("seq").unwrap(),
		);
		assert!(s.simulation.is_pinned(t1));

		assert!(s.select_id("c2"));
		assert!(!s.simulation.is_pinned(c1));
		assert!(!s.simulation.is_pinned(t1));
		assert!(!s.simulation.is_pinned(hier));
		assert!(s.simulation.is_pinned(seq));
		assert!(s.simulation.is_pinned(s.index_of("c2").unwrap()));
	}

	#[test]
	fn hover_highlights_without_pinning() {
		let mut s = state();
		let t1 = s.index_of("t1").unwrap();
		let (x, y) = screen_pos(&s, t1);

		s.pointer_move(x, y);
		assert_eq!(s.hover.node, Some(t1));
		assert!(s.is_highlighted(s.index_of("m1").unwrap()));
		assert!(!s.is_highlighted(s.index_of("seq").unwrap()));
		assert!(s.simulation.nodes().iter().all(|n| !n.is_pinned()));
	}

	#[test]
	fn panning_moves_the_transform_without_clearing() {
		let mut s = state();
		s.select_id("c1");
		let (x, y) = empty_spot(&s);

		s.pointer_down(x, y);
		s.pointer_move(x + 50.0, y - 20.0);
		assert_eq!(s.pointer_up(), PointerOutcome::Panned);
		assert_eq!((s.transform.x, s.transform.y), (50.0, -20.0));
		assert_eq!(s.selected_id(), Some("c1"));
	}

	#[test]
	fn zoom_buttons_animate_within_bounds() {
		let mut s = state();
		for _ in 0..20 {
			s.zoom_in();
		}
		for _ in 0..100 {
			s.tick(0.016);
		}
		assert_eq!(s.transform.k, super::super::viewport::MAX_ZOOM);
		assert!(s.transition.is_none());

		s.reset_zoom();
		for _ in 0..100 {
			s.tick(0.016);
		}
		assert_eq!(s.transform, ViewTransform::IDENTITY);
	}

	#[test]
	fn fit_to_view_centers_the_graph() {
		let mut s = state();
		s.toggle_paused();
		s.fit_to_view();
		for _ in 0..100 {
			s.tick(0.016);
		}
		let bounds = s.simulation.bounds().unwrap();
		let (cx, cy) = bounds.center();
		let (sx, sy) = s.transform.graph_to_screen(cx, cy);
		assert!((sx - 512.0).abs() < 1e-6);
		assert!((sy - 384.0).abs() < 1e-6);
	}

	#[test]
	fn paused_layout_keeps_positions() {
		let mut s = state();
		assert!(s.toggle_paused());
		let before = s.positions.positions.clone();
		s.tick(0.016);
		assert_eq!(s.positions.positions, before);
		assert!(!s.toggle_paused());
	}
}
