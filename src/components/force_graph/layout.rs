//! Physics layout for the navigator graph.
//!
//! The integration scheme follows d3-force: every force adjusts velocities
//! scaled by a cooling `alpha`, then positions advance by velocity with
//! friction. Pinned nodes (`fx`/`fy` set) stay where they were put.

use std::collections::HashMap;
use std::f64::consts::{PI, TAU};

use log::warn;

use super::types::{GraphData, LinkKind, NodeCategory};
use super::viewport::Bounds;

/// Viewports narrower than this use the compact layout.
pub const MOBILE_BREAKPOINT: f64 = 768.0;
/// Scale applied to distances, charges and collision radii on narrow viewports.
pub const MOBILE_FACTOR: f64 = 0.6;
/// Radius of the circle neighbors are placed on when a node is selected.
pub const SELECTION_RADIUS: f64 = 150.0;

const INITIAL_RADIUS: f64 = 10.0;
const DISTANCE_MIN_SQ: f64 = 1.0;

/// Tuning constants for one simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
	/// 1.0 on desktop, [`MOBILE_FACTOR`] below [`MOBILE_BREAKPOINT`].
	pub scale: f64,
	/// Spring strength per unit of link weight.
	pub spring_factor: f64,
	/// Strength of the weak x/y centering forces.
	pub axis_strength: f64,
	/// Added to a node's visual size to get its collision radius.
	pub collision_padding: f64,
	/// Collision resolution strength.
	pub collision_strength: f64,
	/// The simulation rests once alpha drops below this.
	pub alpha_min: f64,
	/// Per-tick fraction of the gap between alpha and its target closed.
	pub alpha_decay: f64,
	/// Friction applied to velocities each tick.
	pub velocity_decay: f64,
	/// Alpha used when interaction restarts the simulation.
	pub reheat_alpha: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		let alpha_min = 0.001;
		Self {
			scale: 1.0,
			spring_factor: 0.8,
			axis_strength: 0.05,
			collision_padding: 15.0,
			collision_strength: 0.8,
			alpha_min,
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			velocity_decay: 0.4,
			reheat_alpha: 0.3,
		}
	}
}

impl LayoutConfig {
	/// Configuration for a viewport `width` units wide.
	pub fn for_viewport(width: f64) -> Self {
		Self {
			scale: if width < MOBILE_BREAKPOINT {
				MOBILE_FACTOR
			} else {
				1.0
			},
			..Self::default()
		}
	}

	/// Target spring length for `kind`.
	pub fn link_distance(&self, kind: LinkKind) -> f64 {
		kind.distance() * self.scale
	}

	/// Spring strength for a link of `weight`.
	pub fn link_strength(&self, weight: f64) -> f64 {
		(weight * self.spring_factor).max(0.0)
	}

	/// Many-body charge for `category`; negative values repel.
	pub fn charge(&self, category: NodeCategory) -> f64 {
		category.charge() * self.scale
	}

	/// Collision radius for a node of visual `size`.
	pub fn collision_radius(&self, size: f64) -> f64 {
		(size + self.collision_padding) * self.scale
	}
}

/// Simulated state of one node, index-aligned with the input node list.
#[derive(Clone, Debug, PartialEq)]
pub struct SimNode {
	/// Position.
	pub x: f64,
	/// Position.
	pub y: f64,
	/// Velocity.
	pub vx: f64,
	/// Velocity.
	pub vy: f64,
	/// Fixed x position while pinned.
	pub fx: Option<f64>,
	/// Fixed y position while pinned.
	pub fy: Option<f64>,
	/// Visual radius.
	pub size: f64,
	/// Collision radius.
	pub radius: f64,
	/// Many-body charge.
	pub charge: f64,
}

impl SimNode {
	/// Whether the physics leaves this node alone.
	pub fn is_pinned(&self) -> bool {
		self.fx.is_some() || self.fy.is_some()
	}
}

#[derive(Clone, Debug)]
struct SimLink {
	source: usize,
	target: usize,
	distance: f64,
	strength: f64,
	bias: f64,
}

/// Receives node positions after every completed tick.
pub trait TickObserver {
	/// Called once per tick with the freshly integrated nodes.
	fn on_tick(&mut self, nodes: &[SimNode]);
}

impl<F: FnMut(&[SimNode])> TickObserver for F {
	fn on_tick(&mut self, nodes: &[SimNode]) {
		self(nodes)
	}
}

/// Handle to a running layout. Created by [`start_layout`] and owned by the
/// canvas for as long as its graph is on screen.
#[derive(Clone, Debug)]
pub struct Simulation {
	nodes: Vec<SimNode>,
	links: Vec<SimLink>,
	config: LayoutConfig,
	center: (f64, f64),
	alpha: f64,
	alpha_target: f64,
	paused: bool,
	stopped: bool,
}

/// Seed positions for `data` around the center of a `width` x `height`
/// viewport and start cooling from alpha 1.
pub fn start_layout(data: &GraphData, width: f64, height: f64) -> Simulation {
	let config = LayoutConfig::for_viewport(width);
	let center = (width / 2.0, height / 2.0);
	let golden_angle = PI * (3.0 - 5.0_f64.sqrt());

	let nodes: Vec<SimNode> = data
		.nodes
		.iter()
		.enumerate()
		.map(|(i, node)| {
			let (r, a) = (INITIAL_RADIUS * (0.5 + i as f64).sqrt(), i as f64 * golden_angle);
			SimNode {
				x: center.0 + r * a.cos(),
				y: center.1 + r * a.sin(),
				vx: 0.0,
				vy: 0.0,
				fx: None,
				fy: None,
				size: node.size,
				radius: config.collision_radius(node.size),
				charge: config.charge(node.category),
			}
		})
		.collect();

	let index: HashMap<&str, usize> = data
		.nodes
		.iter()
		.enumerate()
		.map(|(i, n)| (n.id.as_str(), i))
		.collect();
	let mut degree = vec![0usize; nodes.len()];
	let mut links: Vec<SimLink> = data
		.links
		.iter()
		.filter_map(|link| {
			let (&source, &target) = (
				index.get(link.source.as_str())?,
				index.get(link.target.as_str())?,
			);
			degree[source] += 1;
			degree[target] += 1;
			Some(SimLink {
				source,
				target,
				distance: config.link_distance(link.kind),
				strength: config.link_strength(link.weight),
				bias: 0.5,
			})
		})
		.collect();
	for link in &mut links {
		let (s, t) = (degree[link.source] as f64, degree[link.target] as f64);
		link.bias = s / (s + t);
	}

	Simulation {
		nodes,
		links,
		config,
		center,
		alpha: 1.0,
		alpha_target: 0.0,
		paused: false,
		stopped: false,
	}
}

/// `count` points evenly spaced on a circle, starting at angle 0.
pub fn radial_positions(center: (f64, f64), count: usize, radius: f64) -> Vec<(f64, f64)> {
	(0..count)
		.map(|i| {
			let angle = TAU * i as f64 / count as f64;
			(center.0 + radius * angle.cos(), center.1 + radius * angle.sin())
		})
		.collect()
}

fn jiggle(seed: usize) -> f64 {
	((seed as f64 * 0.618_034 + 0.37).fract() - 0.5) * 1e-6
}

impl Simulation {
	/// Current nodes, index-aligned with the graph the layout was started on.
	pub fn nodes(&self) -> &[SimNode] {
		&self.nodes
	}

	/// Active configuration.
	pub fn config(&self) -> &LayoutConfig {
		&self.config
	}

	/// Current cooling parameter.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Whether a tick would move anything.
	pub fn is_running(&self) -> bool {
		!self.stopped && !self.paused && self.alpha >= self.config.alpha_min
	}

	/// Whether [`Simulation::stop`] was called.
	pub fn is_stopped(&self) -> bool {
		self.stopped
	}

	/// Whether the user paused ticking.
	pub fn is_paused(&self) -> bool {
		self.paused
	}

	/// Tear down. A stopped simulation never ticks again.
	pub fn stop(&mut self) {
		self.stopped = true;
	}

	/// Suspend ticking until [`Simulation::resume`].
	pub fn pause(&mut self) {
		self.paused = true;
	}

	/// Continue after [`Simulation::pause`].
	pub fn resume(&mut self) {
		self.paused = false;
	}

	/// Restart cooling from `alpha`.
	pub fn reheat(&mut self, alpha: f64) {
		self.alpha = self.alpha.max(alpha);
	}

	/// Value alpha decays toward. Non-zero keeps the layout warm during a drag.
	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
		if target > self.alpha {
			self.alpha = target;
		}
	}

	/// Fix node `idx` at `(x, y)`.
	pub fn pin(&mut self, idx: usize, x: f64, y: f64) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.fx = Some(x);
			node.fy = Some(y);
			node.x = x;
			node.y = y;
			node.vx = 0.0;
			node.vy = 0.0;
		}
	}

	/// Hand node `idx` back to the physics.
	pub fn unpin(&mut self, idx: usize) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.fx = None;
			node.fy = None;
		}
	}

	/// Whether node `idx` is pinned.
	pub fn is_pinned(&self, idx: usize) -> bool {
		self.nodes.get(idx).is_some_and(SimNode::is_pinned)
	}

	/// Unpin every node.
	pub fn release_all_pins(&mut self) {
		for node in &mut self.nodes {
			node.fx = None;
			node.fy = None;
		}
	}

	/// Pin `idx` where it is and pin `neighbors` evenly around it at
	/// [`SELECTION_RADIUS`]. Returns the neighbor positions in input order.
	pub fn arrange_neighbors(&mut self, idx: usize, neighbors: &[usize]) -> Vec<(f64, f64)> {
		let Some(node) = self.nodes.get(idx) else {
			return Vec::new();
		};
		let center = (node.x, node.y);
		self.pin(idx, center.0, center.1);
		let positions = radial_positions(center, neighbors.len(), SELECTION_RADIUS);
		for (&n, &(x, y)) in neighbors.iter().zip(&positions) {
			if n != idx {
				self.pin(n, x, y);
			}
		}
		positions
	}

	/// Bounding box of every node including its visual radius.
	pub fn bounds(&self) -> Option<Bounds> {
		Bounds::around(self.nodes.iter().map(|n| (n.x, n.y, n.size)))
	}

	/// Advance one step without observing it.
	pub fn tick(&mut self) -> bool {
		self.tick_with(&mut |_: &[SimNode]| {})
	}

	/// Advance one step and report the new positions to `observer`.
	/// Returns `false`, without calling the observer, when nothing ran.
	pub fn tick_with(&mut self, observer: &mut impl TickObserver) -> bool {
		if !self.is_running() {
			return false;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;

		self.guard_non_finite();
		self.apply_links();
		self.apply_many_body();
		self.apply_axis();
		self.apply_collision();
		self.apply_center();
		self.integrate();
		self.guard_non_finite();

		observer.on_tick(&self.nodes);
		true
	}

	fn apply_links(&mut self) {
		let alpha = self.alpha;
		for (i, link) in self.links.iter().enumerate() {
			let (s, t) = (link.source, link.target);
			if s == t {
				continue;
			}
			let (src, tgt) = (&self.nodes[s], &self.nodes[t]);
			let mut x = tgt.x + tgt.vx - src.x - src.vx;
			let mut y = tgt.y + tgt.vy - src.y - src.vy;
			if x == 0.0 {
				x = jiggle(i);
			}
			if y == 0.0 {
				y = jiggle(i + 1);
			}
			let l = (x * x + y * y).sqrt();
			// A step may close the gap to the rest length but never jump past it.
			let gain = (alpha * link.strength).min(1.0);
			let l = (l - link.distance) / l * gain;
			let (x, y) = (x * l, y * l);

			let tgt = &mut self.nodes[t];
			tgt.vx -= x * link.bias;
			tgt.vy -= y * link.bias;
			let src = &mut self.nodes[s];
			src.vx += x * (1.0 - link.bias);
			src.vy += y * (1.0 - link.bias);
		}
	}

	fn apply_many_body(&mut self) {
		let alpha = self.alpha;
		let n = self.nodes.len();
		for i in 0..n {
			let (xi, yi) = (self.nodes[i].x, self.nodes[i].y);
			let (mut dvx, mut dvy) = (0.0, 0.0);
			for j in 0..n {
				if i == j {
					continue;
				}
				let other = &self.nodes[j];
				let mut dx = other.x - xi;
				let mut dy = other.y - yi;
				if dx == 0.0 {
					dx = jiggle(i * n + j);
				}
				if dy == 0.0 {
					dy = jiggle(j * n + i);
				}
				let mut l = dx * dx + dy * dy;
				if l < DISTANCE_MIN_SQ {
					l = (DISTANCE_MIN_SQ * l).sqrt();
				}
				let w = other.charge * alpha / l;
				dvx += dx * w;
				dvy += dy * w;
			}
			self.nodes[i].vx += dvx;
			self.nodes[i].vy += dvy;
		}
	}

	fn apply_axis(&mut self) {
		let k = self.config.axis_strength * self.alpha;
		let (cx, cy) = self.center;
		for node in &mut self.nodes {
			node.vx += (cx - node.x) * k;
			node.vy += (cy - node.y) * k;
		}
	}

	fn apply_collision(&mut self) {
		let strength = self.config.collision_strength;
		let n = self.nodes.len();
		for i in 0..n {
			let (xi, yi) = (
				self.nodes[i].x + self.nodes[i].vx,
				self.nodes[i].y + self.nodes[i].vy,
			);
			let ri = self.nodes[i].radius;
			let ri2 = ri * ri;
			for j in (i + 1)..n {
				let other = &self.nodes[j];
				let rj = other.radius;
				let r = ri + rj;
				let mut x = xi - other.x - other.vx;
				let mut y = yi - other.y - other.vy;
				let mut l = x * x + y * y;
				if l >= r * r {
					continue;
				}
				if x == 0.0 {
					x = jiggle(i * n + j);
					l += x * x;
				}
				if y == 0.0 {
					y = jiggle(j * n + i);
					l += y * y;
				}
				let l = l.sqrt();
				let l = (r - l) / l * strength;
				let (x, y) = (x * l, y * l);
				let share = (rj * rj) / (ri2 + rj * rj);

				let node = &mut self.nodes[i];
				node.vx += x * share;
				node.vy += y * share;
				let other = &mut self.nodes[j];
				other.vx -= x * (1.0 - share);
				other.vy -= y * (1.0 - share);
			}
		}
	}

	fn apply_center(&mut self) {
		let n = self.nodes.len();
		if n == 0 {
			return;
		}
		let (sx, sy) = self
			.nodes
			.iter()
			.fold((0.0, 0.0), |(sx, sy), node| (sx + node.x, sy + node.y));
		let (dx, dy) = (sx / n as f64 - self.center.0, sy / n as f64 - self.center.1);
		for node in &mut self.nodes {
			node.x -= dx;
			node.y -= dy;
		}
	}

	fn integrate(&mut self) {
		let friction = 1.0 - self.config.velocity_decay;
		for node in &mut self.nodes {
			match node.fx {
				Some(fx) => {
					node.x = fx;
					node.vx = 0.0;
				}
				None => {
					node.vx *= friction;
					node.x += node.vx;
				}
			}
			match node.fy {
				Some(fy) => {
					node.y = fy;
					node.vy = 0.0;
				}
				None => {
					node.vy *= friction;
					node.y += node.vy;
				}
			}
		}
	}

	fn guard_non_finite(&mut self) {
		let mut reset = 0;
		for (i, node) in self.nodes.iter_mut().enumerate() {
			if node.x.is_finite() && node.y.is_finite() && node.vx.is_finite() && node.vy.is_finite()
			{
				continue;
			}
			node.x = self.center.0 + jiggle(i) * 1e6;
			node.y = self.center.1 + jiggle(i + 1) * 1e6;
			node.vx = 0.0;
			node.vy = 0.0;
			if node.fx.is_some_and(|v| !v.is_finite()) || node.fy.is_some_and(|v| !v.is_finite()) {
				node.fx = None;
				node.fy = None;
			}
			reset += 1;
		}
		if reset > 0 {
			warn!("Layout produced {reset} non-finite node(s); moved back to center");
		}
	}
}

#[cfg(test)]
mod tests {
	use super::super::types::{GraphLink, GraphNode};
	use super::*;

	fn node(id: &str, category: NodeCategory) -> GraphNode {
		GraphNode {
			id: id.into(),
			label: id.into(),
			description: String::new(),
			category,
			size: category.size(),
			color: category.color(),
			risk_score: None,
			tags: Vec::new(),
		}
	}

	fn link(source: &str, target: &str, kind: LinkKind) -> GraphLink {
		GraphLink {
			source: source.into(),
			target: target.into(),
			kind,
			weight: 1.0,
		}
	}

	fn star(leaves: usize) -> GraphData {
		let mut nodes = vec![node("hub", NodeCategory::Component)];
		let mut links = Vec::new();
		for i in 0..leaves {
			let id = format!("t{i}");
			nodes.push(node(&id, NodeCategory::Threat));
			links.push(link("hub", &id, LinkKind::ComponentThreat));
		}
		GraphData { nodes, links }
	}

	fn distance(a: &SimNode, b: &SimNode) -> f64 {
		((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
	}

	#[test]
	fn mobile_viewport_scales_parameters() {
		let desktop = LayoutConfig::for_viewport(1024.0);
		let mobile = LayoutConfig::for_viewport(500.0);

		assert_eq!(desktop.link_distance(LinkKind::ArchitectureComponent), 120.0);
		assert_eq!(desktop.link_distance(LinkKind::ComponentThreat), 80.0);
		assert_eq!(desktop.link_distance(LinkKind::ThreatMitigation), 60.0);
		assert_eq!(desktop.charge(NodeCategory::Architecture), -1500.0);
		assert_eq!(desktop.charge(NodeCategory::Mitigation), -400.0);
		assert!((mobile.link_distance(LinkKind::ArchitectureComponent) - 72.0).abs() < 1e-9);
		assert!((mobile.charge(NodeCategory::Component) + 480.0).abs() < 1e-9);
		assert!((mobile.collision_radius(20.0) - 21.0).abs() < 1e-9);
		assert_eq!(desktop.collision_radius(20.0), 35.0);
	}

	#[test]
	fn spring_strength_is_scaled_weight() {
		let config = LayoutConfig::default();
		assert!((config.link_strength(1.0) - 0.8).abs() < 1e-9);
		assert!((config.link_strength(4.0) - 3.2).abs() < 1e-9);
		assert!((config.link_strength(9.3) - 7.44).abs() < 1e-9);
		assert_eq!(config.link_strength(-2.0), 0.0);
	}

	#[test]
	fn heavier_links_pull_tighter() {
		let mut data = star(2);
		data.links[0].weight = 1.0;
		data.links[1].weight = 9.3;
		let mut sim = start_layout(&data, 1024.0, 768.0);
		assert!(sim.links[1].strength > sim.links[0].strength);
		while sim.tick() {}

		let nodes = sim.nodes();
		let light = distance(&nodes[0], &nodes[1]);
		let heavy = distance(&nodes[0], &nodes[2]);
		assert!(light.is_finite() && heavy.is_finite());
		assert!(heavy < light, "heavy {heavy} light {light}");
	}

	#[test]
	fn links_to_unknown_nodes_are_ignored() {
		let mut data = star(2);
		data.links.push(link("hub", "ghost", LinkKind::ComponentThreat));
		let sim = start_layout(&data, 800.0, 600.0);
		assert_eq!(sim.links.len(), 2);
	}

	#[test]
	fn linked_pair_settles_near_its_spring_length() {
		let data = GraphData {
			nodes: vec![
				node("a", NodeCategory::Architecture),
				node("c", NodeCategory::Component),
			],
			links: vec![link("a", "c", LinkKind::ArchitectureComponent)],
		};
		let mut sim = start_layout(&data, 1024.0, 768.0);
		for _ in 0..300 {
			sim.tick();
		}
		let d = distance(&sim.nodes[0], &sim.nodes[1]);
		assert!(d > 100.0 && d < 220.0, "distance {d}");
	}

	#[test]
	fn layout_cools_down_and_stays_finite() {
		let mut sim = start_layout(&star(12), 1024.0, 768.0);
		let mut ticks = 0;
		while sim.tick() {
			ticks += 1;
			assert!(ticks < 1000);
		}
		assert!(ticks > 250);
		assert!(!sim.is_running());
		for n in sim.nodes() {
			assert!(n.x.is_finite() && n.y.is_finite());
		}
	}

	#[test]
	fn layout_stays_near_the_viewport_center() {
		let mut sim = start_layout(&star(6), 1000.0, 800.0);
		for _ in 0..200 {
			sim.tick();
		}
		let n = sim.nodes().len() as f64;
		let cx = sim.nodes().iter().map(|n| n.x).sum::<f64>() / n;
		let cy = sim.nodes().iter().map(|n| n.y).sum::<f64>() / n;
		assert!((cx - 500.0).abs() < 5.0);
		assert!((cy - 400.0).abs() < 5.0);
	}

	#[test]
	fn observer_sees_every_completed_tick() {
		let mut sim = start_layout(&star(3), 800.0, 600.0);
		let mut seen = Vec::new();
		for _ in 0..5 {
			sim.tick_with(&mut |nodes: &[SimNode]| seen.push(nodes[1].x));
		}
		assert_eq!(seen.len(), 5);
		assert_eq!(*seen.last().unwrap(), sim.nodes()[1].x);
	}

	#[test]
	fn pinned_node_does_not_move() {
		let mut sim = start_layout(&star(4), 800.0, 600.0);
		sim.pin(2, 10.0, 20.0);
		for _ in 0..50 {
			sim.tick();
		}
		assert_eq!((sim.nodes()[2].x, sim.nodes()[2].y), (10.0, 20.0));
		assert!(sim.is_pinned(2));

		sim.unpin(2);
		assert!(!sim.is_pinned(2));
		sim.pin(1, 0.0, 0.0);
		sim.release_all_pins();
		assert!(sim.nodes().iter().all(|n| !n.is_pinned()));
	}

	#[test]
	fn stopped_or_paused_simulation_does_not_tick() {
		let mut sim = start_layout(&star(3), 800.0, 600.0);
		sim.pause();
		let before = sim.nodes().to_vec();
		assert!(!sim.tick());
		assert_eq!(sim.nodes(), before.as_slice());

		sim.resume();
		assert!(sim.tick());

		sim.stop();
		assert!(sim.is_stopped());
		assert!(!sim.tick());
	}

	#[test]
	fn reheat_restarts_a_cooled_layout() {
		let mut sim = start_layout(&star(3), 800.0, 600.0);
		while sim.tick() {}
		assert!(sim.alpha() < sim.config().alpha_min);
		sim.reheat(0.3);
		assert_eq!(sim.alpha(), 0.3);
		assert!(sim.is_running());
		assert!(sim.tick());
	}

	#[test]
	fn radial_positions_are_evenly_spaced() {
		let points = radial_positions((100.0, 50.0), 3, SELECTION_RADIUS);
		assert_eq!(points.len(), 3);
		for &(x, y) in &points {
			let r = ((x - 100.0).powi(2) + (y - 50.0).powi(2)).sqrt();
			assert!((r - SELECTION_RADIUS).abs() < 1e-9);
		}
		for (i, &(x, y)) in points.iter().enumerate() {
			let angle = (y - 50.0).atan2(x - 100.0).rem_euclid(TAU);
			assert!((angle - TAU * i as f64 / 3.0).abs() < 1e-9);
		}
		let side = SELECTION_RADIUS * 3.0_f64.sqrt();
		let (a, b) = (points[0], points[1]);
		assert!((((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt() - side).abs() < 1e-9);
	}

	#[test]
	fn arranging_neighbors_pins_them_on_the_circle() {
		let mut sim = start_layout(&star(3), 800.0, 600.0);
		for _ in 0..20 {
			sim.tick();
		}
		let center = (sim.nodes()[0].x, sim.nodes()[0].y);
		let placed = sim.arrange_neighbors(0, &[1, 2, 3]);

		assert_eq!(placed, radial_positions(center, 3, SELECTION_RADIUS));
		for i in 0..4 {
			assert!(sim.is_pinned(i));
		}
		sim.reheat(0.3);
		for _ in 0..10 {
			sim.tick();
		}
		assert_eq!((sim.nodes()[0].x, sim.nodes()[0].y), center);
		assert_eq!((sim.nodes()[3].x, sim.nodes()[3].y), placed[2]);
	}

	#[test]
	fn non_finite_positions_are_reset() {
		let mut sim = start_layout(&star(2), 800.0, 600.0);
		sim.nodes[1].x = f64::NAN;
		sim.nodes[1].vy = f64::INFINITY;
		sim.tick();
		for n in sim.nodes() {
			assert!(n.x.is_finite() && n.y.is_finite());
			assert!(n.vx.is_finite() && n.vy.is_finite());
		}
	}

	#[test]
	fn bounds_include_node_radius() {
		let sim = start_layout(&star(0), 800.0, 600.0);
		let b = sim.bounds().unwrap();
		let hub = &sim.nodes()[0];
		assert!((b.width() - 2.0 * hub.size).abs() < 1e-9);
		assert!((b.center().0 - hub.x).abs() < 1e-9);
	}
}
