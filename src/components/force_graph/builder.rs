//! Derive the navigator graph from the catalog tables.
//!
//! The walk follows architecture -> component -> threat -> mitigation. A
//! reference that does not resolve skips that branch only; the build itself
//! never fails.

use std::collections::HashMap;

use log::debug;

use super::types::{GraphData, GraphLink, GraphNode, LinkKind, NodeCategory};
use crate::data::{Architecture, ComponentTree, Mitigation, Threat, id_covers};

/// Weight of every threat -> mitigation link.
pub const MITIGATION_LINK_WEIGHT: f64 = 1.0;
const COMPONENT_LINK_WEIGHT: f64 = 1.0;
const DEFAULT_THREAT_WEIGHT: f64 = 1.0;

/// References the builder could not resolve during one pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
	/// Component ids that matched no taxonomy entry.
	pub missing_components: usize,
	/// Threat ids that matched no threat record.
	pub missing_threats: usize,
	/// Mitigation ids that matched no mitigation record.
	pub missing_mitigations: usize,
}

#[derive(Default)]
struct GraphAccumulator {
	data: GraphData,
	index: HashMap<String, usize>,
}

impl GraphAccumulator {
	fn ensure_node(&mut self, id: &str, make: impl FnOnce() -> GraphNode) {
		if !self.index.contains_key(id) {
			self.index.insert(id.to_string(), self.data.nodes.len());
			self.data.nodes.push(make());
		}
	}

	fn link(&mut self, source: &str, target: &str, kind: LinkKind, weight: f64) {
		if self.index.contains_key(source) && self.index.contains_key(target) {
			self.data.links.push(GraphLink {
				source: source.to_string(),
				target: target.to_string(),
				kind,
				weight,
			});
		}
	}
}

/// Build the navigator graph. Equivalent to [`build_graph_with_stats`] without
/// the statistics.
pub fn build_graph(
	architectures: &[Architecture],
	components: &ComponentTree,
	threats: &[Threat],
	mitigations: &[Mitigation],
) -> GraphData {
	build_graph_with_stats(architectures, components, threats, mitigations).0
}

/// Build the navigator graph and report how many references were skipped.
///
/// Nodes are deduplicated by id and kept in first-insertion order. Links are
/// not deduplicated: two architectures that justify the same edge both add it.
pub fn build_graph_with_stats(
	architectures: &[Architecture],
	components: &ComponentTree,
	threats: &[Threat],
	mitigations: &[Mitigation],
) -> (GraphData, BuildStats) {
	let threat_by_id: HashMap<&str, &Threat> =
		threats.iter().map(|t| (t.id.as_str(), t)).collect();
	let mitigation_by_id: HashMap<&str, &Mitigation> =
		mitigations.iter().map(|m| (m.id.as_str(), m)).collect();

	let mut acc = GraphAccumulator::default();
	let mut stats = BuildStats::default();

	for arch in architectures {
		acc.ensure_node(&arch.id, || architecture_node(arch));

		// Resolved once per architecture so a bad id is counted once.
		let arch_threats: Vec<&Threat> = arch
			.threat_ids
			.iter()
			.filter_map(|id| {
				let found = threat_by_id.get(id.as_str()).copied();
				if found.is_none() {
					debug!("{}: unknown threat {id}", arch.id);
					stats.missing_threats += 1;
				}
				found
			})
			.collect();
		let arch_mitigations: Vec<&Mitigation> = arch
			.mitigation_ids
			.iter()
			.filter_map(|id| {
				let found = mitigation_by_id.get(id.as_str()).copied();
				if found.is_none() {
					debug!("{}: unknown mitigation {id}", arch.id);
					stats.missing_mitigations += 1;
				}
				found
			})
			.collect();

		for component_id in &arch.key_components {
			let Some(entry) = components.resolve(component_id).and_then(|i| components.entry(i))
			else {
				debug!("{}: unknown component {component_id}", arch.id);
				stats.missing_components += 1;
				continue;
			};
			acc.ensure_node(&entry.id, || GraphNode {
				id: entry.id.clone(),
				label: entry.title.clone(),
				description: entry.description.clone(),
				category: NodeCategory::Component,
				size: NodeCategory::Component.size(),
				color: NodeCategory::Component.color(),
				risk_score: None,
				tags: entry.threat_categories.clone(),
			});
			acc.link(
				&arch.id,
				&entry.id,
				LinkKind::ArchitectureComponent,
				COMPONENT_LINK_WEIGHT,
			);

			for &threat in &arch_threats {
				if !threat
					.component_ids
					.iter()
					.any(|declared| id_covers(declared, &entry.id))
				{
					continue;
				}
				acc.ensure_node(&threat.id, || threat_node(threat));
				acc.link(
					&entry.id,
					&threat.id,
					LinkKind::ComponentThreat,
					threat.risk_score.unwrap_or(DEFAULT_THREAT_WEIGHT),
				);

				for &mitigation in &arch_mitigations {
					if !mitigation.threat_ids.contains(&threat.id) {
						continue;
					}
					acc.ensure_node(&mitigation.id, || mitigation_node(mitigation));
					acc.link(
						&threat.id,
						&mitigation.id,
						LinkKind::ThreatMitigation,
						MITIGATION_LINK_WEIGHT,
					);
				}
			}
		}
	}

	debug!(
		"Graph built: {} nodes, {} links, skipped {:?}",
		acc.data.nodes.len(),
		acc.data.links.len(),
		stats
	);
	(acc.data, stats)
}

fn architecture_node(arch: &Architecture) -> GraphNode {
	GraphNode {
		id: arch.id.clone(),
		label: arch.name.clone(),
		description: arch.description.clone(),
		category: NodeCategory::Architecture,
		size: NodeCategory::Architecture.size(),
		color: NodeCategory::Architecture.color(),
		risk_score: arch.risk_score,
		tags: arch.tags.clone(),
	}
}

fn threat_node(threat: &Threat) -> GraphNode {
	GraphNode {
		id: threat.id.clone(),
		label: format!("{} {}", threat.code, threat.name),
		description: threat.description.clone(),
		category: NodeCategory::Threat,
		size: NodeCategory::Threat.size(),
		color: threat.impact.color(),
		risk_score: threat.risk_score,
		tags: threat.tags.clone(),
	}
}

fn mitigation_node(mitigation: &Mitigation) -> GraphNode {
	GraphNode {
		id: mitigation.id.clone(),
		label: mitigation.name.clone(),
		description: mitigation.description.clone(),
		category: NodeCategory::Mitigation,
		size: NodeCategory::Mitigation.size(),
		color: NodeCategory::Mitigation.color(),
		risk_score: None,
		tags: mitigation.phases.names().into_iter().map(str::to_lowercase).collect(),
	}
}

#[cfg(test)]
pub(crate) mod fixtures {
	use crate::data::{
		Architecture, Component, ComponentTree, ImpactLevel, Mitigation, PhaseFlags, Threat,
	};

	pub fn architecture(id: &str, components: &[&str], threats: &[&str], mitigations: &[&str]) -> Architecture {
		Architecture {
			id: id.into(),
			name: id.into(),
			description: String::new(),
			key_components: components.iter().map(|s| s.to_string()).collect(),
			threat_ids: threats.iter().map(|s| s.to_string()).collect(),
			mitigation_ids: mitigations.iter().map(|s| s.to_string()).collect(),
			risk_score: None,
			tags: Vec::new(),
			status: None,
		}
	}

	pub fn component(id: &str, children: Vec<Component>) -> Component {
		Component {
			id: id.into(),
			title: id.into(),
			description: String::new(),
			children,
			threat_categories: Vec::new(),
		}
	}

	pub fn threat(id: &str, components: &[&str], risk: Option<f64>) -> Threat {
		Threat {
			id: id.into(),
			code: id.to_uppercase(),
			name: id.into(),
			description: String::new(),
			impact: ImpactLevel::Medium,
			component_ids: components.iter().map(|s| s.to_string()).collect(),
			risk_score: risk,
			tags: Vec::new(),
		}
	}

	pub fn mitigation(id: &str, threats: &[&str]) -> Mitigation {
		Mitigation {
			id: id.into(),
			name: id.into(),
			description: String::new(),
			threat_ids: threats.iter().map(|s| s.to_string()).collect(),
			phases: PhaseFlags::default(),
			implementation: String::new(),
		}
	}

	pub fn tree(roots: Vec<Component>) -> ComponentTree {
		ComponentTree::from_roots(roots)
	}
}

#[cfg(test)]
mod tests {
	use super::fixtures::*;
	use super::*;

	fn edges(data: &GraphData) -> Vec<(&str, &str, LinkKind)> {
		data.links
			.iter()
			.map(|l| (l.source.as_str(), l.target.as_str(), l.kind))
			.collect()
	}

	fn ids(data: &GraphData) -> Vec<&str> {
		data.nodes.iter().map(|n| n.id.as_str()).collect()
	}

	#[test]
	fn single_chain_yields_four_nodes_and_three_links() {
		let archs = [architecture("seq", &["c1"], &["t1"], &["m1"])];
		let components = tree(vec![component("c1", vec![])]);
		let threats = [threat("t1", &["c1"], None)];
		let mitigations = [mitigation("m1", &["t1"])];

		let data = build_graph(&archs, &components, &threats, &mitigations);

		assert_eq!(ids(&data), ["seq", "c1", "t1", "m1"]);
		assert_eq!(
			edges(&data),
			[
				("seq", "c1", LinkKind::ArchitectureComponent),
				("c1", "t1", LinkKind::ComponentThreat),
				("t1", "m1", LinkKind::ThreatMitigation),
			]
		);
		assert_eq!(data.links[1].weight, 1.0);
		assert_eq!(data.links[2].weight, MITIGATION_LINK_WEIGHT);
	}

	#[test]
	fn risk_score_becomes_threat_link_weight() {
		let archs = [architecture("a", &["c1"], &["t1"], &[])];
		let components = tree(vec![component("c1", vec![])]);
		let threats = [threat("t1", &["c1"], Some(7.5))];
		let data = build_graph(&archs, &components, &threats, &[]);
		assert_eq!(data.links[1].weight, 7.5);
	}

	#[test]
	fn parent_threat_attaches_to_every_listed_descendant() {
		let archs = [architecture("a", &["kc6.1", "kc6.1.1", "kc6.2"], &["t1"], &[])];
		let components = tree(vec![component(
			"kc6",
			vec![
				component("kc6.1", vec![component("kc6.1.1", vec![])]),
				component("kc6.2", vec![]),
			],
		)]);
		let threats = [threat("t1", &["kc6"], None)];

		let data = build_graph(&archs, &components, &threats, &[]);
		let threat_sources: Vec<&str> = data
			.links
			.iter()
			.filter(|l| l.kind == LinkKind::ComponentThreat)
			.map(|l| l.source.as_str())
			.collect();
		assert_eq!(threat_sources, ["kc6.1", "kc6.1.1", "kc6.2"]);
	}

	#[test]
	fn dash_and_dot_ids_are_equivalent() {
		let components = tree(vec![component("kc6", vec![component("kc6.1", vec![])])]);
		let dot = build_graph(
			&[architecture("a", &["kc6.1"], &["t1"], &[])],
			&components,
			&[threat("t1", &["kc6.1"], None)],
			&[],
		);
		let dash = build_graph(
			&[architecture("a", &["kc6-1"], &["t1"], &[])],
			&components,
			&[threat("t1", &["kc6-1"], None)],
			&[],
		);
		assert_eq!(edges(&dot), edges(&dash));
		assert_eq!(ids(&dash), ["a", "kc6.1", "t1"]);
	}

	#[test]
	fn threat_on_sibling_component_is_not_attached() {
		let archs = [architecture("a", &["kc6.2"], &["t1"], &[])];
		let components = tree(vec![component(
			"kc6",
			vec![component("kc6.1", vec![]), component("kc6.2", vec![])],
		)]);
		let data = build_graph(&archs, &components, &[threat("t1", &["kc6.1"], None)], &[]);
		assert_eq!(ids(&data), ["a", "kc6.2"]);
	}

	#[test]
	fn missing_references_are_skipped() {
		let archs = [architecture(
			"a",
			&["ghost", "c1"],
			&["t-missing", "t1"],
			&["m-missing", "m1"],
		)];
		let components = tree(vec![component("c1", vec![])]);
		let threats = [threat("t1", &["c1"], None)];
		let mitigations = [mitigation("m1", &["t1"])];

		let (data, stats) =
			build_graph_with_stats(&archs, &components, &threats, &mitigations);

		assert_eq!(ids(&data), ["a", "c1", "t1", "m1"]);
		assert_eq!(data.links.len(), 3);
		assert_eq!(stats.missing_components, 1);
		assert_eq!(stats.missing_threats, 1);
		assert_eq!(stats.missing_mitigations, 1);
	}

	#[test]
	fn unresolved_ids_are_counted_once_per_architecture() {
		let archs = [
			architecture("a", &["c1", "c2"], &["t1", "t-missing"], &["m-missing", "m1"]),
			architecture("b", &["c1"], &["t-missing"], &["m-missing"]),
		];
		let components = tree(vec![component("c1", vec![]), component("c2", vec![])]);
		let threats = [threat("t1", &["c1", "c2"], None)];
		let mitigations = [mitigation("m1", &["t1"])];

		let (data, stats) =
			build_graph_with_stats(&archs, &components, &threats, &mitigations);

		assert_eq!(ids(&data), ["a", "c1", "t1", "m1", "c2", "b"]);
		assert_eq!(stats.missing_threats, 2);
		assert_eq!(stats.missing_mitigations, 2);
	}

	#[test]
	fn shared_edges_are_kept_per_architecture() {
		let archs = [
			architecture("a", &["c1"], &["t1"], &[]),
			architecture("b", &["c1"], &["t1"], &[]),
		];
		let components = tree(vec![component("c1", vec![])]);
		let data = build_graph(&archs, &components, &[threat("t1", &["c1"], None)], &[]);

		assert_eq!(ids(&data), ["a", "c1", "t1", "b"]);
		let c1_t1 = edges(&data)
			.into_iter()
			.filter(|e| *e == ("c1", "t1", LinkKind::ComponentThreat))
			.count();
		assert_eq!(c1_t1, 2);
	}

	#[test]
	fn rebuilding_is_idempotent() {
		let archs = [
			architecture("a", &["c1", "c2"], &["t1", "t2"], &["m1"]),
			architecture("b", &["c2"], &["t2"], &["m1"]),
		];
		let components = tree(vec![component("c1", vec![]), component("c2", vec![])]);
		let threats = [threat("t1", &["c1"], None), threat("t2", &["c2"], Some(3.0))];
		let mitigations = [mitigation("m1", &["t1", "t2"])];

		let first = build_graph(&archs, &components, &threats, &mitigations);
		let second = build_graph(&archs, &components, &threats, &mitigations);
		assert_eq!(first, second);
	}

	#[test]
	fn empty_tables_build_an_empty_graph() {
		let data = build_graph(&[], &ComponentTree::default(), &[], &[]);
		assert!(data.is_empty());
		assert!(data.links.is_empty());
	}
}
