//! Category and text filtering of a built graph.

use std::collections::HashSet;

use super::types::{GraphData, GraphNode, NodeCategory};

/// Category toggles plus free-text search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterCriteria {
	/// Show architecture nodes.
	pub architectures: bool,
	/// Show component nodes.
	pub components: bool,
	/// Show threat nodes.
	pub threats: bool,
	/// Show mitigation nodes.
	pub mitigations: bool,
	/// Case-insensitive substring matched against label, description and tags.
	pub query: String,
}

impl Default for FilterCriteria {
	fn default() -> Self {
		Self {
			architectures: true,
			components: true,
			threats: true,
			mitigations: true,
			query: String::new(),
		}
	}
}

impl FilterCriteria {
	/// Whether nodes of `category` are enabled.
	pub fn shows(&self, category: NodeCategory) -> bool {
		match category {
			NodeCategory::Architecture => self.architectures,
			NodeCategory::Component => self.components,
			NodeCategory::Threat => self.threats,
			NodeCategory::Mitigation => self.mitigations,
		}
	}

	/// Enable or disable `category`.
	pub fn set_shows(&mut self, category: NodeCategory, visible: bool) {
		let flag = match category {
			NodeCategory::Architecture => &mut self.architectures,
			NodeCategory::Component => &mut self.components,
			NodeCategory::Threat => &mut self.threats,
			NodeCategory::Mitigation => &mut self.mitigations,
		};
		*flag = visible;
	}

	/// Whether `node` passes both the category toggle and the search.
	pub fn matches(&self, node: &GraphNode) -> bool {
		if !self.shows(node.category) {
			return false;
		}
		let query = self.query.trim().to_lowercase();
		query.is_empty() || node_contains(node, &query)
	}
}

fn node_contains(node: &GraphNode, needle: &str) -> bool {
	node.label.to_lowercase().contains(needle)
		|| node.description.to_lowercase().contains(needle)
		|| node.tags.iter().any(|t| t.to_lowercase().contains(needle))
}

/// The visible subgraph for `criteria`: passing nodes, and the links whose
/// endpoints both pass.
pub fn filter_graph(data: &GraphData, criteria: &FilterCriteria) -> GraphData {
	let nodes: Vec<_> = data
		.nodes
		.iter()
		.filter(|n| criteria.matches(n))
		.cloned()
		.collect();
	let visible: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
	let links = data
		.links
		.iter()
		.filter(|l| visible.contains(l.source.as_str()) && visible.contains(l.target.as_str()))
		.cloned()
		.collect();
	GraphData { nodes, links }
}
