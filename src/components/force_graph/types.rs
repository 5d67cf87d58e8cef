/// The four kinds of catalog entry shown in the navigator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeCategory {
	/// Architecture pattern.
	Architecture,
	/// Taxonomy component.
	Component,
	/// Threat entry.
	Threat,
	/// Mitigation entry.
	Mitigation,
}

impl NodeCategory {
	/// Every category, in hierarchy order.
	pub const ALL: [NodeCategory; 4] = [
		Self::Architecture,
		Self::Component,
		Self::Threat,
		Self::Mitigation,
	];

	/// Display name.
	pub fn label(self) -> &'static str {
		match self {
			Self::Architecture => "Architectures",
			Self::Component => "Components",
			Self::Threat => "Threats",
			Self::Mitigation => "Mitigations",
		}
	}

	/// Default fill color.
	pub fn color(self) -> &'static str {
		match self {
			Self::Architecture => "#6e56cf",
			Self::Component => "#0090ff",
			Self::Threat => "#e5484d",
			Self::Mitigation => "#30a46c",
		}
	}

	/// Node radius in graph units.
	pub fn size(self) -> f64 {
		match self {
			Self::Architecture => 20.0,
			Self::Component => 14.0,
			Self::Threat => 11.0,
			Self::Mitigation => 9.0,
		}
	}

	/// Many-body charge; higher-level categories push harder.
	pub fn charge(self) -> f64 {
		match self {
			Self::Architecture => -1500.0,
			Self::Component => -800.0,
			Self::Threat => -600.0,
			Self::Mitigation => -400.0,
		}
	}
}

/// The relationship an edge encodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LinkKind {
	/// Architecture uses component.
	ArchitectureComponent,
	/// Component is exposed to threat.
	ComponentThreat,
	/// Threat is addressed by mitigation.
	ThreatMitigation,
}

impl LinkKind {
	/// Target spring length before the mobile factor is applied.
	pub fn distance(self) -> f64 {
		match self {
			Self::ArchitectureComponent => 120.0,
			Self::ComponentThreat => 80.0,
			Self::ThreatMitigation => 60.0,
		}
	}

	/// RGB triple used for strokes.
	pub fn rgb(self) -> (u8, u8, u8) {
		match self {
			Self::ArchitectureComponent => (142, 125, 230),
			Self::ComponentThreat => (240, 120, 120),
			Self::ThreatMitigation => (90, 200, 140),
		}
	}
}

/// A node of the derived graph. The id is reused from the source record.
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub label: String,
	/// Searched by the filter alongside the label and tags.
	pub description: String,
	pub category: NodeCategory,
	/// Radius in graph units.
	pub size: f64,
	pub color: &'static str,
	pub risk_score: Option<f64>,
	pub tags: Vec<String>,
}

/// A directed edge between two node ids.
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	pub kind: LinkKind,
	/// Layout-only spring weight.
	pub weight: f64,
}

/// Nodes and links ready for filtering and layout.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Node by id.
	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Distinct ids linked to `id` in either direction, in link order.
	pub fn neighbors(&self, id: &str) -> Vec<&str> {
		let mut out: Vec<&str> = Vec::new();
		for link in &self.links {
			let other = if link.source == id {
				link.target.as_str()
			} else if link.target == id {
				link.source.as_str()
			} else {
				continue;
			};
			if other != id && !out.contains(&other) {
				out.push(other);
			}
		}
		out
	}

	/// Whether there is nothing to draw.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Number of nodes in `category`.
	pub fn count(&self, category: NodeCategory) -> usize {
		self.nodes.iter().filter(|n| n.category == category).count()
	}
}
