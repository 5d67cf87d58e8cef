use serde::{Deserialize, Serialize};

/// Lifecycle status of an architecture pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchitectureStatus {
	/// In current use.
	Active,
	/// Kept for reference only.
	Deprecated,
	/// Emerging pattern.
	Experimental,
}

/// An agentic-AI architecture pattern and the catalog entries it relates to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Architecture {
	/// Unique identifier.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Free text description.
	#[serde(default)]
	pub description: String,
	/// Components the architecture is built from, in display order.
	#[serde(default)]
	pub key_components: Vec<String>,
	/// Threats the architecture is exposed to.
	#[serde(default)]
	pub threat_ids: Vec<String>,
	/// Mitigations that apply to the architecture.
	#[serde(default)]
	pub mitigation_ids: Vec<String>,
	/// Overall risk score between 0 and 10.
	#[serde(default)]
	pub risk_score: Option<f64>,
	/// Free-form tags.
	#[serde(default)]
	pub tags: Vec<String>,
	/// Lifecycle status.
	#[serde(default)]
	pub status: Option<ArchitectureStatus>,
}

/// A node of the component taxonomy as it appears in the catalog document.
///
/// Ids are dot paths: `kc6.1.1` is a child of `kc6.1`, which is a child of `kc6`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
	/// Hierarchical identifier.
	pub id: String,
	/// Display title.
	pub title: String,
	/// Free text description.
	#[serde(default)]
	pub description: String,
	/// Nested sub-components.
	#[serde(default)]
	pub children: Vec<Component>,
	/// Threat categories this component is typically exposed to.
	#[serde(default)]
	pub threat_categories: Vec<String>,
}

/// Impact of a threat when realised.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
	/// Severe, broad impact.
	High,
	/// Contained impact.
	Medium,
	/// Minor impact.
	Low,
}

impl ImpactLevel {
	/// Fill color used for threat nodes of this impact.
	pub fn color(self) -> &'static str {
		match self {
			Self::High => "#e5484d",
			Self::Medium => "#f76b15",
			Self::Low => "#ffc53d",
		}
	}

	/// Human readable name.
	pub fn label(self) -> &'static str {
		match self {
			Self::High => "High",
			Self::Medium => "Medium",
			Self::Low => "Low",
		}
	}
}

/// A catalogued threat.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Threat {
	/// Unique identifier.
	pub id: String,
	/// Short code such as `T1`.
	pub code: String,
	/// Display name.
	pub name: String,
	/// Free text description.
	#[serde(default)]
	pub description: String,
	/// Impact level.
	pub impact: ImpactLevel,
	/// Components the threat affects. A parent id covers all of its descendants.
	#[serde(default)]
	pub component_ids: Vec<String>,
	/// Numeric risk score.
	#[serde(default)]
	pub risk_score: Option<f64>,
	/// Free-form tags.
	#[serde(default)]
	pub tags: Vec<String>,
}

/// Lifecycle phases a mitigation applies to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseFlags {
	/// Applies while designing the system.
	#[serde(default)]
	pub design: bool,
	/// Applies while building it.
	#[serde(default)]
	pub build: bool,
	/// Applies in production.
	#[serde(default)]
	pub operation: bool,
}

impl PhaseFlags {
	/// Names of the enabled phases, in lifecycle order.
	pub fn names(self) -> Vec<&'static str> {
		[
			(self.design, "Design"),
			(self.build, "Build"),
			(self.operation, "Operation"),
		]
		.into_iter()
		.filter_map(|(on, name)| on.then_some(name))
		.collect()
	}
}

/// A catalogued mitigation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mitigation {
	/// Unique identifier.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Free text description.
	#[serde(default)]
	pub description: String,
	/// Threats this mitigation addresses.
	#[serde(default)]
	pub threat_ids: Vec<String>,
	/// Applicable lifecycle phases.
	#[serde(default)]
	pub phases: PhaseFlags,
	/// Implementation guidance.
	#[serde(default)]
	pub implementation: String,
}
