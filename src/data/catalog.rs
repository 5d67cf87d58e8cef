use std::sync::OnceLock;

use log::{error, info};
use serde::Deserialize;

use super::error::DataError;
use super::taxonomy::ComponentTree;
use super::types::{Architecture, Component, Mitigation, Threat};

const EMBEDDED_CATALOG: &str = include_str!("../../assets/catalog.json");

#[derive(Deserialize)]
struct CatalogDocument {
	#[serde(default)]
	architectures: Vec<Architecture>,
	#[serde(default)]
	components: Vec<Component>,
	#[serde(default)]
	threats: Vec<Threat>,
	#[serde(default)]
	mitigations: Vec<Mitigation>,
}

/// Row counts of the four source tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableCounts {
	/// Architecture rows.
	pub architectures: usize,
	/// Component rows, nested components included.
	pub components: usize,
	/// Threat rows.
	pub threats: usize,
	/// Mitigation rows.
	pub mitigations: usize,
}

/// The immutable catalog tables for one session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
	/// Architecture patterns.
	pub architectures: Vec<Architecture>,
	/// Component taxonomy.
	pub components: ComponentTree,
	/// Threat table.
	pub threats: Vec<Threat>,
	/// Mitigation table.
	pub mitigations: Vec<Mitigation>,
}

impl Catalog {
	/// Parse a catalog document.
	pub fn from_json(json: &str) -> Result<Self, DataError> {
		let doc: CatalogDocument = serde_json::from_str(json)?;
		Ok(Self {
			architectures: doc.architectures,
			components: ComponentTree::from_roots(doc.components),
			threats: doc.threats,
			mitigations: doc.mitigations,
		})
	}

	/// The catalog shipped with the application, parsed on first access.
	///
	/// A malformed document is logged and replaced by an empty catalog so the
	/// navigator can report it instead of failing to start.
	pub fn embedded() -> &'static Catalog {
		static CATALOG: OnceLock<Catalog> = OnceLock::new();
		CATALOG.get_or_init(|| match Self::from_json(EMBEDDED_CATALOG) {
			Ok(catalog) => {
				info!("Catalog loaded: {:?}", catalog.counts());
				catalog
			}
			Err(err) => {
				error!("Failed to load embedded catalog: {err}");
				Self::default()
			}
		})
	}

	/// Sizes of the source tables.
	pub fn counts(&self) -> TableCounts {
		TableCounts {
			architectures: self.architectures.len(),
			components: self.components.len(),
			threats: self.threats.len(),
			mitigations: self.mitigations.len(),
		}
	}

	/// Threat by exact id.
	pub fn threat(&self, id: &str) -> Option<&Threat> {
		self.threats.iter().find(|t| t.id == id)
	}

	/// Mitigation by exact id.
	pub fn mitigation(&self, id: &str) -> Option<&Mitigation> {
		self.mitigations.iter().find(|m| m.id == id)
	}

	/// Architecture by exact id.
	pub fn architecture(&self, id: &str) -> Option<&Architecture> {
		self.architectures.iter().find(|a| a.id == id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_document_has_zero_counts() {
		let catalog = Catalog::from_json("{}").unwrap();
		assert_eq!(catalog.counts(), TableCounts::default());
	}

	#[test]
	fn malformed_document_is_an_error() {
		assert!(matches!(
			Catalog::from_json("{\"threats\": 3}"),
			Err(DataError::Parse(_))
		));
	}

	#[test]
	fn embedded_catalog_parses() {
		let catalog = Catalog::from_json(EMBEDDED_CATALOG).unwrap();
		let counts = catalog.counts();
		assert!(counts.architectures > 0);
		assert!(counts.components > counts.architectures);
		assert!(counts.threats > 0);
		assert!(counts.mitigations > 0);
		assert!(catalog.components.get("kc6.1.1").is_some());
	}
}
