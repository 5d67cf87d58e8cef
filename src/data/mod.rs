//! Static catalog tables: architectures, the component taxonomy, threats and mitigations.

mod catalog;
mod error;
pub mod taxonomy;
mod types;

pub use catalog::{Catalog, TableCounts};
pub use error::DataError;
pub use taxonomy::{ComponentEntry, ComponentTree, id_covers, normalize_id};
pub use types::{
	Architecture, ArchitectureStatus, Component, ImpactLevel, Mitigation, PhaseFlags, Threat,
};
