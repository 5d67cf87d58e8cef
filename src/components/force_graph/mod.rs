//! The navigator graph: building, filtering, layout and the canvas that shows it.

pub mod builder;
mod component;
pub mod filter;
pub mod fullscreen;
pub mod layout;
mod render;
pub mod state;
mod types;
pub mod viewport;

pub use builder::{BuildStats, build_graph, build_graph_with_stats};
pub use component::ForceGraphCanvas;
pub use filter::{FilterCriteria, filter_graph};
pub use layout::{LayoutConfig, SimNode, Simulation, TickObserver, start_layout};
pub use types::{GraphData, GraphLink, GraphNode, LinkKind, NodeCategory};
