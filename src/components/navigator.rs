//! The architecture navigator: search, category toggles, the graph canvas and
//! the details of the selected node.

use leptos::prelude::*;
use log::debug;

use super::force_graph::{
	FilterCriteria, ForceGraphCanvas, GraphData, GraphNode, NodeCategory, build_graph, filter_graph,
};
use crate::data::{Catalog, ComponentTree, TableCounts};

/// What the navigator body shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigatorView {
	/// The graph canvas.
	Graph,
	/// The catalog produced no nodes at all.
	NoData(TableCounts),
	/// Nodes exist but the filters removed every one.
	NoMatches(TableCounts),
}

impl NavigatorView {
	/// Pick the view for the full `graph` and its filtered `visible` subset.
	pub fn classify(graph: &GraphData, visible: &GraphData, counts: TableCounts) -> Self {
		if graph.is_empty() {
			Self::NoData(counts)
		} else if visible.is_empty() {
			Self::NoMatches(counts)
		} else {
			Self::Graph
		}
	}
}

/// Text shown in the details panel for one node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeDetails {
	/// Heading.
	pub title: String,
	/// Node category.
	pub category: NodeCategory,
	/// Accent color.
	pub color: &'static str,
	/// Free text description.
	pub description: String,
	/// Labelled facts in display order.
	pub facts: Vec<(&'static str, String)>,
}

/// Titles from the taxonomy root down to the component `id`.
pub fn component_path(tree: &ComponentTree, id: &str) -> Option<String> {
	let idx = tree.resolve(id)?;
	let mut chain: Vec<usize> = tree.ancestors(idx).collect();
	chain.reverse();
	chain.push(idx);
	let titles: Vec<&str> = chain
		.into_iter()
		.filter_map(|i| tree.entry(i))
		.map(|e| e.title.as_str())
		.collect();
	Some(titles.join(" › "))
}

fn score(value: Option<f64>) -> Option<String> {
	value.map(|v| format!("{v:.1}"))
}

/// Collect what the catalog knows about `node`.
pub fn node_details(catalog: &Catalog, node: &GraphNode) -> NodeDetails {
	let mut facts: Vec<(&'static str, String)> = Vec::new();
	match node.category {
		NodeCategory::Architecture => {
			if let Some(arch) = catalog.architecture(&node.id) {
				if let Some(status) = arch.status {
					facts.push(("Status", format!("{status:?}")));
				}
				facts.extend(score(arch.risk_score).map(|s| ("Risk score", s)));
				facts.push(("Components", arch.key_components.len().to_string()));
			}
		}
		NodeCategory::Component => {
			facts.extend(component_path(&catalog.components, &node.id).map(|p| ("Path", p)));
			if !node.tags.is_empty() {
				facts.push(("Threat categories", node.tags.join(", ")));
			}
		}
		NodeCategory::Threat => {
			if let Some(threat) = catalog.threat(&node.id) {
				facts.push(("Code", threat.code.clone()));
				facts.push(("Impact", threat.impact.label().to_string()));
				facts.extend(score(threat.risk_score).map(|s| ("Risk score", s)));
				facts.push(("Affects", threat.component_ids.join(", ")));
			}
		}
		NodeCategory::Mitigation => {
			if let Some(mitigation) = catalog.mitigation(&node.id) {
				facts.push(("Phases", mitigation.phases.names().join(", ")));
				facts.push(("Addresses", mitigation.threat_ids.join(", ")));
				if !mitigation.implementation.is_empty() {
					facts.push(("Implementation", mitigation.implementation.clone()));
				}
			}
		}
	}
	if node.category != NodeCategory::Component && !node.tags.is_empty() {
		facts.push(("Tags", node.tags.join(", ")));
	}
	NodeDetails {
		title: node.label.clone(),
		category: node.category,
		color: node.color,
		description: node.description.clone(),
		facts,
	}
}

/// Shown instead of a blank canvas when there is nothing to draw.
#[component]
pub fn DiagnosticPanel(
	title: &'static str,
	hint: &'static str,
	counts: TableCounts,
	#[prop(optional)] children: Option<Children>,
) -> impl IntoView {
	let rows = [
		("Architectures", counts.architectures),
		("Components", counts.components),
		("Threats", counts.threats),
		("Mitigations", counts.mitigations),
	];
	view! {
		<div class="diagnostic-panel" role="status">
			<h2>{title}</h2>
			<p>{hint}</p>
			<table class="diagnostic-counts">
				<tbody>
					{rows
						.into_iter()
						.map(|(name, count)| view! {
							<tr>
								<th scope="row">{name}</th>
								<td>{count}</td>
							</tr>
						})
						.collect_view()}
				</tbody>
			</table>
			{children.map(|c| c())}
		</div>
	}
}

#[component]
fn DetailsPanel(selected: RwSignal<Option<String>>, visible: Memo<GraphData>) -> impl IntoView {
	let details = move || {
		let id = selected.get()?;
		visible.with(|g| {
			let node = g.node(&id)?;
			let neighbors: Vec<(String, String)> = g
				.neighbors(&id)
				.into_iter()
				.filter_map(|n| g.node(n))
				.map(|n| (n.id.clone(), n.label.clone()))
				.collect();
			Some((node_details(Catalog::embedded(), node), neighbors))
		})
	};

	view! {
		<aside class="details-panel">
			{move || match details() {
				None => view! { <p class="hint">"Select a node to see its details."</p> }.into_any(),
				Some((d, neighbors)) => view! {
					<h2>{d.title}</h2>
					<p class="details-category" style:color=d.color>{d.category.label()}</p>
					<p>{d.description}</p>
					<dl>
						{d.facts
							.into_iter()
							.map(|(k, v)| view! { <dt>{k}</dt><dd>{v}</dd> })
							.collect_view()}
					</dl>
					<h3>"Connected"</h3>
					<ul class="details-neighbors">
						{neighbors
							.into_iter()
							.map(|(id, label)| view! {
								<li>
									<button on:click=move |_| selected.set(Some(id.clone()))>{label}</button>
								</li>
							})
							.collect_view()}
					</ul>
					<button class="details-close" on:click=move |_| selected.set(None)>"Clear selection"</button>
				}
					.into_any(),
			}}
		</aside>
	}
}

/// Search box, category legend and the graph of the embedded catalog.
#[component]
pub fn ArchitectureNavigator() -> impl IntoView {
	let catalog = Catalog::embedded();
	let counts = catalog.counts();

	let graph = Memo::new(move |_| {
		build_graph(
			&catalog.architectures,
			&catalog.components,
			&catalog.threats,
			&catalog.mitigations,
		)
	});
	let criteria = RwSignal::new(FilterCriteria::default());
	let visible = Memo::new(move |_| graph.with(|g| criteria.with(|c| filter_graph(g, c))));
	let view_kind =
		Memo::new(move |_| graph.with(|g| visible.with(|v| NavigatorView::classify(g, v, counts))));
	let selected = RwSignal::new(None::<String>);

	Effect::new(move |_| {
		let (nodes, links) = visible.with(|v| (v.nodes.len(), v.links.len()));
		debug!("Navigator showing {nodes} nodes, {links} links");
	});

	let legend = NodeCategory::ALL
		.into_iter()
		.map(|category| {
			view! {
				<li>
					<label>
						<input
							type="checkbox"
							prop:checked=move || criteria.with(|c| c.shows(category))
							on:change=move |ev| {
								let on = event_target_checked(&ev);
								criteria.update(|c| c.set_shows(category, on));
							}
						/>
						<span class="legend-swatch" style:background-color=category.color()></span>
						{category.label()}
						<span class="legend-count">
							{move || visible.with(|v| v.count(category))}
						</span>
					</label>
				</li>
			}
		})
		.collect_view();

	view! {
		<section class="navigator">
			<header class="navigator-toolbar">
				<input
					type="search"
					class="navigator-search"
					placeholder="Search architectures, components, threats, mitigations"
					prop:value=move || criteria.with(|c| c.query.clone())
					on:input=move |ev| {
						let query = event_target_value(&ev);
						criteria.update(|c| c.query = query);
					}
				/>
				<ul class="legend">{legend}</ul>
				<p class="graph-stats">
					{move || visible.with(|v| format!("{} nodes · {} links", v.nodes.len(), v.links.len()))}
				</p>
			</header>
			<div class="navigator-body">
				<div class="navigator-graph">
					{move || match view_kind.get() {
						NavigatorView::Graph => {
							view! { <ForceGraphCanvas data=visible selected=selected /> }.into_any()
						}
						NavigatorView::NoData(counts) => view! {
							<DiagnosticPanel
								title="No graph data"
								hint="The catalog produced no nodes. These are the table sizes that were loaded."
								counts=counts
							/>
						}
							.into_any(),
						NavigatorView::NoMatches(counts) => view! {
							<DiagnosticPanel
								title="Nothing matches the current filters"
								hint="Clear the search or enable more categories."
								counts=counts
							>
								<button on:click=move |_| criteria.set(FilterCriteria::default())>
									"Reset filters"
								</button>
							</DiagnosticPanel>
						}
							.into_any(),
					}}
				</div>
				<DetailsPanel selected=selected visible=visible />
			</div>
		</section>
	}
}
