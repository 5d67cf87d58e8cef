//! Arena representation of the component taxonomy.
//!
//! Components nest indefinitely in the catalog document. The tree is flattened
//! into a vector of entries with parent/child indices so it can be walked in
//! either direction while ids resolve in constant time.

use std::collections::HashMap;

use super::types::Component;

/// Canonical form of a hierarchical component id.
///
/// Dash and dot separators are equivalent (`kc6-1` and `kc6.1` name the same
/// component) and matching ignores case and surrounding whitespace.
pub fn normalize_id(id: &str) -> String {
	id.trim().to_lowercase().replace('-', ".")
}

/// Whether a threat declared against `declared` applies to `component`.
///
/// A declaration covers the component itself and every descendant of it.
pub fn id_covers(declared: &str, component: &str) -> bool {
	let (declared, component) = (normalize_id(declared), normalize_id(component));
	if declared.is_empty() {
		return false;
	}
	component == declared
		|| component
			.strip_prefix(declared.as_str())
			.is_some_and(|rest| rest.starts_with('.'))
}

/// One component of the taxonomy, stripped of its nested children.
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentEntry {
	/// Hierarchical identifier as written in the catalog.
	pub id: String,
	/// Display title.
	pub title: String,
	/// Free text description.
	pub description: String,
	/// Threat categories this component is typically exposed to.
	pub threat_categories: Vec<String>,
	/// Index of the parent entry, `None` for roots.
	pub parent: Option<usize>,
	/// Indices of the direct children, in document order.
	pub children: Vec<usize>,
	/// Distance from the root; roots have depth 0.
	pub depth: usize,
}

/// The component taxonomy as an arena with id lookups.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComponentTree {
	entries: Vec<ComponentEntry>,
	roots: Vec<usize>,
	by_id: HashMap<String, usize>,
	by_normalized: HashMap<String, usize>,
}

impl ComponentTree {
	/// Flatten nested components depth-first. When an id appears twice the
	/// first occurrence keeps the lookup entry.
	pub fn from_roots(roots: Vec<Component>) -> Self {
		let mut tree = Self::default();
		let mut stack: Vec<(Component, Option<usize>, usize)> =
			roots.into_iter().rev().map(|c| (c, None, 0)).collect();

		while let Some((component, parent, depth)) = stack.pop() {
			let idx = tree.entries.len();
			let Component {
				id,
				title,
				description,
				children,
				threat_categories,
			} = component;

			tree.by_id.entry(id.clone()).or_insert(idx);
			tree.by_normalized.entry(normalize_id(&id)).or_insert(idx);
			match parent {
				Some(p) => tree.entries[p].children.push(idx),
				None => tree.roots.push(idx),
			}
			tree.entries.push(ComponentEntry {
				id,
				title,
				description,
				threat_categories,
				parent,
				children: Vec::new(),
				depth,
			});

			for child in children.into_iter().rev() {
				stack.push((child, Some(idx), depth + 1));
			}
		}

		tree
	}

	/// Number of components, nested ones included.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the taxonomy has no components.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// All entries in depth-first document order.
	pub fn iter(&self) -> impl Iterator<Item = (usize, &ComponentEntry)> {
		self.entries.iter().enumerate()
	}

	/// Indices of the top level components.
	pub fn roots(&self) -> &[usize] {
		&self.roots
	}

	/// Entry at `idx`.
	pub fn entry(&self, idx: usize) -> Option<&ComponentEntry> {
		self.entries.get(idx)
	}

	/// Exact id lookup.
	pub fn get(&self, id: &str) -> Option<usize> {
		self.by_id.get(id).copied()
	}

	/// Exact id lookup, falling back to the normalized form.
	pub fn resolve(&self, id: &str) -> Option<usize> {
		self.get(id)
			.or_else(|| self.by_normalized.get(&normalize_id(id)).copied())
	}

	/// Parent index of `idx`.
	pub fn parent(&self, idx: usize) -> Option<usize> {
		self.entries.get(idx).and_then(|e| e.parent)
	}

	/// Direct children of `idx`.
	pub fn children(&self, idx: usize) -> &[usize] {
		self.entries
			.get(idx)
			.map(|e| e.children.as_slice())
			.unwrap_or_default()
	}

	/// Walk from the parent of `idx` up to its root.
	pub fn ancestors(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
		std::iter::successors(self.parent(idx), move |&i| self.parent(i))
	}

	/// Every component below `idx`, depth-first, excluding `idx` itself.
	pub fn descendants(&self, idx: usize) -> Vec<usize> {
		let mut out = Vec::new();
		let mut stack: Vec<usize> = self.children(idx).iter().rev().copied().collect();
		while let Some(i) = stack.pop() {
			out.push(i);
			stack.extend(self.children(i).iter().rev());
		}
		out
	}

	/// Ids from the root down to `idx`.
	pub fn path(&self, idx: usize) -> Vec<&str> {
		let mut ids: Vec<&str> = std::iter::once(idx)
			.chain(self.ancestors(idx))
			.filter_map(|i| self.entries.get(i).map(|e| e.id.as_str()))
			.collect();
		ids.reverse();
		ids
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn component(id: &str, children: Vec<Component>) -> Component {
		Component {
			id: id.into(),
			title: id.to_uppercase(),
			description: String::new(),
			children,
			threat_categories: Vec::new(),
		}
	}

	fn sample_tree() -> ComponentTree {
		ComponentTree::from_roots(vec![
			component("kc1", vec![]),
			component(
				"kc6",
				vec![
					component(
						"kc6.1",
						vec![component("kc6.1.1", vec![]), component("kc6.1.2", vec![])],
					),
					component("kc6.2", vec![]),
				],
			),
		])
	}

	#[test]
	fn normalizes_dash_notation_and_case() {
		assert_eq!(normalize_id(" KC6-1-1 "), "kc6.1.1");
		assert_eq!(normalize_id("kc6.1"), "kc6.1");
	}

	#[test]
	fn parent_id_covers_descendants_only() {
		assert!(id_covers("kc6", "kc6"));
		assert!(id_covers("kc6", "kc6.1"));
		assert!(id_covers("kc6", "kc6.1.1"));
		assert!(id_covers("kc6-1", "kc6.1"));
		assert!(id_covers("kc6.1", "kc6-1-2"));
		assert!(!id_covers("kc6", "kc61"));
		assert!(!id_covers("kc6.1", "kc6"));
		assert!(!id_covers("", "kc6"));
	}

	#[test]
	fn flattens_depth_first_with_parent_links() {
		let tree = sample_tree();
		assert_eq!(tree.len(), 6);
		let ids: Vec<&str> = tree.iter().map(|(_, e)| e.id.as_str()).collect();
		assert_eq!(ids, ["kc1", "kc6", "kc6.1", "kc6.1.1", "kc6.1.2", "kc6.2"]);

		let leaf = tree.get("kc6.1.2").unwrap();
		assert_eq!(tree.entry(leaf).unwrap().depth, 2);
		assert_eq!(tree.path(leaf), ["kc6", "kc6.1", "kc6.1.2"]);
		assert_eq!(tree.ancestors(leaf).count(), 2);
		assert_eq!(tree.roots().len(), 2);
	}

	#[test]
	fn resolves_normalized_ids() {
		let tree = sample_tree();
		assert_eq!(tree.resolve("kc6-1"), tree.get("kc6.1"));
		assert_eq!(tree.resolve("KC6.2"), tree.get("kc6.2"));
		assert_eq!(tree.resolve("kc9"), None);
	}

	#[test]
	fn descendants_cover_the_whole_subtree() {
		let tree = sample_tree();
		let root = tree.get("kc6").unwrap();
		let ids: Vec<&str> = tree
			.descendants(root)
			.into_iter()
			.map(|i| tree.entry(i).unwrap().id.as_str())
			.collect();
		assert_eq!(ids, ["kc6.1", "kc6.1.1", "kc6.1.2", "kc6.2"]);
		assert!(ids.iter().all(|id| id_covers("kc6", id)));
	}
}
