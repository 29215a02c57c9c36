// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::{BTreeSet, HashMap};

/// Result of ordering virtual columns by their dependencies.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct BuildOrder {
	/// Node indices, each after every node it depends on.
	pub ordered: Vec<usize>,
	/// Nodes on a cycle or depending on one.
	pub unordered: Vec<usize>,
}

/// Orders `nodes` given as `(name, dependencies)`.
///
/// Dependencies naming columns outside `nodes` impose no ordering. Among
/// nodes that are ready at the same time the lower index goes first.
pub(crate) fn build_order(nodes: &[(String, Vec<String>)]) -> BuildOrder {
	let index: HashMap<&str, usize> =
		nodes.iter().enumerate().map(|(idx, (name, _))| (name.as_str(), idx)).collect();

	let mut in_degree = vec![0usize; nodes.len()];
	let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];

	for (idx, (_, dependencies)) in nodes.iter().enumerate() {
		for dependency in dependencies {
			if let Some(&dep) = index.get(dependency.as_str()) {
				in_degree[idx] += 1;
				dependents[dep].push(idx);
			}
		}
	}

	let mut ready: BTreeSet<usize> = (0..nodes.len()).filter(|&idx| in_degree[idx] == 0).collect();
	let mut ordered = Vec::with_capacity(nodes.len());

	while let Some(idx) = ready.pop_first() {
		ordered.push(idx);
		for &dependent in &dependents[idx] {
			in_degree[dependent] -= 1;
			if in_degree[dependent] == 0 {
				ready.insert(dependent);
			}
		}
	}

	let unordered = (0..nodes.len()).filter(|&idx| in_degree[idx] > 0).collect();

	BuildOrder {
		ordered,
		unordered,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(name: &str, deps: &[&str]) -> (String, Vec<String>) {
		(name.to_string(), deps.iter().map(|d| d.to_string()).collect())
	}

	#[test]
	fn test_independent_keep_input_order() {
		let order = build_order(&[node("a", &[]), node("b", &[]), node("c", &[])]);
		assert_eq!(order.ordered, vec![0, 1, 2]);
		assert!(order.unordered.is_empty());
	}

	#[test]
	fn test_dependencies_first() {
		// c -> b -> a
		let order = build_order(&[node("c", &["b"]), node("b", &["a"]), node("a", &[])]);
		assert_eq!(order.ordered, vec![2, 1, 0]);
	}

	#[test]
	fn test_external_dependencies_ignored() {
		let order = build_order(&[node("revenue", &["price", "quantity"])]);
		assert_eq!(order.ordered, vec![0]);
	}

	#[test]
	fn test_cycle() {
		let order = build_order(&[node("a", &["b"]), node("b", &["a"]), node("c", &[]), node("d", &["a"])]);
		assert_eq!(order.ordered, vec![2]);
		assert_eq!(order.unordered, vec![0, 1, 3]);
	}

	#[test]
	fn test_self_dependency() {
		let order = build_order(&[node("a", &["a"])]);
		assert!(order.ordered.is_empty());
		assert_eq!(order.unordered, vec![0]);
	}

	#[test]
	fn test_duplicate_dependency() {
		let order = build_order(&[node("b", &["a", "a"]), node("a", &[])]);
		assert_eq!(order.ordered, vec![1, 0]);
	}
}
