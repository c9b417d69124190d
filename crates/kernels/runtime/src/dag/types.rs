//! The dependency graph.

use std::collections::VecDeque;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Role of a node in the dependency graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// The output of a supplied function.
    Function,
    /// A free input the caller must supply.
    Input,
}

/// Directed graph from arguments to the functions consuming them.
///
/// An edge `u -> v` exists iff `u` is a parameter of function `v`. Nodes keep
/// the order in which they were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dag {
    nodes: IndexMap<String, NodeKind>,
    /// Direct dependencies (parameters) of each function node.
    dependencies: IndexMap<String, IndexSet<String>>,
}

impl Dag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` as a function depending on `parameters`.
    pub(crate) fn insert_function(&mut self, name: &str, parameters: Vec<String>) {
        self.nodes.insert(name.to_string(), NodeKind::Function);
        let deps = self.dependencies.entry(name.to_string()).or_default();
        for parameter in parameters {
            deps.insert(parameter.clone());
            self.nodes.entry(parameter).or_insert(NodeKind::Input);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn kind(&self, name: &str) -> Option<NodeKind> {
        self.nodes.get(name).copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.dependencies.values().map(IndexSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node names.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Names of function nodes.
    pub fn functions(&self) -> impl Iterator<Item = &str> {
        self.nodes_of(NodeKind::Function)
    }

    /// Names of free inputs.
    pub fn inputs(&self) -> impl Iterator<Item = &str> {
        self.nodes_of(NodeKind::Input)
    }

    fn nodes_of(&self, kind: NodeKind) -> impl Iterator<Item = &str> {
        self.nodes
            .iter()
            .filter(move |(_, k)| **k == kind)
            .map(|(name, _)| name.as_str())
    }

    /// Direct predecessors of `name`.
    pub fn dependencies(&self, name: &str) -> impl Iterator<Item = &str> {
        self.dependencies
            .get(name)
            .into_iter()
            .flat_map(|deps| deps.iter().map(String::as_str))
    }

    /// Direct successors of `name`.
    pub fn dependents(&self, name: &str) -> Vec<&str> {
        self.dependencies
            .iter()
            .filter(|(_, deps)| deps.contains(name))
            .map(|(node, _)| node.as_str())
            .collect()
    }

    /// All edges as `(from, to)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.dependencies.iter().flat_map(|(node, deps)| {
            deps.iter().map(move |dep| (dep.as_str(), node.as_str()))
        })
    }

    /// Every node `name` transitively depends on, excluding `name` itself.
    pub fn ancestors(&self, name: &str) -> IndexSet<String> {
        let mut seen = IndexSet::new();
        let mut queue: VecDeque<&str> = self.dependencies(name).collect();
        while let Some(node) = queue.pop_front() {
            if node == name || !seen.insert(node.to_string()) {
                continue;
            }
            queue.extend(self.dependencies(node));
        }
        seen
    }

    /// Union of the ancestors of all `targets`, optionally with the targets.
    pub fn ancestors_of_all<S: AsRef<str>>(
        &self,
        targets: &[S],
        include_targets: bool,
    ) -> IndexSet<String> {
        let mut all = IndexSet::new();
        for target in targets {
            let target = target.as_ref();
            if include_targets && self.contains(target) {
                all.insert(target.to_string());
            }
            all.extend(self.ancestors(target));
        }
        all
    }

    /// The subgraph needed to compute `targets`.
    ///
    /// Keeps the targets and their ancestors; every other node is removed.
    pub fn prune<S: AsRef<str>>(&self, targets: &[S]) -> Dag {
        let keep = self.ancestors_of_all(targets, true);
        Dag {
            nodes: self
                .nodes
                .iter()
                .filter(|(name, _)| keep.contains(*name))
                .map(|(name, kind)| (name.clone(), *kind))
                .collect(),
            dependencies: self
                .dependencies
                .iter()
                .filter(|(name, _)| keep.contains(*name))
                .map(|(name, deps)| (name.clone(), deps.clone()))
                .collect(),
        }
    }
}
