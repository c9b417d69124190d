//! Building dependency graphs from function maps.

use indexmap::IndexSet;
use tracing::debug;

use crate::error::{Error, Result};
use crate::function::FunctionMap;
use crate::types::Targets;

use super::topology::{CycleError, topological_levels};
use super::types::Dag;

/// Incremental builder for a [`Dag`].
#[derive(Debug, Default)]
pub struct DagBuilder {
    dag: Dag,
}

impl DagBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a function node with an edge from each parameter.
    ///
    /// A name first seen as a parameter becomes a function node once a
    /// function of that name is added.
    pub fn add_function<I, S>(&mut self, name: &str, parameters: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dag
            .insert_function(name, parameters.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the graph without checking for cycles.
    pub fn build(self) -> Dag {
        self.dag
    }

    /// Returns the graph if its functions are acyclic.
    pub fn build_acyclic(self) -> std::result::Result<Dag, CycleError> {
        topological_levels(&self.dag)?;
        Ok(self.dag)
    }
}

/// Builds the unpruned graph over all `functions`.
pub fn create_complete_dag<V>(functions: &FunctionMap<V>) -> Dag {
    let mut builder = DagBuilder::new();
    for (name, function) in functions {
        builder.add_function(name, function.parameters());
    }
    builder.build()
}

/// Builds the graph needed to compute `targets`.
///
/// Fails if a target names no function or if the retained functions depend on
/// each other in a cycle.
pub fn create_dag<V>(functions: &FunctionMap<V>, targets: &Targets) -> Result<Dag> {
    let targets = targets.resolve(functions.keys());
    fail_if_targets_are_missing(functions, &targets)?;

    let complete = create_complete_dag(functions);
    let dag = complete.prune(&targets);
    debug!(
        functions = functions.len(),
        targets = ?targets,
        nodes = dag.node_count(),
        edges = dag.edge_count(),
        pruned = complete.node_count() - dag.node_count(),
        "dag created"
    );

    topological_levels(&dag)?;
    Ok(dag)
}

/// Returns every node the targets transitively depend on.
pub fn get_ancestors<V>(
    functions: &FunctionMap<V>,
    targets: &Targets,
    include_targets: bool,
) -> Result<IndexSet<String>> {
    let dag = create_dag(functions, targets)?;
    Ok(dag.ancestors_of_all(&targets.resolve(functions.keys()), include_targets))
}

fn fail_if_targets_are_missing<V>(functions: &FunctionMap<V>, targets: &[String]) -> Result<()> {
    let missing: Vec<String> = targets
        .iter()
        .filter(|target| !functions.contains_key(*target))
        .cloned()
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::MissingFunctions { targets: missing })
    }
}
