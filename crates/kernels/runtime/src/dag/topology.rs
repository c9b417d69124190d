//! Topological sorting and cycle detection.

use indexmap::{IndexMap, IndexSet};

use crate::error::Error;

use super::types::Dag;

/// Error returned when the functions of a graph depend on each other in a
/// cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleError {
    /// Functions that could not be scheduled, in graph order.
    ///
    /// Contains the cycle itself plus everything downstream of it.
    pub involved_nodes: Vec<String>,
    /// One concrete cycle in data-flow order, closed (`a → b → a`).
    pub cycle: Vec<String>,
}

impl From<CycleError> for Error {
    fn from(err: CycleError) -> Self {
        Error::CyclicDependency {
            cycle: err.cycle,
            involved_nodes: err.involved_nodes,
        }
    }
}

/// A set of functions with no dependencies on each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    /// Function names, sorted.
    pub nodes: Vec<String>,
}

/// Groups the function nodes of `dag` into topological levels.
///
/// Kahn's algorithm: every function in level `n + 1` depends on at least one
/// function in level `n` and on nothing later. Free inputs are not scheduled.
pub fn topological_levels(dag: &Dag) -> Result<Vec<Level>, CycleError> {
    let mut in_degree: IndexMap<&str, usize> = IndexMap::new();
    let mut dependents: IndexMap<&str, Vec<&str>> = IndexMap::new();

    for function in dag.functions() {
        in_degree.insert(function, 0);
    }
    for function in dag.functions() {
        for dep in dag.dependencies(function) {
            if in_degree.contains_key(dep) {
                if let Some(degree) = in_degree.get_mut(function) {
                    *degree += 1;
                }
                dependents.entry(dep).or_default().push(function);
            }
        }
    }

    let mut levels = Vec::new();
    let mut current_level: Vec<&str> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(name, _)| *name)
        .collect();
    let mut processed = 0;

    while !current_level.is_empty() {
        // Sort for determinism
        current_level.sort_unstable();
        processed += current_level.len();

        let mut next_level = Vec::new();
        for node in &current_level {
            for dependent in dependents.get(node).into_iter().flatten() {
                if let Some(degree) = in_degree.get_mut(dependent) {
                    *degree -= 1;
                    if *degree == 0 {
                        next_level.push(*dependent);
                    }
                }
            }
        }

        levels.push(Level {
            nodes: current_level.iter().map(|n| n.to_string()).collect(),
        });
        current_level = next_level;
    }

    if processed != in_degree.len() {
        let remaining: IndexSet<&str> = in_degree
            .iter()
            .filter(|(_, degree)| **degree > 0)
            .map(|(name, _)| *name)
            .collect();
        return Err(CycleError {
            cycle: trace_cycle_path(dag, &remaining),
            involved_nodes: remaining.iter().map(|n| n.to_string()).collect(),
        });
    }

    Ok(levels)
}

/// Flattens [`topological_levels`] into one execution order.
pub fn topological_order(dag: &Dag) -> Result<Vec<String>, CycleError> {
    Ok(topological_levels(dag)?
        .into_iter()
        .flat_map(|level| level.nodes)
        .collect())
}

/// Finds one cycle among the unscheduled functions.
///
/// Every unscheduled function still waits on another unscheduled function,
/// so walking dependencies backwards inside `remaining` must revisit a node.
fn trace_cycle_path(dag: &Dag, remaining: &IndexSet<&str>) -> Vec<String> {
    let Some(start) = remaining.first() else {
        return Vec::new();
    };

    let mut path: Vec<&str> = vec![*start];
    let mut position: IndexMap<&str, usize> = IndexMap::from([(*start, 0)]);
    let mut current = *start;

    loop {
        let Some(next) = dag.dependencies(current).find(|dep| remaining.contains(dep)) else {
            return remaining.iter().map(|n| n.to_string()).collect();
        };
        if let Some(&pos) = position.get(next) {
            let mut cycle: Vec<String> = path[pos..].iter().map(|n| n.to_string()).collect();
            cycle.push(next.to_string());
            cycle.reverse();
            return cycle;
        }
        position.insert(next, path.len());
        path.push(next);
        current = next;
    }
}
