//! Dependency graphs over named functions.
//!
//! Every function contributes one node named after itself, plus one node per
//! parameter. An edge `p -> f` means `f` takes `p` as an argument. Parameters
//! that are not themselves function names are free inputs: they have no
//! incoming edges and must be supplied by the caller.
//!
//! # Building graphs
//!
//! [`create_complete_dag`] covers every supplied function. [`create_dag`]
//! prunes that graph to the targets and their ancestors and rejects cycles
//! with [`Error::CyclicDependency`](crate::Error::CyclicDependency).
//!
//! # Execution order
//!
//! [`topological_levels`] groups functions into levels with no dependencies
//! inside a level. Levels are sorted by name, so the resulting order is
//! deterministic.

mod builder;
mod topology;
mod types;

#[cfg(test)]
mod tests;

pub use builder::{DagBuilder, create_complete_dag, create_dag, get_ancestors};
pub use topology::{CycleError, Level, topological_levels, topological_order};
pub use types::{Dag, NodeKind};
