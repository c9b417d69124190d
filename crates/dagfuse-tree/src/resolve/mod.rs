//! Namespace-aware name resolution for function trees.

mod clashes;
mod parameters;

pub use clashes::{check_for_parent_child_name_clashes, find_parent_child_name_clashes};
pub use parameters::Scope;
