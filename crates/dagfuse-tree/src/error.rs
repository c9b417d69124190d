//! Errors raised by the tree adapter.

use dagfuse_foundation::{TreeError, TreePath};
use dagfuse_runtime::format_list_linewise;
use thiserror::Error;

/// Tree adapter result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating, resolving or compiling function trees.
///
/// All variants except [`Error::Runtime`] wrapping a call error are raised at
/// build time, before any function runs.
#[derive(Debug, Error)]
pub enum Error {
    /// A namespace segment ends with an underscore.
    ///
    /// Trailing underscores are reserved for leaf names, so that `a_` followed
    /// by the delimiter is never mistaken for a longer qualified name.
    #[error(
        "Except for the leaf name, elements of the paths in the functions tree \
         must not end with an underscore. Offending path(s):\n\n{}",
        format_paths(paths)
    )]
    TrailingUnderscore { paths: Vec<TreePath> },

    /// A path segment is not a valid identifier.
    #[error(
        "Elements of the paths in the functions tree must be valid identifiers. \
         Offending path(s):\n\n{}",
        format_paths(paths)
    )]
    InvalidIdentifier { paths: Vec<TreePath> },

    /// A top-level name appears again deeper in a path.
    #[error(
        "Elements of the top-level namespace must not be repeated further down \
         in the hierarchy. Offending path(s):\n\n{}\n\n\nTop-level namespace:\n\n{}",
        format_paths(paths),
        format_list_linewise(top_level_namespace)
    )]
    RepeatedTopLevelElement {
        paths: Vec<TreePath>,
        top_level_namespace: Vec<String>,
    },

    /// Entities with the same leaf name in a parent and a child namespace.
    #[error("There are name clashes: {}", format_pairs(clashes))]
    NameClash {
        /// Clashing qualified names, each pair sorted.
        clashes: Vec<(String, String)>,
    },

    /// Two parameters of one function resolve to the same qualified name.
    #[error(
        "Parameters {} of function '{function}' all resolve to '{resolved}'",
        quote_list(parameters)
    )]
    ParameterCollision {
        /// Qualified name of the function.
        function: String,
        /// The shared qualified name.
        resolved: String,
        /// The colliding parameters, in signature order.
        parameters: Vec<String>,
    },

    /// Parameters that resolve neither to a function nor to a declared input.
    #[error(
        "The following parameters could not be resolved to a function or a \
         declared input:\n{}",
        format_list_linewise(parameters)
    )]
    UnresolvedParameters { parameters: Vec<String> },

    #[error(transparent)]
    Runtime(#[from] dagfuse_runtime::Error),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

fn format_paths(paths: &[TreePath]) -> String {
    paths
        .iter()
        .map(|path| format!("{:?}", path.segments()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_pairs(pairs: &[(String, String)]) -> String {
    let body = pairs
        .iter()
        .map(|(a, b)| format!("('{a}', '{b}')"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{body}]")
}

fn quote_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("'{item}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
