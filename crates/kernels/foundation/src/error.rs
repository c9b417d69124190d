//! Errors raised by the path algebra.

use thiserror::Error;

use crate::path::TreePath;

/// Errors that can occur while rebuilding a nested tree from flat entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Two flat entries map onto the same position, or one entry's path is a
    /// strict prefix of another's so that a leaf would also have to be a
    /// namespace.
    ///
    /// This is the operational meaning of a clash between a namespace and a
    /// same-named leaf.
    #[error("path '{path}' collides with existing entry '{existing}'")]
    PathCollision {
        /// The path that could not be inserted.
        path: TreePath,
        /// The already-present entry it collides with.
        existing: TreePath,
    },

    /// An entry was given an empty path.
    #[error("cannot place a value at the empty path")]
    EmptyPath,
}
