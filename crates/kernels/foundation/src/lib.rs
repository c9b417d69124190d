//! dagfuse Foundation
//!
//! The name and path algebra shared by every dagfuse crate: hierarchical
//! [`TreePath`]s, their flat qualified-name encoding, identifier predicates
//! and the conversion of nested [`Tree`]s to and from flat maps.

pub mod error;
pub mod ident;
pub mod path;
pub mod tree;

pub use error::TreeError;
pub use ident::{is_identifier, is_qualified_name};
pub use path::{QNAME_DELIMITER, TreePath, qname_from_tree_path, tree_path_from_qname};
pub use tree::{
    Tree, TreeNode, flatten_to_qnames, flatten_to_tree_paths, get_leaf, get_node, into_tree_paths,
    map_leaves, qnames, tree_paths, unflatten_from_qnames, unflatten_from_tree_paths,
};
