//! Nested trees and their flat representations.
//!
//! A [`Tree`] is an ordered mapping whose values are either leaves or nested
//! trees. Functions, targets, input structures and call-time inputs all use
//! this shape. The flat graph layer instead works with maps keyed by
//! [`TreePath`] or by qualified name, so this module converts in both
//! directions:
//!
//! ```text
//! {"n1": {"f": f, "g": g}, "x": h}  <->  {"n1__f": f, "n1__g": g, "x": h}
//! ```
//!
//! Flattening is depth-first and preserves insertion order. Empty branches
//! carry no leaves and therefore vanish when flattened.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::TreeError;
use crate::path::TreePath;

/// An ordered nested mapping from segment names to leaves or sub-trees.
pub type Tree<T> = IndexMap<String, TreeNode<T>>;

/// One position in a [`Tree`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode<T> {
    /// A nested namespace.
    Branch(Tree<T>),
    /// A value at the end of a path.
    Leaf(T),
}

impl<T> TreeNode<T> {
    /// Returns the leaf value, if this node is a leaf.
    pub fn as_leaf(&self) -> Option<&T> {
        match self {
            TreeNode::Leaf(value) => Some(value),
            TreeNode::Branch(_) => None,
        }
    }

    /// Returns the sub-tree, if this node is a branch.
    pub fn as_branch(&self) -> Option<&Tree<T>> {
        match self {
            TreeNode::Branch(tree) => Some(tree),
            TreeNode::Leaf(_) => None,
        }
    }
}

/// Builds a [`Tree`] literal.
///
/// Keys are string literals; a braced value opens a nested branch, any other
/// single token tree is a leaf expression (wrap longer expressions in
/// parentheses).
///
/// ```
/// use dagfuse_foundation::{Tree, tree};
///
/// let inputs: Tree<i64> = tree! {
///     "a" => 1,
///     "n1" => { "b" => 2, "c" => (3 * 4) },
/// };
/// assert_eq!(inputs.len(), 2);
/// ```
#[macro_export]
macro_rules! tree {
    (@node { $($inner:tt)* }) => {
        $crate::TreeNode::Branch($crate::tree!($($inner)*))
    };
    (@node $leaf:expr) => {
        $crate::TreeNode::Leaf($leaf)
    };
    ($($key:literal => $value:tt),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = $crate::Tree::new();
        $(
            map.insert(::std::string::String::from($key), $crate::tree!(@node $value));
        )*
        map
    }};
}

/// Flattens a tree to a map keyed by tree paths.
pub fn flatten_to_tree_paths<T: Clone>(tree: &Tree<T>) -> IndexMap<TreePath, T> {
    let mut flat = IndexMap::new();
    collect_leaves(tree, &TreePath::root(), &mut flat);
    flat
}

fn collect_leaves<T: Clone>(tree: &Tree<T>, prefix: &TreePath, out: &mut IndexMap<TreePath, T>) {
    for (key, node) in tree {
        let path = prefix.append(key.as_str());
        match node {
            TreeNode::Leaf(value) => {
                out.insert(path, value.clone());
            }
            TreeNode::Branch(sub) => collect_leaves(sub, &path, out),
        }
    }
}

/// Flattens a tree to a map keyed by qualified names.
pub fn flatten_to_qnames<T: Clone>(tree: &Tree<T>) -> IndexMap<String, T> {
    flatten_to_tree_paths(tree)
        .into_iter()
        .map(|(path, value)| (path.qname(), value))
        .collect()
}

/// Consumes a tree and flattens it to a map keyed by tree paths.
pub fn into_tree_paths<T>(tree: Tree<T>) -> IndexMap<TreePath, T> {
    let mut flat = IndexMap::new();
    move_leaves(tree, &TreePath::root(), &mut flat);
    flat
}

fn move_leaves<T>(tree: Tree<T>, prefix: &TreePath, out: &mut IndexMap<TreePath, T>) {
    for (key, node) in tree {
        let path = prefix.append(key);
        match node {
            TreeNode::Leaf(value) => {
                out.insert(path, value);
            }
            TreeNode::Branch(sub) => move_leaves(sub, &path, out),
        }
    }
}

/// Returns the paths of all leaves, depth first.
pub fn tree_paths<T>(tree: &Tree<T>) -> Vec<TreePath> {
    let mut paths = Vec::new();
    collect_paths(tree, &TreePath::root(), &mut paths);
    paths
}

fn collect_paths<T>(tree: &Tree<T>, prefix: &TreePath, out: &mut Vec<TreePath>) {
    for (key, node) in tree {
        let path = prefix.append(key.as_str());
        match node {
            TreeNode::Leaf(_) => out.push(path),
            TreeNode::Branch(sub) => collect_paths(sub, &path, out),
        }
    }
}

/// Returns the qualified names of all leaves, depth first.
pub fn qnames<T>(tree: &Tree<T>) -> Vec<String> {
    tree_paths(tree).iter().map(TreePath::qname).collect()
}

/// Rebuilds a tree from entries keyed by tree paths.
///
/// Fails with [`TreeError::PathCollision`] if two entries land on the same
/// position or one path is a prefix of another.
pub fn unflatten_from_tree_paths<T, I>(flat: I) -> Result<Tree<T>, TreeError>
where
    I: IntoIterator<Item = (TreePath, T)>,
{
    let mut tree = Tree::new();
    for (path, value) in flat {
        insert_at(&mut tree, &path, value)?;
    }
    Ok(tree)
}

/// Rebuilds a tree from entries keyed by qualified names.
pub fn unflatten_from_qnames<T, I>(flat: I) -> Result<Tree<T>, TreeError>
where
    I: IntoIterator<Item = (String, T)>,
{
    unflatten_from_tree_paths(
        flat.into_iter()
            .map(|(qname, value)| (TreePath::from_qname(&qname), value)),
    )
}

fn insert_at<T>(tree: &mut Tree<T>, path: &TreePath, value: T) -> Result<(), TreeError> {
    let Some((leaf, namespace)) = path.segments.split_last() else {
        return Err(TreeError::EmptyPath);
    };

    let mut current = tree;
    for (depth, segment) in namespace.iter().enumerate() {
        let node = current
            .entry(segment.clone())
            .or_insert_with(|| TreeNode::Branch(Tree::new()));
        current = match node {
            TreeNode::Branch(sub) => sub,
            TreeNode::Leaf(_) => {
                return Err(TreeError::PathCollision {
                    path: path.clone(),
                    existing: TreePath::new(path.segments[..=depth].to_vec()),
                });
            }
        };
    }

    if current.contains_key(leaf) {
        return Err(TreeError::PathCollision {
            path: path.clone(),
            existing: path.clone(),
        });
    }
    current.insert(leaf.clone(), TreeNode::Leaf(value));
    Ok(())
}

/// Looks up the node at `path`.
pub fn get_node<'a, T>(tree: &'a Tree<T>, path: &TreePath) -> Option<&'a TreeNode<T>> {
    let (first, rest) = path.segments.split_first()?;
    let mut node = tree.get(first)?;
    for segment in rest {
        node = node.as_branch()?.get(segment)?;
    }
    Some(node)
}

/// Looks up the leaf value at `path`.
pub fn get_leaf<'a, T>(tree: &'a Tree<T>, path: &TreePath) -> Option<&'a T> {
    get_node(tree, path)?.as_leaf()
}

/// Replaces every leaf with the result of `f`, keeping the shape.
pub fn map_leaves<T, U>(tree: &Tree<T>, f: &mut impl FnMut(&T) -> U) -> Tree<U> {
    tree.iter()
        .map(|(key, node)| {
            let mapped = match node {
                TreeNode::Leaf(value) => TreeNode::Leaf(f(value)),
                TreeNode::Branch(sub) => TreeNode::Branch(map_leaves(sub, f)),
            };
            (key.clone(), mapped)
        })
        .collect()
}
