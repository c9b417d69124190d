//! Tree paths and qualified names.
//!
//! An entity nested inside a function or input tree is located by a
//! [`TreePath`], an ordered sequence of segments such as `("pensions", "rate")`.
//! The flat graph layer cannot work with tuples, so every path also has a
//! string form, the *qualified name*, obtained by joining the segments with
//! [`QNAME_DELIMITER`] (e.g. `"pensions__rate"`).
//!
//! Both conversions are total: `TreePath::from_qname(&p.qname()) == p` holds
//! for every path whose segments do not themselves contain the delimiter.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Delimiter between the segments of a qualified name.
pub const QNAME_DELIMITER: &str = "__";

/// Hierarchical location of a function or input inside a nested tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TreePath {
    /// Ordered segments of the path, outermost namespace first.
    pub segments: Vec<String>,
}

impl TreePath {
    /// Creates a new path from a list of segments.
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// The empty path, i.e. the top-level namespace.
    pub fn root() -> Self {
        Self::default()
    }

    /// Splits a qualified name into its segments.
    pub fn from_qname(qname: &str) -> Self {
        Self {
            segments: qname.split(QNAME_DELIMITER).map(String::from).collect(),
        }
    }

    /// Joins the segments into a qualified name.
    pub fn qname(&self) -> String {
        self.segments.join(QNAME_DELIMITER)
    }

    /// Get the path segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Get the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Get the first segment (top-level namespace element).
    pub fn first(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    /// Get the last segment (leaf name).
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Append a segment to create a new path.
    pub fn append(&self, segment: impl Into<String>) -> Self {
        let mut new_segments = self.segments.clone();
        new_segments.push(segment.into());
        Self::new(new_segments)
    }

    /// Concatenate two paths.
    pub fn join(&self, other: &TreePath) -> Self {
        let mut new_segments = self.segments.clone();
        new_segments.extend(other.segments.iter().cloned());
        Self::new(new_segments)
    }

    /// The namespace containing this entity: every segment but the last.
    ///
    /// Top-level entities live in the empty (root) namespace.
    pub fn namespace(&self) -> Self {
        match self.segments.split_last() {
            Some((_, init)) => Self::new(init.to_vec()),
            None => Self::root(),
        }
    }

    /// Check if this path starts with another path.
    pub fn starts_with(&self, prefix: &TreePath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qname())
    }
}

impl From<&str> for TreePath {
    fn from(s: &str) -> Self {
        Self::from_qname(s)
    }
}

impl From<String> for TreePath {
    fn from(s: String) -> Self {
        Self::from_qname(&s)
    }
}

impl From<Vec<String>> for TreePath {
    fn from(segments: Vec<String>) -> Self {
        Self::new(segments)
    }
}

impl From<&[&str]> for TreePath {
    fn from(segments: &[&str]) -> Self {
        Self::new(segments.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for TreePath {
    fn from(segments: [&str; N]) -> Self {
        Self::new(segments.iter().map(|s| s.to_string()).collect())
    }
}

impl PartialEq<&str> for TreePath {
    fn eq(&self, other: &&str) -> bool {
        self.qname() == *other
    }
}

/// Joins path segments into a qualified name.
pub fn qname_from_tree_path<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(QNAME_DELIMITER)
}

/// Splits a qualified name into a tree path.
pub fn tree_path_from_qname(qname: &str) -> TreePath {
    TreePath::from_qname(qname)
}
