//! Parent/child name clashes.
//!
//! Two entities clash when they share a leaf name and the namespace of one is
//! a prefix of the namespace of the other, e.g. `x` and `nested__x`. A bare
//! parameter `x` inside `nested` could then mean either.

use dagfuse_foundation::TreePath;
use indexmap::{IndexMap, IndexSet};
use tracing::warn;

use crate::error::{Error, Result};
use crate::options::NameClashPolicy;

/// Returns every clashing pair of qualified names, each pair and the list
/// sorted.
pub fn find_parent_child_name_clashes<'a, I>(paths: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = &'a TreePath>,
{
    let mut by_leaf: IndexMap<&str, IndexSet<&TreePath>> = IndexMap::new();
    for path in paths {
        if let Some(leaf) = path.last() {
            by_leaf.entry(leaf).or_default().insert(path);
        }
    }

    let mut clashes = Vec::new();
    for group in by_leaf.values() {
        let group: Vec<&TreePath> = group.iter().copied().collect();
        for (i, first) in group.iter().enumerate() {
            for second in &group[i + 1..] {
                let (ns1, ns2) = (first.namespace(), second.namespace());
                if ns1.starts_with(&ns2) || ns2.starts_with(&ns1) {
                    let (a, b) = (first.qname(), second.qname());
                    clashes.push(if a <= b { (a, b) } else { (b, a) });
                }
            }
        }
    }
    clashes.sort();
    clashes
}

/// Applies `policy` to the clashes among `paths`.
pub fn check_for_parent_child_name_clashes<'a, I>(paths: I, policy: NameClashPolicy) -> Result<()>
where
    I: IntoIterator<Item = &'a TreePath>,
{
    if policy == NameClashPolicy::Ignore {
        return Ok(());
    }

    let clashes = find_parent_child_name_clashes(paths);
    if clashes.is_empty() {
        return Ok(());
    }
    match policy {
        NameClashPolicy::Raise => Err(Error::NameClash { clashes }),
        _ => {
            warn!(clashes = ?clashes, "There are name clashes");
            Ok(())
        }
    }
}
