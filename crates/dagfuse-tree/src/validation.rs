//! Structural checks on tree paths.
//!
//! These run before any graph is built, so an invalid tree fails without
//! executing anything.

use dagfuse_foundation::{TreePath, is_identifier};
use indexmap::IndexSet;

use crate::error::{Error, Result};

/// Fails if a segment other than the leaf ends with an underscore.
pub fn fail_if_path_elements_have_trailing_underscores<'a, I>(paths: I) -> Result<()>
where
    I: IntoIterator<Item = &'a TreePath>,
{
    let offending = collect_unique(paths, |path| {
        path.namespace()
            .segments()
            .iter()
            .any(|segment| segment.ends_with('_'))
    });
    if offending.is_empty() {
        Ok(())
    } else {
        Err(Error::TrailingUnderscore { paths: offending })
    }
}

/// Fails if a segment is not a valid identifier.
pub fn fail_if_paths_have_invalid_identifiers<'a, I>(paths: I) -> Result<()>
where
    I: IntoIterator<Item = &'a TreePath>,
{
    let offending = collect_unique(paths, |path| {
        path.segments().iter().any(|segment| !is_identifier(segment))
    });
    if offending.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier { paths: offending })
    }
}

/// Fails if a top-level name appears again below the top level of a path.
pub fn fail_if_top_level_elements_repeated_in_paths<'a, I>(
    top_level_namespace: &IndexSet<String>,
    paths: I,
) -> Result<()>
where
    I: IntoIterator<Item = &'a TreePath>,
{
    let offending = collect_unique(paths, |path| repeats_top_level(top_level_namespace, path));
    if offending.is_empty() {
        Ok(())
    } else {
        Err(Error::RepeatedTopLevelElement {
            paths: offending,
            top_level_namespace: top_level_namespace.iter().cloned().collect(),
        })
    }
}

/// Single-path version of [`fail_if_top_level_elements_repeated_in_paths`].
pub fn fail_if_top_level_elements_repeated_in_single_path(
    top_level_namespace: &IndexSet<String>,
    path: &TreePath,
) -> Result<()> {
    fail_if_top_level_elements_repeated_in_paths(top_level_namespace, [path])
}

/// Runs the segment checks every tree entry point needs.
pub fn fail_if_paths_are_invalid<'a, I>(paths: I) -> Result<()>
where
    I: IntoIterator<Item = &'a TreePath>,
{
    let paths: Vec<&TreePath> = paths.into_iter().collect();
    fail_if_paths_have_invalid_identifiers(paths.iter().copied())?;
    fail_if_path_elements_have_trailing_underscores(paths.iter().copied())
}

fn repeats_top_level(top_level_namespace: &IndexSet<String>, path: &TreePath) -> bool {
    path.segments()
        .iter()
        .skip(1)
        .any(|segment| top_level_namespace.contains(segment))
}

fn collect_unique<'a, I, F>(paths: I, is_offending: F) -> Vec<TreePath>
where
    I: IntoIterator<Item = &'a TreePath>,
    F: Fn(&TreePath) -> bool,
{
    let unique: IndexSet<&TreePath> = paths.into_iter().filter(|p| is_offending(*p)).collect();
    unique.into_iter().cloned().collect()
}
