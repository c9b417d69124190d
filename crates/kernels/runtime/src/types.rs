//! Target selection.

use serde::{Deserialize, Serialize};

/// Which function outputs a compiled function returns.
///
/// Deserializes from `null` (all functions), a string (one target) or a list
/// of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Targets {
    /// Every function, in insertion order.
    #[default]
    All,
    /// A single target; the compiled function returns its value unwrapped.
    Single(String),
    /// Several targets, returned in this order.
    Many(Vec<String>),
}

impl Targets {
    /// Returns `true` for [`Targets::Single`].
    pub fn is_single(&self) -> bool {
        matches!(self, Targets::Single(_))
    }

    /// Resolves the target list against the available function names.
    pub fn resolve<'a, I>(&self, function_names: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        match self {
            Targets::All => function_names.into_iter().cloned().collect(),
            Targets::Single(name) => vec![name.clone()],
            Targets::Many(names) => names.clone(),
        }
    }
}

impl From<&str> for Targets {
    fn from(name: &str) -> Self {
        Targets::Single(name.to_string())
    }
}

impl From<String> for Targets {
    fn from(name: String) -> Self {
        Targets::Single(name)
    }
}

impl From<Vec<String>> for Targets {
    fn from(names: Vec<String>) -> Self {
        Targets::Many(names)
    }
}

impl From<Vec<&str>> for Targets {
    fn from(names: Vec<&str>) -> Self {
        Targets::Many(names.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Targets {
    fn from(names: [&str; N]) -> Self {
        Targets::Many(names.iter().map(|s| s.to_string()).collect())
    }
}

impl From<Option<Vec<String>>> for Targets {
    fn from(names: Option<Vec<String>>) -> Self {
        names.map_or(Targets::All, Targets::Many)
    }
}
