//! Options for the tree adapter.

use std::fmt;
use std::str::FromStr;

use dagfuse_runtime::Error as RuntimeError;
use serde::{Deserialize, Serialize};

/// What to do when entities in a parent and a child namespace share a leaf
/// name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameClashPolicy {
    /// Fail, listing every clashing pair.
    #[default]
    Raise,
    /// Log a warning and let the closest namespace win.
    Warn,
    /// Let the closest namespace win silently.
    Ignore,
}

impl FromStr for NameClashPolicy {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raise" => Ok(NameClashPolicy::Raise),
            "warn" => Ok(NameClashPolicy::Warn),
            "ignore" => Ok(NameClashPolicy::Ignore),
            other => Err(RuntimeError::InvalidOption {
                option: "name_clashes",
                value: other.to_string(),
                expected: "raise, warn, ignore",
            }),
        }
    }
}

impl fmt::Display for NameClashPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NameClashPolicy::Raise => "raise",
            NameClashPolicy::Warn => "warn",
            NameClashPolicy::Ignore => "ignore",
        })
    }
}

/// Where an unqualified parameter that names no function is expected as an
/// input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputNamespace {
    /// In the namespace of the function declaring the parameter.
    #[default]
    #[serde(alias = "namespace")]
    Local,
    /// At the top level.
    #[serde(alias = "top")]
    Global,
}

impl FromStr for InputNamespace {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" | "namespace" => Ok(InputNamespace::Local),
            "global" | "top" => Ok(InputNamespace::Global),
            other => Err(RuntimeError::InvalidOption {
                option: "namespace_of_inputs",
                value: other.to_string(),
                expected: "local, namespace, global, top",
            }),
        }
    }
}

impl fmt::Display for InputNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputNamespace::Local => "local",
            InputNamespace::Global => "global",
        })
    }
}

/// Options for [`concatenate_functions_tree`](crate::concatenate_functions_tree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeOptions {
    pub name_clashes: NameClashPolicy,
    pub enforce_signature: bool,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            name_clashes: NameClashPolicy::Raise,
            enforce_signature: true,
        }
    }
}

impl TreeOptions {
    pub fn with_name_clashes(mut self, name_clashes: NameClashPolicy) -> Self {
        self.name_clashes = name_clashes;
        self
    }

    pub fn with_enforce_signature(mut self, enforce_signature: bool) -> Self {
        self.enforce_signature = enforce_signature;
        self
    }
}
