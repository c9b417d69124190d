//! Build options for [`concatenate_functions`](crate::concatenate_functions).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Container the target values are returned in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnType {
    #[default]
    Tuple,
    List,
    Dict,
}

impl FromStr for ReturnType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tuple" => Ok(ReturnType::Tuple),
            "list" => Ok(ReturnType::List),
            "dict" => Ok(ReturnType::Dict),
            other => Err(Error::InvalidOption {
                option: "return_type",
                value: other.to_string(),
                expected: "tuple, list, dict",
            }),
        }
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReturnType::Tuple => "tuple",
            ReturnType::List => "list",
            ReturnType::Dict => "dict",
        })
    }
}

/// Options for compiling a function map.
///
/// Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcatOptions {
    /// Output container for several targets.
    pub return_type: ReturnType,
    /// Reject surplus, duplicated and unknown arguments at call time.
    pub enforce_signature: bool,
    /// Verify annotations and attach them to the compiled signature.
    pub set_annotations: bool,
}

impl Default for ConcatOptions {
    fn default() -> Self {
        Self {
            return_type: ReturnType::Tuple,
            enforce_signature: true,
            set_annotations: false,
        }
    }
}

impl ConcatOptions {
    pub fn with_return_type(mut self, return_type: ReturnType) -> Self {
        self.return_type = return_type;
        self
    }

    pub fn with_enforce_signature(mut self, enforce_signature: bool) -> Self {
        self.enforce_signature = enforce_signature;
        self
    }

    pub fn with_set_annotations(mut self, set_annotations: bool) -> Self {
        self.set_annotations = set_annotations;
        self
    }
}
