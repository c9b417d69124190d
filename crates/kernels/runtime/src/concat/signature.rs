//! Argument binding for compiled functions.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::function::Annotations;

/// Name reported in argument errors of compiled functions.
pub const CONCATENATED_FUNCTION_NAME: &str = "concatenated";

/// Declared inputs of a compiled function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Function name used in error messages.
    pub name: String,
    /// Free inputs, sorted; positional values bind in this order.
    pub parameters: Vec<String>,
    /// Argument and return annotations, if they were verified at build time.
    pub annotations: Option<Annotations>,
}

impl Signature {
    pub fn new(parameters: Vec<String>) -> Self {
        Self {
            name: CONCATENATED_FUNCTION_NAME.to_string(),
            parameters,
            annotations: None,
        }
    }

    /// Binds call arguments to parameter names.
    ///
    /// Positional values bind to [`parameters`](Self::parameters) in order and
    /// keyword values override them. With `enforce` set, surplus positionals,
    /// arguments given twice and unknown keywords are rejected; without it
    /// they are dropped. A parameter left without a value is always an error.
    pub fn bind<V>(&self, args: CallArgs<V>, enforce: bool) -> Result<IndexMap<String, V>> {
        let CallArgs {
            positional,
            keyword,
        } = args;

        if enforce {
            self.check_strict(positional.len(), &keyword)?;
        }

        let mut bound: IndexMap<String, V> = self
            .parameters
            .iter()
            .cloned()
            .zip(positional)
            .collect();
        for (name, value) in keyword {
            if self.parameters.contains(&name) {
                bound.insert(name, value);
            }
        }

        let missing: Vec<String> = self
            .parameters
            .iter()
            .filter(|p| !bound.contains_key(*p))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingArguments {
                function: self.name.clone(),
                arguments: missing,
            });
        }

        Ok(bound)
    }

    fn check_strict<V>(&self, n_positional: usize, keyword: &IndexMap<String, V>) -> Result<()> {
        if n_positional > self.parameters.len() {
            return Err(Error::TooManyPositionalArguments {
                function: self.name.clone(),
                expected: self.parameters.len(),
                given: n_positional,
            });
        }

        let duplicated: Vec<String> = self.parameters[..n_positional]
            .iter()
            .filter(|p| keyword.contains_key(*p))
            .cloned()
            .collect();
        if !duplicated.is_empty() {
            return Err(Error::DuplicateArguments {
                function: self.name.clone(),
                arguments: duplicated,
            });
        }

        let unexpected: Vec<String> = keyword
            .keys()
            .filter(|k| !self.parameters.contains(*k))
            .cloned()
            .collect();
        if !unexpected.is_empty() {
            return Err(Error::UnexpectedKeywordArguments {
                function: self.name.clone(),
                arguments: unexpected,
            });
        }

        Ok(())
    }
}

/// Positional and keyword values for one call of a compiled function.
#[derive(Debug, Clone, PartialEq)]
pub struct CallArgs<V> {
    pub positional: Vec<V>,
    pub keyword: IndexMap<String, V>,
}

impl<V> Default for CallArgs<V> {
    fn default() -> Self {
        Self {
            positional: Vec::new(),
            keyword: IndexMap::new(),
        }
    }
}

impl<V> CallArgs<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only positional values.
    pub fn positional(values: impl IntoIterator<Item = V>) -> Self {
        Self {
            positional: values.into_iter().collect(),
            keyword: IndexMap::new(),
        }
    }

    /// Only keyword values.
    pub fn keywords<K: Into<String>>(values: impl IntoIterator<Item = (K, V)>) -> Self {
        Self {
            positional: Vec::new(),
            keyword: values.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Appends a positional value.
    pub fn arg(mut self, value: V) -> Self {
        self.positional.push(value);
        self
    }

    /// Sets a keyword value.
    pub fn kwarg(mut self, name: impl Into<String>, value: V) -> Self {
        self.keyword.insert(name.into(), value);
        self
    }
}

impl<V> From<IndexMap<String, V>> for CallArgs<V> {
    fn from(keyword: IndexMap<String, V>) -> Self {
        Self {
            positional: Vec::new(),
            keyword,
        }
    }
}

impl<V, const N: usize> From<[(&str, V); N]> for CallArgs<V> {
    fn from(keyword: [(&str, V); N]) -> Self {
        Self::keywords(keyword)
    }
}

impl<V> From<Vec<V>> for CallArgs<V> {
    fn from(positional: Vec<V>) -> Self {
        Self::positional(positional)
    }
}
