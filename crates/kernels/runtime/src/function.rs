//! Function entities.
//!
//! A function taking part in a graph must tell the graph builder which
//! arguments it needs. [`Callable`] makes this explicit: every function carries
//! an ordered list of parameter names, optional type annotations, and a body
//! that receives its arguments by name.
//!
//! The graph never mutates a registered function. Partial application and
//! parameter renaming are separate adapter values, [`Bound`] and [`Renamed`],
//! wrapping the original.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{BoxError, Error, Result};

/// Placeholder for a parameter or return value without an annotation.
pub const UNKNOWN_TYPE: &str = "unknown_type";

/// Marker for types that can flow through a graph.
pub trait Value: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Value for T {}

/// A named unit of computation with introspectable parameters.
pub trait Callable<V>: Send + Sync {
    /// Ordered names of the arguments this function needs.
    fn parameters(&self) -> Vec<String>;

    /// Type annotations of parameters and return value.
    fn annotations(&self) -> Annotations {
        Annotations::unknown(self.parameters())
    }

    /// Invokes the body with arguments keyed by parameter name.
    fn call(&self, args: Args<V>) -> std::result::Result<V, BoxError>;
}

/// A shared, type-erased function.
pub type SharedFn<V> = Arc<dyn Callable<V>>;

/// Functions keyed by their name, in insertion order.
pub type FunctionMap<V> = IndexMap<String, SharedFn<V>>;

/// Type annotations of a function, as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotations {
    /// Annotation of every parameter, in parameter order.
    pub parameters: IndexMap<String, String>,
    /// Annotation of the return value.
    pub returns: String,
}

impl Annotations {
    /// Annotations where everything is [`UNKNOWN_TYPE`].
    pub fn unknown<I, S>(parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parameters: parameters
                .into_iter()
                .map(|p| (p.into(), UNKNOWN_TYPE.to_string()))
                .collect(),
            returns: UNKNOWN_TYPE.to_string(),
        }
    }

    /// Annotation of `parameter`, or [`UNKNOWN_TYPE`].
    pub fn parameter(&self, parameter: &str) -> &str {
        self.parameters
            .get(parameter)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_TYPE)
    }
}

/// Keyword arguments handed to a function body.
#[derive(Debug, Clone, PartialEq)]
pub struct Args<V> {
    values: IndexMap<String, V>,
}

impl<V> Args<V> {
    pub fn new(values: IndexMap<String, V>) -> Self {
        Self { values }
    }

    /// Returns the argument `name`, or [`Error::MissingArgument`].
    pub fn get(&self, name: &str) -> Result<&V> {
        self.values.get(name).ok_or_else(|| Error::MissingArgument {
            name: name.to_string(),
        })
    }

    pub fn try_get(&self, name: &str) -> Option<&V> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_inner(self) -> IndexMap<String, V> {
        self.values
    }
}

impl<V> FromIterator<(String, V)> for Args<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A [`Callable`] built from a parameter list and a closure.
///
/// ```
/// use dagfuse_runtime::{Callable, FnCallable};
///
/// let leisure = FnCallable::<i64, _>::new(["hours"], |args| Ok(24 - *args.get("hours")?));
/// assert_eq!(leisure.parameters(), vec!["hours"]);
/// ```
pub struct FnCallable<V, F> {
    parameters: Vec<String>,
    annotations: Option<Annotations>,
    body: F,
    _marker: PhantomData<fn() -> V>,
}

impl<V, F> FnCallable<V, F>
where
    V: Value,
    F: Fn(&Args<V>) -> std::result::Result<V, BoxError> + Send + Sync + 'static,
{
    pub fn new<I, S>(parameters: I, body: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parameters: parameters.into_iter().map(Into::into).collect(),
            annotations: None,
            body,
            _marker: PhantomData,
        }
    }

    /// Attaches type annotations.
    ///
    /// Parameters missing from `parameters` are annotated with
    /// [`UNKNOWN_TYPE`]; names that are not parameters are ignored.
    pub fn with_annotations(mut self, parameters: &[(&str, &str)], returns: &str) -> Self {
        let mut annotations = Annotations::unknown(self.parameters.iter().cloned());
        for (name, annotation) in parameters {
            if let Some(slot) = annotations.parameters.get_mut(*name) {
                *slot = annotation.to_string();
            }
        }
        annotations.returns = returns.to_string();
        self.annotations = Some(annotations);
        self
    }

    /// Erases the closure type.
    pub fn shared(self) -> SharedFn<V> {
        Arc::new(self)
    }
}

impl<V, F> Callable<V> for FnCallable<V, F>
where
    V: Value,
    F: Fn(&Args<V>) -> std::result::Result<V, BoxError> + Send + Sync + 'static,
{
    fn parameters(&self) -> Vec<String> {
        self.parameters.clone()
    }

    fn annotations(&self) -> Annotations {
        match &self.annotations {
            Some(annotations) => annotations.clone(),
            None => Annotations::unknown(self.parameters.iter().cloned()),
        }
    }

    fn call(&self, args: Args<V>) -> std::result::Result<V, BoxError> {
        (self.body)(&args)
    }
}

impl<V, F> fmt::Debug for FnCallable<V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCallable")
            .field("parameters", &self.parameters)
            .field("annotations", &self.annotations)
            .finish_non_exhaustive()
    }
}

/// Shorthand for `FnCallable::new(parameters, body).shared()`.
pub fn function<V, F, I, S>(parameters: I, body: F) -> SharedFn<V>
where
    V: Value,
    F: Fn(&Args<V>) -> std::result::Result<V, BoxError> + Send + Sync + 'static,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    FnCallable::new(parameters, body).shared()
}

/// Partial application: some arguments are fixed up front.
///
/// The bound names disappear from [`Callable::parameters`], so the graph
/// builder never asks for them.
pub struct Bound<V> {
    inner: SharedFn<V>,
    bound: IndexMap<String, V>,
}

impl<V: Value> Bound<V> {
    pub fn new(inner: SharedFn<V>, bound: IndexMap<String, V>) -> Self {
        Self { inner, bound }
    }
}

impl<V: Value> Callable<V> for Bound<V> {
    fn parameters(&self) -> Vec<String> {
        self.inner
            .parameters()
            .into_iter()
            .filter(|p| !self.bound.contains_key(p))
            .collect()
    }

    fn annotations(&self) -> Annotations {
        let mut annotations = self.inner.annotations();
        annotations.parameters.retain(|p, _| !self.bound.contains_key(p));
        annotations
    }

    fn call(&self, args: Args<V>) -> std::result::Result<V, BoxError> {
        let mut merged = self.bound.clone();
        merged.extend(args.into_inner());
        self.inner.call(Args::new(merged))
    }
}

/// Binds `bound` to `inner` and erases the result.
pub fn partial<V: Value>(inner: SharedFn<V>, bound: IndexMap<String, V>) -> SharedFn<V> {
    Arc::new(Bound::new(inner, bound))
}

/// Exposes a function under different parameter names.
///
/// `mapper` maps inner parameter names to exposed names. At call time the
/// exposed names are translated back; parameters absent from `mapper` keep
/// their name.
pub struct Renamed<V> {
    inner: SharedFn<V>,
    mapper: IndexMap<String, String>,
    reverse: IndexMap<String, String>,
}

impl<V: Value> Renamed<V> {
    pub fn new(inner: SharedFn<V>, mapper: IndexMap<String, String>) -> Self {
        let reverse = mapper
            .iter()
            .map(|(old, new)| (new.clone(), old.clone()))
            .collect();
        Self {
            inner,
            mapper,
            reverse,
        }
    }

    fn exposed(&self, name: String) -> String {
        self.mapper.get(&name).cloned().unwrap_or(name)
    }
}

impl<V: Value> Callable<V> for Renamed<V> {
    fn parameters(&self) -> Vec<String> {
        self.inner
            .parameters()
            .into_iter()
            .map(|p| self.exposed(p))
            .collect()
    }

    fn annotations(&self) -> Annotations {
        let inner = self.inner.annotations();
        Annotations {
            parameters: inner
                .parameters
                .into_iter()
                .map(|(p, annotation)| (self.exposed(p), annotation))
                .collect(),
            returns: inner.returns,
        }
    }

    fn call(&self, args: Args<V>) -> std::result::Result<V, BoxError> {
        let translated = args
            .into_inner()
            .into_iter()
            .filter_map(|(name, value)| match self.reverse.get(&name) {
                Some(original) => Some((original.clone(), value)),
                // A renamed-away inner name is not reachable under its old key.
                None if self.mapper.contains_key(&name) => None,
                None => Some((name, value)),
            })
            .collect();
        self.inner.call(translated)
    }
}

/// Renames the parameters of `inner` and erases the result.
pub fn rename_arguments<V: Value>(
    inner: SharedFn<V>,
    mapper: IndexMap<String, String>,
) -> SharedFn<V> {
    Arc::new(Renamed::new(inner, mapper))
}
