//! Packaging of target values.
//!
//! [`ConcatenatedFunction`] always produces the target values as a list in
//! target order. The adapters here repackage that list as a single value, a
//! tuple, a list, a mapping keyed by target, or the fold of an aggregator.
//! They never change what is computed.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::dag::Dag;
use crate::error::{Error, Result};
use crate::function::{FunctionMap, UNKNOWN_TYPE, Value};
use crate::types::Targets;

use super::annotations::{dict_annotation, list_annotation, tuple_annotation};
use super::compiler::{ConcatenatedFunction, create_concatenated_function};
use super::options::{ConcatOptions, ReturnType};
use super::signature::{CallArgs, Signature};

/// Binary function folding target values left to right.
pub type Aggregator<V> = Arc<dyn Fn(V, V) -> V + Send + Sync>;

/// Result of calling a [`CombinedFunction`].
#[derive(Debug, Clone, PartialEq)]
pub enum Output<V> {
    Single(V),
    Tuple(Vec<V>),
    List(Vec<V>),
    /// Values keyed by target name, in target order.
    Dict(IndexMap<String, V>),
}

impl<V> Output<V> {
    pub fn into_single(self) -> Option<V> {
        match self {
            Output::Single(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_dict(self) -> Option<IndexMap<String, V>> {
        match self {
            Output::Dict(values) => Some(values),
            _ => None,
        }
    }

    /// All values, whatever the container.
    pub fn into_values(self) -> Vec<V> {
        match self {
            Output::Single(value) => vec![value],
            Output::Tuple(values) | Output::List(values) => values,
            Output::Dict(values) => values.into_values().collect(),
        }
    }
}

enum OutputShape<V> {
    Single,
    Tuple,
    List,
    Dict,
    Aggregate(Aggregator<V>),
}

impl<V> fmt::Debug for OutputShape<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputShape::Single => "Single",
            OutputShape::Tuple => "Tuple",
            OutputShape::List => "List",
            OutputShape::Dict => "Dict",
            OutputShape::Aggregate(_) => "Aggregate",
        })
    }
}

/// A [`ConcatenatedFunction`] with its output repackaged.
pub struct CombinedFunction<V> {
    inner: ConcatenatedFunction<V>,
    shape: OutputShape<V>,
    signature: Signature,
}

impl<V: Value> CombinedFunction<V> {
    fn new(inner: ConcatenatedFunction<V>, shape: OutputShape<V>) -> Self {
        let mut signature = inner.signature().clone();
        if let (Some(annotations), Some(types)) = (&mut signature.annotations, inner.target_types())
        {
            annotations.returns = return_annotation(&shape, inner.targets(), types);
        }
        Self {
            inner,
            shape,
            signature,
        }
    }

    pub fn call(&self, args: impl Into<CallArgs<V>>) -> Result<Output<V>> {
        let values = self.inner.call(args)?;
        match &self.shape {
            OutputShape::Single => values
                .into_iter()
                .next()
                .map(Output::Single)
                .ok_or(Error::EmptyOutput),
            OutputShape::Tuple => Ok(Output::Tuple(values)),
            OutputShape::List => Ok(Output::List(values)),
            OutputShape::Dict => Ok(Output::Dict(
                self.inner.targets().iter().cloned().zip(values).collect(),
            )),
            OutputShape::Aggregate(aggregator) => values
                .into_iter()
                .reduce(|acc, value| aggregator(acc, value))
                .map(Output::Single)
                .ok_or(Error::EmptyOutput),
        }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn targets(&self) -> &[String] {
        self.inner.targets()
    }

    pub fn dag(&self) -> &Dag {
        self.inner.dag()
    }

    pub fn execution_order(&self) -> Vec<&str> {
        self.inner.execution_order()
    }

    pub fn inner(&self) -> &ConcatenatedFunction<V> {
        &self.inner
    }
}

impl<V> fmt::Debug for CombinedFunction<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombinedFunction")
            .field("signature", &self.signature)
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}

fn return_annotation<V>(shape: &OutputShape<V>, targets: &[String], types: &[String]) -> String {
    match shape {
        OutputShape::Single => types
            .first()
            .cloned()
            .unwrap_or_else(|| UNKNOWN_TYPE.to_string()),
        OutputShape::Tuple => tuple_annotation(types),
        OutputShape::List => list_annotation(types),
        OutputShape::Dict => dict_annotation(targets, types),
        OutputShape::Aggregate(_) => match types.split_first() {
            Some((first, rest)) if rest.iter().all(|t| t == first) => first.clone(),
            _ => UNKNOWN_TYPE.to_string(),
        },
    }
}

/// Combines `functions` into one function computing `targets`.
///
/// [`Targets::Single`] yields an [`Output::Single`]; otherwise the values are
/// packed according to [`ConcatOptions::return_type`]. Fails before anything
/// runs if a target is unknown, the functions form a cycle, or annotations
/// disagree while [`ConcatOptions::set_annotations`] is set.
///
/// ```
/// use dagfuse_runtime::{Args, ConcatOptions, FunctionMap, concatenate_functions, function};
///
/// let mut functions: FunctionMap<i64> = FunctionMap::new();
/// functions.insert("leisure".into(), function(["hours"], |a: &Args<i64>| Ok(24 - a.get("hours")?)));
///
/// let f = concatenate_functions(&functions, "leisure", &ConcatOptions::default()).unwrap();
/// let out = f.call([("hours", 8)]).unwrap();
/// assert_eq!(out.into_single(), Some(16));
/// ```
pub fn concatenate_functions<V: Value>(
    functions: &FunctionMap<V>,
    targets: impl Into<Targets>,
    options: &ConcatOptions,
) -> Result<CombinedFunction<V>> {
    let targets = targets.into();
    let inner = create_concatenated_function(
        functions,
        &targets,
        options.enforce_signature,
        options.set_annotations,
    )?;
    let shape = if targets.is_single() {
        OutputShape::Single
    } else {
        match options.return_type {
            ReturnType::Tuple => OutputShape::Tuple,
            ReturnType::List => OutputShape::List,
            ReturnType::Dict => OutputShape::Dict,
        }
    };
    debug!(shape = ?shape, "output adapter selected");
    Ok(CombinedFunction::new(inner, shape))
}

/// Like [`concatenate_functions`], but folds all target values with
/// `aggregator`.
///
/// A single target is returned as is. [`ConcatOptions::return_type`] is
/// ignored.
pub fn concatenate_functions_with_aggregator<V, A>(
    functions: &FunctionMap<V>,
    targets: impl Into<Targets>,
    aggregator: A,
    options: &ConcatOptions,
) -> Result<CombinedFunction<V>>
where
    V: Value,
    A: Fn(V, V) -> V + Send + Sync + 'static,
{
    let targets = targets.into();
    let inner = create_concatenated_function(
        functions,
        &targets,
        options.enforce_signature,
        options.set_annotations,
    )?;
    let shape = match inner.targets().len() {
        0 => return Err(Error::EmptyOutput),
        1 => OutputShape::Single,
        _ => OutputShape::Aggregate(Arc::new(aggregator)),
    };
    Ok(CombinedFunction::new(inner, shape))
}
