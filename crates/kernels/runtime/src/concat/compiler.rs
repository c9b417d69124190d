//! Compiling a function map into one function.

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::dag::{Dag, create_dag, topological_order};
use crate::error::{Error, Result};
use crate::function::{Args, FunctionMap, SharedFn, Value};
use crate::types::Targets;

use super::annotations::{TypeInfo, verify_annotations};
use super::signature::{CallArgs, Signature};

/// One function call in the fixed execution order.
pub(crate) struct ExecutionStep<V> {
    pub(crate) name: String,
    pub(crate) function: SharedFn<V>,
    pub(crate) parameters: Vec<String>,
}

/// Functions compiled into a single callable returning the target values.
///
/// The execution order is fixed at build time. Each call seeds a fresh map
/// of results with the bound arguments, runs every retained function once
/// and returns the target values in target order.
pub struct ConcatenatedFunction<V> {
    signature: Signature,
    steps: Vec<ExecutionStep<V>>,
    targets: Vec<String>,
    types: Option<TypeInfo>,
    enforce_signature: bool,
    dag: Dag,
}

impl<V: Value> ConcatenatedFunction<V> {
    /// Runs the pipeline and returns the target values in target order.
    pub fn call(&self, args: impl Into<CallArgs<V>>) -> Result<Vec<V>> {
        let mut results = self.signature.bind(args.into(), self.enforce_signature)?;

        for step in &self.steps {
            let kwargs = step
                .parameters
                .iter()
                .map(|p| lookup(&results, p).map(|value| (p.clone(), value)))
                .collect::<Result<IndexMap<_, _>>>()?;

            trace!(function = %step.name, "executing function");
            let value = step
                .function
                .call(Args::new(kwargs))
                .map_err(|source| Error::Function {
                    name: step.name.clone(),
                    source,
                })?;
            results.insert(step.name.clone(), value);
        }

        self.targets.iter().map(|t| lookup(&results, t)).collect()
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    /// Function names in the order they run.
    pub fn execution_order(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name.as_str()).collect()
    }

    /// The pruned graph this function was compiled from.
    pub fn dag(&self) -> &Dag {
        &self.dag
    }

    /// Annotations of the targets, in target order, if annotations were
    /// verified at build time.
    pub fn target_types(&self) -> Option<&[String]> {
        self.types.as_ref().map(|t| t.targets.as_slice())
    }
}

fn lookup<V: Clone>(results: &IndexMap<String, V>, name: &str) -> Result<V> {
    results.get(name).cloned().ok_or_else(|| Error::MissingArgument {
        name: name.to_string(),
    })
}

/// Free inputs of the compiled function: pruned graph nodes that are not
/// function names, sorted.
pub fn create_arguments_of_concatenated_function<V>(
    functions: &FunctionMap<V>,
    dag: &Dag,
) -> Vec<String> {
    let mut arguments: Vec<String> = dag
        .nodes()
        .filter(|node| !functions.contains_key(*node))
        .map(String::from)
        .collect();
    arguments.sort();
    arguments
}

/// Compiles `functions` into a function returning the `targets` as a list.
///
/// With `set_annotations`, parameter and return annotations are checked for
/// consistency along the execution order and attached to the signature.
pub fn create_concatenated_function<V: Value>(
    functions: &FunctionMap<V>,
    targets: &Targets,
    enforce_signature: bool,
    set_annotations: bool,
) -> Result<ConcatenatedFunction<V>> {
    let dag = create_dag(functions, targets)?;
    let targets = targets.resolve(functions.keys());
    let arguments = create_arguments_of_concatenated_function(functions, &dag);

    let steps: Vec<ExecutionStep<V>> = topological_order(&dag)?
        .into_iter()
        .filter_map(|name| {
            functions.get(&name).map(|function| ExecutionStep {
                parameters: function.parameters(),
                function: function.clone(),
                name,
            })
        })
        .collect();

    let types = if set_annotations {
        Some(verify_annotations(&steps, &arguments, &targets)?)
    } else {
        None
    };

    debug!(
        arguments = ?arguments,
        targets = ?targets,
        order = ?steps.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
        "functions concatenated"
    );

    let mut signature = Signature::new(arguments);
    signature.annotations = types.as_ref().map(TypeInfo::argument_annotations);

    Ok(ConcatenatedFunction {
        signature,
        steps,
        targets,
        types,
        enforce_signature,
        dag,
    })
}
