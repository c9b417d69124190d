//! Concatenation of nested function trees.
//!
//! The tree adapter removes all namespace logic before handing over to the
//! flat runtime: functions are flattened to qualified names and each one is
//! wrapped in a [`Renamed`](dagfuse_runtime::Renamed) adapter whose
//! parameters are absolute qualified names. At call time nested inputs are
//! flattened the same way and the flat result is nested again.
//!
//! ```text
//! {"n1": {"f": f(g, a, b), "g": g(a)}}
//!     -> {"n1__f": f(n1__g, n1__a, n1__b), "n1__g": g(n1__a)}
//! ```

use dagfuse_foundation::{
    Tree, TreePath, flatten_to_qnames, flatten_to_tree_paths, tree_paths, unflatten_from_qnames,
};
use dagfuse_runtime::{
    CallArgs, CombinedFunction, ConcatOptions, Dag, FunctionMap, Output, ReturnType, SharedFn,
    Signature, Targets, Value, concatenate_functions, create_arguments_of_concatenated_function,
    create_concatenated_function, create_dag, rename_arguments,
};
use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::error::{Error, Result};
use crate::options::{InputNamespace, NameClashPolicy, TreeOptions};
use crate::resolve::{Scope, check_for_parent_child_name_clashes};
use crate::validation::{fail_if_paths_are_invalid, fail_if_top_level_elements_repeated_in_paths};

/// Nested functions.
pub type FunctionTree<V> = Tree<SharedFn<V>>;

/// Nested placeholders describing which inputs exist.
pub type InputStructure = Tree<()>;

/// Nested placeholders selecting target functions.
pub type TargetTree = Tree<()>;

/// The shape of `tree` with every leaf replaced by `()`.
pub fn structure_of<T>(tree: &Tree<T>) -> Tree<()> {
    dagfuse_foundation::map_leaves(tree, &mut |_| ())
}

/// Qualified names of the targets, or all functions if `targets` is `None`.
pub fn flatten_targets(targets: Option<&TargetTree>) -> Targets {
    match targets {
        Some(tree) => Targets::Many(dagfuse_foundation::qnames(tree)),
        None => Targets::All,
    }
}

/// Rewrites one function so that its parameters are absolute qualified
/// names.
///
/// Fails if two parameters resolve to the same qualified name, since the
/// renamed function could then no longer pass both values on.
pub fn one_function_without_tree_logic<V: Value>(
    function: &SharedFn<V>,
    tree_path: &TreePath,
    scope: &Scope,
) -> Result<SharedFn<V>> {
    let parameters = function.parameters();
    let mapper = scope.parameter_mapper(&parameters[..], &tree_path.namespace());
    fail_if_parameters_collide(&mapper, tree_path)?;
    Ok(rename_arguments(function.clone(), mapper))
}

fn fail_if_parameters_collide(
    mapper: &IndexMap<String, String>,
    tree_path: &TreePath,
) -> Result<()> {
    let mut by_target: IndexMap<&str, Vec<String>> = IndexMap::new();
    for (parameter, resolved) in mapper {
        by_target
            .entry(resolved.as_str())
            .or_default()
            .push(parameter.clone());
    }
    match by_target.into_iter().find(|(_, group)| group.len() > 1) {
        Some((resolved, parameters)) => Err(Error::ParameterCollision {
            function: tree_path.qname(),
            resolved: resolved.to_string(),
            parameters,
        }),
        None => Ok(()),
    }
}

/// Flattens `functions` to qualified names and rewrites every function with
/// [`one_function_without_tree_logic`].
pub fn functions_without_tree_logic<V: Value>(
    functions: &FunctionTree<V>,
    scope: &Scope,
) -> Result<FunctionMap<V>> {
    flatten_to_tree_paths(functions)
        .into_iter()
        .map(|(path, function)| {
            let renamed = one_function_without_tree_logic(&function, &path, scope)?;
            Ok((path.qname(), renamed))
        })
        .collect()
}

/// Validated, flattened and resolved functions plus the qualified names of
/// the declared inputs.
struct FlatTree<V> {
    functions: FunctionMap<V>,
    targets: Targets,
    inputs: IndexSet<String>,
}

fn flatten_tree<V: Value>(
    functions: &FunctionTree<V>,
    targets: Option<&TargetTree>,
    input_structure: &InputStructure,
    name_clashes: NameClashPolicy,
) -> Result<FlatTree<V>> {
    let function_paths = tree_paths(functions);
    let input_paths = tree_paths(input_structure);
    let target_paths = targets.map(tree_paths).unwrap_or_default();

    fail_if_paths_are_invalid(
        function_paths
            .iter()
            .chain(&input_paths)
            .chain(&target_paths),
    )?;
    check_for_parent_child_name_clashes(function_paths.iter().chain(&input_paths), name_clashes)?;

    let scope = Scope::new(function_paths.iter().chain(&input_paths), []);
    debug!(
        functions = function_paths.len(),
        inputs = input_paths.len(),
        top_level_namespace = ?scope.top_level_namespace(),
        "flattening function tree"
    );

    Ok(FlatTree {
        functions: functions_without_tree_logic(functions, &scope)?,
        targets: flatten_targets(targets),
        inputs: input_paths.iter().map(TreePath::qname).collect(),
    })
}

/// Builds the pruned flat graph of a function tree.
pub fn create_dag_tree<V: Value>(
    functions: &FunctionTree<V>,
    targets: Option<&TargetTree>,
    input_structure: &InputStructure,
    name_clashes: NameClashPolicy,
) -> Result<Dag> {
    let flat = flatten_tree(functions, targets, input_structure, name_clashes)?;
    Ok(create_dag(&flat.functions, &flat.targets)?)
}

/// A compiled function tree taking and returning nested values.
pub struct TreeFunction<V> {
    inner: CombinedFunction<V>,
}

impl<V: Value> TreeFunction<V> {
    /// Flattens `inputs`, runs the pipeline and nests the results.
    pub fn call(&self, inputs: &Tree<V>) -> Result<Tree<V>> {
        let flat_inputs = flatten_to_qnames(inputs);
        let flat_outputs = match self.inner.call(CallArgs::from(flat_inputs))? {
            Output::Dict(values) => values,
            other => self
                .inner
                .targets()
                .iter()
                .cloned()
                .zip(other.into_values())
                .collect(),
        };
        Ok(unflatten_from_qnames(flat_outputs)?)
    }

    /// Signature of the flat function, in qualified names.
    pub fn signature(&self) -> &Signature {
        self.inner.signature()
    }

    /// The inputs a call needs, nested.
    pub fn input_structure(&self) -> Result<InputStructure> {
        Ok(unflatten_from_qnames(
            self.signature().parameters.iter().map(|p| (p.clone(), ())),
        )?)
    }

    pub fn dag(&self) -> &Dag {
        self.inner.dag()
    }

    pub fn execution_order(&self) -> Vec<&str> {
        self.inner.execution_order()
    }
}

/// Combines a tree of functions into one function on nested values.
///
/// Every free input of the pruned graph must be declared in
/// `input_structure`; otherwise [`Error::UnresolvedParameters`] lists the
/// offenders.
pub fn concatenate_functions_tree<V: Value>(
    functions: &FunctionTree<V>,
    targets: Option<&TargetTree>,
    input_structure: &InputStructure,
    options: &TreeOptions,
) -> Result<TreeFunction<V>> {
    let flat = flatten_tree(functions, targets, input_structure, options.name_clashes)?;

    let concat_options = ConcatOptions::default()
        .with_return_type(ReturnType::Dict)
        .with_enforce_signature(options.enforce_signature);
    let inner = concatenate_functions(&flat.functions, flat.targets, &concat_options)?;

    let unresolved: Vec<String> = inner
        .signature()
        .parameters
        .iter()
        .filter(|p| !flat.inputs.contains(*p))
        .cloned()
        .collect();
    if !unresolved.is_empty() {
        return Err(Error::UnresolvedParameters {
            parameters: unresolved,
        });
    }

    Ok(TreeFunction { inner })
}

/// Flattened functions resolved against their own paths and
/// `top_level_inputs`, for input discovery.
fn resolve_without_inputs<V: Value>(
    functions: &FunctionTree<V>,
    targets: Option<&TargetTree>,
    top_level_inputs: &[&str],
    namespace_of_inputs: InputNamespace,
) -> Result<(FunctionMap<V>, Targets)> {
    let function_paths = tree_paths(functions);
    let target_paths = targets.map(tree_paths).unwrap_or_default();
    fail_if_paths_are_invalid(function_paths.iter().chain(&target_paths))?;

    let scope = Scope::new(&function_paths, top_level_inputs.iter().copied())
        .with_namespace_of_inputs(namespace_of_inputs);
    Ok((
        functions_without_tree_logic(functions, &scope)?,
        flatten_targets(targets),
    ))
}

/// Derives the nested inputs needed to compute `targets`, without running
/// anything.
///
/// Parameters naming a function (in the same namespace or at the top level)
/// are not inputs. Any other bare parameter becomes an input at the path
/// `namespace_of_inputs` selects; names in `top_level_inputs` are always
/// top-level inputs.
pub fn create_input_structure_tree<V: Value>(
    functions: &FunctionTree<V>,
    targets: Option<&TargetTree>,
    namespace_of_inputs: InputNamespace,
    top_level_inputs: &[&str],
) -> Result<InputStructure> {
    let (flat_functions, flat_targets) =
        resolve_without_inputs(functions, targets, top_level_inputs, namespace_of_inputs)?;

    let dag = create_dag(&flat_functions, &flat_targets)?;
    let inputs = create_arguments_of_concatenated_function(&flat_functions, &dag);
    debug!(inputs = ?inputs, "input structure derived");

    Ok(unflatten_from_qnames(inputs.into_iter().map(|input| (input, ())))?)
}

/// Like [`create_input_structure_tree`], but each leaf holds the input's
/// type annotation.
///
/// Annotations are checked for consistency along the way. Top-level names
/// must not reappear deeper in a function path.
pub fn create_tree_with_input_types<V: Value>(
    functions: &FunctionTree<V>,
    targets: Option<&TargetTree>,
    top_level_inputs: &[&str],
) -> Result<Tree<String>> {
    let (flat_functions, flat_targets) =
        resolve_without_inputs(functions, targets, top_level_inputs, InputNamespace::Local)?;

    let function_paths = tree_paths(functions);
    let top_level_namespace: IndexSet<String> = function_paths
        .iter()
        .filter_map(|path| path.first().map(String::from))
        .chain(top_level_inputs.iter().map(|s| s.to_string()))
        .collect();
    fail_if_top_level_elements_repeated_in_paths(&top_level_namespace, &function_paths)?;

    let compiled = create_concatenated_function(&flat_functions, &flat_targets, true, true)?;
    let types: IndexMap<String, String> = compiled
        .signature()
        .annotations
        .as_ref()
        .map(|annotations| annotations.parameters.clone())
        .unwrap_or_default();

    Ok(unflatten_from_qnames(types)?)
}
