//! dagfuse runtime.
//!
//! Compiles a map of named functions into a single function. A function's
//! dependencies are the names of its parameters: a parameter naming another
//! function receives that function's result, any other parameter becomes an
//! argument of the compiled function.
//!
//! # Architecture
//!
//! - [`function`] - The [`Callable`] interface and the [`Bound`] / [`Renamed`] adapters
//! - [`dag`] - Dependency graph construction, pruning and topological levels
//! - [`concat`] - Compilation, argument binding and output packaging
//! - [`error`] - Error types for build and call failures
//!
//! # Example
//!
//! ```
//! use dagfuse_runtime::{Args, ConcatOptions, FunctionMap, concatenate_functions, function};
//!
//! let mut functions: FunctionMap<i64> = FunctionMap::new();
//! functions.insert("leisure".into(), function(["hours"], |a: &Args<i64>| Ok(24 - a.get("hours")?)));
//! functions.insert(
//!     "consumption".into(),
//!     function(["hours", "wage"], |a: &Args<i64>| Ok(a.get("wage")? * a.get("hours")?)),
//! );
//! functions.insert(
//!     "utility".into(),
//!     function(["consumption", "leisure", "weight"], |a: &Args<i64>| {
//!         Ok(a.get("consumption")? + a.get("weight")? * a.get("leisure")?)
//!     }),
//! );
//!
//! let utility = concatenate_functions(&functions, "utility", &ConcatOptions::default()).unwrap();
//! assert_eq!(utility.signature().parameters, ["hours", "wage", "weight"]);
//!
//! let out = utility.call([("hours", 8), ("wage", 5), ("weight", 2)]).unwrap();
//! assert_eq!(out.into_single(), Some(72));
//! ```

pub mod concat;
pub mod dag;
pub mod error;
pub mod function;
pub mod types;

pub use concat::{
    Aggregator, CallArgs, CombinedFunction, ConcatOptions, ConcatenatedFunction, Output, ReturnType,
    Signature, concatenate_functions, concatenate_functions_with_aggregator,
    create_arguments_of_concatenated_function, create_concatenated_function,
};
pub use dag::{
    CycleError, Dag, DagBuilder, NodeKind, create_complete_dag, create_dag, get_ancestors,
};
pub use error::{BoxError, Error, Result, format_list_linewise};
pub use function::{
    Annotations, Args, Bound, Callable, FnCallable, FunctionMap, Renamed, SharedFn, UNKNOWN_TYPE,
    Value, function, partial, rename_arguments,
};
pub use types::Targets;
