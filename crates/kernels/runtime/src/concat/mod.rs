//! Concatenation of function maps into a single callable.
//!
//! Compilation happens once: the graph is built and pruned, a topological
//! execution order is fixed and the signature of free inputs is derived.
//! Calling the result only binds arguments and runs the stored steps.

mod annotations;
mod compiler;
mod options;
mod output;
mod signature;


pub use compiler::{
    ConcatenatedFunction, create_arguments_of_concatenated_function, create_concatenated_function,
};
pub use options::{ConcatOptions, ReturnType};
pub use output::{
    Aggregator, CombinedFunction, Output, concatenate_functions,
    concatenate_functions_with_aggregator,
};
pub use signature::{CONCATENATED_FUNCTION_NAME, CallArgs, Signature};
