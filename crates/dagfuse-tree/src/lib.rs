//! dagfuse Tree
//!
//! Nested function trees on top of the flat `dagfuse-runtime` compiler.
//!
//! Functions are organised in namespaces; a parameter names either a sibling
//! in the same namespace, a top-level entity, or an absolute qualified name
//! such as `pensions__rate`. Everything namespace-related is resolved once,
//! at build time, and the flat compiler never sees a tree.
//!
//! ```
//! use dagfuse_foundation::{Tree, tree};
//! use dagfuse_runtime::{Args, function};
//! use dagfuse_tree::{FunctionTree, TreeOptions, concatenate_functions_tree};
//!
//! let f = function(["g", "a", "b"], |x: &Args<i64>| {
//!     Ok(x.get("g")? + x.get("a")? + x.get("b")?)
//! });
//! let g = function(["a"], |x: &Args<i64>| Ok(x.get("a")?.pow(2)));
//! let functions: FunctionTree<i64> = tree! { "n1" => { "f" => f, "g" => g } };
//! let inputs: Tree<i64> = tree! { "n1" => { "a" => 1, "b" => 2 } };
//!
//! let input_structure = dagfuse_tree::structure_of(&inputs);
//! let compiled =
//!     concatenate_functions_tree(&functions, None, &input_structure, &TreeOptions::default())
//!         .unwrap();
//! let expected: Tree<i64> = tree! { "n1" => { "f" => 4, "g" => 1 } };
//! assert_eq!(compiled.call(&inputs).unwrap(), expected);
//! ```

pub mod dag_tree;
pub mod error;
pub mod options;
pub mod resolve;
pub mod validation;


pub use dag_tree::{
    FunctionTree, InputStructure, TargetTree, TreeFunction, concatenate_functions_tree,
    create_dag_tree, create_input_structure_tree, create_tree_with_input_types, flatten_targets,
    functions_without_tree_logic, one_function_without_tree_logic, structure_of,
};
pub use error::{Error, Result};
pub use options::{InputNamespace, NameClashPolicy, TreeOptions};
pub use resolve::{Scope, check_for_parent_child_name_clashes, find_parent_child_name_clashes};
pub use validation::{
    fail_if_path_elements_have_trailing_underscores, fail_if_paths_are_invalid,
    fail_if_paths_have_invalid_identifiers, fail_if_top_level_elements_repeated_in_paths,
    fail_if_top_level_elements_repeated_in_single_path,
};
