//! End-to-end tests for nested function trees.

use dagfuse_foundation::{Tree, tree};
use dagfuse_runtime::{Args, function};
use dagfuse_tree::{
    Error, FunctionTree, InputNamespace, NameClashPolicy, TreeOptions, concatenate_functions_tree,
    create_input_structure_tree, structure_of,
};
use dagfuse_tests::init_logging;

fn pensions() -> FunctionTree<i64> {
    tree! {
        "pensions" => {
            "contribution" => (function(["wage", "rate"], |a: &Args<i64>| {
                Ok(a.get("wage")? * a.get("rate")? / 100)
            })),
        },
        "net_wage" => (function(["wage", "pensions__contribution"], |a: &Args<i64>| {
            Ok(a.get("wage")? - a.get("pensions__contribution")?)
        })),
    }
}

#[test]
fn test_nested_pipeline() {
    init_logging();
    let inputs: Tree<i64> = tree! {
        "wage" => 3000,
        "pensions" => { "rate" => 10 },
    };

    let compiled = concatenate_functions_tree(
        &pensions(),
        None,
        &structure_of(&inputs),
        &TreeOptions::default(),
    )
    .unwrap();
    let out = compiled.call(&inputs).unwrap();

    let expected: Tree<i64> = tree! {
        "pensions" => { "contribution" => 300 },
        "net_wage" => 2700,
    };
    assert_eq!(out, expected);
    assert_eq!(
        compiled.signature().parameters,
        vec!["pensions__rate", "wage"]
    );
}

#[test]
fn test_derived_input_structure_compiles() {
    // `wage` is not declared anywhere, so it must be named as top-level.
    let functions = pensions();
    let structure =
        create_input_structure_tree(&functions, None, InputNamespace::Local, &["wage"]).unwrap();
    let expected: Tree<()> = tree! { "pensions" => { "rate" => () }, "wage" => () };
    assert_eq!(structure, expected);

    let compiled =
        concatenate_functions_tree(&functions, None, &structure, &TreeOptions::default()).unwrap();
    let inputs: Tree<i64> = tree! { "wage" => 1000, "pensions" => { "rate" => 5 } };
    let out = compiled.call(&inputs).unwrap();
    let expected: Tree<i64> = tree! {
        "pensions" => { "contribution" => 50 },
        "net_wage" => 950,
    };
    assert_eq!(out, expected);
}

#[test]
fn test_clash_policy_end_to_end() {
    init_logging();
    let functions: FunctionTree<i64> = tree! {
        "x" => (function(["a"], |a: &Args<i64>| Ok(*a.get("a")?))),
        "nested" => { "x" => (function(["a"], |a: &Args<i64>| Ok(a.get("a")? * 10))) },
    };
    let inputs: Tree<i64> = tree! { "a" => 2 };
    let structure = structure_of(&inputs);

    let raise = concatenate_functions_tree(&functions, None, &structure, &TreeOptions::default());
    assert!(matches!(raise, Err(Error::NameClash { .. })));

    let ignore = TreeOptions::default().with_name_clashes(NameClashPolicy::Ignore);
    let compiled = concatenate_functions_tree(&functions, None, &structure, &ignore).unwrap();
    let expected: Tree<i64> = tree! { "x" => 2, "nested" => { "x" => 20 } };
    assert_eq!(compiled.call(&inputs).unwrap(), expected);
}

#[test]
fn test_surplus_inputs_follow_enforcement() {
    let inputs: Tree<i64> = tree! {
        "wage" => 3000,
        "pensions" => { "rate" => 10 },
        "unused" => 1,
    };
    let structure = structure_of(&inputs);

    let strict =
        concatenate_functions_tree(&pensions(), None, &structure, &TreeOptions::default()).unwrap();
    let err = strict.call(&inputs).unwrap_err();
    assert!(matches!(
        err,
        Error::Runtime(dagfuse_runtime::Error::UnexpectedKeywordArguments { .. })
    ));

    let lenient = TreeOptions::default().with_enforce_signature(false);
    let compiled = concatenate_functions_tree(&pensions(), None, &structure, &lenient).unwrap();
    assert!(compiled.call(&inputs).is_ok());
}

#[test]
fn test_function_error_surfaces_with_qualified_name() {
    let functions: FunctionTree<i64> = tree! {
        "ns" => {
            "ratio" => (function(["a", "b"], |a: &Args<i64>| {
                let b = *a.get("b")?;
                if b == 0 {
                    return Err("division by zero".into());
                }
                Ok(a.get("a")? / b)
            })),
        },
    };
    let inputs: Tree<i64> = tree! { "ns" => { "a" => 1, "b" => 0 } };
    let compiled = concatenate_functions_tree(
        &functions,
        None,
        &structure_of(&inputs),
        &TreeOptions::default(),
    )
    .unwrap();

    let err = compiled.call(&inputs).unwrap_err();
    assert_eq!(err.to_string(), "function 'ns__ratio' failed: division by zero");
}
