//! End-to-end tests for flat function maps.
//!
//! These tests verify the full pipeline:
//! Register functions → Build graph → Prune → Compile → Call → Package

use dagfuse_runtime::{
    ConcatOptions, Error, Output, ReturnType, Targets, concatenate_functions,
    concatenate_functions_with_aggregator, create_dag, get_ancestors,
};
use dagfuse_tests::{TestHarness, init_logging, labour_supply};

#[test]
fn test_single_target_utility() {
    init_logging();
    let harness = labour_supply();

    let f = concatenate_functions(harness.functions(), "utility", &ConcatOptions::default())
        .unwrap();
    let out = f
        .call([("hours", 8), ("wage", 5), ("weight", 2)])
        .unwrap();

    assert_eq!(out, Output::Single(72));
    assert_eq!(f.signature().parameters, vec!["hours", "wage", "weight"]);
}

#[test]
fn test_all_targets_as_tuple_in_insertion_order() {
    init_logging();
    let harness = labour_supply();

    let options = ConcatOptions::default().with_return_type(ReturnType::Tuple);
    let f = concatenate_functions(harness.functions(), Targets::All, &options).unwrap();
    let out = f
        .call([("hours", 8), ("wage", 5), ("weight", 2)])
        .unwrap();

    assert_eq!(out, Output::Tuple(vec![72, 16, 40]));
    assert_eq!(f.targets(), ["utility", "leisure", "consumption"]);
}

#[test]
fn test_annotations_flow_to_signature() {
    let harness = labour_supply();

    let options = ConcatOptions::default()
        .with_return_type(ReturnType::Dict)
        .with_set_annotations(true);
    let f = concatenate_functions(harness.functions(), Targets::All, &options).unwrap();
    let annotations = f.signature().annotations.clone().unwrap();

    assert_eq!(annotations.parameter("hours"), "int");
    assert_eq!(annotations.parameter("wage"), "float");
    assert_eq!(
        annotations.returns,
        "{'utility': float, 'leisure': int, 'consumption': float}"
    );
}

#[test]
fn test_only_ancestors_of_targets_run() {
    init_logging();
    let harness = labour_supply();

    let f = concatenate_functions(harness.functions(), "leisure", &ConcatOptions::default())
        .unwrap();
    assert_eq!(f.signature().parameters, vec!["hours"]);

    let out = f.call([("hours", 10)]).unwrap();
    assert_eq!(out.into_single(), Some(14));
    assert_eq!(harness.calls(), vec!["leisure"]);
}

#[test]
fn test_execution_follows_dependencies() {
    let harness = labour_supply();

    let f = concatenate_functions(harness.functions(), "utility", &ConcatOptions::default())
        .unwrap();
    f.call([("hours", 8), ("wage", 5), ("weight", 2)]).unwrap();

    // Sorted within a level, dependents strictly later.
    assert_eq!(harness.calls(), vec!["consumption", "leisure", "utility"]);
    assert_eq!(f.execution_order(), vec!["consumption", "leisure", "utility"]);
}

#[test]
fn test_compilation_is_deterministic() {
    let harness = labour_supply();
    let options = ConcatOptions::default().with_return_type(ReturnType::List);

    let first = concatenate_functions(harness.functions(), Targets::All, &options).unwrap();
    for _ in 0..10 {
        let again = concatenate_functions(harness.functions(), Targets::All, &options).unwrap();
        assert_eq!(again.execution_order(), first.execution_order());
        assert_eq!(again.signature(), first.signature());
        assert_eq!(again.dag(), first.dag());
    }
}

#[test]
fn test_ancestors_of_utility() {
    let harness = labour_supply();

    let ancestors = get_ancestors(harness.functions(), &Targets::from("utility"), false).unwrap();
    let mut ancestors: Vec<String> = ancestors.into_iter().collect();
    ancestors.sort();
    assert_eq!(
        ancestors,
        vec!["consumption", "hours", "leisure", "wage", "weight"]
    );

    let with_target = get_ancestors(harness.functions(), &Targets::from("leisure"), true).unwrap();
    assert!(with_target.contains("leisure"));
    assert!(with_target.contains("hours"));
    assert_eq!(with_target.len(), 2);
}

#[test]
fn test_aggregated_welfare() {
    let harness = labour_supply();

    let f = concatenate_functions_with_aggregator(
        harness.functions(),
        ["leisure", "consumption"],
        |a, b| a + b,
        &ConcatOptions::default(),
    )
    .unwrap();
    let out = f.call([("hours", 8), ("wage", 5)]).unwrap();
    assert_eq!(out.into_single(), Some(56));
}

#[test]
fn test_cycle_fails_at_build_time() {
    init_logging();
    let mut harness = TestHarness::new();
    harness
        .register("a", &["b"], |_| 0)
        .register("b", &["a"], |_| 0);

    let err = create_dag(harness.functions(), &Targets::All).unwrap_err();
    match &err {
        Error::CyclicDependency { cycle, .. } => assert_eq!(cycle, &vec!["a", "b", "a"]),
        other => panic!("expected a cycle, got {other:?}"),
    }
    assert!(harness.calls().is_empty());
}

#[test]
fn test_missing_target_lists_names() {
    let harness = labour_supply();

    let err = create_dag(harness.functions(), &Targets::from(vec!["utility", "taxes"])).unwrap_err();
    assert_eq!(
        err.to_string(),
        "The following targets have no corresponding function:\n[\n    'taxes',\n]"
    );
}

#[test]
fn test_missing_input_fails_before_any_call() {
    let harness = labour_supply();

    let f = concatenate_functions(harness.functions(), "utility", &ConcatOptions::default())
        .unwrap();
    let err = f.call([("hours", 8), ("wage", 5)]).unwrap_err();
    assert!(matches!(err, Error::MissingArguments { .. }));
    assert!(harness.calls().is_empty());
}
