//! Tests for graph construction, pruning and leveling.

use crate::error::Error;
use crate::function::{Args, FunctionMap, function};
use crate::types::Targets;

use super::builder::{DagBuilder, create_complete_dag, create_dag, get_ancestors};
use super::topology::{topological_levels, topological_order};
use super::types::NodeKind;

fn functions(specs: &[(&str, &[&str])]) -> FunctionMap<i64> {
    specs
        .iter()
        .map(|(name, params)| {
            let f = function(params.to_vec(), |_: &Args<i64>| Ok(0));
            (name.to_string(), f)
        })
        .collect()
}

fn economics() -> FunctionMap<i64> {
    functions(&[
        ("utility", &["consumption", "leisure", "weight"]),
        ("leisure", &["hours"]),
        ("consumption", &["hours", "wage"]),
    ])
}

fn sorted<I: IntoIterator<Item = S>, S: Into<String>>(items: I) -> Vec<String> {
    let mut items: Vec<String> = items.into_iter().map(Into::into).collect();
    items.sort();
    items
}

#[test]
fn test_complete_dag_nodes_and_edges() {
    let dag = create_complete_dag(&economics());

    assert_eq!(
        sorted(dag.functions()),
        vec!["consumption", "leisure", "utility"]
    );
    assert_eq!(sorted(dag.inputs()), vec!["hours", "wage", "weight"]);
    assert_eq!(dag.kind("leisure"), Some(NodeKind::Function));
    assert_eq!(dag.kind("hours"), Some(NodeKind::Input));
    assert_eq!(dag.edge_count(), 6);
    assert!(dag.edges().any(|edge| edge == ("leisure", "utility")));
    assert_eq!(sorted(dag.dependents("hours")), vec!["consumption", "leisure"]);
}

#[test]
fn test_parameter_seen_before_function_becomes_function() {
    let mut builder = DagBuilder::new();
    builder.add_function("utility", ["leisure"]);
    builder.add_function("leisure", ["hours"]);
    let dag = builder.build();

    assert_eq!(dag.kind("leisure"), Some(NodeKind::Function));
    assert_eq!(dag.inputs().collect::<Vec<_>>(), vec!["hours"]);
}

#[test]
fn test_create_dag_prunes_to_ancestors() {
    let mut funcs = economics();
    funcs.extend(functions(&[("unrelated", &["noise"])]));

    let dag = create_dag(&funcs, &Targets::from("utility")).unwrap();
    assert!(!dag.contains("unrelated"));
    assert!(!dag.contains("noise"));
    assert_eq!(dag.node_count(), 6);

    let dag = create_dag(&funcs, &Targets::from(["leisure"])).unwrap();
    assert_eq!(sorted(dag.nodes()), vec!["hours", "leisure"]);
}

#[test]
fn test_create_dag_without_targets_keeps_everything() {
    let mut funcs = economics();
    funcs.extend(functions(&[("unrelated", &["noise"])]));

    let dag = create_dag(&funcs, &Targets::All).unwrap();
    assert_eq!(dag.node_count(), create_complete_dag(&funcs).node_count());
}

#[test]
fn test_create_dag_rejects_unknown_targets() {
    let err = create_dag(&economics(), &Targets::from(["utility", "wealth", "hours"])).unwrap_err();
    match &err {
        Error::MissingFunctions { targets } => assert_eq!(targets, &["wealth", "hours"]),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("    'wealth',\n    'hours',\n"));
}

#[test]
fn test_get_ancestors() {
    let funcs = economics();

    let ancestors = get_ancestors(&funcs, &Targets::from("utility"), false).unwrap();
    assert_eq!(
        sorted(ancestors),
        vec!["consumption", "hours", "leisure", "wage", "weight"]
    );

    let ancestors = get_ancestors(&funcs, &Targets::from(["leisure"]), true).unwrap();
    assert_eq!(sorted(ancestors), vec!["hours", "leisure"]);
}

#[test]
fn test_topological_levels_simple() {
    // a -> b -> c
    let funcs = functions(&[("c", &["b"]), ("b", &["a"]), ("a", &["x"])]);
    let dag = create_complete_dag(&funcs);

    let levels = topological_levels(&dag).unwrap();
    assert_eq!(levels.len(), 3);
    assert_eq!(levels[0].nodes, vec!["a"]);
    assert_eq!(levels[1].nodes, vec!["b"]);
    assert_eq!(levels[2].nodes, vec!["c"]);
}

#[test]
fn test_topological_levels_parallel_sorted() {
    let dag = create_complete_dag(&economics());

    let levels = topological_levels(&dag).unwrap();
    assert_eq!(levels.len(), 2);
    assert_eq!(levels[0].nodes, vec!["consumption", "leisure"]);
    assert_eq!(levels[1].nodes, vec!["utility"]);
    assert_eq!(
        topological_order(&dag).unwrap(),
        vec!["consumption", "leisure", "utility"]
    );
}

#[test]
fn test_topological_levels_empty() {
    let dag = DagBuilder::new().build();
    assert!(topological_levels(&dag).unwrap().is_empty());
}

#[test]
fn test_two_node_cycle() {
    let funcs = functions(&[("a", &["b"]), ("b", &["a"])]);
    let err = topological_levels(&create_complete_dag(&funcs)).unwrap_err();

    assert_eq!(err.involved_nodes, vec!["a", "b"]);
    assert_eq!(err.cycle, vec!["a", "b", "a"]);
}

#[test]
fn test_self_loop_is_a_cycle() {
    let funcs = functions(&[("a", &["a", "x"])]);
    let err = topological_levels(&create_complete_dag(&funcs)).unwrap_err();
    assert_eq!(err.cycle, vec!["a", "a"]);
}

#[test]
fn test_cycle_path_skips_downstream_nodes() {
    // d consumes the cycle a -> b -> c -> a but is not part of it.
    let funcs = functions(&[
        ("d", &["c"]),
        ("a", &["c"]),
        ("b", &["a"]),
        ("c", &["b"]),
    ]);
    let err = topological_levels(&create_complete_dag(&funcs)).unwrap_err();

    // c was first seen as a parameter of d, so it precedes a and b.
    assert_eq!(err.involved_nodes, vec!["d", "c", "a", "b"]);
    assert_eq!(err.cycle, vec!["c", "a", "b", "c"]);
}

#[test]
fn test_create_dag_reports_cycle() {
    let funcs = functions(&[("a", &["b"]), ("b", &["a"])]);
    let err = create_dag(&funcs, &Targets::All).unwrap_err();
    assert!(matches!(err, Error::CyclicDependency { .. }));
    assert!(err.to_string().contains("a → b → a"));
}

#[test]
fn test_cycle_outside_targets_is_pruned_away() {
    let mut funcs = functions(&[("a", &["b"]), ("b", &["a"])]);
    funcs.extend(functions(&[("ok", &["x"])]));
    assert!(create_dag(&funcs, &Targets::from("ok")).is_ok());
}
