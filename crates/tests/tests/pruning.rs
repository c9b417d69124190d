//! Property tests for graph pruning.
//!
//! Random acyclic function maps are built by letting function `f{i}` depend
//! only on inputs and on functions `f{j}` with `j < i`.

use std::collections::BTreeSet;

use dagfuse_runtime::{Args, FunctionMap, Targets, create_dag, function};
use proptest::prelude::*;

/// Per function: indices of earlier functions and of inputs it depends on.
fn arb_graph() -> impl Strategy<Value = Vec<(Vec<usize>, Vec<usize>)>> {
    prop::collection::vec(
        (
            prop::collection::vec(0usize..8, 0..3),
            prop::collection::vec(0usize..4, 0..3),
        ),
        1..8,
    )
}

fn build(graph: &[(Vec<usize>, Vec<usize>)]) -> FunctionMap<i64> {
    graph
        .iter()
        .enumerate()
        .map(|(i, (functions, inputs))| {
            let functions: BTreeSet<usize> = functions.iter().copied().filter(|&j| j < i).collect();
            let inputs: BTreeSet<usize> = inputs.iter().copied().collect();
            let parameters: Vec<String> = functions
                .iter()
                .map(|j| format!("f{j}"))
                .chain(inputs.iter().map(|k| format!("x{k}")))
                .collect();
            (format!("f{i}"), function(parameters, |_: &Args<i64>| Ok(0)))
        })
        .collect()
}

fn expected_nodes(functions: &FunctionMap<i64>, target: &str) -> BTreeSet<String> {
    let mut seen = BTreeSet::new();
    let mut stack = vec![target.to_string()];
    while let Some(node) = stack.pop() {
        if !seen.insert(node.clone()) {
            continue;
        }
        if let Some(function) = functions.get(&node) {
            stack.extend(function.parameters());
        }
    }
    seen
}

proptest! {
    #[test]
    fn prop_pruned_graph_is_target_plus_ancestors(graph in arb_graph(), pick in 0usize..8) {
        let functions = build(&graph);
        let target = format!("f{}", pick % graph.len());

        let dag = create_dag(&functions, &Targets::from(target.as_str())).unwrap();
        let nodes: BTreeSet<String> = dag.nodes().map(String::from).collect();

        prop_assert_eq!(nodes, expected_nodes(&functions, &target));
    }

    #[test]
    fn prop_complete_graph_keeps_every_function(graph in arb_graph()) {
        let functions = build(&graph);
        let dag = create_dag(&functions, &Targets::All).unwrap();

        for name in functions.keys() {
            prop_assert!(dag.contains(name));
        }
    }
}
