//! Consistency checks for type annotations.
//!
//! Annotations are opaque strings. Two annotations for the same argument
//! must be equal, whether they come from the return annotation of the
//! function producing it or from another function consuming it.

use indexmap::{IndexMap, IndexSet};

use crate::error::{Error, Result};
use crate::function::{Annotations, UNKNOWN_TYPE};

use super::compiler::ExecutionStep;

/// Verified annotations of a compiled function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TypeInfo {
    /// Annotation of each free input, in signature order.
    pub(crate) arguments: IndexMap<String, String>,
    /// Annotation of each target, in target order.
    pub(crate) targets: Vec<String>,
}

impl TypeInfo {
    pub(crate) fn argument_annotations(&self) -> Annotations {
        Annotations {
            parameters: self.arguments.clone(),
            returns: tuple_annotation(&self.targets),
        }
    }
}

/// Walks `steps` in execution order and checks every parameter annotation
/// against what was recorded for the same name before.
pub(crate) fn verify_annotations<V>(
    steps: &[ExecutionStep<V>],
    arguments: &[String],
    targets: &[String],
) -> Result<TypeInfo> {
    let mut types: IndexMap<String, String> = IndexMap::new();
    let mut produced: IndexSet<&str> = IndexSet::new();

    for step in steps {
        let annotations = step.function.annotations();
        types.insert(step.name.clone(), annotations.returns.clone());
        produced.insert(step.name.as_str());

        for (argument, annotated) in &annotations.parameters {
            if let Some(expected) = types.get(argument)
                && expected != annotated
            {
                return Err(Error::AnnotationMismatch {
                    function: step.name.clone(),
                    argument: argument.clone(),
                    annotated: annotated.clone(),
                    expected: expected.clone(),
                    produced_by_function: produced.contains(argument.as_str()),
                });
            }
        }
        for (argument, annotated) in annotations.parameters {
            types.entry(argument).or_insert(annotated);
        }
    }

    let annotation_of = |name: &String| {
        types
            .get(name)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_TYPE.to_string())
    };
    Ok(TypeInfo {
        arguments: arguments
            .iter()
            .map(|a| (a.clone(), annotation_of(a)))
            .collect(),
        targets: targets.iter().map(annotation_of).collect(),
    })
}

/// `tuple[a, b]`
pub(crate) fn tuple_annotation(types: &[String]) -> String {
    format!("tuple[{}]", types.join(", "))
}

/// `[a, b]`
pub(crate) fn list_annotation(types: &[String]) -> String {
    format!("[{}]", types.join(", "))
}

/// `{'x': a, 'y': b}`
pub(crate) fn dict_annotation(targets: &[String], types: &[String]) -> String {
    let entries: Vec<String> = targets
        .iter()
        .zip(types)
        .map(|(target, ty)| format!("'{target}': {ty}"))
        .collect();
    format!("{{{}}}", entries.join(", "))
}
