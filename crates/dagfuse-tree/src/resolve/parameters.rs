//! Parameter resolution.
//!
//! A function nested at namespace `N` may refer to other entities by a bare
//! name or by a qualified name. Resolution turns every parameter into the
//! absolute path of the function or input it refers to:
//!
//! 1. A qualified name (`a__b`) is already absolute.
//! 2. A bare name in the top-level namespace is a top-level reference.
//! 3. Anything else is relative to `N`, or for inputs at the top level when
//!    [`InputNamespace::Global`] is set.
//!
//! The first match wins. A bare name that exists both at the top level and
//! in `N` is a parent/child name clash and is left to the clash policy.
//!
//! The top-level namespace is passed in explicitly; there is no global
//! state.

use dagfuse_foundation::{TreePath, is_qualified_name};
use indexmap::{IndexMap, IndexSet};
use tracing::trace;

use crate::options::InputNamespace;

/// Known entities and the top-level namespace used for resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    top_level_namespace: IndexSet<String>,
    entities: IndexSet<TreePath>,
    namespace_of_inputs: InputNamespace,
}

impl Scope {
    /// Builds a scope from entity paths.
    ///
    /// The top-level namespace is the set of first segments of all entity
    /// paths plus `top_level_inputs`, which also become entities.
    pub fn new<'a, 'b, P, I>(entities: P, top_level_inputs: I) -> Self
    where
        P: IntoIterator<Item = &'a TreePath>,
        I: IntoIterator<Item = &'b str>,
    {
        let mut scope = Self::default();
        for path in entities {
            scope.insert(path.clone());
        }
        for input in top_level_inputs {
            scope.insert(TreePath::from([input]));
        }
        scope
    }

    fn insert(&mut self, path: TreePath) {
        if let Some(first) = path.first() {
            self.top_level_namespace.insert(first.to_string());
        }
        self.entities.insert(path);
    }

    pub fn with_namespace_of_inputs(mut self, namespace_of_inputs: InputNamespace) -> Self {
        self.namespace_of_inputs = namespace_of_inputs;
        self
    }

    pub fn top_level_namespace(&self) -> &IndexSet<String> {
        &self.top_level_namespace
    }

    pub fn contains(&self, path: &TreePath) -> bool {
        self.entities.contains(path)
    }

    /// Resolves `parameter` of a function living in `namespace`.
    pub fn resolve(&self, parameter: &str, namespace: &TreePath) -> TreePath {
        if is_qualified_name(parameter) {
            return TreePath::from_qname(parameter);
        }

        if self.top_level_namespace.contains(parameter) {
            return TreePath::from([parameter]);
        }
        let local = namespace.append(parameter);
        match self.namespace_of_inputs {
            InputNamespace::Global if !self.entities.contains(&local) => {
                TreePath::from([parameter])
            }
            _ => local,
        }
    }

    /// Maps each parameter to the qualified name it resolves to.
    pub fn parameter_mapper<S: AsRef<str>>(
        &self,
        parameters: &[S],
        namespace: &TreePath,
    ) -> IndexMap<String, String> {
        parameters
            .iter()
            .map(|parameter| {
                let parameter = parameter.as_ref();
                let resolved = self.resolve(parameter, namespace).qname();
                trace!(parameter, namespace = %namespace, resolved = %resolved, "parameter resolved");
                (parameter.to_string(), resolved)
            })
            .collect()
    }
}
