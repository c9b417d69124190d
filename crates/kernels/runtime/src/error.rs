//! Errors raised while building and calling concatenated functions.
//!
//! Two families of errors exist:
//!
//! - **Build errors** are raised by [`create_dag`](crate::create_dag) and
//!   [`concatenate_functions`](crate::concatenate_functions) before any user
//!   function runs: [`Error::MissingFunctions`], [`Error::CyclicDependency`]
//!   and [`Error::AnnotationMismatch`].
//! - **Call errors** are raised per invocation of a compiled function:
//!   argument binding failures, and [`Error::Function`] when a user body
//!   itself fails.
//!
//! A failed build never executes anything. A failed binding never executes
//! anything either; only [`Error::Function`] can occur after some functions
//! have already run.

use thiserror::Error;

/// Runtime result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type returned by user function bodies.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while building or calling a concatenated function.
#[derive(Debug, Error)]
pub enum Error {
    /// Some requested targets are not the name of any supplied function.
    #[error(
        "The following targets have no corresponding function:\n{}",
        format_list_linewise(targets)
    )]
    MissingFunctions {
        /// The unknown target names, in request order.
        targets: Vec<String>,
    },

    /// The functions depend on each other in a cycle.
    ///
    /// `cycle` lists one concrete cycle, starting and ending at the same
    /// function, in data-flow order (each entry feeds the next).
    #[error("The DAG contains at least one cycle: {}", cycle.join(" → "))]
    CyclicDependency {
        /// One cycle, closed (first == last).
        cycle: Vec<String>,
        /// Every function that could not be scheduled.
        involved_nodes: Vec<String>,
    },

    /// Two annotations for the same argument disagree.
    #[error("{}", annotation_mismatch_message(function, argument, annotated, expected, *produced_by_function))]
    AnnotationMismatch {
        /// Function declaring the conflicting parameter annotation.
        function: String,
        /// The argument name.
        argument: String,
        /// The annotation on `function`'s parameter.
        annotated: String,
        /// The annotation seen earlier for the same argument.
        expected: String,
        /// `true` if `expected` is the return annotation of a function named
        /// `argument`, `false` if it came from another parameter annotation.
        produced_by_function: bool,
    },

    /// More positional arguments were given than the signature declares.
    #[error("{function}() takes {expected} positional arguments but {given} were given")]
    TooManyPositionalArguments {
        /// Name of the called function.
        function: String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of positional values supplied.
        given: usize,
    },

    /// Arguments were supplied both positionally and by keyword.
    #[error("{function}() got multiple values for argument(s) {}", quote_list(arguments))]
    DuplicateArguments {
        /// Name of the called function.
        function: String,
        /// The duplicated argument names.
        arguments: Vec<String>,
    },

    /// Keyword arguments that the signature does not declare.
    #[error("{function}() got unexpected keyword argument(s) {}", quote_list(arguments))]
    UnexpectedKeywordArguments {
        /// Name of the called function.
        function: String,
        /// The unknown keyword names.
        arguments: Vec<String>,
    },

    /// Declared arguments that were not supplied.
    #[error("{function}() missing required argument(s) {}", quote_list(arguments))]
    MissingArguments {
        /// Name of the called function.
        function: String,
        /// The missing argument names, in signature order.
        arguments: Vec<String>,
    },

    /// A function body asked for an argument it was not given.
    #[error("argument '{name}' was not passed to the function")]
    MissingArgument {
        /// The requested argument name.
        name: String,
    },

    /// An aggregator was requested over zero targets.
    #[error("cannot aggregate an empty set of targets")]
    EmptyOutput,

    /// A user function body returned an error.
    #[error("function '{name}' failed: {source}")]
    Function {
        /// Name of the failing function.
        name: String,
        /// The error returned by the body.
        #[source]
        source: BoxError,
    },

    /// An option string could not be parsed.
    #[error("invalid value '{value}' for {option}, expected one of: {expected}")]
    InvalidOption {
        /// The option being parsed.
        option: &'static str,
        /// The rejected input.
        value: String,
        /// Accepted spellings.
        expected: &'static str,
    },
}

/// Formats a list with one quoted item per line, for multi-line error messages.
///
/// ```
/// use dagfuse_runtime::format_list_linewise;
///
/// assert_eq!(format_list_linewise(&["a", "b"]), "[\n    'a',\n    'b',\n]");
/// ```
pub fn format_list_linewise<S: AsRef<str>>(items: &[S]) -> String {
    let body: String = items
        .iter()
        .map(|item| format!("    '{}',\n", item.as_ref()))
        .collect();
    format!("[\n{body}]")
}

fn quote_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("'{item}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn annotation_mismatch_message(
    function: &str,
    argument: &str,
    annotated: &str,
    expected: &str,
    produced_by_function: bool,
) -> String {
    let origin = if produced_by_function {
        format!("function {argument} has return type: {expected}.")
    } else {
        format!("type annotation '{argument}: {expected}' is used elsewhere.")
    };
    format!(
        "function {function} has the argument type annotation '{argument}: {annotated}', \
         but {origin}"
    )
}
