//! Integration test harness for dagfuse.
//!
//! Provides the shared fixtures for end-to-end tests: a recording function
//! registry that remembers which functions ran, the labour-supply example
//! used throughout the docs, and logging setup.

use std::sync::{Arc, Mutex};

use dagfuse_runtime::{Args, FnCallable, FunctionMap, SharedFn};
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize logging for tests.
///
/// Use the `RUST_LOG` environment variable to override the default filter.
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("warn,dagfuse_runtime=debug,dagfuse_tree=debug")
    });

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_test_writer()
        .try_init();
}

/// A function registry that records every call.
#[derive(Default)]
pub struct TestHarness {
    functions: FunctionMap<i64>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` with `parameters`; calls are logged before `body` runs.
    pub fn register<F>(&mut self, name: &str, parameters: &[&str], body: F) -> &mut Self
    where
        F: Fn(&Args<i64>) -> i64 + Send + Sync + 'static,
    {
        let function = recording(name, parameters, &self.calls, body);
        self.insert(name, function);
        self
    }

    /// Like [`register`](Self::register), with type annotations.
    pub fn register_typed<F>(
        &mut self,
        name: &str,
        parameters: &[(&str, &str)],
        returns: &str,
        body: F,
    ) -> &mut Self
    where
        F: Fn(&Args<i64>) -> i64 + Send + Sync + 'static,
    {
        let names: Vec<&str> = parameters.iter().map(|(name, _)| *name).collect();
        let calls = Arc::clone(&self.calls);
        let label = name.to_string();
        let function = FnCallable::new(names, move |args: &Args<i64>| {
            record(&calls, &label);
            Ok(body(args))
        })
        .with_annotations(parameters, returns)
        .shared();
        self.insert(name, function);
        self
    }

    fn insert(&mut self, name: &str, function: SharedFn<i64>) {
        self.functions.insert(name.to_string(), function);
    }

    pub fn functions(&self) -> &FunctionMap<i64> {
        &self.functions
    }

    /// Names of the functions called so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    pub fn clear_calls(&self) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.clear();
        }
    }
}

fn record(calls: &Mutex<Vec<String>>, name: &str) {
    if let Ok(mut calls) = calls.lock() {
        calls.push(name.to_string());
    }
}

/// Wraps `body` so that every call is logged in `calls` under `name`.
pub fn recording<F>(
    name: &str,
    parameters: &[&str],
    calls: &Arc<Mutex<Vec<String>>>,
    body: F,
) -> SharedFn<i64>
where
    F: Fn(&Args<i64>) -> i64 + Send + Sync + 'static,
{
    let calls = Arc::clone(calls);
    let label = name.to_string();
    FnCallable::new(parameters.to_vec(), move |args: &Args<i64>| {
        record(&calls, &label);
        Ok(body(args))
    })
    .shared()
}

fn arg(args: &Args<i64>, name: &str) -> i64 {
    args.try_get(name).copied().unwrap_or_default()
}

/// The labour-supply example: `utility`, `leisure` and `consumption`, in
/// that order.
///
/// With `hours = 8`, `wage = 5` and `weight = 2`: leisure is 16,
/// consumption is 40 and utility is `40 + 2 * 16 = 72`.
pub fn labour_supply() -> TestHarness {
    let mut harness = TestHarness::new();
    harness
        .register_typed(
            "utility",
            &[("consumption", "float"), ("leisure", "int"), ("weight", "float")],
            "float",
            |a| arg(a, "consumption") + arg(a, "weight") * arg(a, "leisure"),
        )
        .register_typed("leisure", &[("hours", "int")], "int", |a| {
            24 - arg(a, "hours")
        })
        .register_typed(
            "consumption",
            &[("hours", "int"), ("wage", "float")],
            "float",
            |a| arg(a, "wage") * arg(a, "hours"),
        );
    harness
}
