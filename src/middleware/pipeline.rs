//! Ordered, short-circuiting step execution.
//!
//! A [`Pipeline`] is a named list of named steps. Each step looks at a
//! read-only environment `T` and a per-request context `C`, and either lets
//! the request through or stops it with an error. [`Pipeline::run`] calls the
//! steps in registration order and returns the first error; no later step
//! runs after a failure.
//!
//! ```rust
//! use grubdash::middleware::Pipeline;
//!
//! fn positive(_: &(), n: &mut i64) -> Result<(), String> {
//!     if *n > 0 { Ok(()) } else { Err(format!("{n} is not positive")) }
//! }
//!
//! fn even(_: &(), n: &mut i64) -> Result<(), String> {
//!     if *n % 2 == 0 { Ok(()) } else { Err(format!("{n} is odd")) }
//! }
//!
//! let chain = Pipeline::new("numbers").step("positive", positive).step("even", even);
//! assert_eq!(chain.run(&(), &mut 4), Ok(()));
//! assert_eq!(chain.run(&(), &mut -3), Err("-3 is not positive".to_owned()));
//! ```

use std::fmt;

use tracing::{debug, trace};

/// A named, ordered chain of steps with fail-fast semantics.
///
/// Steps are plain `fn` pointers: they inspect the environment and may enrich
/// the context for the steps after them.
pub struct Pipeline<T: ?Sized, C, E> {
    name: &'static str,
    steps: Vec<(&'static str, fn(&T, &mut C) -> Result<(), E>)>,
}

impl<T: ?Sized, C, E> Pipeline<T, C, E> {
    pub fn new(name: &'static str) -> Self {
        Self { name, steps: Vec::new() }
    }

    /// Appends a step. Returns `self` for chaining.
    pub fn step(mut self, name: &'static str, f: fn(&T, &mut C) -> Result<(), E>) -> Self {
        self.steps.push((name, f));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Step names in execution order.
    pub fn steps(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.steps.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl<T: ?Sized, C, E: fmt::Display> Pipeline<T, C, E> {
    /// Runs every step in order, stopping at the first failure.
    pub fn run(&self, env: &T, cx: &mut C) -> Result<(), E> {
        for (step, f) in &self.steps {
            if let Err(e) = f(env, cx) {
                debug!(chain = self.name, step, error = %e, "chain rejected request");
                return Err(e);
            }
            trace!(chain = self.name, step, "step passed");
        }
        Ok(())
    }
}

impl<T: ?Sized, C, E> fmt::Debug for Pipeline<T, C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field("steps", &self.steps().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Seen(Vec<&'static str>);

    fn first(_: &str, cx: &mut Seen) -> Result<(), String> {
        cx.0.push("first");
        Ok(())
    }

    fn reject(env: &str, cx: &mut Seen) -> Result<(), String> {
        cx.0.push("reject");
        Err(format!("rejected by {env}"))
    }

    fn never(_: &str, cx: &mut Seen) -> Result<(), String> {
        cx.0.push("never");
        Ok(())
    }

    #[test]
    fn stops_at_first_failure() {
        let chain = Pipeline::new("t")
            .step("first", first)
            .step("reject", reject)
            .step("never", never);
        let mut seen = Seen(Vec::new());

        let err = chain.run("env", &mut seen).unwrap_err();

        assert_eq!(err, "rejected by env");
        assert_eq!(seen.0, ["first", "reject"]);
    }

    #[test]
    fn empty_chain_passes() {
        let chain: Pipeline<str, Seen, String> = Pipeline::new("empty");
        assert!(chain.is_empty());
        assert!(chain.run("env", &mut Seen(Vec::new())).is_ok());
    }

    #[test]
    fn lists_steps_in_order() {
        let chain = Pipeline::new("t").step("first", first).step("never", never);
        assert_eq!(chain.steps().collect::<Vec<_>>(), ["first", "never"]);
        assert_eq!(chain.len(), 2);
    }
}
