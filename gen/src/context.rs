//! Per-run compilation state.
//!
//! One [`CompilationContext`] is created fresh per run, threaded
//! explicitly through the walker and builder generation, and discarded
//! at the end. There is no process-wide generator state.

use std::collections::HashSet;

use crate::errors::Diagnostic;
use crate::resolver::{TypeLookup, TypeResolver};

/// State threaded through one compilation run.
pub struct CompilationContext<'a> {
    /// The memoizing type-resolver adapter.
    pub resolver: TypeResolver<'a>,
    /// Aggregated non-fatal problems.
    pub diagnostics: Vec<Diagnostic>,
    claimed_type_names: HashSet<String>,
}

impl<'a> CompilationContext<'a> {
    /// Creates a fresh context over the given type system.
    pub fn new(lookup: &'a dyn TypeLookup) -> Self {
        Self {
            resolver: TypeResolver::new(lookup),
            diagnostics: Vec::new(),
            claimed_type_names: HashSet::new(),
        }
    }

    /// Records a non-fatal problem scoped to `path`.
    pub fn diagnostic(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::new(path, message));
    }

    /// Claims a generated type name within `namespace`.
    ///
    /// Validation rejects every input that could legitimately produce the
    /// same name twice, so a second claim means the compiler itself
    /// derived colliding names.
    ///
    /// ## Panics
    ///
    /// Panics on a repeated claim; this is a defect in the compiler, not
    /// a user-facing error.
    pub fn claim_type_name(&mut self, namespace: Option<&str>, type_name: &str) {
        let qualified = format!("{}:{}", namespace.unwrap_or(""), type_name);
        if !self.claimed_type_names.insert(qualified) {
            panic!(
                "generated type name '{}' (namespace {:?}) was derived twice; \
                 this is a bug in the compiler, not in the input",
                type_name, namespace
            );
        }
    }
}
