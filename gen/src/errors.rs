//! Error types and diagnostics for the compiler.
//!
//! Two reporting channels exist. [`CompilerError`] is the typed failure
//! of one unit of work (a resource, a file, an output); the driver
//! converts unit failures into [`Diagnostic`]s and keeps going, so one
//! bad resource never aborts a batch. Internal invariant violations —
//! states the compiler itself is responsible for preventing — are not
//! errors at all: they panic with full context, because they indicate a
//! bug in the compiler rather than bad input.

use std::fmt;

use thiserror::Error;

use crate::resolver::TypeResolutionError;

/// Errors that can occur while compiling resource documents.
#[derive(Debug, Error)]
pub enum CompilerError {
    /// A resource failed structural validation. Fatal for that resource,
    /// non-fatal for the batch.
    #[error("resource '{resource}' failed validation: {}", .violations.join("; "))]
    SchemaValidation {
        /// Name of the offending resource.
        resource: String,
        /// Individual violations, in document order.
        violations: Vec<String>,
    },

    /// None of collection, association, or actionsSet is populated — or
    /// more than one is.
    #[error(
        "unsupported resource shape for resource '{resource}': exactly one of collection, association, or actionsSet must be populated"
    )]
    UnsupportedResourceShape {
        /// Name of the offending resource.
        resource: String,
    },

    /// A key, value, or parameter type reference did not resolve.
    #[error(transparent)]
    TypeResolution(#[from] TypeResolutionError),

    /// A document is not valid JSON for the resource model. Fatal for
    /// that file only.
    #[error("failed to parse resource document '{path}': {detail}")]
    Parse {
        /// Path of the offending file.
        path: String,
        /// Parser detail message.
        detail: String,
    },

    /// Two association keys or two path segments collide on one name.
    #[error("duplicate key name '{name}' in resource '{resource}'")]
    DuplicateKeyName {
        /// Name of the offending resource.
        resource: String,
        /// The colliding key name.
        name: String,
    },

    /// Generated code failed to parse as Rust.
    #[error("generated code for '{unit}' failed to parse: {detail}")]
    Emit {
        /// The descriptor being rendered.
        unit: String,
        /// Parser detail message.
        detail: String,
    },

    /// An output file could not be written.
    #[error("failed to write output file '{path}': {source}")]
    Write {
        /// Path of the output file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A source file or directory does not exist.
    #[error("source path does not exist: {0}")]
    SourceNotFound(String),

    /// A source file or directory could not be read.
    #[error("failed to read source '{path}': {source}")]
    Read {
        /// Path of the source.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The batch had exactly one input and it failed.
    #[error("compilation of sole input '{path}' failed: {message}")]
    SoleInputFailed {
        /// Path of the failed input.
        path: String,
        /// The failure it produced.
        message: String,
    },
}

/// One aggregated problem: where it happened and what went wrong.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// File path or resource path the problem is scoped to.
    pub path: String,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    /// Creates a diagnostic.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}
