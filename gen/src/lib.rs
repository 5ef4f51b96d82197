//! Restive code generator library.
//!
//! This crate compiles declarative resource-interface documents
//! (`*.restspec.json`, the model in `restive-define`) into strongly-typed
//! request-builder clients targeting the `restive-client` runtime. The
//! compiler walks each resource tree into a descriptor forest — one
//! facade per resource, one builder per operation — and a separate
//! emitter renders the forest to Rust source.
//!
//! ## Modules
//!
//! - [`naming`] - Identifier normalization (camelCase / PascalCase / snake_case)
//! - [`uri`] - URI templates and path-variable extraction
//! - [`resolver`] - Type-resolver adapter over the external type system
//! - [`keys`] - Key-shape derivation (simple, composite, compound, none)
//! - [`descriptor`] - The compiled descriptor model
//! - [`validation`] - Structural validation of parsed documents
//! - [`builders`] - Builder-descriptor synthesis per operation
//! - [`walker`] - Recursive resource-tree traversal
//! - [`context`] - Per-run compilation state
//! - [`driver`] - Ingestion, aggregation, staleness, emission
//! - [`emit`] - Rendering descriptors to Rust source
//! - [`output`] - Atomic file writing and the staleness oracle
//! - [`errors`] - Error taxonomy and aggregated diagnostics
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::{Path, PathBuf};
//!
//! use restive_gen::driver;
//! use restive_gen::resolver::TypeRegistry;
//!
//! let registry = TypeRegistry::new();
//! let result = driver::run(
//!     &[PathBuf::from("idl")],
//!     Path::new("generated/src"),
//!     &registry,
//!     false,
//! )
//! .unwrap();
//!
//! for diagnostic in &result.diagnostics {
//!     eprintln!("{}", diagnostic);
//! }
//! ```
//!
//! ## Compilation Flow
//!
//! 1. The driver discovers and parses documents, aggregating parse
//!    failures instead of stopping at the first
//! 2. The walker validates each resource, derives its key shape, and
//!    threads the path-key chain down to nested sub-resources
//! 3. Builder descriptors are synthesized per CRUD operation, finder,
//!    and action
//! 4. When targets are stale, the emitter renders each facade tree and
//!    writes one module file per top-level resource

pub mod builders;
pub mod context;
pub mod descriptor;
pub mod driver;
pub mod emit;
pub mod errors;
pub mod keys;
pub mod naming;
pub mod output;
pub mod resolver;
pub mod uri;
pub mod validation;
pub mod walker;
