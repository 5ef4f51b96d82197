//! Compilation driver: ingestion, aggregation, emission.
//!
//! The driver discovers resource documents, parses and compiles each one,
//! and aggregates every problem into one diagnostic list instead of
//! failing fast — one malformed file or resource never aborts the batch.
//! The only exception is a batch whose sole input fails, which is an
//! error in its own right.
//!
//! Emission goes through the staleness oracle first: when every target
//! is newer than every source, the run reports zero modified files and
//! writes nothing.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use restive_define::ResourceSchema;

use crate::context::CompilationContext;
use crate::descriptor::{FacadeDescriptor, PathKeyChain};
use crate::emit::render_facade_module;
use crate::errors::{CompilerError, Diagnostic};
use crate::naming::snake_case;
use crate::output::{up_to_date, write_source_file};
use crate::resolver::TypeLookup;
use crate::walker::walk_resource;

/// Recognized extension for resource documents.
pub const RESOURCE_FILE_EXTENSION: &str = ".restspec.json";

/// Outcome of compiling a batch of documents, before emission.
#[derive(Debug)]
pub struct CompileResult {
    /// Successfully compiled facades, in source order.
    pub facades: Vec<FacadeDescriptor>,
    /// Aggregated problems across all inputs.
    pub diagnostics: Vec<Diagnostic>,
    /// Every source file that was read.
    pub source_files: Vec<PathBuf>,
}

/// Outcome of a full run, emission included.
#[derive(Debug)]
pub struct RunResult {
    /// Every source file that was read.
    pub source_files: Vec<PathBuf>,
    /// Every target file the facades map to.
    pub target_files: Vec<PathBuf>,
    /// Target files actually (re)generated this run; empty when targets
    /// were up to date.
    pub modified_files: Vec<PathBuf>,
    /// Aggregated problems across all inputs.
    pub diagnostics: Vec<Diagnostic>,
    /// Successfully compiled facades, in source order.
    pub facades: Vec<FacadeDescriptor>,
}

/// Expands files and directories into the list of documents to compile.
///
/// Directories are searched one level deep for files with the recognized
/// extension, sorted by name for deterministic batch order. Explicit
/// file arguments are taken as-is.
///
/// ## Errors
///
/// Returns [`CompilerError::SourceNotFound`] when an argument names
/// nothing on disk.
pub fn discover_sources(paths: &[PathBuf]) -> Result<Vec<PathBuf>, CompilerError> {
    let mut sources = Vec::new();
    for path in paths {
        if !path.exists() {
            return Err(CompilerError::SourceNotFound(path.display().to_string()));
        }
        if path.is_dir() {
            let mut entries: Vec<PathBuf> = fs::read_dir(path)
                .map_err(|source| CompilerError::Read {
                    path: path.display().to_string(),
                    source,
                })?
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|entry| {
                    entry
                        .file_name()
                        .and_then(|name| name.to_str())
                        .is_some_and(|name| name.ends_with(RESOURCE_FILE_EXTENSION))
                })
                .collect();
            entries.sort();
            sources.extend(entries);
        } else {
            sources.push(path.clone());
        }
    }
    Ok(sources)
}

/// Parses and compiles every source document, aggregating failures.
pub fn compile_sources(sources: &[PathBuf], lookup: &dyn TypeLookup) -> CompileResult {
    let mut ctx = CompilationContext::new(lookup);
    let mut parsed: Vec<(PathBuf, ResourceSchema)> = Vec::new();

    for path in sources {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                ctx.diagnostic(path.display().to_string(), err.to_string());
                continue;
            }
        };
        match serde_json::from_str::<ResourceSchema>(&text) {
            Ok(resource) => parsed.push((path.clone(), resource)),
            Err(err) => {
                let parse = CompilerError::Parse {
                    path: path.display().to_string(),
                    detail: err.to_string(),
                };
                ctx.diagnostic(path.display().to_string(), parse.to_string());
            }
        }
    }

    // Two documents declaring the same resource would derive colliding
    // facade names; report the duplicate instead of tripping the
    // internal-collision check.
    let mut seen: HashSet<(Option<String>, String)> = HashSet::new();
    let mut facades = Vec::new();
    for (path, resource) in parsed {
        if !seen.insert((resource.namespace.clone(), resource.name.clone())) {
            ctx.diagnostic(
                path.display().to_string(),
                format!("duplicate resource '{}' in batch", resource.name),
            );
            continue;
        }
        match walk_resource(&resource, &PathKeyChain::new(), &mut ctx) {
            Ok(facade) => facades.push(facade),
            Err(err) => ctx.diagnostic(path.display().to_string(), err.to_string()),
        }
    }

    CompileResult {
        facades,
        diagnostics: ctx.diagnostics,
        source_files: sources.to_vec(),
    }
}

/// The target file one facade renders to.
fn target_file(target_dir: &Path, facade: &FacadeDescriptor) -> PathBuf {
    target_dir.join(format!("{}.rs", snake_case(&facade.resource_name)))
}

/// Compiles the given source paths and renders the facades into
/// `target_dir`, one file per top-level resource.
///
/// With `dry_run`, everything is compiled and rendered but nothing is
/// written; `modified_files` still reports what a real run would have
/// written.
///
/// ## Errors
///
/// Returns an error when a source path does not exist, when the batch's
/// sole input fails to compile, or when rendering or writing an output
/// fails.
pub fn run(
    source_paths: &[PathBuf],
    target_dir: &Path,
    lookup: &dyn TypeLookup,
    dry_run: bool,
) -> Result<RunResult, CompilerError> {
    let sources = discover_sources(source_paths)?;
    let compiled = compile_sources(&sources, lookup);

    if compiled.facades.is_empty() && sources.len() == 1 && !compiled.diagnostics.is_empty() {
        let diagnostic = &compiled.diagnostics[0];
        return Err(CompilerError::SoleInputFailed {
            path: diagnostic.path.clone(),
            message: diagnostic.message.clone(),
        });
    }

    let target_files: Vec<PathBuf> = compiled
        .facades
        .iter()
        .map(|facade| target_file(target_dir, facade))
        .collect();

    let mut modified_files = Vec::new();
    if !up_to_date(&sources, &target_files) {
        for (facade, target) in compiled.facades.iter().zip(&target_files) {
            let rendered = render_facade_module(facade)?;
            if !dry_run {
                write_source_file(target, &rendered)?;
            }
            modified_files.push(target.clone());
        }
    }

    Ok(RunResult {
        source_files: compiled.source_files,
        target_files,
        modified_files,
        diagnostics: compiled.diagnostics,
        facades: compiled.facades,
    })
}
