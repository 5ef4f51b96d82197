//! Restive Code Generator
//!
//! Compiles resource interface documents into typed request-builder
//! clients.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use restive_gen::driver;
use restive_gen::errors::CompilerError;
use restive_gen::resolver::TypeRegistry;

/// Restive code generator - transforms resource documents into typed
/// request-builder clients
#[derive(Parser, Debug)]
#[command(name = "restive-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Resource document files or directories containing *.restspec.json
    #[arg(required = true)]
    sources: Vec<PathBuf>,

    /// Output directory for generated code
    #[arg(short, long, default_value = "generated/src")]
    output: String,

    /// Compile and render without writing files
    #[arg(long)]
    dry_run: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose > 0 {
        eprintln!("Compiling {} source path(s)", cli.sources.len());
        eprintln!("Output directory: {}", cli.output);
        if cli.dry_run {
            eprintln!("Dry run mode - no files will be written");
        }
    }

    let registry = TypeRegistry::new();
    let result = match driver::run(
        &cli.sources,
        Path::new(&cli.output),
        &registry,
        cli.dry_run,
    ) {
        Ok(result) => result,
        Err(err) => {
            report_error(&err);
            return ExitCode::FAILURE;
        }
    };

    for diagnostic in &result.diagnostics {
        eprintln!("{} {}", "error:".red().bold(), diagnostic);
    }

    if cli.verbose > 0 {
        if result.modified_files.is_empty() {
            eprintln!(
                "{} target files are up to date",
                "ok:".green().bold()
            );
        } else {
            for target in &result.modified_files {
                eprintln!("{} {}", "wrote:".green().bold(), target.display());
            }
        }
    }
    if cli.verbose > 1 {
        for facade in &result.facades {
            eprintln!(
                "  {} ({} builders, {} subresources)",
                facade.type_name,
                facade.builders.len(),
                facade.subresources.len()
            );
        }
    }

    if result.diagnostics.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn report_error(err: &CompilerError) {
    eprintln!("{} {}", "error:".red().bold(), err);
}
