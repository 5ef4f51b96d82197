//! Output file writing and the staleness oracle.
//!
//! Writes are atomic (temp file + rename) so a crash never leaves a
//! half-written source file. The staleness check compares input and
//! output modification times; the driver skips emission entirely when
//! every output is newer than every input, which keeps re-runs against
//! unchanged inputs from reporting modified files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::errors::CompilerError;

/// Returns true when every output exists and is at least as new as the
/// newest input.
///
/// Empty `outputs` are trivially up to date (there is nothing to
/// produce). Any unreadable timestamp counts as stale, which errs on the
/// side of regeneration.
pub fn up_to_date(inputs: &[PathBuf], outputs: &[PathBuf]) -> bool {
    if outputs.is_empty() {
        return true;
    }

    let newest_input = match fold_mtimes(inputs, SystemTime::max) {
        Some(time) => time,
        None => return false,
    };
    let oldest_output = match fold_mtimes(outputs, SystemTime::min) {
        Some(time) => time,
        None => return false,
    };

    newest_input <= oldest_output
}

fn fold_mtimes(
    paths: &[PathBuf],
    pick: fn(SystemTime, SystemTime) -> SystemTime,
) -> Option<SystemTime> {
    let mut folded: Option<SystemTime> = None;
    for path in paths {
        let mtime = fs::metadata(path).and_then(|m| m.modified()).ok()?;
        folded = Some(match folded {
            Some(current) => pick(current, mtime),
            None => mtime,
        });
    }
    folded
}

/// Writes `contents` to `path` atomically, creating parent directories.
pub fn write_source_file(path: &Path, contents: &str) -> Result<(), CompilerError> {
    let write_error = |source: std::io::Error| CompilerError::Write {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, contents).map_err(write_error)?;
    fs::rename(&tmp, path).map_err(write_error)?;
    Ok(())
}
