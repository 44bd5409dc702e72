//! check external executables are reachable before any work starts

use std::env;
use std::path::{Path, PathBuf};

use crate::errors::PipelineError;

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    match path.metadata() {
        Ok(md) => md.is_file() && (md.permissions().mode() & 0o111 != 0),
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Resolves name to an executable path.
/// A name containing a path separator is taken as is, a bare name is searched in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    let path = Path::new(name);
    if path.components().count() > 1 || path.is_absolute() {
        return if is_executable(path) {
            Some(path.to_path_buf())
        } else {
            None
        };
    }
    //
    let paths = env::var_os("PATH")?;
    for dir in env::split_paths(&paths) {
        let full_path = dir.join(name);
        if is_executable(&full_path) {
            log::trace!("found {} at {:?}", name, full_path);
            return Some(full_path);
        }
    }
    None
} // end of find_executable

/// Checks all executables. Returns MissingDependency naming every missing one, not just the first.
pub fn check_dependencies<S: AsRef<str>>(names: &[S]) -> Result<(), PipelineError> {
    let missing: Vec<String> = names
        .iter()
        .map(|n| n.as_ref())
        .filter(|n| find_executable(n).is_none())
        .map(String::from)
        .collect();
    //
    if missing.is_empty() {
        log::debug!("all dependencies found");
        Ok(())
    } else {
        log::error!("missing dependencies : {:?}", missing);
        Err(PipelineError::MissingDependency { missing })
    }
} // end of check_dependencies

//=========================================================================

// end of mod tests
