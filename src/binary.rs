//! Locating the massdns binary.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::Error;

/// The command name massdns is usually installed under.
pub const DEFAULT_BINARY: &str = "massdns";

/// Resolves a command name or path to the path of an executable.
///
/// A name containing a path separator is used as is and only checked for
/// being an executable file. Anything else is searched for in the
/// directories listed in the `PATH` environment variable, the same way a
/// shell would.
pub fn lookup(name: impl AsRef<OsStr>) -> Result<PathBuf, Error> {
    let name = name.as_ref();
    let not_found = || Error::BinaryNotFound(name.to_string_lossy().into());
    if name.is_empty() {
        return Err(not_found());
    }

    let path = Path::new(name);
    if path.components().count() > 1 {
        return if is_executable(path) {
            Ok(path.into())
        } else {
            Err(not_found())
        };
    }

    let search = env::var_os("PATH").ok_or_else(not_found)?;
    env::split_paths(&search)
        .map(|dir| dir.join(path))
        .find(|candidate| {
            trace!("Trying {}", candidate.display());
            is_executable(candidate)
        })
        .ok_or_else(not_found)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

//============ Tests =========================================================
