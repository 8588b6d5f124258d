//! Config file discovery.
//!
//! The search chain is fixed and stops at the first regular file found:
//!
//! 1. the candidate path the caller passed (usually from `--cnf`),
//! 2. `cnf.toml` in the current working directory,
//! 3. `cnf.toml` next to the running executable.
//!
//! Nothing is read here; [`decode`](crate::decode) does the reading.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::CnfError;

/// File name looked up in the fallback directories.
pub const DEFAULT_FILE_NAME: &str = "cnf.toml";

/// Resolve the config file for `candidate` using the process's working
/// directory and executable location.
pub fn find_file(candidate: &Path) -> Result<PathBuf, CnfError> {
    let cwd = std::env::current_dir().ok();
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    find_file_in(candidate, cwd.as_deref(), exe_dir.as_deref())
}

/// Like [`find_file`] with explicit fallback directories.
///
/// An empty `candidate` is skipped. Directories that are `None` (e.g. the
/// working directory was deleted) are skipped as well.
pub fn find_file_in(
    candidate: &Path,
    cwd: Option<&Path>,
    exe_dir: Option<&Path>,
) -> Result<PathBuf, CnfError> {
    let explicit = (!candidate.as_os_str().is_empty()).then(|| candidate.to_path_buf());
    let fallbacks = [cwd, exe_dir]
        .into_iter()
        .flatten()
        .map(|dir| dir.join(DEFAULT_FILE_NAME));

    for path in explicit.into_iter().chain(fallbacks) {
        if path.is_file() {
            debug!(event = "cnf.file.found", path = %path.display());
            return Ok(path);
        }
    }

    Err(CnfError::NotFound {
        candidate: candidate.to_path_buf(),
    })
}

/// Expand a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, and all paths when no home directory can be
/// determined, are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };
    match directories::UserDirs::new() {
        Some(user) if rest.is_empty() => user.home_dir().to_path_buf(),
        Some(user) => user.home_dir().join(rest),
        None => PathBuf::from(path),
    }
}
