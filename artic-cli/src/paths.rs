//! Platform-specific directory paths.

use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "edu";
const ORGANIZATION: &str = "artic";
const APPLICATION: &str = "artic-browser";

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the path to the latest log file.
///
/// - Linux: `$XDG_CACHE_HOME/artic-browser/latest.log` or `~/.cache/artic-browser/latest.log`
/// - macOS: `~/Library/Caches/edu.artic.artic-browser/latest.log`
/// - Windows: `C:\Users\<User>\AppData\Local\artic\artic-browser\cache\latest.log`
pub fn log_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().join("latest.log"))
}
