//! Workspace roots and local package references

use crate::error::{XgoError, XgoResult};
use std::env;
use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

/// Environment variable listing the workspace roots
pub const GOPATH_ENV: &str = "GOPATH";

/// Whether a package reference names a directory rather than an import path
pub fn is_local_reference(reference: &str) -> bool {
    reference.starts_with(MAIN_SEPARATOR) || reference.starts_with('.')
}

/// Workspace roots from the current `GOPATH`
pub fn workspace_roots() -> Vec<PathBuf> {
    workspace_roots_from(env::var_os(GOPATH_ENV))
}

/// Split a `GOPATH` value into its ordered roots.
///
/// Empty elements are dropped. With nothing left, the Go default
/// `$HOME/go` is used.
pub fn workspace_roots_from(value: Option<OsString>) -> Vec<PathBuf> {
    let roots: Vec<PathBuf> = value
        .as_deref()
        .map(|v| {
            env::split_paths(v)
                .filter(|p| !p.as_os_str().is_empty())
                .collect()
        })
        .unwrap_or_default();

    if !roots.is_empty() {
        return roots;
    }
    dirs::home_dir()
        .map(|home| vec![home.join("go")])
        .unwrap_or_default()
}

/// Absolute, lexically cleaned form of `path`.
///
/// `.` components are dropped and `..` pops the previous component, without
/// touching the filesystem. Symbolic links are left unresolved.
pub fn absolute_path(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;

    let mut cleaned = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other),
        }
    }
    Ok(cleaned)
}

/// Turn a path-form package reference into an absolute directory
pub fn resolve_package_dir(reference: &str) -> XgoResult<PathBuf> {
    let path = Path::new(reference);
    let absolute = absolute_path(path).map_err(|e| XgoError::PackageLocate {
        path: path.to_path_buf(),
        source: e,
    })?;

    let metadata = std::fs::metadata(&absolute).map_err(|e| XgoError::PackageLocate {
        path: absolute.clone(),
        source: e,
    })?;
    if !metadata.is_dir() {
        return Err(XgoError::PackageNotDirectory(absolute));
    }
    Ok(absolute)
}
