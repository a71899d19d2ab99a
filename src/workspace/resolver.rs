//! Import path resolution for local package directories

use crate::error::{XgoError, XgoResult};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Maps a package directory to its canonical import path
#[async_trait]
pub trait ImportResolver: Send + Sync {
    async fn resolve(&self, dir: &Path) -> XgoResult<String>;
}

/// Resolves directories by their position under `<root>/src`
pub struct GopathResolver {
    roots: Vec<PathBuf>,
}

impl GopathResolver {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Import path of `dir` if it lives below one of the roots' `src` trees
    pub fn lookup(&self, dir: &Path) -> Option<String> {
        let resolved_dir = fs::canonicalize(dir).ok();

        self.roots.iter().find_map(|root| {
            let sources = root.join("src");
            let resolved_sources = fs::canonicalize(&sources).ok();

            let relative = dir.strip_prefix(&sources).ok().or_else(|| {
                let dir = resolved_dir.as_deref()?;
                dir.strip_prefix(resolved_sources.as_deref()?).ok()
            })?;

            let import_path = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            (!import_path.is_empty()).then_some(import_path)
        })
    }
}

#[async_trait]
impl ImportResolver for GopathResolver {
    async fn resolve(&self, dir: &Path) -> XgoResult<String> {
        self.lookup(dir).ok_or_else(|| XgoError::ImportPath {
            path: dir.to_path_buf(),
            reason: "not inside any GOPATH source tree".to_string(),
        })
    }
}

/// Asks the Go toolchain (`go list`) for the import path
pub struct GoListResolver {
    go_binary: String,
}

impl GoListResolver {
    pub fn new(go_binary: impl Into<String>) -> Self {
        Self {
            go_binary: go_binary.into(),
        }
    }
}

impl Default for GoListResolver {
    fn default() -> Self {
        Self::new("go")
    }
}

#[async_trait]
impl ImportResolver for GoListResolver {
    async fn resolve(&self, dir: &Path) -> XgoResult<String> {
        debug!("Executing: {} list in {}", self.go_binary, dir.display());

        let output = Command::new(&self.go_binary)
            .args(["list", "-f", "{{.ImportPath}}"])
            .current_dir(dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| XgoError::ImportPath {
                path: dir.to_path_buf(),
                reason: format!("running {} list: {}", self.go_binary, e),
            })?;

        if !output.status.success() {
            return Err(XgoError::ImportPath {
                path: dir.to_path_buf(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let import_path = stdout.lines().next().unwrap_or_default().trim();

        // `_/abs/path` is how Go names directories outside any workspace
        if import_path.is_empty() || import_path == "." || import_path.starts_with("_/") {
            return Err(XgoError::ImportPath {
                path: dir.to_path_buf(),
                reason: format!("no canonical import path (got {:?})", import_path),
            });
        }
        Ok(import_path.to_string())
    }
}

/// GOPATH layout first, Go toolchain as fallback
pub struct WorkspaceResolver {
    gopath: GopathResolver,
    go_list: GoListResolver,
}

impl WorkspaceResolver {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            gopath: GopathResolver::new(roots),
            go_list: GoListResolver::default(),
        }
    }
}

#[async_trait]
impl ImportResolver for WorkspaceResolver {
    async fn resolve(&self, dir: &Path) -> XgoResult<String> {
        if let Some(import_path) = self.gopath.lookup(dir) {
            debug!("Resolved {} from GOPATH: {}", dir.display(), import_path);
            return Ok(import_path);
        }
        self.go_list.resolve(dir).await
    }
}
