//! Host workspace inspection for local builds
//!
//! When the package reference is a directory, its import path is resolved
//! from the workspace layout and every `GOPATH` source tree is planned as a
//! set of read-only sandbox mounts.

pub mod mounts;
pub mod resolver;
pub mod roots;

pub use mounts::{plan_mounts, MountPlan, MountPoint, SANDBOX_ROOT};
pub use resolver::{GoListResolver, GopathResolver, ImportResolver, WorkspaceResolver};
pub use roots::{
    absolute_path, is_local_reference, resolve_package_dir, workspace_roots, workspace_roots_from,
};

use crate::error::XgoResult;
use std::path::PathBuf;
use tracing::{debug, info};

/// A local package reference after workspace resolution
#[derive(Debug, Clone)]
pub struct LocalWorkspace {
    /// Canonical import path replacing the directory reference
    pub import_path: String,
    /// Mounts exposing every workspace root to the sandbox
    pub plan: MountPlan,
}

/// Resolve a path-form package reference against the workspace roots
pub async fn resolve_local(
    reference: &str,
    roots: &[PathBuf],
    resolver: &dyn ImportResolver,
) -> XgoResult<LocalWorkspace> {
    let dir = resolve_package_dir(reference)?;
    let import_path = resolver.resolve(&dir).await?;
    info!("Resolved {} to import path {}", dir.display(), import_path);

    let plan = plan_mounts(roots);
    debug!("Planned {} workspace mounts", plan.len());

    Ok(LocalWorkspace { import_path, plan })
}
