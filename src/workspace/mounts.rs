//! Sandbox mount planning for workspace sources
//!
//! The build container refuses to follow symlinks across its mount
//! boundary, so every link inside a `<root>/src` tree that escapes the tree
//! is hoisted into its own read-only mount. Each mount gets a numbered
//! namespace under `/ext-go/<n>`, where `n` is its position in discovery
//! order. Links are inspected, never traversed.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Sandbox directory holding all numbered workspace mounts
pub const SANDBOX_ROOT: &str = "/ext-go";

/// Separator used when exposing the prefixes to the build container
const PREFIX_SEPARATOR: &str = ":";

/// A host directory and where it appears inside the sandbox
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPoint {
    /// Absolute host directory (symlink-resolved for hoisted links)
    pub host_path: PathBuf,
    /// `/ext-go/<n>/src[/<suffix>]`
    pub sandbox_path: String,
    /// `/ext-go/<n>`
    pub sandbox_prefix: String,
}

/// Ordered set of mounts for one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountPlan {
    mounts: Vec<MountPoint>,
}

impl MountPlan {
    /// Mounts in discovery order
    pub fn mounts(&self) -> &[MountPoint] {
        &self.mounts
    }

    pub fn len(&self) -> usize {
        self.mounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounts.is_empty()
    }

    /// Sandbox prefixes in discovery order
    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.mounts.iter().map(|m| m.sandbox_prefix.as_str())
    }

    /// Value of `EXT_GOPATH` inside the sandbox
    pub fn ext_gopath(&self) -> String {
        self.prefixes().collect::<Vec<_>>().join(PREFIX_SEPARATOR)
    }

    /// Record a mount under the next free ordinal
    fn push(&mut self, host_path: PathBuf, suffix: Option<&str>) {
        let ordinal = self.mounts.len() + 1;
        let sandbox_prefix = format!("{}/{}", SANDBOX_ROOT, ordinal);
        let sandbox_path = match suffix {
            Some(suffix) => format!("{}/src/{}", sandbox_prefix, suffix),
            None => format!("{}/src", sandbox_prefix),
        };

        debug!("Mount {} -> {}", host_path.display(), sandbox_path);
        self.mounts.push(MountPoint {
            host_path,
            sandbox_path,
            sandbox_prefix,
        });
    }
}

/// Plan the mounts for every workspace root, in order.
///
/// For each root, links escaping `<root>/src` come first, followed by the
/// `src` tree itself. A missing `src` tree still gets its own mount.
pub fn plan_mounts(roots: &[PathBuf]) -> MountPlan {
    let mut plan = MountPlan::default();

    for root in roots {
        let sources = root.join("src");
        for link in foreign_links(&sources) {
            plan.push(link.target, Some(&link.suffix));
        }
        plan.push(sources, None);
    }

    plan
}

/// A symlink whose directory target lies outside its source tree
struct ForeignLink {
    target: PathBuf,
    /// Link location relative to the source tree, `/`-separated
    suffix: String,
}

fn foreign_links(sources: &Path) -> Vec<ForeignLink> {
    // Compare against the resolved tree as well, targets are canonical
    let resolved_tree = fs::canonicalize(sources).ok();

    WalkDir::new(sources)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.path_is_symlink())
        .filter_map(|entry| {
            let link = entry.path();
            let target = fs::canonicalize(link).ok()?;
            if !target.is_dir() {
                return None;
            }
            let inside = target.starts_with(sources)
                || resolved_tree
                    .as_deref()
                    .is_some_and(|tree| target.starts_with(tree));
            if inside {
                debug!("Skipping in-tree link {}", link.display());
                return None;
            }

            let suffix = link.strip_prefix(sources).ok()?;
            Some(ForeignLink {
                target,
                suffix: slash_path(suffix),
            })
        })
        .collect()
}

/// Render a relative host path with `/` separators for the sandbox
fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
