//! Dependency archive cache
//!
//! Archives are keyed by the final path segment of their reference, so two
//! references ending in the same file name share one cached artifact. The
//! cache only ever grows; nothing here evicts or rewrites existing entries.

use crate::cache::fetch::Fetcher;
use crate::error::{XgoError, XgoResult};
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What happened to a dependency during `ensure_present`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    /// Fetched during this run
    Cached,
    /// Found on disk, no fetch performed
    AlreadyCached,
}

impl fmt::Display for CacheOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cached => write!(f, "newly cached"),
            Self::AlreadyCached => write!(f, "already cached"),
        }
    }
}

/// A dependency reference and its location in the cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub url: String,
    pub path: PathBuf,
    pub outcome: CacheOutcome,
}

/// Split a space separated dependency list, dropping blank entries
pub fn parse_dependency_list(deps: &str) -> Vec<&str> {
    deps.split(' ')
        .map(str::trim)
        .filter(|dep| !dep.is_empty())
        .collect()
}

/// Derive the cache file name from a reference's final path segment.
///
/// Query strings, fragments and trailing slashes are ignored. Returns `None`
/// when no usable segment remains.
pub fn cache_file_name(url: &str) -> Option<&str> {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let name = url[..end].trim_end_matches('/').rsplit('/').next()?;

    match name {
        "" | "." | ".." => None,
        name => Some(name),
    }
}

/// Shared on-disk cache of dependency archives
pub struct DependencyCache {
    dir: PathBuf,
    fetcher: Box<dyn Fetcher>,
}

impl DependencyCache {
    /// Create a cache rooted at `dir`; nothing touches the disk yet
    pub fn new(dir: PathBuf, fetcher: Box<dyn Fetcher>) -> Self {
        Self { dir, fetcher }
    }

    /// Cache directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the cache directory if it does not exist yet
    pub async fn ensure_dir(&self) -> XgoResult<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| XgoError::CacheDirCreate {
                path: self.dir.clone(),
                source: e,
            })
    }

    /// Make sure the archive behind `url` is present in the cache
    pub async fn ensure_present(&self, url: &str) -> XgoResult<CacheEntry> {
        let name =
            cache_file_name(url).ok_or_else(|| XgoError::DependencyInvalid(url.to_string()))?;
        let path = self.dir.join(name);

        if tokio::fs::metadata(&path).await.is_ok() {
            debug!("Dependency already cached: {}", path.display());
            return Ok(CacheEntry {
                url: url.to_string(),
                path,
                outcome: CacheOutcome::AlreadyCached,
            });
        }

        info!("Downloading new dependency: {}", url);
        let file = File::create(&path).map_err(|e| XgoError::DependencyFileCreate {
            path: path.clone(),
            source: e,
        })?;
        let bytes = self.fetcher.fetch_into(url, file).await?;
        info!("New dependency cached: {} ({} bytes)", path.display(), bytes);

        Ok(CacheEntry {
            url: url.to_string(),
            path,
            outcome: CacheOutcome::Cached,
        })
    }

    /// Cache every entry of a space separated dependency list, in order.
    ///
    /// `on_entry` is called after each dependency is settled. The first
    /// failure aborts the remaining entries.
    pub async fn ensure_all(
        &self,
        deps: &str,
        on_entry: &(dyn Fn(&CacheEntry) + Send + Sync),
    ) -> XgoResult<Vec<CacheEntry>> {
        let refs = parse_dependency_list(deps);
        if refs.is_empty() {
            return Ok(Vec::new());
        }

        self.ensure_dir().await?;

        let mut entries = Vec::with_capacity(refs.len());
        for url in refs {
            let entry = self.ensure_present(url).await?;
            on_entry(&entry);
            entries.push(entry);
        }
        Ok(entries)
    }
}
