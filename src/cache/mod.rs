//! Dependency cache for CGO build inputs
//!
//! External `configure`/`make` archives listed with `--deps` are downloaded
//! once into a shared host directory and mounted read-only into every build.
//!
//! # Cache Semantics
//!
//! | Situation | Action | Reported |
//! |-----------|--------|----------|
//! | File name absent | create file, GET, stream body | newly cached |
//! | File name present | nothing | already cached |
//!
//! The directory lives outside the process and is never cleaned by xgo.

pub mod deps;
pub mod fetch;

pub use deps::{cache_file_name, parse_dependency_list, CacheEntry, CacheOutcome, DependencyCache};
pub use fetch::{Fetcher, HttpFetcher};
