//! Container invocation types
//!
//! An `InvocationSpec` is the complete, ordered description of one build
//! container run. Runtimes only render it; they never reorder it.

use std::path::PathBuf;

/// A host directory bound into the container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindMount {
    /// Host directory
    pub host: PathBuf,
    /// Path inside the container
    pub target: String,
    /// Mount read-only
    pub read_only: bool,
}

impl BindMount {
    pub fn read_write(host: impl Into<PathBuf>, target: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            target: target.into(),
            read_only: false,
        }
    }

    pub fn read_only(host: impl Into<PathBuf>, target: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            target: target.into(),
            read_only: true,
        }
    }

    /// `host:target[:ro]` as accepted by `-v`
    pub fn volume_arg(&self) -> String {
        let mut arg = format!("{}:{}", self.host.display(), self.target);
        if self.read_only {
            arg.push_str(":ro");
        }
        arg
    }
}

/// Everything handed to the engine for a single build run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationSpec {
    /// Bind mounts in declaration order
    pub mounts: Vec<BindMount>,
    /// Environment variables in declaration order
    pub env: Vec<(String, String)>,
    /// Build image reference
    pub image: String,
    /// Package the image builds
    pub package: String,
}

impl InvocationSpec {
    /// Engine arguments: `run --rm -v.. -e.. <image> <package>`
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["run".to_string(), "--rm".to_string()];

        for mount in &self.mounts {
            args.push("-v".to_string());
            args.push(mount.volume_arg());
        }

        for (key, value) in &self.env {
            args.push("-e".to_string());
            args.push(format!("{}={}", key, value));
        }

        args.push(self.image.clone());
        args.push(self.package.clone());
        args
    }

    /// Look up an environment variable
    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Mounts that are read-only
    pub fn read_only_mounts(&self) -> impl Iterator<Item = &BindMount> {
        self.mounts.iter().filter(|m| m.read_only)
    }

    /// Shell-like rendering for display
    pub fn command_line(&self, binary: &str) -> String {
        std::iter::once(binary.to_string())
            .chain(self.args().iter().map(|a| quote(a)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Single-quote an argument when it would not survive a shell as-is
fn quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=,@+%".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
