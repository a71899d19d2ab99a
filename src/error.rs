//! Error types for xgo
//!
//! Every failure is fatal: modules return `XgoResult<T>` and the error is
//! reported once by `main` before the process exits.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for xgo operations
pub type XgoResult<T> = Result<T, XgoError>;

/// All errors that can occur in xgo
#[derive(Error, Debug)]
pub enum XgoError {
    // Environment errors
    #[error("Container engine not available ({engine}): {reason}")]
    EngineNotFound { engine: String, reason: String },

    #[error("Failed to list container images: {0}")]
    ImageList(String),

    #[error("Image pull failed: {image}: {reason}")]
    ImagePull { image: String, reason: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // Dependency cache errors
    #[error("Failed to create dependency cache {path}: {source}")]
    CacheDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create dependency file {path}: {source}")]
    DependencyFileCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to retrieve dependency {url}: {reason}")]
    DependencyFetch { url: String, reason: String },

    #[error("Failed to download dependency {url}: {source}")]
    DependencyDownload {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid dependency reference: {0}")]
    DependencyInvalid(String),

    // Workspace errors
    #[error("Failed to locate requested package {path}: {source}")]
    PackageLocate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Requested path invalid: {0} is not a directory")]
    PackageNotDirectory(PathBuf),

    #[error("Failed to resolve import path of {path}: {reason}")]
    ImportPath { path: PathBuf, reason: String },

    // Build errors
    #[error("Failed to cross compile package {package}: exit code {code}")]
    BuildFailed { package: String, code: i32 },

    #[error("Process terminated by signal")]
    ProcessSignaled,

    // IO errors
    #[error("IO error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}: {source}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl XgoError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::EngineNotFound { .. } => {
                Some("Install Docker from https://docs.docker.com/get-docker/ or set engine.binary")
            }
            Self::ImagePull { .. } => Some("Check the image name or pass --image explicitly"),
            Self::ImportPath { .. } => {
                Some("Place the package under $GOPATH/src or inside a Go module")
            }
            _ => None,
        }
    }
}
