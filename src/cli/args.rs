//! CLI argument definitions using clap derive

use crate::build::DEFAULT_TARGETS;
use clap::{ArgAction, Args, Parser};
use std::path::PathBuf;

/// xgo - Go CGO cross compiler
///
/// Cross compiles a Go package, including its C dependencies, for many
/// platforms at once inside a prepared container image.
#[derive(Parser, Debug)]
#[command(name = "xgo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Increase log output (--log info, --log --log debug)
    #[arg(long, action = ArgAction::Count)]
    pub log: u8,

    /// Configuration file path
    #[arg(short, long, env = "XGO_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Arguments describing one cross compilation
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Go import path or local package directory to build
    pub package: String,

    /// Go release to use for cross compilation (default: from config, "latest")
    #[arg(long = "go", value_name = "RELEASE")]
    pub go_release: Option<String>,

    /// Sub-package to build if not root import
    #[arg(long)]
    pub pkg: Option<String>,

    /// Prefix to use for output naming (empty = package name)
    #[arg(long)]
    pub out: Option<String>,

    /// Destination folder to put binaries in (empty = current)
    #[arg(long)]
    pub dest: Option<PathBuf>,

    /// Version control remote repository to build
    #[arg(long)]
    pub remote: Option<String>,

    /// Version control branch to build
    #[arg(long)]
    pub branch: Option<String>,

    /// CGO dependencies (configure/make based archives), space separated
    #[arg(long)]
    pub deps: Option<String>,

    /// Comma separated targets to build for
    #[arg(long, default_value = DEFAULT_TARGETS)]
    pub targets: String,

    /// Use custom docker image instead of official distribution
    #[arg(long)]
    pub image: Option<String>,

    /// Print the names of packages as they are compiled
    #[arg(short = 'v')]
    pub build_verbose: bool,

    /// Print the command as executing the builds
    #[arg(short = 'x')]
    pub build_steps: bool,

    /// Enable data race detection (supported only on amd64)
    #[arg(long)]
    pub race: bool,

    /// Print the container command instead of running it
    #[arg(long)]
    pub dry_run: bool,
}
