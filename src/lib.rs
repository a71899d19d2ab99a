//! xgo - Go CGO cross compiler
//!
//! Drives a prepared container image to cross compile Go packages with C
//! dependencies for many platforms, mounting the host workspace and a
//! shared dependency cache into the build.

pub mod build;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod orchestration;
pub mod ui;
pub mod workspace;

pub use error::{XgoError, XgoResult};
