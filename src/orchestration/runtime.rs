//! Container runtime abstraction
//!
//! Provides a trait for the engine operations xgo needs, so the build flow
//! can run against docker, podman, or a test double.

use crate::error::XgoResult;
use crate::orchestration::invocation::InvocationSpec;
use async_trait::async_trait;

/// Abstract container engine interface
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Query the engine version, failing if the engine does not respond
    async fn version(&self) -> XgoResult<String>;

    /// Raw listing of locally available images
    async fn list_images(&self) -> XgoResult<String>;

    /// Pull an image from its registry
    async fn pull(&self, image: &str) -> XgoResult<()>;

    /// Run a build to completion with inherited output streams
    async fn run(&self, invocation: &InvocationSpec) -> XgoResult<()>;

    /// Engine executable name, for display
    fn binary(&self) -> &str;
}
