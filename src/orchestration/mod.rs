//! Orchestration module for the build container engine
//!
//! Provides engine-agnostic container management:
//! - availability gate (engine version query, image lookup and pull)
//! - rendering and running a single build invocation

pub mod availability;
mod docker;
mod factory;
pub mod invocation;
mod runtime;

pub use availability::{check_engine, ensure_image, image_present};
pub use docker::DockerRuntime;
pub use factory::create_runtime;
pub use invocation::{BindMount, InvocationSpec};
pub use runtime::ContainerRuntime;
