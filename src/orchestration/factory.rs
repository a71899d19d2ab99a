//! Runtime factory for the configured container engine

use crate::config::Config;
use crate::orchestration::docker::DockerRuntime;
use crate::orchestration::runtime::ContainerRuntime;

/// Create the container runtime named by the configuration
pub fn create_runtime(config: &Config) -> Box<dyn ContainerRuntime> {
    Box::new(DockerRuntime::new(config.engine.binary.clone()))
}
