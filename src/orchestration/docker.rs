//! Docker CLI container runtime
//!
//! Implements the ContainerRuntime trait by shelling out to a
//! docker-compatible executable (`docker` or `podman`).

use crate::error::{XgoError, XgoResult};
use crate::orchestration::invocation::InvocationSpec;
use crate::orchestration::runtime::ContainerRuntime;
use async_trait::async_trait;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::{debug, info};

/// Container runtime driving a docker-compatible CLI
pub struct DockerRuntime {
    binary: String,
}

impl DockerRuntime {
    /// Create a runtime for the given executable
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Execute an engine command and capture its output
    async fn exec(&self, args: &[&str]) -> XgoResult<std::process::Output> {
        debug!("Executing: {} {:?}", self.binary, args);

        Command::new(&self.binary)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| XgoError::command_failed(format!("{} {:?}", self.binary, args), e))
    }

    /// Execute an engine command with inherited output streams
    async fn exec_inherit(&self, args: &[String]) -> XgoResult<ExitStatus> {
        debug!("Executing interactively: {} {:?}", self.binary, args);

        Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| {
                let subcommand = args.first().map(String::as_str).unwrap_or_default();
                XgoError::command_failed(format!("{} {}", self.binary, subcommand), e)
            })
    }
}

impl Default for DockerRuntime {
    fn default() -> Self {
        Self::new("docker")
    }
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    async fn version(&self) -> XgoResult<String> {
        let output = self
            .exec(&["version"])
            .await
            .map_err(|e| XgoError::EngineNotFound {
                engine: self.binary.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(XgoError::EngineNotFound {
                engine: self.binary.clone(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    async fn list_images(&self) -> XgoResult<String> {
        let output = self
            .exec(&["images", "--no-trunc"])
            .await
            .map_err(|e| XgoError::ImageList(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(XgoError::ImageList(stderr.trim().to_string()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    async fn pull(&self, image: &str) -> XgoResult<()> {
        info!("Pulling image: {}", image);

        let status = self
            .exec_inherit(&["pull".to_string(), image.to_string()])
            .await
            .map_err(|e| XgoError::ImagePull {
                image: image.to_string(),
                reason: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(XgoError::ImagePull {
                image: image.to_string(),
                reason: format!("{} pull exited with {}", self.binary, status),
            })
        }
    }

    async fn run(&self, invocation: &InvocationSpec) -> XgoResult<()> {
        info!("Cross compiling {} in {}", invocation.package, invocation.image);

        let status = self.exec_inherit(&invocation.args()).await?;
        if status.success() {
            return Ok(());
        }
        match status.code() {
            Some(code) => Err(XgoError::BuildFailed {
                package: invocation.package.clone(),
                code,
            }),
            None => Err(XgoError::ProcessSignaled),
        }
    }

    fn binary(&self) -> &str {
        &self.binary
    }
}
