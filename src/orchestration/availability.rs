//! Engine and image availability gate

use crate::error::XgoResult;
use crate::orchestration::runtime::ContainerRuntime;
use tracing::debug;

/// Fail unless the engine answers a version query; returns its first line
pub async fn check_engine(runtime: &dyn ContainerRuntime) -> XgoResult<String> {
    let version = runtime.version().await?;
    debug!("{} version output:\n{}", runtime.binary(), version);
    Ok(version.lines().next().unwrap_or_default().trim().to_string())
}

/// Whether `image` appears in the engine's image listing
pub async fn image_present(runtime: &dyn ContainerRuntime, image: &str) -> XgoResult<bool> {
    let listing = runtime.list_images().await?;
    Ok(listing.contains(image))
}

/// Pull `image` unless the engine already has it; returns whether it pulled.
///
/// `before_pull` runs once the image is known to be missing, so callers can
/// settle their output before the engine streams its own.
pub async fn ensure_image(
    runtime: &dyn ContainerRuntime,
    image: &str,
    before_pull: &mut dyn FnMut(),
) -> XgoResult<bool> {
    if image_present(runtime, image).await? {
        return Ok(false);
    }
    before_pull();
    runtime.pull(image).await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::XgoError;
    use crate::orchestration::invocation::InvocationSpec;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeEngine {
        listing: String,
        pull_fails: bool,
        listing_fails: bool,
        pulled: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ContainerRuntime for FakeEngine {
        async fn version(&self) -> XgoResult<String> {
            Ok("Client:\n Version: 1.6.2\n".to_string())
        }

        async fn list_images(&self) -> XgoResult<String> {
            if self.listing_fails {
                return Err(XgoError::ImageList("daemon down".to_string()));
            }
            Ok(self.listing.clone())
        }

        async fn pull(&self, image: &str) -> XgoResult<()> {
            self.pulled.lock().unwrap().push(image.to_string());
            if self.pull_fails {
                return Err(XgoError::ImagePull {
                    image: image.to_string(),
                    reason: "not found".to_string(),
                });
            }
            Ok(())
        }

        async fn run(&self, _invocation: &InvocationSpec) -> XgoResult<()> {
            Ok(())
        }

        fn binary(&self) -> &str {
            "fake"
        }
    }

    const LISTING: &str = "REPOSITORY            TAG     IMAGE ID\n\
                           karalabe/xgo-latest   latest  sha256:abc\n";

    #[tokio::test]
    async fn engine_version_first_line() {
        let engine = FakeEngine::default();
        assert_eq!(check_engine(&engine).await.unwrap(), "Client:");
    }

    #[tokio::test]
    async fn present_image_is_not_pulled() {
        let engine = FakeEngine {
            listing: LISTING.to_string(),
            ..Default::default()
        };
        let mut notified = false;
        let pulled = ensure_image(&engine, "karalabe/xgo-latest", &mut || notified = true)
            .await
            .unwrap();
        assert!(!pulled);
        assert!(!notified);
        assert!(engine.pulled.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn absent_image_is_pulled_by_exact_name() {
        let engine = FakeEngine {
            listing: LISTING.to_string(),
            ..Default::default()
        };
        let mut notified = false;
        let pulled = ensure_image(&engine, "karalabe/xgo-1.4.2", &mut || notified = true)
            .await
            .unwrap();
        assert!(pulled);
        assert!(notified);
        assert_eq!(*engine.pulled.lock().unwrap(), vec!["karalabe/xgo-1.4.2"]);
    }

    #[tokio::test]
    async fn listing_failure_is_fatal() {
        let engine = FakeEngine {
            listing_fails: true,
            ..Default::default()
        };
        let err = ensure_image(&engine, "karalabe/xgo-latest", &mut || {})
            .await
            .unwrap_err();
        assert!(matches!(err, XgoError::ImageList(_)));
        assert!(engine.pulled.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn pull_failure_is_fatal() {
        let engine = FakeEngine {
            pull_fails: true,
            ..Default::default()
        };
        let err = ensure_image(&engine, "karalabe/xgo-latest", &mut || {})
            .await
            .unwrap_err();
        assert!(matches!(err, XgoError::ImagePull { .. }));
    }
}
