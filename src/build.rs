//! Build invocation assembly
//!
//! Turns a fully resolved build request into the `InvocationSpec` handed to
//! the container engine. Everything here is pure: no engine calls, no
//! network, no workspace walking.

use crate::config::schema::ImageConfig;
use crate::error::{XgoError, XgoResult};
use crate::orchestration::{BindMount, InvocationSpec};
use crate::workspace::{absolute_path, MountPlan};
use std::env;
use std::path::{Path, PathBuf};

/// Output directory inside the build container
pub const BUILD_DIR: &str = "/build";

/// Dependency cache inside the build container
pub const DEPS_CACHE_DIR: &str = "/deps-cache";

/// Targets built when none are requested
pub const DEFAULT_TARGETS: &str = "*/*";

/// A build with every reference already resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    /// Import path handed to the container
    pub package: String,
    /// Build image
    pub image: String,
    /// Version control remote override
    pub remote: String,
    /// Version control branch override
    pub branch: String,
    /// Sub-package to build instead of the root import
    pub pack: String,
    /// Space separated CGO dependency archives
    pub deps: String,
    /// Output name prefix (empty = package name)
    pub out_prefix: String,
    /// Absolute host directory receiving the binaries
    pub dest: PathBuf,
    /// `go build -v`
    pub verbose: bool,
    /// `go build -x`
    pub steps: bool,
    /// `go build -race`
    pub race: bool,
    /// Comma separated `os/arch` selectors
    pub targets: String,
}

/// Convert `os/arch` selectors to the container's space separated patterns.
///
/// `*` becomes the regex wildcard `.`, so `*/*` turns into `./.`.
pub fn normalize_targets(targets: &str) -> String {
    targets
        .split(',')
        .collect::<Vec<_>>()
        .join(" ")
        .replace('*', ".")
}

/// Official image for `release` unless an explicit image was requested
pub fn select_image(explicit: Option<&str>, release: &str, images: &ImageConfig) -> String {
    match explicit.filter(|image| !image.is_empty()) {
        Some(image) => image.to_string(),
        None => images.for_release(release),
    }
}

/// Absolute output directory: `dest` if given, the working directory otherwise
pub fn resolve_dest(dest: Option<&Path>) -> XgoResult<PathBuf> {
    match dest.filter(|d| !d.as_os_str().is_empty()) {
        Some(dest) => absolute_path(dest)
            .map_err(|e| XgoError::io(format!("resolving destination path {}", dest.display()), e)),
        None => env::current_dir().map_err(|e| XgoError::io("getting current directory", e)),
    }
}

/// Assemble the engine invocation for a build.
///
/// `workspace` is present only for local builds; it contributes one
/// read-only mount per planned mount point plus `EXT_GOPATH`.
pub fn assemble_invocation(
    request: &BuildRequest,
    cache_dir: &Path,
    workspace: Option<&MountPlan>,
) -> InvocationSpec {
    let mut mounts = vec![
        BindMount::read_write(&request.dest, BUILD_DIR),
        BindMount::read_only(cache_dir, DEPS_CACHE_DIR),
    ];

    let mut env: Vec<(String, String)> = [
        ("REPO_REMOTE", request.remote.clone()),
        ("REPO_BRANCH", request.branch.clone()),
        ("PACK", request.pack.clone()),
        ("DEPS", request.deps.clone()),
        ("OUT", request.out_prefix.clone()),
        ("FLAG_V", request.verbose.to_string()),
        ("FLAG_X", request.steps.to_string()),
        ("FLAG_RACE", request.race.to_string()),
        ("TARGETS", normalize_targets(&request.targets)),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value))
    .collect();

    if let Some(plan) = workspace {
        mounts.extend(
            plan.mounts()
                .iter()
                .map(|m| BindMount::read_only(&m.host_path, m.sandbox_path.clone())),
        );
        env.push(("EXT_GOPATH".to_string(), plan.ext_gopath()));
    }

    InvocationSpec {
        mounts,
        env,
        image: request.image.clone(),
        package: request.package.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::plan_mounts;
    use tempfile::TempDir;

    fn request() -> BuildRequest {
        BuildRequest {
            package: "github.com/u/mylib".to_string(),
            image: "karalabe/xgo-latest".to_string(),
            remote: String::new(),
            branch: String::new(),
            pack: String::new(),
            deps: String::new(),
            out_prefix: String::new(),
            dest: PathBuf::from("/home/u/out"),
            verbose: false,
            steps: false,
            race: false,
            targets: DEFAULT_TARGETS.to_string(),
        }
    }

    #[test]
    fn targets_wildcards_become_regex() {
        assert_eq!(normalize_targets("*/*"), "./.");
        assert_eq!(
            normalize_targets("linux/amd64,windows/*,darwin/386"),
            "linux/amd64 windows/. darwin/386"
        );
        assert_eq!(normalize_targets("linux/arm"), "linux/arm");
    }

    #[test]
    fn image_selection() {
        let images = ImageConfig::default();
        assert_eq!(select_image(None, "latest", &images), "karalabe/xgo-latest");
        assert_eq!(select_image(None, "1.4.2", &images), "karalabe/xgo-1.4.2");
        assert_eq!(select_image(Some(""), "1.4.2", &images), "karalabe/xgo-1.4.2");
        assert_eq!(
            select_image(Some("me/custom:dev"), "1.4.2", &images),
            "me/custom:dev"
        );
    }

    #[test]
    fn dest_defaults_to_working_directory() {
        assert_eq!(resolve_dest(None).unwrap(), env::current_dir().unwrap());
        assert_eq!(
            resolve_dest(Some(Path::new(""))).unwrap(),
            env::current_dir().unwrap()
        );
    }

    #[test]
    fn dest_is_made_absolute() {
        let dest = resolve_dest(Some(Path::new("bin/out"))).unwrap();
        assert!(dest.is_absolute());
        assert!(dest.ends_with("bin/out"));
    }

    #[test]
    fn dest_parent_components_are_cleaned() {
        let dest = resolve_dest(Some(Path::new("bin/../out/./linux"))).unwrap();
        assert_eq!(dest, env::current_dir().unwrap().join("out/linux"));
    }

    #[test]
    fn remote_build_has_no_workspace_mounts() {
        let spec = assemble_invocation(&request(), Path::new("/tmp/xgo-cache"), None);

        assert_eq!(
            spec.mounts,
            vec![
                BindMount::read_write("/home/u/out", "/build"),
                BindMount::read_only("/tmp/xgo-cache", "/deps-cache"),
            ]
        );
        assert_eq!(spec.env_value("EXT_GOPATH"), None);
        let keys: Vec<_> = spec.env.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "REPO_REMOTE",
                "REPO_BRANCH",
                "PACK",
                "DEPS",
                "OUT",
                "FLAG_V",
                "FLAG_X",
                "FLAG_RACE",
                "TARGETS"
            ]
        );
    }

    #[test]
    fn flags_and_selectors_are_forwarded() {
        let mut req = request();
        req.remote = "https://github.com/u/mylib.git".to_string();
        req.branch = "develop".to_string();
        req.pack = "cmd/tool".to_string();
        req.deps = "http://x/a.tgz".to_string();
        req.out_prefix = "tool".to_string();
        req.verbose = true;
        req.race = true;
        req.targets = "linux/*,windows/amd64".to_string();

        let spec = assemble_invocation(&req, Path::new("/tmp/xgo-cache"), None);

        assert_eq!(spec.env_value("REPO_REMOTE"), Some("https://github.com/u/mylib.git"));
        assert_eq!(spec.env_value("REPO_BRANCH"), Some("develop"));
        assert_eq!(spec.env_value("PACK"), Some("cmd/tool"));
        assert_eq!(spec.env_value("DEPS"), Some("http://x/a.tgz"));
        assert_eq!(spec.env_value("OUT"), Some("tool"));
        assert_eq!(spec.env_value("FLAG_V"), Some("true"));
        assert_eq!(spec.env_value("FLAG_X"), Some("false"));
        assert_eq!(spec.env_value("FLAG_RACE"), Some("true"));
        assert_eq!(spec.env_value("TARGETS"), Some("linux/. windows/amd64"));
    }

    #[test]
    fn local_build_mounts_workspace() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("gopath");
        std::fs::create_dir_all(root.join("src/github.com/u/mylib")).unwrap();
        let plan = plan_mounts(&[root.clone()]);

        let spec = assemble_invocation(&request(), Path::new("/tmp/xgo-cache"), Some(&plan));

        let args = spec.args();
        assert_eq!(
            &args[args.len() - 2..],
            ["karalabe/xgo-latest", "github.com/u/mylib"]
        );
        let workspace: Vec<_> = spec
            .read_only_mounts()
            .filter(|m| m.target != DEPS_CACHE_DIR)
            .collect();
        assert_eq!(workspace.len(), 1);
        assert_eq!(workspace[0].host, root.join("src"));
        assert_eq!(workspace[0].target, "/ext-go/1/src");
        assert_eq!(spec.env_value("TARGETS"), Some("./."));
        assert_eq!(spec.env_value("EXT_GOPATH"), Some("/ext-go/1"));
    }
}
