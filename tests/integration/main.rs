//! Integration tests for xgo

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// xgo isolated from the caller's config, cache and GOPATH
    fn xgo(sandbox: &Path) -> Command {
        let mut cmd = cargo_bin_cmd!("xgo");
        cmd.env("XGO_CONFIG", sandbox.join("config.toml"))
            .env("XGO_CACHE_DIR", sandbox.join("cache"))
            .env("GOPATH", sandbox.join("gopath"))
            .current_dir(sandbox);
        cmd
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        xgo(temp.path())
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Go CGO cross compiler"))
            .stdout(predicate::str::contains("--targets"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        xgo(temp.path())
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("xgo"));
    }

    #[test]
    fn package_is_required() {
        let temp = TempDir::new().unwrap();
        xgo(temp.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("Usage"));
    }

    #[test]
    fn dry_run_remote_package() {
        let temp = TempDir::new().unwrap();
        let cache = temp.path().join("cache");

        xgo(temp.path())
            .args(["--dry-run", "github.com/u/mylib"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("docker run --rm"))
            .stdout(predicate::str::contains(format!(
                "{}:/deps-cache:ro",
                cache.display()
            )))
            .stdout(predicate::str::contains("TARGETS=./."))
            .stdout(predicate::str::contains("EXT_GOPATH").not())
            .stdout(predicate::str::contains("karalabe/xgo-latest github.com/u/mylib"));
    }

    #[test]
    fn dry_run_local_package_uses_import_path() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("gopath/src");
        let pkg = src.join("github.com/u/mylib");
        fs::create_dir_all(&pkg).unwrap();

        xgo(temp.path())
            .args(["--dry-run", pkg.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains(format!(
                "{}:/ext-go/1/src:ro",
                src.display()
            )))
            .stdout(predicate::str::contains("EXT_GOPATH=/ext-go/1"))
            .stdout(predicate::str::contains("TARGETS=./."))
            .stdout(predicate::str::ends_with(
                "karalabe/xgo-latest github.com/u/mylib\n",
            ));
    }

    #[test]
    fn dry_run_honours_release_and_flags() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("config.toml"),
            "[image]\ndist_prefix = \"example/xgo-\"\n",
        )
        .unwrap();

        xgo(temp.path())
            .args([
                "--dry-run",
                "--go",
                "1.4.2",
                "--targets",
                "linux/*,windows/amd64",
                "--pkg",
                "cmd/tool",
                "-v",
                "--race",
                "github.com/u/mylib",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("'TARGETS=linux/. windows/amd64'"))
            .stdout(predicate::str::contains("PACK=cmd/tool"))
            .stdout(predicate::str::contains("FLAG_V=true"))
            .stdout(predicate::str::contains("FLAG_X=false"))
            .stdout(predicate::str::contains("FLAG_RACE=true"))
            .stdout(predicate::str::contains("example/xgo-1.4.2 github.com/u/mylib"));
    }

    #[test]
    fn local_file_is_rejected() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("main.go");
        fs::write(&file, "package main\n").unwrap();

        xgo(temp.path())
            .args(["--dry-run", file.to_str().unwrap()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not a directory"));
    }

    #[test]
    fn invalid_config_is_reported() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.toml"), "[engine\n").unwrap();

        xgo(temp.path())
            .args(["--dry-run", "github.com/u/mylib"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn missing_engine_is_fatal() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("config.toml"),
            "[engine]\nbinary = \"xgo-test-no-such-engine\"\n",
        )
        .unwrap();

        xgo(temp.path())
            .arg("github.com/u/mylib")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Container engine not available"))
            .stderr(predicate::str::contains("Hint:"));
    }
}
