//! Integration tests for Tarpon

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn tarpon() -> Command {
        cargo_bin_cmd!("tarpon")
    }

    /// Config file pointing every writable path at a temp dir
    fn temp_config(temp: &TempDir) -> std::path::PathBuf {
        let path = temp.path().join("config.toml");
        let cache = temp.path().join("metadata");
        let downloads = temp.path().join("downloads");
        std::fs::write(
            &path,
            format!(
                "[cache]\ndir = \"{}\"\n\n[download]\ndir = \"{}\"\n",
                cache.display(),
                downloads.display()
            ),
        )
        .unwrap();
        path
    }

    #[test]
    fn help_displays() {
        tarpon()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Registry dependency explorer"));
    }

    #[test]
    fn version_displays() {
        tarpon()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("tarpon"));
    }

    #[test]
    fn config_path() {
        tarpon()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show_defaults() {
        let temp = TempDir::new().unwrap();
        tarpon()
            .args(["config", "show"])
            .env("TARPON_CONFIG", temp_config(&temp))
            .assert()
            .success()
            .stdout(predicate::str::contains("[registry]"))
            .stdout(predicate::str::contains("registry.npmjs.org"));
    }

    #[test]
    fn config_init_then_show() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        tarpon()
            .args(["config", "init"])
            .env("TARPON_CONFIG", &path)
            .assert()
            .success();
        assert!(path.exists());

        // a second init without --force refuses
        tarpon()
            .args(["config", "init"])
            .env("TARPON_CONFIG", &path)
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));
    }

    #[test]
    fn cache_path_prints_dir() {
        let temp = TempDir::new().unwrap();
        tarpon()
            .args(["cache", "path"])
            .env("TARPON_CONFIG", temp_config(&temp))
            .assert()
            .success()
            .stdout(predicate::str::contains("metadata"));
    }

    #[test]
    fn cache_list_empty() {
        let temp = TempDir::new().unwrap();
        tarpon()
            .args(["cache", "list"])
            .env("TARPON_CONFIG", temp_config(&temp))
            .assert()
            .success()
            .stdout(predicate::str::contains("Cache is empty"));
    }

    #[test]
    fn cache_clear_requires_confirmation() {
        let temp = TempDir::new().unwrap();
        tarpon()
            .args(["cache", "clear"])
            .env("TARPON_CONFIG", temp_config(&temp))
            .assert()
            .success()
            .stdout(predicate::str::contains("--yes"));
    }

    #[test]
    fn info_requires_name() {
        tarpon().arg("info").assert().failure();
    }

    #[test]
    fn download_rejects_conflicting_flags() {
        tarpon()
            .args(["download", "react", "--deps", "--recursive"])
            .assert()
            .failure();
    }

    #[test]
    fn unreachable_registry_fails_cleanly() {
        let temp = TempDir::new().unwrap();
        // reserved TLD, guaranteed not to resolve
        tarpon()
            .args(["info", "left-pad", "--registry", "https://registry.invalid"])
            .env("TARPON_CONFIG", temp_config(&temp))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error:"));
    }
}
