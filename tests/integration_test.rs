use assert_cmd::Command;
use assert_cmd::cargo;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

/// Lays out `root/app/composer.json` and `root/widget/composer.json`.
fn create_project(local_packages: &str) -> (TempDir, PathBuf) {
    let root = tempdir().unwrap();
    let app = root.path().join("app");
    std::fs::create_dir_all(&app).unwrap();

    let widget = root.path().join("widget");
    std::fs::create_dir_all(widget.join("src")).unwrap();
    std::fs::write(
        widget.join("composer.json"),
        r#"{"name": "acme/widget", "autoload": {"psr-4": {"Acme\\Widget\\": "src/"}}}"#,
    )
    .unwrap();
    std::fs::write(widget.join("src").join("Widget.php"), "<?php\n").unwrap();

    let manifest = app.join("composer.json");
    std::fs::write(
        &manifest,
        format!(
            r#"{{
                "name": "acme/app",
                "require": {{"acme/widget": "^1.0"}},
                "extra": {{"symlinker": {{"local-packages": {}}}}}
            }}"#,
            local_packages
        ),
    )
    .unwrap();

    (root, manifest)
}

fn devlink(manifest: &Path) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("devlink"));
    cmd.env_remove("COMPOSER")
        .env_remove("COMPOSER_VENDOR_DIR")
        .arg("--manifest")
        .arg(manifest);
    cmd
}

#[cfg(unix)]
#[test]
fn test_end_to_end_link_status_unlink() {
    let (root, manifest) = create_project(r#"{"acme/widget": "../widget"}"#);
    let widget = root.path().join("widget");
    let install_path = root.path().join("app/vendor/acme/widget");

    devlink(&manifest)
        .arg("link")
        .assert()
        .success()
        .stdout(predicate::str::contains("Linking acme/widget"));

    assert!(install_path.is_symlink());
    assert_eq!(std::fs::read_link(&install_path).unwrap(), widget);
    assert!(install_path.join("src/Widget.php").exists());

    devlink(&manifest)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("acme/widget"))
        .stdout(predicate::str::contains("(linked)"));

    devlink(&manifest)
        .arg("unlink")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unlinking acme/widget"));

    assert!(!install_path.exists());
    assert!(!install_path.is_symlink());
    assert!(widget.join("composer.json").exists());
    assert!(widget.join("src/Widget.php").exists());
}

#[cfg(unix)]
#[test]
fn test_link_replaces_existing_vendor_install() {
    let (root, manifest) = create_project(r#"{"acme/widget": "../widget"}"#);
    let install_path = root.path().join("app/vendor/acme/widget");
    std::fs::create_dir_all(&install_path).unwrap();
    std::fs::write(install_path.join("composer.json"), "{}").unwrap();

    devlink(&manifest)
        .arg("link")
        .assert()
        .success()
        .stdout(predicate::str::contains("Replacing acme/widget"));

    assert_eq!(
        std::fs::read_link(&install_path).unwrap(),
        root.path().join("widget")
    );
}

#[cfg(unix)]
#[test]
fn test_link_verbose_shows_local_path() {
    let (root, manifest) = create_project(r#"{"acme/widget": "../widget"}"#);

    devlink(&manifest)
        .arg("link")
        .arg("-v")
        .assert()
        .success()
        .stderr(predicate::str::contains("[devlink] Linking to local path"))
        .stderr(predicate::str::contains(
            root.path().join("widget").to_string_lossy().into_owned(),
        ));
}

#[cfg(unix)]
#[test]
fn test_custom_vendor_dir_and_config_key() {
    let root = tempdir().unwrap();
    let app = root.path().join("app");
    let widget = root.path().join("widget");
    std::fs::create_dir_all(&app).unwrap();
    std::fs::create_dir_all(&widget).unwrap();
    std::fs::write(widget.join("composer.json"), "{}").unwrap();
    let manifest = app.join("composer.json");
    std::fs::write(
        &manifest,
        r#"{
            "config": {"vendor-dir": "lib"},
            "extra": {"dev-linker": {"local-packages": {"acme/widget": "../widget"}}}
        }"#,
    )
    .unwrap();

    devlink(&manifest)
        .arg("--config-key")
        .arg("dev-linker")
        .arg("link")
        .assert()
        .success();

    assert!(app.join("lib/acme/widget").is_symlink());
}

#[test]
fn test_invalid_local_path_fails() {
    let (root, manifest) = create_project(r#"{"acme/widget": "../empty"}"#);
    std::fs::create_dir_all(root.path().join("empty")).unwrap();

    devlink(&manifest)
        .arg("link")
        .assert()
        .failure()
        .stderr(predicate::str::contains("acme/widget"))
        .stderr(predicate::str::contains("composer.json"));

    assert!(!root.path().join("app/vendor").exists());
}

#[test]
fn test_unknown_package_fails() {
    let (_root, manifest) = create_project(r#"{"acme/widget": "../widget"}"#);

    devlink(&manifest)
        .arg("link")
        .arg("acme/other")
        .assert()
        .failure()
        .stderr(predicate::str::contains("acme/other is not configured"));
}

#[test]
fn test_missing_manifest_fails() {
    let root = tempdir().unwrap();

    devlink(&root.path().join("composer.json"))
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read manifest"));
}

#[test]
fn test_status_without_configuration() {
    let root = tempdir().unwrap();
    let manifest = root.path().join("composer.json");
    std::fs::write(&manifest, r#"{"name": "acme/app"}"#).unwrap();

    devlink(&manifest)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("No local packages configured"));
}
