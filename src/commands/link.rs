use anyhow::Result;
use log::debug;
use std::path::Path;

use crate::{config::ConfigOverrides, io::Io, probe::LinkState, runtime::Runtime};

use super::{open, print_no_packages, select_packages};

/// Replace each selected package's install with a link to its working copy
#[tracing::instrument(skip(runtime, io, overrides))]
pub fn link<R: Runtime, O: Io>(
    runtime: &R,
    io: &O,
    manifest: &Path,
    overrides: ConfigOverrides,
    packages: &[String],
) -> Result<()> {
    let (config, router) = open(runtime, io, manifest, overrides)?;
    if router.registry().is_empty() {
        print_no_packages(io, &config);
        return Ok(());
    }

    for (package, local_path) in select_packages(&config, &router, packages)? {
        match router.link_state(&package) {
            LinkState::ManagedLink { .. } if router.is_linked_to(&package, &local_path) => {
                io.write(&format!("  - {} is already linked", package.identity));
            }
            LinkState::Absent => router.install(&package)?,
            state => {
                debug!("{} is {}, replacing", package.identity, state);
                router.update(&package, &package)?;
            }
        }
    }
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::commands::test_support::TestProject;
    use crate::error::Error;
    use crate::io::BufferIo;
    use crate::registry::MANIFEST_FILE;
    use crate::runtime::RealRuntime;
    use std::path::PathBuf;

    fn run(project: &TestProject, io: &BufferIo) -> Result<()> {
        link(
            &RealRuntime,
            io,
            &project.manifest,
            ConfigOverrides::default(),
            &[],
        )
    }

    #[test]
    fn test_link_creates_link_when_absent() {
        let project = TestProject::new();
        let io = BufferIo::new(false);

        run(&project, &io).unwrap();

        assert_eq!(
            std::fs::read_link(project.install_path()).unwrap(),
            project.local
        );
        assert_eq!(io.lines(), vec!["  - Linking acme/widget (dev-local)"]);
    }

    #[test]
    fn test_link_is_idempotent() {
        let project = TestProject::new();
        run(&project, &BufferIo::new(false)).unwrap();

        let io = BufferIo::new(false);
        run(&project, &io).unwrap();

        assert_eq!(io.lines(), vec!["  - acme/widget is already linked"]);
        assert_eq!(
            std::fs::read_link(project.install_path()).unwrap(),
            project.local
        );
    }

    #[test]
    fn test_link_keeps_relative_link_to_local_path() {
        let project = TestProject::new();
        let install_path = project.install_path();
        std::fs::create_dir_all(install_path.parent().unwrap()).unwrap();
        std::os::unix::fs::symlink("../../../widget", &install_path).unwrap();

        let io = BufferIo::new(false);
        run(&project, &io).unwrap();

        assert_eq!(io.lines(), vec!["  - acme/widget is already linked"]);
        assert_eq!(
            std::fs::read_link(&install_path).unwrap(),
            PathBuf::from("../../../widget")
        );
    }

    #[test]
    fn test_link_replaces_regular_install() {
        let project = TestProject::new();
        let install_path = project.install_path();
        std::fs::create_dir_all(&install_path).unwrap();
        std::fs::write(install_path.join(MANIFEST_FILE), "{}").unwrap();

        let io = BufferIo::new(false);
        run(&project, &io).unwrap();

        assert!(install_path.is_symlink());
        assert_eq!(
            io.lines(),
            vec![
                "  - Replacing acme/widget (dev-local)",
                "  - Linking acme/widget (dev-local)",
            ]
        );
    }

    #[test]
    fn test_link_retargets_link_pointing_elsewhere() {
        let project = TestProject::new();
        let fork = project.dir.path().join("fork");
        std::fs::create_dir_all(&fork).unwrap();
        let install_path = project.install_path();
        std::fs::create_dir_all(install_path.parent().unwrap()).unwrap();
        std::os::unix::fs::symlink(&fork, &install_path).unwrap();

        run(&project, &BufferIo::new(false)).unwrap();

        assert_eq!(std::fs::read_link(&install_path).unwrap(), project.local);
        assert!(fork.is_dir());
    }

    #[test]
    fn test_link_replaces_self_referential_link() {
        let project = TestProject::new();
        let install_path = project.install_path();
        std::fs::create_dir_all(install_path.parent().unwrap()).unwrap();
        std::os::unix::fs::symlink(&install_path, &install_path).unwrap();

        run(&project, &BufferIo::new(false)).unwrap();

        assert_eq!(std::fs::read_link(&install_path).unwrap(), project.local);
    }

    #[test]
    fn test_link_invalid_configuration_creates_nothing() {
        let project = TestProject::with_packages(
            r#"{"acme/widget": "../widget", "acme/broken": "../broken"}"#,
        );
        std::fs::create_dir_all(project.dir.path().join("broken")).unwrap();

        let err = run(&project, &BufferIo::new(false)).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::InvalidConfiguration { .. })
        ));
        assert!(!project.vendor.exists());
    }
}
