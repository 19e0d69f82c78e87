//! Lifecycle routing between the default installer and local links.
//!
//! Every call first asks two questions: does the registry want a link for
//! this package, and is there already a link on disk. Only when both answers
//! are no does the call fall through to the default installer. A package whose
//! override was dropped from the configuration therefore still gets its stale
//! link torn down on the next update or remove.

use anyhow::Result;
use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Error;
use crate::installer::Installer;
use crate::io::Io;
use crate::package::Package;
use crate::probe::{LinkProbe, LinkState};
use crate::registry::LocalPackageRegistry;
use crate::runtime::Runtime;

/// Installer override: a drop-in for the default installer that links
/// registered packages instead of installing them.
pub struct LifecycleRouter<'a, R: Runtime, I: Installer, O: Io> {
    runtime: &'a R,
    installer: I,
    io: &'a O,
    registry: LocalPackageRegistry,
}

impl<'a, R: Runtime, I: Installer, O: Io> LifecycleRouter<'a, R, I, O> {
    pub fn new(runtime: &'a R, installer: I, io: &'a O, registry: LocalPackageRegistry) -> Self {
        Self {
            runtime,
            installer,
            io,
            registry,
        }
    }

    /// Build a router whose registry is loaded and validated right away.
    pub fn from_config(
        runtime: &'a R,
        installer: I,
        io: &'a O,
        config: &Config,
    ) -> Result<Self, Error> {
        let registry = LocalPackageRegistry::load(runtime, config.local_packages.iter())?;
        debug!(
            "Loaded {} local package(s) from '{}'",
            registry.len(),
            config.config_key
        );
        Ok(Self::new(runtime, installer, io, registry))
    }

    pub fn registry(&self) -> &LocalPackageRegistry {
        &self.registry
    }

    pub fn install_path(&self, package: &Package) -> PathBuf {
        self.installer.install_path(package)
    }

    /// Current on-disk state of the package's install path.
    pub fn link_state(&self, package: &Package) -> LinkState {
        LinkProbe::new(self.runtime).classify(&self.install_path(package))
    }

    /// Whether the package's install path is a link landing on `local_path`.
    pub fn is_linked_to(&self, package: &Package, local_path: &Path) -> bool {
        let probe = LinkProbe::new(self.runtime);
        let path = self.install_path(package);
        probe.is_managed_link(&path) && probe.links_to(&path, local_path)
    }

    #[tracing::instrument(skip(self, package), fields(package = %package))]
    pub fn install(&self, package: &Package) -> Result<()> {
        match self.registry.lookup(&package.identity) {
            Some(local_path) => self.link(package, local_path),
            None => {
                debug!("{} has no local override", package.identity);
                self.installer.install_code(package)
            }
        }
    }

    #[tracing::instrument(skip(self, initial, target), fields(initial = %initial, target = %target))]
    pub fn update(&self, initial: &Package, target: &Package) -> Result<()> {
        let wants_link = self.registry.lookup(&target.identity).is_some();
        let currently_linked = self.link_state(initial).is_managed_link();
        debug!(
            "wants_link={} currently_linked={}",
            wants_link, currently_linked
        );

        if !wants_link && !currently_linked {
            return self.installer.update_code(initial, target);
        }

        self.io.write(&format!("  - Replacing {}", initial));
        self.remove(initial)?;
        self.install(target)
    }

    #[tracing::instrument(skip(self, package), fields(package = %package))]
    pub fn remove(&self, package: &Package) -> Result<()> {
        let path = self.install_path(package);
        if !LinkProbe::new(self.runtime).is_managed_link(&path) {
            return self.installer.remove_code(package);
        }

        self.io.write_verbose(&format!("Unlinking {}", path.display()));
        self.runtime.remove_symlink(&path)?;
        info!("Unlinked {} at {:?}", package.identity, path);
        Ok(())
    }

    fn link(&self, package: &Package, local_path: &Path) -> Result<()> {
        self.io.write(&format!("  - Linking {}", package));
        self.io
            .write_verbose(&format!("Linking to local path {}", local_path.display()));

        let install_path = self.install_path(package);
        self.installer.ensure_vendor_dir_exists()?;
        if let Some(parent) = install_path.parent() {
            self.runtime.create_dir_all(parent)?;
        }

        self.runtime
            .symlink(local_path, &install_path)
            .map_err(|e| Error::LinkCreation {
                source_path: local_path.to_path_buf(),
                destination: install_path.clone(),
                reason: format!("{:#}", e),
            })?;

        info!(
            "Linked {} {:?} -> {:?}",
            package.identity, install_path, local_path
        );
        Ok(())
    }
}

impl<R: Runtime, I: Installer, O: Io> Installer for LifecycleRouter<'_, R, I, O> {
    fn install_code(&self, package: &Package) -> Result<()> {
        self.install(package)
    }

    fn update_code(&self, initial: &Package, target: &Package) -> Result<()> {
        self.update(initial, target)
    }

    fn remove_code(&self, package: &Package) -> Result<()> {
        self.remove(package)
    }

    fn install_path(&self, package: &Package) -> PathBuf {
        self.installer.install_path(package)
    }

    fn ensure_vendor_dir_exists(&self) -> Result<()> {
        self.installer.ensure_vendor_dir_exists()
    }
}
