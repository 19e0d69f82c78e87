use anyhow::{Result, bail};
use log::debug;
use std::path::{Path, PathBuf};

use super::Installer;
use crate::package::Package;
use crate::runtime::Runtime;

/// Plain-directory installer for a Composer style `vendor/` tree.
///
/// It can clear an install path but cannot fetch code; that stays with the
/// package manager.
pub struct VendorInstaller<'a, R: Runtime> {
    runtime: &'a R,
    vendor_dir: PathBuf,
}

impl<'a, R: Runtime> VendorInstaller<'a, R> {
    pub fn new(runtime: &'a R, vendor_dir: PathBuf) -> Self {
        Self {
            runtime,
            vendor_dir,
        }
    }
}

impl<R: Runtime> Installer for VendorInstaller<'_, R> {
    fn install_code(&self, package: &Package) -> Result<()> {
        bail!(
            "{} has no local override; install it with the package manager",
            package
        )
    }

    fn update_code(&self, initial: &Package, target: &Package) -> Result<()> {
        bail!(
            "Cannot update {} to {} without the package manager",
            initial,
            target.version
        )
    }

    #[tracing::instrument(skip(self))]
    fn remove_code(&self, package: &Package) -> Result<()> {
        let path = self.install_path(package);
        if self.runtime.is_symlink(&path) {
            debug!("Removing foreign link {:?}", path);
            self.runtime.remove_symlink(&path)
        } else if self.runtime.is_dir(&path) {
            debug!("Removing directory {:?}", path);
            self.runtime.remove_dir_all(&path)
        } else if self.runtime.exists(&path) {
            debug!("Removing file {:?}", path);
            self.runtime.remove_file(&path)
        } else {
            debug!("Nothing installed at {:?}", path);
            Ok(())
        }
    }

    fn install_path(&self, package: &Package) -> PathBuf {
        self.vendor_dir
            .join(&package.identity.vendor)
            .join(&package.identity.name)
    }

    fn ensure_vendor_dir_exists(&self) -> Result<()> {
        self.runtime.create_dir_all(&self.vendor_dir)
    }
}
