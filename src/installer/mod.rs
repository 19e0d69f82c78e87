//! The default installer contract.
//!
//! [`crate::router::LifecycleRouter`] wraps an implementation of [`Installer`]
//! and falls back to it for every package without a local override.

mod vendor;

use anyhow::Result;
use std::path::PathBuf;

use crate::package::Package;

pub use vendor::VendorInstaller;

#[cfg_attr(test, mockall::automock)]
pub trait Installer {
    /// Put the package's code at its install path.
    fn install_code(&self, package: &Package) -> Result<()>;

    /// Move an installed package from `initial` to `target`.
    fn update_code(&self, initial: &Package, target: &Package) -> Result<()>;

    /// Remove whatever the package left at its install path.
    fn remove_code(&self, package: &Package) -> Result<()>;

    /// Where the package's code lives.
    fn install_path(&self, package: &Package) -> PathBuf;

    fn ensure_vendor_dir_exists(&self) -> Result<()>;
}
