//! CLI commands.
//!
//! Each command reads the root manifest, loads the local package registry
//! up front and then drives the [`LifecycleRouter`] with a [`VendorInstaller`]
//! as the default installer.

use anyhow::{Result, bail};
use log::debug;
use std::path::{Path, PathBuf};

use crate::{
    config::{Config, ConfigOverrides, LOCAL_PACKAGES_KEY},
    installer::VendorInstaller,
    io::Io,
    package::{Package, PackageIdentity},
    router::LifecycleRouter,
    runtime::Runtime,
};

mod link;
mod status;
mod unlink;

pub use link::link;
pub use status::status;
pub use unlink::unlink;

/// Version reported for a package served from its working copy.
pub const LOCAL_VERSION: &str = "dev-local";

type VendorRouter<'a, R, O> = LifecycleRouter<'a, R, VendorInstaller<'a, R>, O>;

/// Load configuration and build a router over the project's vendor dir.
fn open<'a, R: Runtime, O: Io>(
    runtime: &'a R,
    io: &'a O,
    manifest: &Path,
    overrides: ConfigOverrides,
) -> Result<(Config, VendorRouter<'a, R, O>)> {
    let config = Config::load(runtime, manifest, overrides)?;
    let installer = VendorInstaller::new(runtime, config.vendor_dir.clone());
    let router = LifecycleRouter::from_config(runtime, installer, io, &config)?;
    Ok((config, router))
}

/// Registered packages to act on: all of them, or the ones named.
fn select_packages<R: Runtime, O: Io>(
    config: &Config,
    router: &VendorRouter<'_, R, O>,
    names: &[String],
) -> Result<Vec<(Package, PathBuf)>> {
    let registry = router.registry();
    if names.is_empty() {
        return Ok(registry
            .iter()
            .map(|(identity, path)| {
                (
                    Package::new(identity.clone(), LOCAL_VERSION),
                    path.to_path_buf(),
                )
            })
            .collect());
    }

    let mut selected = Vec::with_capacity(names.len());
    for name in names {
        let identity = name.parse::<PackageIdentity>()?;
        let Some(path) = registry.lookup(&identity) else {
            bail!(
                "Package {} is not configured under extra.{}.{} in {:?}",
                identity,
                config.config_key,
                LOCAL_PACKAGES_KEY,
                config.manifest_path
            );
        };
        debug!("Selected {} => {:?}", identity, path);
        selected.push((Package::new(identity, LOCAL_VERSION), path.to_path_buf()));
    }
    Ok(selected)
}

fn print_no_packages<O: Io>(io: &O, config: &Config) {
    io.write(&format!(
        "No local packages configured under extra.{}.{}.",
        config.config_key, LOCAL_PACKAGES_KEY
    ));
}
