//! Validated mapping from package identity to local working copy.

use log::debug;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::package::PackageIdentity;
use crate::runtime::Runtime;

/// File that marks a directory as a package root.
pub const MANIFEST_FILE: &str = "composer.json";

/// Local packages that replace their managed install with a link.
///
/// Every entry pointed at an existing directory holding a [`MANIFEST_FILE`]
/// when the registry was loaded. The mapping never changes afterwards except
/// through [`LocalPackageRegistry::reload`], which replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalPackageRegistry {
    packages: BTreeMap<PackageIdentity, PathBuf>,
}

impl LocalPackageRegistry {
    /// Validate every `vendor/name => path` entry and build the registry.
    ///
    /// The first invalid entry fails the whole load.
    #[tracing::instrument(skip(runtime, mapping))]
    pub fn load<R, I, K, P>(runtime: &R, mapping: I) -> Result<Self, Error>
    where
        R: Runtime,
        I: IntoIterator<Item = (K, P)>,
        K: AsRef<str>,
        P: Into<PathBuf>,
    {
        let mut packages = BTreeMap::new();
        for (name, path) in mapping {
            let name = name.as_ref();
            let path = path.into();
            let identity = name
                .parse::<PackageIdentity>()
                .map_err(|e| Error::invalid_configuration(name, &path, e.to_string()))?;
            validate_local_package(runtime, name, &path)?;
            debug!("Registered local package {} => {:?}", identity, path);
            packages.insert(identity, path);
        }
        Ok(Self { packages })
    }

    /// Replace the mapping with a freshly validated one. On error the current
    /// mapping is kept as it was.
    pub fn reload<R, I, K, P>(&mut self, runtime: &R, mapping: I) -> Result<(), Error>
    where
        R: Runtime,
        I: IntoIterator<Item = (K, P)>,
        K: AsRef<str>,
        P: Into<PathBuf>,
    {
        *self = Self::load(runtime, mapping)?;
        Ok(())
    }

    pub fn lookup(&self, identity: &PackageIdentity) -> Option<&Path> {
        self.packages.get(identity).map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PackageIdentity, &Path)> {
        self.packages.iter().map(|(id, path)| (id, path.as_path()))
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// A local package is an existing directory with a manifest at its root.
fn validate_local_package<R: Runtime>(runtime: &R, name: &str, path: &Path) -> Result<(), Error> {
    if !runtime.exists(path) {
        return Err(Error::invalid_configuration(name, path, "path does not exist"));
    }
    if !runtime.is_dir(path) {
        return Err(Error::invalid_configuration(name, path, "not a directory"));
    }
    if !runtime.exists(&path.join(MANIFEST_FILE)) {
        return Err(Error::invalid_configuration(
            name,
            path,
            format!("no {} found", MANIFEST_FILE),
        ));
    }
    Ok(())
}
