//! Root manifest configuration.
//!
//! Local packages are declared in the project's `composer.json`:
//!
//! ```json
//! {
//!     "extra": {
//!         "symlinker": {
//!             "local-packages": {
//!                 "acme/widget": "../widget"
//!             }
//!         }
//!     }
//! }
//! ```

use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::runtime::{Runtime, absolutize};

/// Key under `extra` read by default.
pub const DEFAULT_CONFIG_KEY: &str = "symlinker";

/// Key under the configuration block holding the package mapping.
pub const LOCAL_PACKAGES_KEY: &str = "local-packages";

pub const DEFAULT_VENDOR_DIR: &str = "vendor";

#[derive(Deserialize, Debug, Default)]
struct RootManifest {
    #[serde(default)]
    extra: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    config: ManifestConfig,
}

#[derive(Deserialize, Debug, Default)]
struct ManifestConfig {
    #[serde(rename = "vendor-dir")]
    vendor_dir: Option<String>,
}

/// Values that take precedence over the manifest.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub vendor_dir: Option<PathBuf>,
    pub config_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub manifest_path: PathBuf,
    pub project_dir: PathBuf,
    pub vendor_dir: PathBuf,
    pub config_key: String,
    /// `vendor/name => absolute local path`, not yet validated.
    pub local_packages: BTreeMap<String, PathBuf>,
}

impl Config {
    /// Read the manifest and resolve every path against its directory.
    #[tracing::instrument(skip(runtime, overrides))]
    pub fn load<R: Runtime>(
        runtime: &R,
        manifest_path: &Path,
        overrides: ConfigOverrides,
    ) -> Result<Self> {
        let cwd = runtime.current_dir()?;
        let manifest_path = absolutize(&cwd, manifest_path);
        let project_dir = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(cwd);

        let content = runtime
            .read_to_string(&manifest_path)
            .with_context(|| format!("Failed to read manifest {:?}", manifest_path))?;
        let manifest: RootManifest = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse manifest {:?}", manifest_path))?;

        let config_key = overrides
            .config_key
            .unwrap_or_else(|| DEFAULT_CONFIG_KEY.to_string());

        let vendor_dir = overrides
            .vendor_dir
            .or_else(|| manifest.config.vendor_dir.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_VENDOR_DIR));
        let vendor_dir = absolutize(&project_dir, &vendor_dir);

        let local_packages = parse_local_packages(&manifest.extra, &config_key)?
            .into_iter()
            .map(|(name, path)| {
                let path = absolutize(&project_dir, Path::new(&path));
                (name, path)
            })
            .collect::<BTreeMap<_, _>>();

        debug!(
            "Manifest {:?}: vendor dir {:?}, {} local package(s) under extra.{}",
            manifest_path,
            vendor_dir,
            local_packages.len(),
            config_key
        );

        Ok(Self {
            manifest_path,
            project_dir,
            vendor_dir,
            config_key,
            local_packages,
        })
    }
}

/// Pull `extra.<key>.local-packages` out of the manifest. A missing block
/// means no local packages.
fn parse_local_packages(
    extra: &serde_json::Map<String, serde_json::Value>,
    config_key: &str,
) -> Result<BTreeMap<String, String>, Error> {
    let Some(block) = extra.get(config_key) else {
        return Ok(BTreeMap::new());
    };
    let Some(packages) = block.get(LOCAL_PACKAGES_KEY) else {
        return Ok(BTreeMap::new());
    };

    let key = format!("extra.{}.{}", config_key, LOCAL_PACKAGES_KEY);
    let entries = packages
        .as_object()
        .ok_or_else(|| Error::MalformedConfiguration {
            key: key.clone(),
            reason: format!(
                "expected an object of \"vendor/name\": \"path\" entries, got {}",
                packages
            ),
        })?;

    entries
        .iter()
        .map(|(name, value)| match value.as_str() {
            Some(path) => Ok((name.clone(), path.to_string())),
            None => Err(Error::MalformedConfiguration {
                key: format!("{}.{}", key, name),
                reason: format!("expected a path string, got {}", value),
            }),
        })
        .collect()
}
