use anyhow::Result;
use std::path::Path;

use crate::{config::ConfigOverrides, io::Io, runtime::Runtime};

use super::{open, print_no_packages, select_packages};

/// Remove the links of the selected packages, leaving working copies alone
#[tracing::instrument(skip(runtime, io, overrides))]
pub fn unlink<R: Runtime, O: Io>(
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

    let mut removed = 0;
    for (package, _) in select_packages(&config, &router, packages)? {
        if !router.link_state(&package).is_managed_link() {
            io.write(&format!("  - {} is not linked, skipping", package.identity));
            continue;
        }
        io.write(&format!("  - Unlinking {}", package.identity));
        router.remove(&package)?;
        removed += 1;
    }

    if removed > 0 {
        io.write("Run the package manager's install to restore the unlinked packages.");
    }
    Ok(())
}
