use anyhow::Result;
use std::path::Path;

use crate::{config::ConfigOverrides, io::Io, probe::LinkState, runtime::Runtime};

use super::{open, print_no_packages, select_packages};

/// Show where each local package is and what sits at its install path
#[tracing::instrument(skip(runtime, io, overrides))]
pub fn status<R: Runtime, O: Io>(
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
        let install_path = router.install_path(&package);
        let state = router.link_state(&package);
        let linked_here = router.is_linked_to(&package, &local_path);
        io.write(&package.identity.to_string());
        io.write(&format!("  local:   {}", local_path.display()));
        io.write(&format!(
            "  install: {} ({})",
            install_path.display(),
            describe(&state, linked_here)
        ));
    }
    Ok(())
}

fn describe(state: &LinkState, linked_here: bool) -> String {
    match state {
        LinkState::ManagedLink { .. } if linked_here => "linked".to_string(),
        LinkState::ManagedLink { target } => {
            format!("linked elsewhere -> {}", target.display())
        }
        other => other.to_string(),
    }
}
