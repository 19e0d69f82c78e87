pub mod commands;
pub mod config;
pub mod error;
pub mod installer;
pub mod io;
pub mod package;
pub mod probe;
pub mod registry;
pub mod router;
pub mod runtime;

pub use error::Error;
pub use installer::Installer;
pub use package::{Package, PackageIdentity};
pub use probe::{LinkProbe, LinkState};
pub use registry::LocalPackageRegistry;
pub use router::LifecycleRouter;

/// Test utilities for cross-platform path handling.
#[cfg(test)]
pub mod test_utils {
    use crate::runtime::MockRuntime;
    use std::path::PathBuf;

    /// Returns the project directory used by mock-based tests.
    /// - Unix: `/home/dev/app`
    /// - Windows: `C:\dev\app`
    pub fn test_project_dir() -> PathBuf {
        #[cfg(not(windows))]
        {
            PathBuf::from("/home/dev/app")
        }
        #[cfg(windows)]
        {
            PathBuf::from(r"C:\dev\app")
        }
    }

    /// Configure a mock runtime with common defaults for tests.
    /// - current_dir set to [`test_project_dir`]
    pub fn configure_mock_runtime_basics(runtime: &mut MockRuntime) {
        runtime
            .expect_current_dir()
            .returning(|| Ok(test_project_dir()));
    }
}
