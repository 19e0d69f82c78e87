//! Errors raised by the link lifecycle itself.
//!
//! Failures of the default installer or of plain filesystem calls travel as
//! `anyhow::Error`; these typed variants ride inside it and can be recovered
//! with `downcast_ref::<Error>()`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A configured local package cannot be used. Raised while loading the
    /// registry; nothing from that configuration is kept.
    #[error("Local path {path:?} defined for package \"{package}\" is not valid: {reason}")]
    InvalidConfiguration {
        package: String,
        path: PathBuf,
        reason: String,
    },

    /// The local package mapping in the manifest has the wrong shape.
    #[error("Manifest entry {key} is not valid: {reason}")]
    MalformedConfiguration { key: String, reason: String },

    /// The link at the install path could not be created.
    #[error("Symlink failed: {source_path:?} => {destination:?}: {reason}")]
    LinkCreation {
        source_path: PathBuf,
        destination: PathBuf,
        reason: String,
    },
}

impl Error {
    pub(crate) fn invalid_configuration(
        package: impl Into<String>,
        path: impl Into<PathBuf>,
        reason: impl Into<String>,
    ) -> Self {
        Error::InvalidConfiguration {
            package: package.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }
}
