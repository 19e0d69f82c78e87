//! Classification of an install path.

use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::runtime::{Runtime, normalize_path};

/// What currently sits at an install path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    /// Nothing there.
    Absent,
    /// A plain directory or file, as the default installer leaves it.
    RegularInstall,
    /// A link pointing somewhere else. `target` is the raw link target.
    ManagedLink { target: PathBuf },
    /// A link pointing at itself. Never produced by us, treated as unmanaged.
    SelfReferentialLink,
}

impl LinkState {
    pub fn is_managed_link(&self) -> bool {
        matches!(self, LinkState::ManagedLink { .. })
    }
}

impl std::fmt::Display for LinkState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkState::Absent => write!(f, "absent"),
            LinkState::RegularInstall => write!(f, "installed"),
            LinkState::ManagedLink { target } => write!(f, "linked -> {}", target.display()),
            LinkState::SelfReferentialLink => write!(f, "self-referential link"),
        }
    }
}

/// Read-only inspection of install paths. Never mutates, never fails.
pub struct LinkProbe<'a, R: Runtime> {
    runtime: &'a R,
}

impl<'a, R: Runtime> LinkProbe<'a, R> {
    pub fn new(runtime: &'a R) -> Self {
        Self { runtime }
    }

    #[tracing::instrument(skip(self))]
    pub fn classify(&self, path: &Path) -> LinkState {
        if !self.runtime.is_symlink(path) {
            return if self.runtime.exists(path) {
                LinkState::RegularInstall
            } else {
                LinkState::Absent
            };
        }

        let target = match self.runtime.read_link(path) {
            Ok(target) => target,
            Err(e) => {
                // Still a link we can remove, so treat it as ours
                warn!("Cannot read link {:?}: {}", path, e);
                return LinkState::ManagedLink {
                    target: PathBuf::new(),
                };
            }
        };

        if target.as_os_str() == path.as_os_str() {
            debug!("{:?} links to itself", path);
            return LinkState::SelfReferentialLink;
        }

        // `name -> ./name` and friends resolve back onto the link itself
        let resolves_to_self = self
            .runtime
            .resolve_link(path)
            .map(|resolved| normalize_path(&resolved) == normalize_path(path))
            .unwrap_or(false);
        if resolves_to_self {
            debug!("{:?} resolves to itself via {:?}", path, target);
            return LinkState::SelfReferentialLink;
        }

        LinkState::ManagedLink { target }
    }

    pub fn is_managed_link(&self, path: &Path) -> bool {
        self.classify(path).is_managed_link()
    }

    /// Whether the link at `path` lands on `expected`, however it is spelled.
    pub fn links_to(&self, path: &Path, expected: &Path) -> bool {
        self.runtime
            .resolve_link(path)
            .map(|resolved| normalize_path(&resolved) == normalize_path(expected))
            .unwrap_or(false)
    }
}
