use anyhow::{Result, anyhow};
use std::str::FromStr;

/// A package name in the form `vendor/name`.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct PackageIdentity {
    pub vendor: String,
    pub name: String,
}

impl std::fmt::Display for PackageIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.vendor, self.name)
    }
}

impl FromStr for PackageIdentity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            Err(anyhow!(
                "Invalid package name '{}'. Expected 'vendor/name'.",
                s
            ))
        } else {
            Ok(PackageIdentity {
                vendor: parts[0].to_string(),
                name: parts[1].to_string(),
            })
        }
    }
}

/// A specific version of a package, as handed over by the host for one
/// lifecycle call.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Package {
    pub identity: PackageIdentity,
    pub version: String,
}

impl Package {
    pub fn new(identity: PackageIdentity, version: impl Into<String>) -> Self {
        Self {
            identity,
            version: version.into(),
        }
    }

    /// Parse `vendor/name` and attach a version.
    pub fn parse(name: &str, version: impl Into<String>) -> Result<Self> {
        Ok(Self::new(name.parse()?, version))
    }
}

impl std::fmt::Display for Package {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.identity, self.version)
    }
}
