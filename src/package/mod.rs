//! Package naming.
//!
//! The host hands each lifecycle call a [`Package`]; its [`PackageIdentity`]
//! is the key into the local package registry.

mod identity;

pub use identity::{Package, PackageIdentity};
