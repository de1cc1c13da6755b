//! Strongly-typed platform versions.
//!
//! A [`Version`] identifies the platform software level a node runs or
//! wants. Versions are:
//!
//! - **Strongly typed**: Never confused with arbitrary strings at compile time
//! - **Totally ordered**: Semantic-version precedence via the `semver` crate
//! - **Structurally comparable**: Equality is what drives convergence
//!   decisions; ordering exists for display and diagnostics
//!
//! # Example
//!
//! ```rust
//! use strato_core::version::Version;
//!
//! let running: Version = "7.1.0".parse().unwrap();
//! let wanted = Version::new(7, 1, 0);
//! assert_eq!(running, wanted);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A platform version as reported by nodes and targeted by deploys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(semver::Version);

impl Version {
    /// Creates a version from major/minor/patch components.
    #[must_use]
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(semver::Version::new(major, minor, patch))
    }

    /// Creates a version from a raw semantic version.
    #[must_use]
    pub const fn from_semver(version: semver::Version) -> Self {
        Self(version)
    }

    /// Returns the underlying semantic version.
    #[must_use]
    pub const fn as_semver(&self) -> &semver::Version {
        &self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        semver::Version::parse(s)
            .map(Self)
            .map_err(|e| Error::InvalidVersion {
                message: format!("invalid version '{s}': {e}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_roundtrip() {
        let version = Version::new(7, 1, 0);
        let s = version.to_string();
        assert_eq!(s, "7.1.0");
        let parsed: Version = s.parse().unwrap();
        assert_eq!(version, parsed);
    }

    #[test]
    fn version_ordering() {
        let older = Version::new(7, 0, 9);
        let newer = Version::new(7, 1, 0);
        assert!(older < newer);
    }

    #[test]
    fn version_rejects_garbage() {
        let result: Result<Version> = "not-a-version".parse();
        assert!(result.is_err());
    }

    #[test]
    fn version_serializes_transparently() {
        let version = Version::new(7, 1, 0);
        let json = serde_json::to_string(&version).unwrap();
        assert_eq!(json, "\"7.1.0\"");

        let parsed: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, version);
    }
}
