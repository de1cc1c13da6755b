//! Zone identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Identity of the zone a deployer operates in.
///
/// A zone is the system/region/environment triple identifying one
/// deployment target. It is supplied at process start and constant for the
/// process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneIdentity {
    system: String,
    region: String,
    environment: String,
}

impl ZoneIdentity {
    /// Creates a zone identity, validating each component.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidZone`] if any component is empty or contains
    /// characters outside lowercase ASCII letters, digits, and `-`.
    pub fn new(
        system: impl Into<String>,
        region: impl Into<String>,
        environment: impl Into<String>,
    ) -> Result<Self> {
        let system = validated("system", system.into())?;
        let region = validated("region", region.into())?;
        let environment = validated("environment", environment.into())?;

        Ok(Self {
            system,
            region,
            environment,
        })
    }

    /// Returns the system name (e.g. `main`).
    #[must_use]
    pub fn system(&self) -> &str {
        &self.system
    }

    /// Returns the region name (e.g. `us-east-1`).
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Returns the environment name (e.g. `prod`).
    #[must_use]
    pub fn environment(&self) -> &str {
        &self.environment
    }
}

impl fmt::Display for ZoneIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.system, self.environment, self.region)
    }
}

fn validated(component: &str, value: String) -> Result<String> {
    if value.is_empty() {
        return Err(Error::InvalidZone {
            message: format!("{component} must not be empty"),
        });
    }

    if !value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(Error::InvalidZone {
            message: format!("{component} '{value}' contains invalid characters"),
        });
    }

    Ok(value)
}
