//! Deployment configuration

use crate::error::DeployError;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Deployment environments a site can be pushed to.
///
/// `Dev` only resolves in non-release builds, see [`crate::Endpoints`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Dev,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = DeployError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            #[cfg(debug_assertions)]
            "dev" => Ok(Environment::Dev),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            other => Err(DeployError::UnknownEnvironment(other.to_string())),
        }
    }
}

/// Validated configuration for one deployment run.
///
/// Constructed once from the configuration file and never mutated afterwards.
#[derive(Clone)]
pub struct DeployConfig {
    /// Default target environment when the command line does not name one
    pub environment: Environment,
    /// Site identifier, usually the site's fully qualified domain name
    pub site_id: String,
    /// Upload credential. Secret, kept out of logs and Debug output.
    pub upload_key: String,
    /// Directory holding the built site
    pub public_folder: PathBuf,
}

impl fmt::Debug for DeployConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeployConfig")
            .field("environment", &self.environment)
            .field("site_id", &self.site_id)
            .field("upload_key", &"<redacted>")
            .field("public_folder", &self.public_folder)
            .finish()
    }
}
