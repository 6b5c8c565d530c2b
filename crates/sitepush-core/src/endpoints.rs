//! Environment to base URL resolution

use crate::config::Environment;
use std::collections::HashMap;

/// Immutable table mapping deployment environments to API base URLs.
///
/// Built once at startup and handed to the [`crate::Deployer`]; never a
/// process-wide mutable global.
#[derive(Debug, Clone)]
pub struct Endpoints {
    table: HashMap<Environment, String>,
}

impl Endpoints {
    /// The standard Sitepush service endpoints.
    ///
    /// The local development endpoint is only present in non-release builds.
    pub fn standard() -> Self {
        let mut table = HashMap::new();
        #[cfg(debug_assertions)]
        table.insert(Environment::Dev, "http://localhost:9090".to_string());
        table.insert(
            Environment::Staging,
            "https://staging.sitepush.io".to_string(),
        );
        table.insert(
            Environment::Production,
            "https://app.sitepush.io:2113".to_string(),
        );
        Self { table }
    }

    /// A table with explicit entries, for tests and self-hosted services.
    pub fn custom(entries: impl IntoIterator<Item = (Environment, String)>) -> Self {
        Self {
            table: entries.into_iter().collect(),
        }
    }

    pub fn resolve(&self, env: Environment) -> Option<&str> {
        self.table.get(&env).map(String::as_str)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::standard()
    }
}
