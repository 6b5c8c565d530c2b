//! Deployment orchestration
//!
//! Linear pipeline: validate the upload key, validate site authorization,
//! pack the public folder, upload. Every failure aborts the run at the step
//! that produced it; there are no retries.

use crate::archive::build_archive;
use crate::client::{upload_archive, ApiClient};
use crate::config::{DeployConfig, Environment};
use crate::endpoints::Endpoints;
use crate::error::{DeployError, Result};
use crate::types::VersionInfo;
use tracing::{debug, warn};

/// Terminal result of a run that reached the upload step.
///
/// A rejected upload is a completed run, not a fault: the service answered,
/// the answer was no, and the caller decides how loudly to say so.
#[derive(Debug)]
pub enum DeployOutcome {
    Released(VersionInfo),
    Rejected { status: u16, body: String },
}

/// Sequences one deployment run against an endpoint table.
pub struct Deployer {
    endpoints: Endpoints,
    insecure: bool,
}

impl Deployer {
    pub fn new() -> Self {
        Self {
            endpoints: Endpoints::standard(),
            insecure: false,
        }
    }

    pub fn with_endpoints(endpoints: Endpoints) -> Self {
        Self {
            endpoints,
            insecure: false,
        }
    }

    /// Disable TLS verification for local/staging debugging.
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Run the full pipeline for `config` against `target`.
    pub async fn run(&self, config: &DeployConfig, target: Environment) -> Result<DeployOutcome> {
        let base_url = self
            .endpoints
            .resolve(target)
            .ok_or_else(|| DeployError::UnknownEnvironment(target.to_string()))?;

        let client = ApiClient::new(base_url, &config.upload_key, self.insecure)?;

        debug!("Validating upload key");
        if !client.is_key_valid().await {
            return Err(DeployError::CredentialInvalid);
        }

        // Advisory only: a token bound to a different site still passes key
        // validation, so point at the mismatch before the server does.
        if let Some(token) = client.token_info().await {
            if !token.site_fqdn.is_empty() && token.site_fqdn != config.site_id {
                warn!(
                    "The upload key belongs to {}, not {}",
                    token.site_fqdn, config.site_id
                );
            }
        }

        debug!("Validating site authorization for {}", config.site_id);
        if !client.site_authorized(&config.site_id).await {
            return Err(DeployError::SiteUnauthorized);
        }

        debug!("Packing {}", config.public_folder.display());
        let archive = build_archive(&config.public_folder)?;

        debug!("Uploading {} bytes to {target}", archive.len());
        match upload_archive(&self.endpoints, config, target, self.insecure, archive).await {
            Ok(info) => Ok(DeployOutcome::Released(info)),
            Err(DeployError::UploadRejected { status, body }) => {
                Ok(DeployOutcome::Rejected { status, body })
            }
            Err(err) => Err(err),
        }
    }
}

impl Default for Deployer {
    fn default() -> Self {
        Self::new()
    }
}
