//! API client for the Sitepush deployment service

use crate::config::{DeployConfig, Environment};
use crate::endpoints::Endpoints;
use crate::error::{DeployError, Result};
use crate::types::{TokenInfo, VersionInfo};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use reqwest::{Client as ReqwestClient, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Authenticated client against one environment's API base URL.
pub struct ApiClient {
    http: ReqwestClient,
    base_url: String,
    upload_key: String,
}

impl ApiClient {
    /// Build a client for `base_url` authenticating with `upload_key`.
    ///
    /// `insecure` disables TLS certificate verification. It exists for
    /// local and staging debugging behind an explicit CLI flag and is
    /// never the default.
    pub fn new(
        base_url: impl Into<String>,
        upload_key: impl Into<String>,
        insecure: bool,
    ) -> Result<Self> {
        let http = ReqwestClient::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(insecure)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            upload_key: upload_key.into(),
        })
    }

    /// Whether the upload key is accepted by the service.
    ///
    /// Metadata-only check: `HEAD /tokens/me`, true iff the response is
    /// exactly 200. Transport errors and every other status read as false,
    /// never as an error.
    pub async fn is_key_valid(&self) -> bool {
        let url = format!("{}/tokens/me", self.base_url);
        match self
            .http
            .head(&url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, &self.upload_key)
            .send()
            .await
        {
            Ok(response) => response.status() == StatusCode::OK,
            Err(err) => {
                debug!("Key validation request failed: {err}");
                false
            }
        }
    }

    /// Details about the upload key, if the service can describe it.
    pub async fn token_info(&self) -> Option<TokenInfo> {
        let url = format!("{}/tokens/me", self.base_url);
        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, &self.upload_key)
            .send()
            .await
            .ok()?;

        if response.status() != StatusCode::OK {
            return None;
        }
        response.json::<TokenInfo>().await.ok()
    }

    /// Whether the upload key is authorized for `site_id`.
    pub async fn site_authorized(&self, site_id: &str) -> bool {
        let url = format!("{}/sites/{}", self.base_url, site_id);
        match self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, &self.upload_key)
            .send()
            .await
        {
            Ok(response) => response.status() == StatusCode::OK,
            Err(err) => {
                debug!("Site authorization request failed: {err}");
                false
            }
        }
    }

    /// Upload the archive as a multipart POST and decode the activated
    /// version from the response.
    ///
    /// Non-success statuses become [`DeployError::UploadRejected`] carrying
    /// the raw body verbatim. A malformed body on a success status is not an
    /// upload failure: the bytes already reached the server, so whatever
    /// fields decoded are returned.
    pub async fn upload(
        &self,
        site_id: &str,
        env: Environment,
        archive: Vec<u8>,
    ) -> Result<VersionInfo> {
        let part = Part::bytes(archive).file_name("upload.zip");
        let form = Form::new().part("file", part);

        let url = format!("{}/sites/{}/upload?env={}", self.base_url, site_id, env);
        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, &self.upload_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(DeployError::UploadRejected {
                status: status.as_u16(),
                body,
            });
        }

        match serde_json::from_str::<VersionInfo>(&body) {
            Ok(info) => Ok(info),
            Err(err) => {
                warn!("Could not decode upload response: {err}");
                Ok(salvage_version_info(&body))
            }
        }
    }
}

/// Best-effort decode of a malformed success response.
fn salvage_version_info(body: &str) -> VersionInfo {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .map(|value| VersionInfo {
            version: value["version"].as_i64().unwrap_or_default(),
            staging_url: value["stagingUrl"].as_str().unwrap_or_default().to_string(),
            is_active: value["is_active"].as_bool().unwrap_or_default(),
            ..VersionInfo::default()
        })
        .unwrap_or_default()
}

/// Resolve `target` against the endpoint table and upload the archive.
///
/// The orchestrator validates the target upfront, but the uploader defends
/// independently: an environment missing from the table fails here before
/// any network activity.
pub async fn upload_archive(
    endpoints: &Endpoints,
    config: &DeployConfig,
    target: Environment,
    insecure: bool,
    archive: Vec<u8>,
) -> Result<VersionInfo> {
    let base_url = endpoints
        .resolve(target)
        .ok_or_else(|| DeployError::UnknownEnvironment(target.to_string()))?;

    let client = ApiClient::new(base_url, &config.upload_key, insecure)?;
    client.upload(&config.site_id, target, archive).await
}
