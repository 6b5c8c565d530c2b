//! Wire types decoded from deployment service responses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response of `GET /tokens/me`, describing the upload credential.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenInfo {
    pub expires_at: Option<DateTime<Utc>>,
    pub site_fqdn: String,
}

/// Response of a successful upload, describing the activated site version.
///
/// Every field is defaulted so a partially filled response still decodes;
/// the upload already succeeded by the time this is read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionInfo {
    pub id: String,
    pub site_id: i64,
    pub version: i64,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "stagingUrl")]
    pub staging_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_info_decodes_with_missing_fields() {
        let info: VersionInfo =
            serde_json::from_str(r#"{"version":5,"stagingUrl":"https://x.test"}"#).unwrap();
        assert_eq!(info.version, 5);
        assert_eq!(info.staging_url, "https://x.test");
        assert!(!info.is_active);
        assert!(info.created_at.is_none());
    }

    #[test]
    fn token_info_decodes_full_payload() {
        let info: TokenInfo = serde_json::from_str(
            r#"{"expires_at":"2026-01-01T00:00:00Z","site_fqdn":"example.com"}"#,
        )
        .unwrap();
        assert_eq!(info.site_fqdn, "example.com");
        assert!(info.expires_at.is_some());
    }
}
