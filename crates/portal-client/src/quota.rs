//! Quota Service Client
//!
//! Single authenticated `GET /quota` per page view. Non-2xx responses are
//! errors here; callers degrade to the free plan via
//! [`portal_core::current_plan`].

use async_trait::async_trait;

use portal_core::{PortalError, QuotaClient, RemotePlanStatus, Result};

/// Quota service configuration
#[derive(Clone, Debug)]
pub struct QuotaConfig {
    /// Quota API base URL
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".into(),
            timeout_secs: 30,
        }
    }
}

impl QuotaConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("PORTAL_QUOTA_URL")
                .unwrap_or_else(|_| "http://localhost:8080".into()),
            ..Default::default()
        }
    }
}

/// HTTP quota client
pub struct HttpQuotaClient {
    http: reqwest::Client,
    config: QuotaConfig,
}

impl HttpQuotaClient {
    /// Create from configuration
    pub fn from_config(config: QuotaConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self { http, config }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_config(QuotaConfig::from_env())
    }

    fn quota_endpoint(&self) -> String {
        format!("{}/quota", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl QuotaClient for HttpQuotaClient {
    async fn fetch_status(&self, access_token: &str) -> Result<RemotePlanStatus> {
        let response = self
            .http
            .get(self.quota_endpoint())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| PortalError::Quota(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PortalError::Quota(format!("HTTP {status}")));
        }

        response
            .json()
            .await
            .map_err(|e| PortalError::Quota(e.to_string()))
    }

    fn name(&self) -> &str {
        "http-quota"
    }
}

/// Build the quota client for this environment.
pub fn quota_from_env() -> std::sync::Arc<dyn QuotaClient> {
    std::sync::Arc::new(HttpQuotaClient::from_env())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = QuotaConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = HttpQuotaClient::from_config(QuotaConfig {
            base_url: "https://api.example.com/".into(),
            ..Default::default()
        });
        assert_eq!(client.quota_endpoint(), "https://api.example.com/quota");
    }
}
