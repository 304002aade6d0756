//! Identity Provider Client
//!
//! Talks to the hosted auth service: session retrieval from a stored bearer
//! token, OAuth sign-in URL construction, and capture of the tokens the
//! auth-callback page receives in its URL fragment.

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;

use portal_core::{IdentityProvider, PortalError, Result, Session};

/// Identity provider configuration
#[derive(Clone, Debug)]
pub struct IdentityConfig {
    /// Auth service base URL
    pub base_url: String,

    /// Publishable API key sent with every request
    pub anon_key: String,

    /// OAuth provider used for sign-in
    pub oauth_provider: String,

    /// Access token carried over from a previous sign-in, if any
    pub access_token: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9999".into(),
            anon_key: String::new(),
            oauth_provider: "google".into(),
            access_token: None,
            timeout_secs: 30,
        }
    }
}

impl IdentityConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("PORTAL_AUTH_URL")
                .unwrap_or_else(|_| "http://localhost:9999".into()),
            anon_key: std::env::var("PORTAL_AUTH_ANON_KEY").unwrap_or_default(),
            oauth_provider: std::env::var("PORTAL_AUTH_OAUTH_PROVIDER")
                .unwrap_or_else(|_| "google".into()),
            access_token: std::env::var("PORTAL_AUTH_ACCESS_TOKEN").ok(),
            ..Default::default()
        }
    }
}

/// Tokens delivered to the auth-callback page in its URL fragment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallbackTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

/// Parse the auth-callback URL fragment (`access_token=...&refresh_token=...`).
///
/// Returns `None` when no access token is present; the callback page then
/// shows its error state without retrying.
pub fn parse_callback_fragment(fragment: &str) -> Option<CallbackTokens> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);

    let mut access_token = None;
    let mut refresh_token = None;
    for pair in fragment.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        match key {
            "access_token" => access_token = Some(value.to_string()),
            "refresh_token" => refresh_token = Some(value.to_string()),
            _ => {}
        }
    }

    access_token.map(|access_token| CallbackTokens {
        access_token,
        refresh_token,
    })
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// HTTP identity provider
pub struct HttpIdentityProvider {
    http: reqwest::Client,
    config: IdentityConfig,
    /// Current access token; replaced when the auth callback stores a
    /// fresh session
    token: RwLock<Option<String>>,
}

impl HttpIdentityProvider {
    /// Create from configuration
    pub fn from_config(config: IdentityConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        let token = RwLock::new(config.access_token.clone());
        Self {
            http,
            config,
            token,
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_config(IdentityConfig::from_env())
    }

    fn user_endpoint(&self) -> String {
        format!("{}/auth/v1/user", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn get_session(&self) -> Result<Option<Session>> {
        let Some(token) = self.token.read().await.clone() else {
            return Ok(None);
        };

        let response = self
            .http
            .get(self.user_endpoint())
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| PortalError::IdentityUnavailable(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            // Expired or revoked token reads as signed out, not as a failure.
            return Ok(None);
        }
        if !status.is_success() {
            return Err(PortalError::Identity(format!("HTTP {status}")));
        }

        let user: UserResponse = response
            .json()
            .await
            .map_err(|e| PortalError::Identity(e.to_string()))?;

        Ok(Some(Session::new(
            user.id,
            user.email.unwrap_or_default(),
            token,
        )))
    }

    async fn set_session(&self, access_token: &str, _refresh_token: Option<&str>) -> Result<()> {
        *self.token.write().await = Some(access_token.to_string());
        Ok(())
    }

    fn sign_in_url(&self, redirect_to: &str) -> String {
        format!(
            "{}/auth/v1/authorize?provider={}&redirect_to={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.oauth_provider,
            urlencoding::encode(redirect_to)
        )
    }

    fn name(&self) -> &str {
        "http-identity"
    }
}

/// No-op identity provider for contexts with no interactive surface.
///
/// Exposes the same capability interface as the HTTP provider so shared
/// logic never branches on context type: every session read answers
/// "not signed in".
#[derive(Clone, Copy, Debug, Default)]
pub struct StubIdentityProvider;

#[async_trait]
impl IdentityProvider for StubIdentityProvider {
    async fn get_session(&self) -> Result<Option<Session>> {
        Ok(None)
    }

    async fn set_session(&self, _: &str, _: Option<&str>) -> Result<()> {
        Ok(())
    }

    fn sign_in_url(&self, _: &str) -> String {
        String::new()
    }

    fn name(&self) -> &str {
        "stub-identity"
    }
}

/// Build the identity provider for this environment.
///
/// Falls back to the stub when no auth service is configured.
pub fn identity_from_env() -> std::sync::Arc<dyn IdentityProvider> {
    let config = IdentityConfig::from_env();
    if config.anon_key.is_empty() {
        tracing::warn!("PORTAL_AUTH_ANON_KEY not set - sign-in disabled");
        std::sync::Arc::new(StubIdentityProvider)
    } else {
        std::sync::Arc::new(HttpIdentityProvider::from_config(config))
    }
}
