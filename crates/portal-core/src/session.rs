//! Session Resolution
//!
//! Retrieves the current authentication session from the identity provider.
//! Resolution fails soft: any provider error or absent session yields `None`,
//! one attempt per invocation, no retries. Callers re-invoke on the next
//! page load if needed.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// An authenticated session as returned by the identity provider.
///
/// The access token is a short-lived bearer credential, used once per plan
/// lookup and never persisted by this engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque identifier, stable across requests
    pub user_id: String,

    /// Used for display and checkout prefill
    pub email: String,

    /// Bearer credential for the quota lookup
    pub access_token: String,
}

impl Session {
    pub fn new(
        user_id: impl Into<String>,
        email: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            access_token: access_token.into(),
        }
    }
}

/// Identity provider abstraction (Strategy pattern)
///
/// Implemented over HTTP in `portal-client`; a stub implementation covers
/// non-interactive contexts so shared logic runs identically in both.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Retrieve the current session, or `None` when not signed in
    async fn get_session(&self) -> Result<Option<Session>>;

    /// Store tokens captured by the auth-callback page
    async fn set_session(&self, access_token: &str, refresh_token: Option<&str>) -> Result<()>;

    /// Build the OAuth sign-in URL with a return target that re-enters
    /// the calling page
    fn sign_in_url(&self, redirect_to: &str) -> String;

    /// Provider name (for logging)
    fn name(&self) -> &str;
}

/// Resolve the current session, failing soft.
///
/// A provider error is logged and treated the same as "not signed in";
/// nothing propagates to the caller.
pub async fn resolve_session(provider: &dyn IdentityProvider) -> Option<Session> {
    match provider.get_session().await {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(provider = provider.name(), error = %e, "session resolution failed");
            None
        }
    }
}
