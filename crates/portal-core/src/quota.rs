//! Remote Plan Lookup
//!
//! One authenticated request to the quota endpoint per page view. A failed
//! lookup degrades to the free plan and never blocks tier rendering; the
//! worst case is an already-paying user seeing a non-blocking upsell.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::session::Session;

/// Result of the quota/plan lookup
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RemotePlanStatus {
    /// Current plan name as reported by the backend
    pub plan: String,

    /// Payment provider order id, when the backend has one
    #[serde(default)]
    pub order_id: Option<String>,

    /// When the subscription record last changed
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RemotePlanStatus {
    /// The status assumed when no lookup is possible
    pub fn free() -> Self {
        Self {
            plan: "free".into(),
            order_id: None,
            updated_at: None,
        }
    }
}

impl Default for RemotePlanStatus {
    fn default() -> Self {
        Self::free()
    }
}

/// Quota endpoint abstraction (Strategy pattern)
#[async_trait]
pub trait QuotaClient: Send + Sync {
    /// Fetch the current plan status for the bearer of `access_token`.
    ///
    /// A non-2xx response or transport failure is an error; callers decide
    /// whether to degrade or surface it.
    async fn fetch_status(&self, access_token: &str) -> Result<RemotePlanStatus>;

    /// Client name (for logging)
    fn name(&self) -> &str;
}

/// Resolve the current plan name, failing soft.
///
/// Signed-out users and failed lookups both resolve to `"free"`; no error
/// propagates. One attempt, no retries.
pub async fn current_plan(client: &dyn QuotaClient, session: Option<&Session>) -> String {
    let Some(session) = session else {
        return "free".into();
    };

    match client.fetch_status(&session.access_token).await {
        Ok(status) => status.plan,
        Err(e) => {
            tracing::warn!(client = client.name(), error = %e, "quota lookup failed, assuming free plan");
            "free".into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PortalError;

    struct FixedQuota(RemotePlanStatus);

    #[async_trait]
    impl QuotaClient for FixedQuota {
        async fn fetch_status(&self, _: &str) -> Result<RemotePlanStatus> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct FailingQuota;

    #[async_trait]
    impl QuotaClient for FailingQuota {
        async fn fetch_status(&self, _: &str) -> Result<RemotePlanStatus> {
            Err(PortalError::Quota("HTTP 500".into()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn session() -> Session {
        Session::new("u1", "a@b.c", "tok")
    }

    #[tokio::test]
    async fn test_current_plan_from_backend() {
        let client = FixedQuota(RemotePlanStatus {
            plan: "pro".into(),
            order_id: Some("ord_1".into()),
            updated_at: None,
        });
        assert_eq!(current_plan(&client, Some(&session())).await, "pro");
    }

    #[tokio::test]
    async fn test_signed_out_user_is_free() {
        let client = FixedQuota(RemotePlanStatus::free());
        assert_eq!(current_plan(&client, None).await, "free");
    }

    #[tokio::test]
    async fn test_lookup_failure_degrades_to_free() {
        assert_eq!(current_plan(&FailingQuota, Some(&session())).await, "free");
    }

    #[test]
    fn test_status_deserializes_with_optional_fields() {
        let status: RemotePlanStatus = serde_json::from_str(r#"{"plan":"team"}"#).unwrap();
        assert_eq!(status.plan, "team");
        assert!(status.order_id.is_none());
        assert!(status.updated_at.is_none());
    }
}
