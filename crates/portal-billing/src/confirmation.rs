//! Payment-Success Confirmation
//!
//! Interprets the post-checkout landing: re-resolve the session, re-read the
//! quota service for the confirmed plan, and assemble the receipt details.
//! The payment itself is already committed upstream, so a failed lookup is a
//! soft outcome, not an error.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use portal_core::{resolve_session, IdentityProvider, Plan, QuotaClient};

/// URL query parameters the success page consumes
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SuccessParams {
    /// Plan hint from the checkout redirect
    #[serde(default)]
    pub plan: Option<String>,

    /// Fallback order identifiers from the payment provider
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub checkout_id: Option<String>,
}

/// Confirmed payment details for display
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PaymentSummary {
    /// Capitalized plan name ("Pro", "Team")
    pub plan: String,

    /// Amount paid in minor currency units
    pub amount_minor: i64,

    /// Formatted payment date ("Jan 5, 2026")
    pub date: String,

    /// Provider order id, or "Processing..." while unknown
    pub order_id: String,

    /// Purchaser email
    pub email: String,
}

/// Outcome of the confirmation flow
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Confirmation {
    /// No session: the page shows its error state, no retry
    Unauthenticated,

    /// Lookup failed after a committed payment: soft informational message
    DetailsUnavailable,

    /// Lookup succeeded
    Confirmed(PaymentSummary),
}

impl Confirmation {
    /// Message shown for the non-confirmed outcomes
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Confirmation::Unauthenticated => Some("Not authenticated. Please sign in."),
            Confirmation::DetailsUnavailable => {
                Some("Unable to load payment details. Your purchase was successful.")
            }
            Confirmation::Confirmed(_) => None,
        }
    }
}

/// Display price for a confirmed plan, in minor units.
///
/// Unknown names price as pro; the page never blocks on an exact figure.
pub fn plan_amount_minor(plan_name: &str) -> i64 {
    match Plan::from_name(plan_name) {
        Plan::Team => Plan::Team.price_minor_units(),
        _ => Plan::Pro.price_minor_units(),
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Run the confirmation flow for the payment-success page.
pub async fn confirm(
    identity: &dyn IdentityProvider,
    quota: &dyn QuotaClient,
    params: &SuccessParams,
) -> Confirmation {
    let Some(session) = resolve_session(identity).await else {
        return Confirmation::Unauthenticated;
    };

    let status = match quota.fetch_status(&session.access_token).await {
        Ok(status) => status,
        Err(e) => {
            tracing::warn!(error = %e, "confirmation lookup failed");
            return Confirmation::DetailsUnavailable;
        }
    };

    let plan_name = if status.plan.trim().is_empty() {
        "pro".to_string()
    } else {
        status.plan
    };

    let order_id = status
        .order_id
        .or_else(|| params.order_id.clone())
        .or_else(|| params.checkout_id.clone())
        .unwrap_or_else(|| "Processing...".into());

    let date = status
        .updated_at
        .unwrap_or_else(Utc::now)
        .format("%b %-d, %Y")
        .to_string();

    Confirmation::Confirmed(PaymentSummary {
        amount_minor: plan_amount_minor(&plan_name),
        plan: capitalize(&plan_name),
        date,
        order_id,
        email: session.email,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use portal_core::{PortalError, RemotePlanStatus, Result, Session};

    struct FixedIdentity(Option<Session>);

    #[async_trait]
    impl IdentityProvider for FixedIdentity {
        async fn get_session(&self) -> Result<Option<Session>> {
            Ok(self.0.clone())
        }

        async fn set_session(&self, _: &str, _: Option<&str>) -> Result<()> {
            Ok(())
        }

        fn sign_in_url(&self, _: &str) -> String {
            String::new()
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct FixedQuota(std::result::Result<RemotePlanStatus, ()>);

    #[async_trait]
    impl QuotaClient for FixedQuota {
        async fn fetch_status(&self, _: &str) -> Result<RemotePlanStatus> {
            self.0
                .clone()
                .map_err(|()| PortalError::Quota("HTTP 500".into()))
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn signed_in() -> FixedIdentity {
        FixedIdentity(Some(Session::new("u1", "buyer@example.com", "tok")))
    }

    #[tokio::test]
    async fn test_confirmed_summary() {
        let quota = FixedQuota(Ok(RemotePlanStatus {
            plan: "team".into(),
            order_id: Some("ord_789".into()),
            updated_at: Some(Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap()),
        }));

        let outcome = confirm(&signed_in(), &quota, &SuccessParams::default()).await;
        let Confirmation::Confirmed(summary) = outcome else {
            panic!("expected confirmed outcome");
        };
        assert_eq!(summary.plan, "Team");
        assert_eq!(summary.amount_minor, 3999);
        assert_eq!(summary.order_id, "ord_789");
        assert_eq!(summary.date, "Jan 5, 2026");
        assert_eq!(summary.email, "buyer@example.com");
    }

    #[tokio::test]
    async fn test_missing_session_is_unauthenticated() {
        let quota = FixedQuota(Ok(RemotePlanStatus::free()));
        let outcome = confirm(
            &FixedIdentity(None),
            &quota,
            &SuccessParams::default(),
        )
        .await;
        assert_eq!(outcome, Confirmation::Unauthenticated);
        assert!(outcome.user_message().unwrap().contains("Not authenticated"));
    }

    #[tokio::test]
    async fn test_lookup_failure_is_soft() {
        let outcome = confirm(&signed_in(), &FixedQuota(Err(())), &SuccessParams::default()).await;
        assert_eq!(outcome, Confirmation::DetailsUnavailable);
        assert!(outcome
            .user_message()
            .unwrap()
            .contains("purchase was successful"));
    }

    #[tokio::test]
    async fn test_order_id_falls_back_to_url_params() {
        let status = RemotePlanStatus {
            plan: "pro".into(),
            order_id: None,
            updated_at: None,
        };

        let from_order_param = confirm(
            &signed_in(),
            &FixedQuota(Ok(status.clone())),
            &SuccessParams {
                order_id: Some("url-order".into()),
                checkout_id: Some("url-checkout".into()),
                ..Default::default()
            },
        )
        .await;
        let Confirmation::Confirmed(summary) = from_order_param else {
            panic!("expected confirmed outcome");
        };
        assert_eq!(summary.order_id, "url-order");

        let from_checkout_param = confirm(
            &signed_in(),
            &FixedQuota(Ok(status.clone())),
            &SuccessParams {
                checkout_id: Some("url-checkout".into()),
                ..Default::default()
            },
        )
        .await;
        let Confirmation::Confirmed(summary) = from_checkout_param else {
            panic!("expected confirmed outcome");
        };
        assert_eq!(summary.order_id, "url-checkout");

        let placeholder = confirm(
            &signed_in(),
            &FixedQuota(Ok(status)),
            &SuccessParams::default(),
        )
        .await;
        let Confirmation::Confirmed(summary) = placeholder else {
            panic!("expected confirmed outcome");
        };
        assert_eq!(summary.order_id, "Processing...");
    }

    #[tokio::test]
    async fn test_empty_plan_defaults_to_pro_pricing() {
        let quota = FixedQuota(Ok(RemotePlanStatus {
            plan: String::new(),
            order_id: None,
            updated_at: None,
        }));

        let outcome = confirm(&signed_in(), &quota, &SuccessParams::default()).await;
        let Confirmation::Confirmed(summary) = outcome else {
            panic!("expected confirmed outcome");
        };
        assert_eq!(summary.plan, "Pro");
        assert_eq!(summary.amount_minor, 999);
    }

    #[test]
    fn test_plan_amount_table() {
        assert_eq!(plan_amount_minor("pro"), 999);
        assert_eq!(plan_amount_minor("PRO"), 999);
        assert_eq!(plan_amount_minor("team"), 3999);
        assert_eq!(plan_amount_minor("something-else"), 999);
    }
}
