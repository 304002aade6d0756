//! Checkout Link Building
//!
//! Paid tiers redirect to an externally hosted checkout page. The link is the
//! tier's action URL with the signed-in user's email and id appended as
//! checkout parameters; the free tier's install link is opened untouched.

use portal_core::{Session, Tier};

use crate::error::{BillingError, Result};

/// Build the hosted-checkout URL for a paid tier.
///
/// Appends `checkout[email]` and `checkout[custom][user_id]` so the payment
/// provider can prefill the form and attribute the order.
pub fn checkout_url(tier: &Tier, session: &Session) -> Result<String> {
    if tier.is_free() {
        return Err(BillingError::FreeTierCheckout(tier.id.clone()));
    }

    let separator = if tier.action_url.contains('?') { '&' } else { '?' };
    Ok(format!(
        "{}{}checkout[email]={}&checkout[custom][user_id]={}",
        tier.action_url,
        separator,
        urlencoding::encode(&session.email),
        urlencoding::encode(&session.user_id),
    ))
}

/// The install link for the free tier, opened directly with no parameters.
pub fn install_url(tier: &Tier) -> &str {
    &tier.action_url
}

/// Where the payment provider sends the user after a successful checkout.
pub fn success_redirect_url(origin: &str, plan_name: &str) -> String {
    format!(
        "{}/payment-success?plan={}",
        origin.trim_end_matches('/'),
        plan_name.to_lowercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::TierCatalog;

    fn session() -> Session {
        Session::new("user-42", "jane+test@example.com", "token")
    }

    #[test]
    fn test_checkout_url_appends_identity() {
        let catalog = TierCatalog::default();
        let tier = catalog.find("pro").unwrap();

        let url = checkout_url(tier, &session()).unwrap();
        assert!(url.starts_with(&tier.action_url));
        assert!(url.contains("&checkout[email]=jane%2Btest%40example.com"));
        assert!(url.contains("&checkout[custom][user_id]=user-42"));
    }

    #[test]
    fn test_checkout_url_without_existing_query() {
        let catalog = TierCatalog::default();
        let mut tier = catalog.find("team").unwrap().clone();
        tier.action_url = "https://pay.example.com/buy/team".into();

        let url = checkout_url(&tier, &session()).unwrap();
        assert!(url.contains("?checkout[email]="));
    }

    #[test]
    fn test_free_tier_has_no_checkout() {
        let catalog = TierCatalog::default();
        let tier = catalog.find("free").unwrap();

        let err = checkout_url(tier, &session()).unwrap_err();
        assert!(matches!(err, BillingError::FreeTierCheckout(_)));
        assert_eq!(install_url(tier), tier.action_url);
    }

    #[test]
    fn test_success_redirect_url() {
        assert_eq!(
            success_redirect_url("https://portal.example.com/", "Pro"),
            "https://portal.example.com/payment-success?plan=pro"
        );
    }
}
