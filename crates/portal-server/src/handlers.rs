//! HTTP Handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use portal_billing::{
    checkout_url, confirm, install_url, notify_payment_success, success_redirect_url,
    Confirmation, SuccessParams,
};
use portal_core::{
    current_plan, decide, resolve_session, ButtonAction, ButtonDecision, Feature, InstallTarget,
};
use portal_client::parse_callback_fragment;

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub sign_in_enabled: bool,
}

#[derive(Serialize)]
pub struct TierCard {
    pub id: String,
    pub name: String,
    pub price_minor_units: i64,
    pub features: Vec<Feature>,
    pub button: ButtonDecision,
}

#[derive(Serialize)]
pub struct PricingResponse {
    pub signed_in: bool,
    pub current_plan: String,
    pub tiers: Vec<TierCard>,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub plan: String,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub action: ButtonAction,
    pub url: String,
    /// Where the payment provider should land the user afterwards; only set
    /// for checkout actions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_url: Option<String>,
}

#[derive(Serialize)]
pub struct PaymentSuccessResponse {
    #[serde(flatten)]
    pub outcome: Confirmation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    /// URL fragment the auth-callback page received
    pub fragment: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        sign_in_enabled: state.sign_in_enabled,
    })
}

/// Pricing page data: every tier with its computed button state.
///
/// Session resolution and the plan lookup both fail soft, so this endpoint
/// always renders; a signed-out or unreachable backend reads as free.
pub async fn pricing_handler(State(state): State<AppState>) -> Json<PricingResponse> {
    let session = resolve_session(state.identity.as_ref()).await;
    let plan = current_plan(state.quota.as_ref(), session.as_ref()).await;

    let tiers = state
        .catalog
        .tiers()
        .iter()
        .map(|tier| TierCard {
            id: tier.id.clone(),
            name: tier.display_name().to_string(),
            price_minor_units: tier.price_minor_units,
            features: tier.features.clone(),
            button: decide(tier, &plan, session.as_ref()),
        })
        .collect();

    Json(PricingResponse {
        signed_in: session.is_some(),
        current_plan: plan,
        tiers,
    })
}

/// Resolve a tier button press into a destination URL.
///
/// Free tier: the install link, untouched. Paid tier without a session: the
/// OAuth sign-in URL returning to the pricing page. Paid tier with a
/// session: the hosted checkout URL carrying the user's email and id.
pub async fn checkout_handler(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, (StatusCode, Json<ErrorResponse>)> {
    let tier = state.catalog.find(&payload.plan).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("The plan '{}' is not available.", payload.plan),
                code: "UNKNOWN_TIER".into(),
            }),
        )
    })?;

    if tier.is_free() {
        return Ok(Json(CheckoutResponse {
            action: ButtonAction::Install,
            url: install_url(tier).to_string(),
            success_url: None,
        }));
    }

    let Some(session) = resolve_session(state.identity.as_ref()).await else {
        let redirect = format!("{}/?redirect=pricing", state.origin.trim_end_matches('/'));
        return Ok(Json(CheckoutResponse {
            action: ButtonAction::SignIn,
            url: state.identity.sign_in_url(&redirect),
            success_url: None,
        }));
    };

    let url = checkout_url(tier, &session).map_err(|e| {
        tracing::error!("Checkout error: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.user_message().into(),
                code: "CHECKOUT_ERROR".into(),
            }),
        )
    })?;

    Ok(Json(CheckoutResponse {
        action: ButtonAction::Checkout,
        url,
        success_url: Some(success_redirect_url(&state.origin, tier.plan.as_str())),
    }))
}

/// Payment-success confirmation.
///
/// Notifies host channels first (fire-and-forget), then resolves the
/// confirmed plan. Every outcome is a 200: nothing on this page is fatal
/// once the payment has committed upstream.
pub async fn payment_success_handler(
    State(state): State<AppState>,
    Query(params): Query<SuccessParams>,
) -> Json<PaymentSuccessResponse> {
    notify_payment_success(&state.notifiers).await;

    let outcome = confirm(state.identity.as_ref(), state.quota.as_ref(), &params).await;
    let message = outcome.user_message();

    Json(PaymentSuccessResponse { outcome, message })
}

/// Browser install chooser targets
pub async fn install_targets() -> Json<Vec<InstallTarget>> {
    Json(InstallTarget::defaults())
}

/// Store tokens captured by the auth-callback page
pub async fn session_handler(
    State(state): State<AppState>,
    Json(payload): Json<SessionRequest>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let tokens = parse_callback_fragment(&payload.fragment).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No access token found".into(),
                code: "MISSING_ACCESS_TOKEN".into(),
            }),
        )
    })?;

    state
        .identity
        .set_session(&tokens.access_token, tokens.refresh_token.as_deref())
        .await
        .map_err(|e| {
            tracing::warn!("Failed to store session: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.user_message(),
                    code: "SESSION_ERROR".into(),
                }),
            )
        })?;

    Ok(StatusCode::NO_CONTENT)
}
