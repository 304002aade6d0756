//! Extension Portal HTTP Server
//!
//! Axum-based server behind the pricing, payment-success, and auth-callback
//! pages. All external clients are constructed here, once, and injected
//! into the handlers.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portal_billing::{HostNotifier, HttpHostNotifier};
use portal_client::{identity_from_env, quota_from_env};
use portal_core::TierCatalog;

use crate::handlers::{
    checkout_handler, health_check, install_targets, payment_success_handler, pricing_handler,
    session_handler,
};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    // Construct external clients (composition root; handlers never build
    // their own)
    let identity = identity_from_env();
    let quota = quota_from_env();
    let sign_in_enabled = !identity.sign_in_url("/").is_empty();

    if sign_in_enabled {
        tracing::info!("✓ Identity provider configured");
    } else {
        tracing::warn!("⚠ Identity provider not configured - sign-in disabled");
        tracing::warn!("  Set PORTAL_AUTH_URL and PORTAL_AUTH_ANON_KEY in .env");
    }

    // Host notification channels (availability checked per send)
    let notifiers: Vec<Arc<dyn HostNotifier>> = vec![Arc::new(HttpHostNotifier::from_env())];

    // Static tier catalog
    let catalog = Arc::new(TierCatalog::default());
    tracing::info!("Loaded {} pricing tiers:", catalog.len());
    for tier in catalog.tiers() {
        tracing::info!("  • {} ({})", tier.display_name(), tier.id);
    }

    let origin =
        std::env::var("PORTAL_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".into());

    // Build application state
    let state = AppState {
        identity,
        quota,
        catalog,
        notifiers: Arc::new(notifiers),
        origin,
        sign_in_enabled,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health & info
        .route("/health", get(health_check))
        // Portal API
        .route("/api/pricing", get(pricing_handler))
        .route("/api/checkout", post(checkout_handler))
        .route("/api/payment-success", get(payment_success_handler))
        .route("/api/install", get(install_targets))
        .route("/api/session", post(session_handler))
        // Static files (page shells)
        .nest_service("/", tower_http::services::ServeDir::new("static"))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 portal-server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health               - Health check");
    tracing::info!("  GET  /api/pricing          - Tier cards with button state");
    tracing::info!("  POST /api/checkout         - Resolve a tier button press");
    tracing::info!("  GET  /api/payment-success  - Confirm a completed payment");
    tracing::info!("  GET  /api/install          - Browser install targets");
    tracing::info!("  POST /api/session          - Store auth-callback tokens");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
