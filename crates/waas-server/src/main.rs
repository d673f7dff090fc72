//! WaaS HTTP Server
//!
//! Axum-based backend for the website-as-a-service offering: serves the
//! static marketing catalog, accepts subscription and contact-request
//! submissions, and reconciles checkout transactions via Paystack webhooks.
//!
//! Without a `PAYSTACK_SECRET_KEY` the server runs in demo/offline mode:
//! subscribe requests get deterministic mock checkout artifacts and no
//! external network call is made.

mod handlers;
mod state;
mod validation;

use std::sync::Arc;

use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use waas_core::Catalog;
use waas_payments::{MockGateway, PaymentGateway, PaystackGateway, SubscriptionService};
use waas_store::{ClientRequestRepository, DocumentStore, MemoryStore, SubscriptionRepository};

use crate::handlers::{router, SERVICE_NAME};
use crate::state::{AppState, StoreInfo};

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

    // Content catalog, loaded once and injected
    let catalog = Arc::new(Catalog::nigeria_smb());

    // Document store
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let store_info = StoreInfo::from_env("memory");

    // Gateway strategy: live Paystack when configured, mock otherwise
    let live_gateway = match PaystackGateway::from_env() {
        Ok(gateway) => Some(Arc::new(gateway)),
        Err(e) => {
            tracing::warn!("⚠ Paystack not configured - running in demo mode ({e})");
            tracing::warn!("  Set PAYSTACK_SECRET_KEY in .env for live checkout");
            None
        }
    };
    let gateway: Arc<dyn PaymentGateway> = match &live_gateway {
        Some(gateway) => gateway.clone(),
        None => Arc::new(MockGateway),
    };
    if live_gateway.is_some() {
        tracing::info!("✓ Paystack configured");
    }

    // Build application state
    let subscriptions = Arc::new(SubscriptionService::new(
        catalog.clone(),
        gateway,
        SubscriptionRepository::new(store.clone()),
    ));
    let state = AppState {
        catalog,
        subscriptions,
        client_requests: ClientRequestRepository::new(store.clone()),
        store,
        store_info,
        live_gateway,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = router(state).layer(cors).layer(TraceLayer::new_for_http());

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8000);
        format!("0.0.0.0:{port}")
    });
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🚀 {} running on http://{}", SERVICE_NAME, addr);
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /                 - Liveness");
    tracing::info!("  GET  /plans            - List plans");
    tracing::info!("  GET  /portfolio        - List portfolio items");
    tracing::info!("  GET  /testimonials     - List testimonials");
    tracing::info!("  GET  /faqs             - List FAQs");
    tracing::info!("  POST /subscribe        - Start subscription checkout");
    tracing::info!("  POST /webhook/paystack - Payment status callback");
    tracing::info!("  POST /client-request   - Log a contact request");
    tracing::info!("  GET  /test             - Store connectivity diagnostic");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
