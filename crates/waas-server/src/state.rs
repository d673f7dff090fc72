//! Application State

use std::sync::Arc;

use waas_core::Catalog;
use waas_payments::{PaystackGateway, SubscriptionService};
use waas_store::{ClientRequestRepository, DocumentStore};

/// What the `/test` diagnostic reports about the configured store
#[derive(Clone)]
pub struct StoreInfo {
    /// Backend label ("memory", ...)
    pub backend: &'static str,

    /// Whether DATABASE_URL is present in the environment
    pub url_env_set: bool,

    /// DATABASE_NAME, when configured
    pub database_name: Option<String>,
}

impl StoreInfo {
    pub fn from_env(backend: &'static str) -> Self {
        Self {
            backend,
            url_env_set: std::env::var("DATABASE_URL").is_ok(),
            database_name: std::env::var("DATABASE_NAME").ok(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Static marketing content, loaded once at startup
    pub catalog: Arc<Catalog>,

    /// Subscription lifecycle manager
    pub subscriptions: Arc<SubscriptionService>,

    /// Contact request persistence
    pub client_requests: ClientRequestRepository,

    /// Raw store handle for the `/test` diagnostic
    pub store: Arc<dyn DocumentStore>,

    /// Store configuration summary
    pub store_info: StoreInfo,

    /// Live gateway handle for webhook signature verification
    /// (None in demo/offline mode - callbacks are applied unverified)
    pub live_gateway: Option<Arc<PaystackGateway>>,
}
