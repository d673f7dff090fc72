//! HTTP Handlers

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use waas_core::{ClientRequest, Faq, Plan, PortfolioItem, Testimonial};
use waas_payments::{CallbackReceipt, ChargeEvent, PaymentError, SubscribeRequest};

use crate::state::AppState;
use crate::validation::{require_field, validate_email};

/// Service name reported by the liveness endpoint
pub const SERVICE_NAME: &str = "Nexusflow Media WaaS API";

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct PlanList {
    pub plans: Vec<Plan>,
}

#[derive(Serialize)]
pub struct ItemList<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct SubscribePayload {
    pub email: String,
    pub business_name: String,
    pub plan_slug: String,
}

#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub authorization_url: String,
    pub reference: String,
    pub provider: String,
}

#[derive(Debug, Deserialize)]
pub struct ClientRequestPayload {
    pub email: String,
    pub business_name: String,
    pub message: String,
    #[serde(default)]
    pub plan_slug: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClientRequestResponse {
    pub ok: bool,
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct StoreDiagnostics {
    pub backend: &'static str,
    pub store_backend: &'static str,
    pub database: &'static str,
    pub database_url: &'static str,
    pub database_name: Option<String>,
    pub connection_status: &'static str,
    pub collections: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn bad_request(error: String, code: &str) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse { error, code: code.into() }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Liveness endpoint
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo { service: SERVICE_NAME, status: "ok" })
}

pub async fn list_plans(State(state): State<AppState>) -> Json<PlanList> {
    Json(PlanList { plans: state.catalog.plans().to_vec() })
}

pub async fn list_portfolio(State(state): State<AppState>) -> Json<ItemList<PortfolioItem>> {
    Json(ItemList { items: state.catalog.portfolio().to_vec() })
}

pub async fn list_testimonials(State(state): State<AppState>) -> Json<ItemList<Testimonial>> {
    Json(ItemList { items: state.catalog.testimonials().to_vec() })
}

pub async fn list_faqs(State(state): State<AppState>) -> Json<ItemList<Faq>> {
    Json(ItemList { items: state.catalog.faqs().to_vec() })
}

/// Start a subscription and hand back the checkout URL
pub async fn subscribe(
    State(state): State<AppState>,
    Json(payload): Json<SubscribePayload>,
) -> Result<Json<SubscribeResponse>, HandlerError> {
    validate_email(&payload.email).map_err(|e| bad_request(e, "INVALID_EMAIL"))?;
    require_field("business_name", &payload.business_name)
        .map_err(|e| bad_request(e, "MISSING_FIELD"))?;

    let outcome = state
        .subscriptions
        .subscribe(SubscribeRequest {
            email: payload.email,
            business_name: payload.business_name,
            plan_slug: payload.plan_slug,
        })
        .await
        .map_err(|e| match e {
            PaymentError::InvalidPlan(_) => bad_request("Invalid plan".into(), "INVALID_PLAN"),
            PaymentError::GatewayUnreachable(_) => {
                tracing::error!(error = %e, "payment gateway unreachable");
                (
                    StatusCode::BAD_GATEWAY,
                    Json(ErrorResponse {
                        error: e.user_message(),
                        code: "PAYMENT_INIT_FAILED".into(),
                    }),
                )
            }
            other => {
                tracing::error!(error = %other, "payment initialization failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: other.user_message(),
                        code: "PAYMENT_INIT_FAILED".into(),
                    }),
                )
            }
        })?;

    Ok(Json(SubscribeResponse {
        authorization_url: outcome.authorization_url,
        reference: outcome.reference,
        provider: outcome.provider,
    }))
}

/// Paystack webhook callback
///
/// Acknowledges every syntactically valid delivery. With a live gateway
/// configured, events with a missing or invalid `x-paystack-signature` are
/// acknowledged but not applied.
pub async fn paystack_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CallbackReceipt>, HandlerError> {
    let event: ChargeEvent = serde_json::from_slice(&body)
        .map_err(|_| bad_request("Invalid JSON".into(), "INVALID_JSON"))?;

    if let Some(gateway) = &state.live_gateway {
        let verified = headers
            .get("x-paystack-signature")
            .and_then(|value| value.to_str().ok())
            .is_some_and(|signature| gateway.webhook_signature_valid(&body, signature));
        if !verified {
            tracing::warn!("webhook signature missing or invalid; event acknowledged but not applied");
            return Ok(Json(CallbackReceipt::acknowledged()));
        }
    }

    Ok(Json(state.subscriptions.handle_callback(event).await))
}

/// Log a contact request
pub async fn client_request(
    State(state): State<AppState>,
    Json(payload): Json<ClientRequestPayload>,
) -> Result<Json<ClientRequestResponse>, HandlerError> {
    validate_email(&payload.email).map_err(|e| bad_request(e, "INVALID_EMAIL"))?;
    require_field("business_name", &payload.business_name)
        .map_err(|e| bad_request(e, "MISSING_FIELD"))?;
    require_field("message", &payload.message).map_err(|e| bad_request(e, "MISSING_FIELD"))?;

    let record = ClientRequest::new(
        payload.email,
        payload.business_name,
        payload.message,
        payload.plan_slug,
    );

    match state.client_requests.create(&record).await {
        Ok(id) => Ok(Json(ClientRequestResponse { ok: true, id })),
        Err(e) => {
            tracing::error!(error = %e, "client request not persisted");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { error: e.to_string(), code: "STORE_ERROR".into() }),
            ))
        }
    }
}

/// Store connectivity diagnostic
pub async fn store_diagnostics(State(state): State<AppState>) -> Json<StoreDiagnostics> {
    let healthy = state.store.health_check().await;
    let collections = if healthy {
        match state.store.collection_names().await {
            Ok(names) => names.into_iter().take(10).collect(),
            Err(e) => {
                tracing::warn!(error = %e, "collection listing failed");
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    Json(StoreDiagnostics {
        backend: "running",
        store_backend: state.store_info.backend,
        database: if healthy { "available" } else { "not available" },
        database_url: if state.store_info.url_env_set { "set" } else { "not set" },
        database_name: state.store_info.database_name.clone(),
        connection_status: if healthy { "connected" } else { "not connected" },
        collections,
    })
}

/// Build the full application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/plans", get(list_plans))
        .route("/portfolio", get(list_portfolio))
        .route("/testimonials", get(list_testimonials))
        .route("/faqs", get(list_faqs))
        .route("/subscribe", post(subscribe))
        .route("/webhook/paystack", post(paystack_webhook))
        .route("/client-request", post(client_request))
        .route("/test", get(store_diagnostics))
        .with_state(state)
}
