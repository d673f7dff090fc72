//! Payment Gateway Clients
//!
//! Transaction initialization against Paystack, plus the offline mock used
//! when no credential is configured.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha512;
use std::time::Duration;

use crate::error::{PaymentError, Result};

/// Paystack API base URL
pub const PAYSTACK_BASE: &str = "https://api.paystack.co";

/// Reference returned by the mock gateway in demo/offline mode
pub const DEMO_REFERENCE: &str = "demo-ref-12345";

/// Bounded wait on the outbound initialization call
const INIT_TIMEOUT: Duration = Duration::from_secs(20);

/// Metadata echoed back by the gateway in webhook callbacks
///
/// `subscription_id` is the only correlation between a checkout transaction
/// and our stored record, so it rides along on every initialization.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionMetadata {
    pub business_name: String,
    pub plan_slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,
}

/// Request to initialize a checkout transaction
#[derive(Clone, Debug)]
pub struct InitializeTransaction {
    /// Customer email
    pub email: String,

    /// Charge amount in kobo (minor units)
    pub amount_kobo: i64,

    /// Correlation metadata
    pub metadata: TransactionMetadata,
}

/// Result of a successful initialization
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InitializedTransaction {
    /// Hosted checkout page to redirect the customer to
    pub authorization_url: String,

    /// Gateway transaction reference
    pub reference: String,
}

/// Payment gateway contract (Strategy pattern)
///
/// Selected once at startup: live Paystack when a secret key is configured,
/// the mock otherwise.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Initialize a remote checkout transaction
    async fn initialize(&self, request: &InitializeTransaction) -> Result<InitializedTransaction>;

    /// Provider label reported to API clients ("paystack", "mock")
    fn provider_name(&self) -> &str;
}

// ============================================================================
// Live gateway
// ============================================================================

#[derive(Serialize)]
struct InitRequestBody<'a> {
    email: &'a str,
    amount: i64,
    metadata: &'a TransactionMetadata,
}

/// Paystack's response envelope: `status` is the provider's own success
/// flag, distinct from the HTTP status code.
#[derive(Debug, Deserialize)]
struct InitEnvelope {
    #[serde(default)]
    status: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<InitEnvelopeData>,
}

#[derive(Debug, Deserialize)]
struct InitEnvelopeData {
    #[serde(default)]
    authorization_url: Option<String>,
    #[serde(default)]
    reference: Option<String>,
}

/// Live Paystack client
pub struct PaystackGateway {
    http: reqwest::Client,
    secret_key: String,
    base_url: String,
}

impl PaystackGateway {
    /// Create a new client against the production API
    pub fn new(secret_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(secret_key, PAYSTACK_BASE)
    }

    /// Create a client against a custom base URL (tests, sandboxes)
    pub fn with_base_url(
        secret_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(INIT_TIMEOUT)
            .build()
            .map_err(|e| PaymentError::Config(format!("HTTP client: {e}")))?;
        Ok(Self {
            http,
            secret_key: secret_key.into(),
            base_url: base_url.into(),
        })
    }

    /// Create from the `PAYSTACK_SECRET_KEY` environment variable
    pub fn from_env() -> Result<Self> {
        let secret_key = std::env::var("PAYSTACK_SECRET_KEY")
            .map_err(|_| PaymentError::Config("PAYSTACK_SECRET_KEY not set".into()))?;
        Self::new(secret_key)
    }

    /// Verify the `x-paystack-signature` header: HMAC-SHA512 of the raw
    /// request body keyed with the secret key, hex-encoded.
    pub fn webhook_signature_valid(&self, body: &[u8], signature: &str) -> bool {
        let Ok(expected) = hex::decode(signature) else {
            return false;
        };
        let Ok(mut mac) = Hmac::<Sha512>::new_from_slice(self.secret_key.as_bytes()) else {
            return false;
        };
        mac.update(body);
        mac.verify_slice(&expected).is_ok()
    }
}

#[async_trait]
impl PaymentGateway for PaystackGateway {
    async fn initialize(&self, request: &InitializeTransaction) -> Result<InitializedTransaction> {
        let url = format!("{}/transaction/initialize", self.base_url);
        let body = InitRequestBody {
            email: &request.email,
            amount: request.amount_kobo,
            metadata: &request.metadata,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.secret_key)
            .json(&body)
            .send()
            .await?;

        let http_ok = response.status().is_success();
        let raw = response.text().await?;
        interpret_init_response(http_ok, &raw)
    }

    fn provider_name(&self) -> &str {
        "paystack"
    }
}

/// Interpret the gateway's initialization response.
///
/// A non-success HTTP status or a `status: false` envelope is a rejection
/// carrying the provider's message; a success envelope without the checkout
/// fields is a protocol error.
fn interpret_init_response(http_ok: bool, raw: &str) -> Result<InitializedTransaction> {
    let envelope: InitEnvelope = serde_json::from_str(raw)
        .map_err(|e| PaymentError::GatewayProtocol(format!("unparseable response: {e}")))?;

    if !http_ok || !envelope.status {
        let message = envelope
            .message
            .unwrap_or_else(|| "Payment init failed".into());
        return Err(PaymentError::GatewayRejected { message });
    }

    let data = envelope
        .data
        .ok_or_else(|| PaymentError::GatewayProtocol("missing data object".into()))?;
    let authorization_url = data
        .authorization_url
        .ok_or_else(|| PaymentError::GatewayProtocol("missing authorization_url".into()))?;
    let reference = data
        .reference
        .ok_or_else(|| PaymentError::GatewayProtocol("missing reference".into()))?;

    Ok(InitializedTransaction { authorization_url, reference })
}

// ============================================================================
// Mock gateway
// ============================================================================

/// Demo/offline gateway used when no Paystack credential is configured
///
/// Synthesizes a checkout URL deterministically from the plan slug and the
/// customer email; never performs network I/O.
pub struct MockGateway;

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn initialize(&self, request: &InitializeTransaction) -> Result<InitializedTransaction> {
        tracing::debug!(
            plan_slug = %request.metadata.plan_slug,
            "mock gateway: synthesizing checkout artifacts"
        );
        Ok(InitializedTransaction {
            authorization_url: format!(
                "https://paystack.mock/checkout/{}?email={}",
                request.metadata.plan_slug, request.email
            ),
            reference: DEMO_REFERENCE.into(),
        })
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
