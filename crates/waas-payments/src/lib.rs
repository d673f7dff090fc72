//! # waas-payments
//!
//! Paystack integration and subscription lifecycle management.
//!
//! ## Checkout flow
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────┐     ┌─────────────┐
//! │  /subscribe │────▶│ Paystack hosted  │────▶│   webhook   │
//! │  (pending)  │     │  checkout page   │     │ (reconcile) │
//! └─────────────┘     └──────────────────┘     └─────────────┘
//! ```
//!
//! A subscribe request creates a `pending` record, initializes a gateway
//! transaction and hands the caller the checkout URL. The gateway later
//! reports the transaction's outcome through an asynchronous webhook, which
//! updates the record's status. The two halves are not ordered relative to
//! each other; last writer wins.
//!
//! ## Gateway strategies
//!
//! The gateway is a strategy selected once at startup:
//!
//! - [`PaystackGateway`] — live transactions against the Paystack API.
//! - [`MockGateway`] — demo/offline mode when no credential is configured;
//!   synthesizes deterministic checkout artifacts and never touches the
//!   network.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use waas_payments::{PaystackGateway, SubscribeRequest, SubscriptionService};
//!
//! let gateway = Arc::new(PaystackGateway::from_env()?);
//! let service = SubscriptionService::new(catalog, gateway, subscriptions);
//!
//! let outcome = service.subscribe(SubscribeRequest {
//!     email: "user@example.com".into(),
//!     business_name: "Acme".into(),
//!     plan_slug: "growth".into(),
//! }).await?;
//!
//! // Redirect user to: outcome.authorization_url
//! ```

mod error;
mod gateway;
mod subscription;
mod webhook;

pub use error::{PaymentError, Result};
pub use gateway::{
    InitializeTransaction, InitializedTransaction, MockGateway, PaymentGateway, PaystackGateway,
    TransactionMetadata, DEMO_REFERENCE, PAYSTACK_BASE,
};
pub use subscription::{
    CheckoutOutcome, PersistenceStatus, SubscribeRequest, SubscriptionService,
};
pub use webhook::{CallbackReceipt, ChargeEvent};
