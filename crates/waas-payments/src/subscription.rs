//! Subscription Lifecycle
//!
//! Orchestrates subscription creation, payment initialization and
//! webhook-driven status reconciliation.
//!
//! Storage is best-effort on this path: a store outage must not block the
//! payment flow, so record-creation and annotation failures degrade the
//! outcome instead of aborting it. Gateway failures do abort — without a
//! checkout URL there is nothing useful to hand back.

use std::sync::Arc;

use waas_core::{Catalog, Subscription};
use waas_store::SubscriptionRepository;

use crate::error::{PaymentError, Result};
use crate::gateway::{InitializeTransaction, PaymentGateway, TransactionMetadata};
use crate::webhook::{CallbackReceipt, ChargeEvent};

/// Accepted subscribe request (already validated at the HTTP layer)
#[derive(Clone, Debug)]
pub struct SubscribeRequest {
    pub email: String,
    pub business_name: String,
    pub plan_slug: String,
}

/// How far the storage side of a subscribe call got
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersistenceStatus {
    /// Record created and annotated with checkout details
    Persisted,

    /// The store was unavailable at record creation; the payment proceeded
    /// without a persisted identity and no webhook reconciliation is
    /// possible for this attempt
    RecordNotCreated,

    /// Record created, but the checkout annotation could not be written;
    /// the caller still holds the authoritative URL and reference
    AnnotationFailed,
}

/// Result of a subscribe call
#[derive(Clone, Debug)]
pub struct CheckoutOutcome {
    pub authorization_url: String,
    pub reference: String,
    pub provider: String,
    pub subscription_id: Option<String>,
    pub persistence: PersistenceStatus,
}

/// Subscription lifecycle manager
pub struct SubscriptionService {
    catalog: Arc<Catalog>,
    gateway: Arc<dyn PaymentGateway>,
    subscriptions: SubscriptionRepository,
}

impl SubscriptionService {
    pub fn new(
        catalog: Arc<Catalog>,
        gateway: Arc<dyn PaymentGateway>,
        subscriptions: SubscriptionRepository,
    ) -> Self {
        Self { catalog, gateway, subscriptions }
    }

    /// Start a subscription: create a pending record and initialize a
    /// checkout transaction with the gateway.
    ///
    /// An unresolvable plan slug fails before any side effect. A gateway
    /// failure aborts with the gateway's message, leaving any created
    /// record `pending` with no payment details (no rollback).
    pub async fn subscribe(&self, request: SubscribeRequest) -> Result<CheckoutOutcome> {
        let plan = self
            .catalog
            .find_plan(&request.plan_slug)
            .ok_or_else(|| PaymentError::InvalidPlan(request.plan_slug.clone()))?;

        let record = Subscription::pending(&request.email, &request.business_name, &plan.slug);
        let subscription_id = match self.subscriptions.create(&record).await {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    plan_slug = %plan.slug,
                    "subscription record not created; continuing without a persisted identity"
                );
                None
            }
        };

        let transaction = self
            .gateway
            .initialize(&InitializeTransaction {
                email: request.email.clone(),
                amount_kobo: plan.amount_kobo(),
                metadata: TransactionMetadata {
                    business_name: request.business_name.clone(),
                    plan_slug: plan.slug.clone(),
                    subscription_id: subscription_id.clone(),
                },
            })
            .await?;

        let mut persistence = if subscription_id.is_some() {
            PersistenceStatus::Persisted
        } else {
            PersistenceStatus::RecordNotCreated
        };

        if let Some(id) = &subscription_id {
            match self
                .subscriptions
                .attach_checkout(id, &transaction.authorization_url, &transaction.reference)
                .await
            {
                Ok(true) => {}
                Ok(false) => {
                    tracing::warn!(subscription_id = %id, "checkout annotation hit an unknown record");
                    persistence = PersistenceStatus::AnnotationFailed;
                }
                Err(e) => {
                    tracing::warn!(subscription_id = %id, error = %e, "checkout annotation not persisted");
                    persistence = PersistenceStatus::AnnotationFailed;
                }
            }
        }

        tracing::info!(
            provider = self.gateway.provider_name(),
            reference = %transaction.reference,
            plan_slug = %plan.slug,
            "checkout transaction initialized"
        );

        Ok(CheckoutOutcome {
            authorization_url: transaction.authorization_url,
            reference: transaction.reference,
            provider: self.gateway.provider_name().to_string(),
            subscription_id,
            persistence,
        })
    }

    /// Apply a gateway callback to the subscription it claims to belong to.
    ///
    /// Infallible by contract: reconciliation failures are logged and the
    /// receipt is returned regardless. Duplicate and out-of-order
    /// deliveries re-apply last-writer-wins.
    pub async fn handle_callback(&self, event: ChargeEvent) -> CallbackReceipt {
        let event_name = event.event.as_deref().unwrap_or("<unnamed>");

        let Some(id) = event.subscription_id() else {
            tracing::debug!(event = event_name, "callback carries no subscription id");
            return CallbackReceipt::acknowledged();
        };
        let Some(status) = event.resolved_status() else {
            tracing::debug!(event = event_name, "callback carries no status");
            return CallbackReceipt::acknowledged();
        };

        match self
            .subscriptions
            .record_outcome(id, &status, event.reference())
            .await
        {
            Ok(true) => {
                tracing::info!(
                    subscription_id = %id,
                    status = %status,
                    reference = event.reference().unwrap_or("<none>"),
                    "subscription reconciled from callback"
                );
            }
            Ok(false) => {
                tracing::warn!(
                    subscription_id = %id,
                    event = event_name,
                    "callback referenced an unknown subscription record"
                );
            }
            Err(e) => {
                tracing::warn!(
                    subscription_id = %id,
                    error = %e,
                    "callback outcome not persisted"
                );
            }
        }

        CallbackReceipt::acknowledged()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;
    use waas_core::SubscriptionStatus;
    use waas_store::{Document, DocumentStore, MemoryStore, StoreError};

    use crate::gateway::{InitializedTransaction, MockGateway, DEMO_REFERENCE};

    fn service_with_store(store: Arc<dyn DocumentStore>) -> SubscriptionService {
        SubscriptionService::new(
            Arc::new(Catalog::nigeria_smb()),
            Arc::new(MockGateway),
            SubscriptionRepository::new(store),
        )
    }

    fn subscribe_request(plan_slug: &str) -> SubscribeRequest {
        SubscribeRequest {
            email: "a@b.com".into(),
            business_name: "Acme".into(),
            plan_slug: plan_slug.into(),
        }
    }

    /// Store that is down: every operation reports unavailability
    struct DownStore;

    #[async_trait]
    impl DocumentStore for DownStore {
        async fn insert(&self, _: &str, _: Value) -> waas_store::Result<String> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn find(&self, _: &str, _: Value) -> waas_store::Result<Vec<Document>> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn update(&self, _: &str, _: &str, _: Value) -> waas_store::Result<bool> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn collection_names(&self) -> waas_store::Result<Vec<String>> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
        async fn health_check(&self) -> bool {
            false
        }
    }

    /// Store that accepts inserts but fails every update
    struct NoUpdateStore {
        inner: MemoryStore,
    }

    #[async_trait]
    impl DocumentStore for NoUpdateStore {
        async fn insert(&self, collection: &str, document: Value) -> waas_store::Result<String> {
            self.inner.insert(collection, document).await
        }
        async fn find(&self, collection: &str, filter: Value) -> waas_store::Result<Vec<Document>> {
            self.inner.find(collection, filter).await
        }
        async fn update(&self, _: &str, _: &str, _: Value) -> waas_store::Result<bool> {
            Err(StoreError::Unavailable("write timeout".into()))
        }
        async fn collection_names(&self) -> waas_store::Result<Vec<String>> {
            self.inner.collection_names().await
        }
        async fn health_check(&self) -> bool {
            true
        }
    }

    /// Gateway double that records the initialization it was asked for
    struct RecordingGateway {
        seen: Mutex<Vec<InitializeTransaction>>,
    }

    #[async_trait]
    impl PaymentGateway for RecordingGateway {
        async fn initialize(
            &self,
            request: &InitializeTransaction,
        ) -> crate::Result<InitializedTransaction> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(InitializedTransaction {
                authorization_url: "https://checkout.paystack.com/abc".into(),
                reference: "ref_42".into(),
            })
        }
        fn provider_name(&self) -> &str {
            "paystack"
        }
    }

    /// Gateway double that declines everything
    struct RejectingGateway;

    #[async_trait]
    impl PaymentGateway for RejectingGateway {
        async fn initialize(
            &self,
            _: &InitializeTransaction,
        ) -> crate::Result<InitializedTransaction> {
            Err(PaymentError::GatewayRejected { message: "Invalid key".into() })
        }
        fn provider_name(&self) -> &str {
            "paystack"
        }
    }

    #[tokio::test]
    async fn test_subscribe_demo_mode_happy_path() {
        let store = Arc::new(MemoryStore::new());
        let service = service_with_store(store.clone());

        let outcome = service.subscribe(subscribe_request("growth")).await.unwrap();

        assert_eq!(
            outcome.authorization_url,
            "https://paystack.mock/checkout/growth?email=a@b.com"
        );
        assert_eq!(outcome.reference, DEMO_REFERENCE);
        assert_eq!(outcome.provider, "mock");
        assert_eq!(outcome.persistence, PersistenceStatus::Persisted);

        // The record was created pending and annotated with checkout details
        let repo = SubscriptionRepository::new(store);
        let records = repo.find_by_email("a@b.com").await.unwrap();
        assert_eq!(records.len(), 1);
        let (id, subscription) = &records[0];
        assert_eq!(Some(id.clone()), outcome.subscription_id);
        assert_eq!(subscription.status, SubscriptionStatus::Pending);
        assert_eq!(
            subscription.authorization_url.as_deref(),
            Some(outcome.authorization_url.as_str())
        );
        assert_eq!(subscription.paystack_reference.as_deref(), Some(DEMO_REFERENCE));
    }

    #[tokio::test]
    async fn test_subscribe_invalid_plan_creates_nothing() {
        let store = Arc::new(MemoryStore::new());
        let service = service_with_store(store.clone());

        let err = service.subscribe(subscribe_request("enterprise")).await.unwrap_err();
        assert!(matches!(err, PaymentError::InvalidPlan(ref slug) if slug == "enterprise"));

        assert!(store.find("subscription", json!({})).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_subscribe_survives_store_outage() {
        let service = service_with_store(Arc::new(DownStore));

        let outcome = service.subscribe(subscribe_request("basic")).await.unwrap();

        assert_eq!(outcome.subscription_id, None);
        assert_eq!(outcome.persistence, PersistenceStatus::RecordNotCreated);
        // A usable checkout URL is still returned
        assert!(outcome.authorization_url.contains("/checkout/basic"));
    }

    #[tokio::test]
    async fn test_subscribe_reports_annotation_failure() {
        let store = Arc::new(NoUpdateStore { inner: MemoryStore::new() });
        let service = service_with_store(store);

        let outcome = service.subscribe(subscribe_request("premium")).await.unwrap();

        // Record exists but checkout details could not be attached; the
        // response still carries the authoritative URL and reference
        assert!(outcome.subscription_id.is_some());
        assert_eq!(outcome.persistence, PersistenceStatus::AnnotationFailed);
        assert_eq!(outcome.reference, DEMO_REFERENCE);
    }

    #[tokio::test]
    async fn test_subscribe_passes_minor_units_and_metadata_to_gateway() {
        let gateway = Arc::new(RecordingGateway { seen: Mutex::new(Vec::new()) });
        let store = Arc::new(MemoryStore::new());
        let service = SubscriptionService::new(
            Arc::new(Catalog::nigeria_smb()),
            gateway.clone(),
            SubscriptionRepository::new(store),
        );

        let outcome = service.subscribe(subscribe_request("growth")).await.unwrap();

        let seen = gateway.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        // growth is 35,000 NGN -> 3,500,000 kobo
        assert_eq!(seen[0].amount_kobo, 3_500_000);
        assert_eq!(seen[0].metadata.plan_slug, "growth");
        assert_eq!(seen[0].metadata.business_name, "Acme");
        assert_eq!(seen[0].metadata.subscription_id, outcome.subscription_id);

        // The response echoes the gateway's values exactly
        assert_eq!(outcome.authorization_url, "https://checkout.paystack.com/abc");
        assert_eq!(outcome.reference, "ref_42");
        assert_eq!(outcome.provider, "paystack");
    }

    #[tokio::test]
    async fn test_subscribe_gateway_rejection_leaves_record_pending() {
        let store = Arc::new(MemoryStore::new());
        let service = SubscriptionService::new(
            Arc::new(Catalog::nigeria_smb()),
            Arc::new(RejectingGateway),
            SubscriptionRepository::new(store.clone()),
        );

        let err = service.subscribe(subscribe_request("growth")).await.unwrap_err();
        assert!(matches!(
            err,
            PaymentError::GatewayRejected { ref message } if message == "Invalid key"
        ));

        // No rollback: the record stays pending with no payment details
        let repo = SubscriptionRepository::new(store);
        let records = repo.find_by_email("a@b.com").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].1.status, SubscriptionStatus::Pending);
        assert!(records[0].1.authorization_url.is_none());
    }

    #[tokio::test]
    async fn test_callback_reconciles_record() {
        let store = Arc::new(MemoryStore::new());
        let service = service_with_store(store.clone());

        let outcome = service.subscribe(subscribe_request("growth")).await.unwrap();
        let id = outcome.subscription_id.unwrap();

        let event: ChargeEvent = serde_json::from_value(json!({
            "event": "charge.success",
            "data": {
                "reference": "ref_99",
                "status": "success",
                "metadata": {"subscription_id": id}
            }
        }))
        .unwrap();

        let receipt = service.handle_callback(event).await;
        assert!(receipt.received);

        let repo = SubscriptionRepository::new(store);
        let records = repo.find_by_email("a@b.com").await.unwrap();
        assert_eq!(records[0].1.status, SubscriptionStatus::Active);
        assert_eq!(records[0].1.paystack_reference.as_deref(), Some("ref_99"));
    }

    #[tokio::test]
    async fn test_callback_always_acknowledges() {
        let service = service_with_store(Arc::new(DownStore));

        // Store down, unknown id, empty payload, duplicate delivery: all acked
        let event: ChargeEvent = serde_json::from_value(json!({
            "event": "charge.failed",
            "data": {"metadata": {"subscription_id": "ghost"}}
        }))
        .unwrap();

        assert!(service.handle_callback(event.clone()).await.received);
        assert!(service.handle_callback(event).await.received);
        assert!(service.handle_callback(ChargeEvent::default()).await.received);
    }

    #[tokio::test]
    async fn test_callback_before_annotation_wins_last_write() {
        // Webhook may arrive while initialization is still in flight; the
        // status it writes must not be clobbered by the earlier create
        let store = Arc::new(MemoryStore::new());
        let service = service_with_store(store.clone());

        let outcome = service.subscribe(subscribe_request("basic")).await.unwrap();
        let id = outcome.subscription_id.unwrap();

        let failed: ChargeEvent = serde_json::from_value(json!({
            "event": "charge.failed",
            "data": {"status": "failed", "metadata": {"subscription_id": id}}
        }))
        .unwrap();
        service.handle_callback(failed).await;

        let success: ChargeEvent = serde_json::from_value(json!({
            "event": "charge.success",
            "data": {"status": "success", "metadata": {"subscription_id": id}}
        }))
        .unwrap();
        service.handle_callback(success).await;

        let repo = SubscriptionRepository::new(store);
        let records = repo.find_by_email("a@b.com").await.unwrap();
        assert_eq!(records[0].1.status, SubscriptionStatus::Active);
    }
}
