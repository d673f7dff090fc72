//! Typed Repositories
//!
//! Entity-level wrappers over the generic document store. Collection names
//! are stable; an existing deployment's data keeps working.

use serde_json::json;
use std::sync::Arc;

use waas_core::{ClientRequest, Subscription, SubscriptionStatus};

use crate::error::Result;
use crate::store::DocumentStore;

const SUBSCRIPTIONS: &str = "subscription";
const CLIENT_REQUESTS: &str = "clientrequest";

/// Repository for subscription records
#[derive(Clone)]
pub struct SubscriptionRepository {
    store: Arc<dyn DocumentStore>,
}

impl SubscriptionRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Persist a new record, returning its store-assigned id
    pub async fn create(&self, subscription: &Subscription) -> Result<String> {
        let document = serde_json::to_value(subscription)?;
        self.store.insert(SUBSCRIPTIONS, document).await
    }

    /// Annotate a record with the checkout authorization URL and reference
    ///
    /// Returns `false` when the id is unknown to the store.
    pub async fn attach_checkout(
        &self,
        id: &str,
        authorization_url: &str,
        reference: &str,
    ) -> Result<bool> {
        let patch = json!({
            "authorization_url": authorization_url,
            "paystack_reference": reference,
        });
        self.store.update(SUBSCRIPTIONS, id, patch).await
    }

    /// Record the transaction outcome reported by a webhook callback
    pub async fn record_outcome(
        &self,
        id: &str,
        status: &SubscriptionStatus,
        reference: Option<&str>,
    ) -> Result<bool> {
        let mut patch = json!({ "status": status.as_str() });
        if let Some(reference) = reference {
            patch["paystack_reference"] = json!(reference);
        }
        self.store.update(SUBSCRIPTIONS, id, patch).await
    }

    /// All records for an email, with their ids
    pub async fn find_by_email(&self, email: &str) -> Result<Vec<(String, Subscription)>> {
        let documents = self
            .store
            .find(SUBSCRIPTIONS, json!({ "email": email }))
            .await?;
        Ok(documents
            .into_iter()
            .filter_map(|doc| {
                match serde_json::from_value::<Subscription>(doc.body) {
                    Ok(subscription) => Some((doc.id, subscription)),
                    Err(e) => {
                        tracing::warn!(id = %doc.id, error = %e, "skipping malformed subscription document");
                        None
                    }
                }
            })
            .collect())
    }
}

/// Repository for client contact requests
#[derive(Clone)]
pub struct ClientRequestRepository {
    store: Arc<dyn DocumentStore>,
}

impl ClientRequestRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, request: &ClientRequest) -> Result<String> {
        let document = serde_json::to_value(request)?;
        self.store.insert(CLIENT_REQUESTS, document).await
    }

    pub async fn list(&self) -> Result<Vec<(String, ClientRequest)>> {
        let documents = self.store.find(CLIENT_REQUESTS, json!({})).await?;
        Ok(documents
            .into_iter()
            .filter_map(|doc| {
                match serde_json::from_value::<ClientRequest>(doc.body) {
                    Ok(request) => Some((doc.id, request)),
                    Err(e) => {
                        tracing::warn!(id = %doc.id, error = %e, "skipping malformed client request document");
                        None
                    }
                }
            })
            .collect())
    }
}
