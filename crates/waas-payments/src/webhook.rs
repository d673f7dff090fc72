//! Webhook Payload Types
//!
//! Paystack posts an event envelope after a checkout transaction reaches a
//! terminal state. Every field is optional on the wire; absent or null
//! sections simply mean there is nothing to reconcile.

use serde::{Deserialize, Serialize};

use waas_core::SubscriptionStatus;

/// Gateway event envelope
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChargeEvent {
    /// Event name, e.g. "charge.success"
    #[serde(default)]
    pub event: Option<String>,

    #[serde(default)]
    pub data: Option<ChargeEventData>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChargeEventData {
    /// Gateway transaction reference
    #[serde(default)]
    pub reference: Option<String>,

    /// Transaction status, e.g. "success", "failed"
    #[serde(default)]
    pub status: Option<String>,

    /// Metadata we attached at initialization, echoed back verbatim
    #[serde(default)]
    pub metadata: Option<ChargeEventMetadata>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChargeEventMetadata {
    #[serde(default)]
    pub subscription_id: Option<String>,
}

impl ChargeEvent {
    /// The subscription record this event claims to belong to
    pub fn subscription_id(&self) -> Option<&str> {
        self.data
            .as_ref()?
            .metadata
            .as_ref()?
            .subscription_id
            .as_deref()
    }

    /// The gateway transaction reference
    pub fn reference(&self) -> Option<&str> {
        self.data.as_ref()?.reference.as_deref()
    }

    /// Status to record: the explicit status field, falling back to the
    /// raw event name when absent
    pub fn resolved_status(&self) -> Option<SubscriptionStatus> {
        let status = self
            .data
            .as_ref()
            .and_then(|d| d.status.as_deref())
            .or(self.event.as_deref())?;
        Some(SubscriptionStatus::parse(status))
    }
}

/// Acknowledgment returned to the gateway for every callback
///
/// The provider must never be told to retry: there is no idempotent replay
/// handling, so processing failures are swallowed and acknowledged.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CallbackReceipt {
    pub received: bool,
}

impl CallbackReceipt {
    pub fn acknowledged() -> Self {
        Self { received: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_payload() {
        let event: ChargeEvent = serde_json::from_str(
            r#"{
                "event": "charge.success",
                "data": {
                    "reference": "ref_42",
                    "status": "success",
                    "metadata": {"subscription_id": "abc123", "plan_slug": "growth"}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(event.subscription_id(), Some("abc123"));
        assert_eq!(event.reference(), Some("ref_42"));
        assert_eq!(event.resolved_status(), Some(SubscriptionStatus::Active));
    }

    #[test]
    fn test_status_falls_back_to_event_name() {
        let event: ChargeEvent = serde_json::from_str(
            r#"{"event": "charge.failed", "data": {"reference": "ref_1"}}"#,
        )
        .unwrap();
        assert_eq!(
            event.resolved_status(),
            Some(SubscriptionStatus::Other("charge.failed".into()))
        );
    }

    #[test]
    fn test_null_metadata_is_tolerated() {
        let event: ChargeEvent =
            serde_json::from_str(r#"{"event": "charge.success", "data": {"metadata": null}}"#)
                .unwrap();
        assert_eq!(event.subscription_id(), None);
    }

    #[test]
    fn test_empty_payload() {
        let event: ChargeEvent = serde_json::from_str("{}").unwrap();
        assert_eq!(event.subscription_id(), None);
        assert_eq!(event.reference(), None);
        assert_eq!(event.resolved_status(), None);
    }
}
