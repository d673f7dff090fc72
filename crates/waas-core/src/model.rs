//! Domain Models
//!
//! Shared data types for the catalog, subscriptions and client requests.
//! Wire field names are the document-store field names; all money is integer
//! Naira (major unit) or kobo (minor unit), never floating point.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A subscription plan offered on the pricing page
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Display name (e.g., "Growth")
    pub name: String,

    /// URL-safe identifier, the plan's natural key
    pub slug: String,

    /// Monthly price in Naira
    pub price_ngn: i64,

    /// Short plan blurb
    pub description: String,

    /// Ordered feature bullet points
    #[serde(default)]
    pub features: Vec<String>,

    /// Highlight as the popular choice
    #[serde(default)]
    pub popular: bool,
}

impl Plan {
    /// Charge amount in kobo, the payment gateway's minor unit.
    pub fn amount_kobo(&self) -> i64 {
        self.price_ngn * 100
    }
}

/// A portfolio showcase entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub title: String,
    pub category: String,
    pub thumbnail_url: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// A customer testimonial
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub name: String,
    pub role: String,
    pub company: String,
    pub quote: String,
}

/// A frequently asked question
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// Subscription lifecycle status
///
/// Advisory only: the webhook callback writes whatever status the gateway
/// reports, so statuses outside the known set are preserved verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubscriptionStatus {
    Pending,
    Active,
    Canceled,
    Failed,
    /// Any status string the gateway sent that we don't model
    Other(String),
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SubscriptionStatus::Pending => "pending",
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Canceled => "canceled",
            SubscriptionStatus::Failed => "failed",
            SubscriptionStatus::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "pending" => SubscriptionStatus::Pending,
            "active" | "success" => SubscriptionStatus::Active,
            "canceled" | "cancelled" => SubscriptionStatus::Canceled,
            "failed" => SubscriptionStatus::Failed,
            other => SubscriptionStatus::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for SubscriptionStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SubscriptionStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(SubscriptionStatus::parse(&s))
    }
}

/// A subscription record as stored in the document store
///
/// Created in `Pending` state when a subscribe request is accepted, then
/// annotated with checkout details and finally reconciled by the webhook
/// callback. Identity is assigned by the store, not carried here.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Subscription {
    pub email: String,
    pub business_name: String,
    pub plan_slug: String,
    pub status: SubscriptionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paystack_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    /// New record in `Pending` state, no payment details yet
    pub fn pending(
        email: impl Into<String>,
        business_name: impl Into<String>,
        plan_slug: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            business_name: business_name.into(),
            plan_slug: plan_slug.into(),
            status: SubscriptionStatus::Pending,
            paystack_reference: None,
            authorization_url: None,
            created_at: Utc::now(),
        }
    }
}

/// A write-once contact request from a prospective client
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientRequest {
    pub email: String,
    pub business_name: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_slug: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ClientRequest {
    pub fn new(
        email: impl Into<String>,
        business_name: impl Into<String>,
        message: impl Into<String>,
        plan_slug: Option<String>,
    ) -> Self {
        Self {
            email: email.into(),
            business_name: business_name.into(),
            message: message.into(),
            plan_slug,
            created_at: Utc::now(),
        }
    }
}
