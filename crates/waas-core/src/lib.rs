//! # waas-core
//!
//! Content catalog and domain models for the website-as-a-service backend.
//!
//! The catalog is an immutable configuration structure built once at startup
//! and injected into whoever needs it (handlers, the subscription service).
//! Nothing in here talks to the network or the document store.

pub mod catalog;
pub mod model;

pub use catalog::Catalog;
pub use model::{
    ClientRequest, Faq, Plan, PortfolioItem, Subscription, SubscriptionStatus, Testimonial,
};
