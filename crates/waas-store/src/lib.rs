//! # waas-store
//!
//! Document store adapter for the WaaS backend.
//!
//! The store is a generic schema-less document interface keyed by collection
//! name. Typed repositories (`SubscriptionRepository`,
//! `ClientRequestRepository`) sit on top and give the rest of the system
//! compile-time field safety while keeping the backing store generic.
//!
//! `MemoryStore` is the in-process backing used for development and demo
//! deployments; production backends implement [`DocumentStore`].

mod error;
mod repository;
mod store;

pub use error::{Result, StoreError};
pub use repository::{ClientRequestRepository, SubscriptionRepository};
pub use store::{Document, DocumentStore, MemoryStore};
