//! Document Store Interface
//!
//! A minimal schema-less document contract: any collection name is valid and
//! documents are plain JSON objects. Field-level typing lives in the
//! repositories, not here.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::Result;

/// A stored document with its store-assigned id
#[derive(Clone, Debug)]
pub struct Document {
    pub id: String,
    pub body: Value,
}

/// Generic document store contract
///
/// `find` matches documents whose top-level fields equal every field of the
/// filter object; an empty filter matches the whole collection. `update`
/// shallow-merges the patch object into the document and reports whether the
/// id existed.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document, returning the store-assigned id
    async fn insert(&self, collection: &str, document: Value) -> Result<String>;

    /// Query a collection by exact-match filter
    async fn find(&self, collection: &str, filter: Value) -> Result<Vec<Document>>;

    /// Shallow-merge `patch` into the document with the given id
    async fn update(&self, collection: &str, id: &str, patch: Value) -> Result<bool>;

    /// Names of all collections with at least one document
    async fn collection_names(&self) -> Result<Vec<String>>;

    /// Whether the store is reachable
    async fn health_check(&self) -> bool;
}

fn matches_filter(body: &Value, filter: &Value) -> bool {
    match filter.as_object() {
        Some(fields) => fields
            .iter()
            .all(|(key, expected)| body.get(key) == Some(expected)),
        // Null or non-object filter matches everything
        None => true,
    }
}

/// In-memory document store (for development and demo deployments)
///
/// Insertion-ordered per collection, always healthy.
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, document: Value) -> Result<String> {
        let id = uuid::Uuid::new_v4().simple().to_string();
        let mut collections = self.collections.write().unwrap();
        collections
            .entry(collection.to_string())
            .or_default()
            .push(Document { id: id.clone(), body: document });
        Ok(id)
    }

    async fn find(&self, collection: &str, filter: Value) -> Result<Vec<Document>> {
        let collections = self.collections.read().unwrap();
        let documents = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| matches_filter(&doc.body, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(documents)
    }

    async fn update(&self, collection: &str, id: &str, patch: Value) -> Result<bool> {
        let mut collections = self.collections.write().unwrap();
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let Some(doc) = docs.iter_mut().find(|doc| doc.id == id) else {
            return Ok(false);
        };

        if let (Some(body), Some(fields)) = (doc.body.as_object_mut(), patch.as_object()) {
            for (key, value) in fields {
                body.insert(key.clone(), value.clone());
            }
        }
        Ok(true)
    }

    async fn collection_names(&self) -> Result<Vec<String>> {
        let collections = self.collections.read().unwrap();
        let mut names: Vec<String> = collections.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
