//! Document, collection and connection option types.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A stored document. Always a JSON object.
pub type Document = Map<String, Value>;

/// Field holding the identifier assigned on insert.
pub const ID_FIELD: &str = "_id";

/// Format version written with each collection file.
pub(crate) const DATA_VERSION: u32 = 1;

/// Options accepted by [`DocumentClient::connect`](crate::DocumentClient::connect).
#[derive(Debug, Clone, Default)]
pub struct ConnectOptions {
    /// Secret the collection encryption key is derived from.
    /// File-backed collections are written as plain JSON when unset.
    pub encryption_secret: Option<SecretString>,
}

impl ConnectOptions {
    pub fn with_encryption_secret(mut self, secret: impl Into<String>) -> Self {
        self.encryption_secret = Some(SecretString::new(secret.into()));
        self
    }
}

/// Persisted contents of a single collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionData {
    /// Format version written with each collection file.
    pub version: u32,
    /// Documents indexed by their `_id`.
    documents: HashMap<String, Document>,
}

impl Default for CollectionData {
    fn default() -> Self {
        Self {
            version: DATA_VERSION,
            documents: HashMap::new(),
        }
    }
}

impl CollectionData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.get(id)
    }

    pub fn insert(&mut self, id: String, document: Document) {
        self.documents.insert(id, document);
    }

    pub fn remove(&mut self, id: &str) -> Option<Document> {
        self.documents.remove(id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
