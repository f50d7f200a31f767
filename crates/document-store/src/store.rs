//! Connection handle and collections.

use crate::error::StoreError;
use crate::persistence::{validate_collection_name, Persistence};
use crate::types::{CollectionData, ConnectOptions, Document, ID_FIELD};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

struct ClientInner {
    uri: String,
    persistence: Persistence,
    collections: RwLock<HashMap<String, CollectionData>>,
    connected: AtomicBool,
}

/// Handle to an open document database.
///
/// Cloning is cheap and every clone shares the same connection. The owner is
/// expected to call [`DocumentClient::disconnect`] once at shutdown.
#[derive(Clone)]
pub struct DocumentClient {
    inner: Arc<ClientInner>,
}

impl DocumentClient {
    /// Open a connection.
    ///
    /// Supported URIs are `memory://` and `file://<directory>`.
    pub async fn connect(uri: &str, options: ConnectOptions) -> Result<Self, StoreError> {
        let persistence = Persistence::from_uri(uri, options.encryption_secret.as_ref())?;

        if let Persistence::File(store) = &persistence {
            tokio::fs::create_dir_all(store.root()).await?;
            info!(
                root = ?store.root(),
                encrypted = store.is_encrypted(),
                "Connected to file-backed document store"
            );
        } else {
            warn!("Connected to in-memory document store (data will be lost on restart)");
        }

        Ok(Self {
            inner: Arc::new(ClientInner {
                uri: uri.to_string(),
                persistence,
                collections: RwLock::new(HashMap::new()),
                connected: AtomicBool::new(true),
            }),
        })
    }

    pub fn uri(&self) -> &str {
        &self.inner.uri
    }

    pub fn is_connected(&self) -> bool {
        self.inner.connected.load(Ordering::SeqCst)
    }

    fn ensure_connected(&self) -> Result<(), StoreError> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(StoreError::NotConnected)
        }
    }

    /// Get a handle to a collection, loading it from storage on first use.
    #[instrument(skip(self))]
    pub async fn collection(&self, name: &str) -> Result<Collection, StoreError> {
        self.ensure_connected()?;
        validate_collection_name(name)?;

        let loaded = self.inner.collections.read().await.contains_key(name);
        if !loaded {
            let mut collections = self.inner.collections.write().await;
            // disconnect() may have flushed and cleared the map meanwhile
            self.ensure_connected()?;
            // Another task may have loaded it while we waited for the lock
            if !collections.contains_key(name) {
                let data = self.inner.persistence.load(name).await?;
                collections.insert(name.to_string(), data);
            }
        }

        Ok(Collection {
            name: name.to_string(),
            client: self.clone(),
        })
    }

    /// Flush every open collection and close the connection.
    ///
    /// Calling this more than once is a no-op.
    pub async fn disconnect(&self) -> Result<(), StoreError> {
        if !self.inner.connected.swap(false, Ordering::SeqCst) {
            debug!("Document store already disconnected");
            return Ok(());
        }

        let mut collections = self.inner.collections.write().await;
        for (name, data) in collections.iter() {
            self.inner.persistence.save(name, data).await?;
        }
        collections.clear();

        info!(uri = %self.inner.uri, "Disconnected from document store");
        Ok(())
    }
}

/// Handle to a single named collection.
#[derive(Clone)]
pub struct Collection {
    name: String,
    client: DocumentClient,
}

impl Collection {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert a document and return its assigned `_id`.
    ///
    /// The document must be a JSON object. Any `_id` it carries is replaced.
    /// The collection is persisted before this returns.
    #[instrument(skip(self, document), fields(collection = %self.name))]
    pub async fn insert_one(&self, document: Value) -> Result<String, StoreError> {
        let Value::Object(mut document) = document else {
            return Err(StoreError::InvalidDocument(
                "document must be a JSON object".into(),
            ));
        };

        self.client.ensure_connected()?;

        let id = Uuid::new_v4().to_string();
        document.insert(ID_FIELD.to_string(), Value::String(id.clone()));

        let inner = &self.client.inner;
        let mut collections = inner.collections.write().await;
        // A disconnect that won the lock has already flushed and cleared the
        // map; writing a fresh collection now would overwrite the saved file.
        self.client.ensure_connected()?;
        let data = collections
            .get_mut(&self.name)
            .ok_or(StoreError::NotConnected)?;
        data.insert(id.clone(), document);

        if let Err(e) = inner.persistence.save(&self.name, data).await {
            // Keep memory consistent with what is on disk
            data.remove(&id);
            return Err(e);
        }

        debug!(id = %id, total = data.len(), "Inserted document");
        Ok(id)
    }

    /// Fetch a document by `_id`.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Document>, StoreError> {
        self.client.ensure_connected()?;

        let collections = self.client.inner.collections.read().await;
        Ok(collections
            .get(&self.name)
            .and_then(|data| data.get(id))
            .cloned())
    }

    /// Number of documents in the collection.
    pub async fn count(&self) -> Result<usize, StoreError> {
        self.client.ensure_connected()?;

        let collections = self.client.inner.collections.read().await;
        Ok(collections.get(&self.name).map(|d| d.len()).unwrap_or(0))
    }
}
