//! Collection persistence: plain or AES-GCM sealed files, or nothing at all.

use crate::error::StoreError;
use crate::types::CollectionData;
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use rand::RngCore;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Key derivation path for collection encryption.
const KEY_DERIVATION_PATH: &str = "document-store/collections";

/// Nonce size for AES-GCM (96 bits = 12 bytes).
const NONCE_SIZE: usize = 12;

/// Derive the 32-byte collection key: SHA256(secret || derivation path).
pub fn derive_key(secret: &SecretString) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(secret.expose_secret().as_bytes());
    hasher.update(KEY_DERIVATION_PATH.as_bytes());
    let hash = hasher.finalize();

    let mut key = [0u8; 32];
    key.copy_from_slice(&hash);
    key
}

/// Encrypt `data` with `key`.
///
/// Output format: [12 bytes nonce][ciphertext with auth tag]
pub fn seal(data: &[u8], key: &[u8; 32]) -> Result<Vec<u8>, StoreError> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rand::thread_rng().fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher.encrypt(nonce, data)?;

    let mut sealed = nonce_bytes.to_vec();
    sealed.extend(ciphertext);
    Ok(sealed)
}

/// Decrypt data produced by [`seal`].
pub fn open(sealed: &[u8], key: &[u8; 32]) -> Result<Vec<u8>, StoreError> {
    if sealed.len() < NONCE_SIZE {
        return Err(StoreError::Encryption("Data too short".into()));
    }

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    let (nonce, ciphertext) = sealed.split_at(NONCE_SIZE);

    cipher.decrypt(Nonce::from_slice(nonce), ciphertext).map_err(|_| {
        StoreError::Encryption(
            "Failed to decrypt collection. The encryption secret may have changed.".to_string(),
        )
    })
}

/// Collection names double as file names, so only a safe subset is accepted.
pub fn validate_collection_name(name: &str) -> Result<(), StoreError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidCollection(name.to_string()))
    }
}

/// File-backed collection storage, one file per collection.
pub struct FileStore {
    root: PathBuf,
    key: Option<[u8; 32]>,
}

impl FileStore {
    pub fn new(root: PathBuf, key: Option<[u8; 32]>) -> Self {
        Self { root, key }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_encrypted(&self) -> bool {
        self.key.is_some()
    }

    fn path_for(&self, collection: &str) -> PathBuf {
        let extension = if self.key.is_some() { "enc" } else { "json" };
        self.root.join(format!("{}.{}", collection, extension))
    }

    /// Write a collection to disk atomically.
    pub async fn save(&self, collection: &str, data: &CollectionData) -> Result<(), StoreError> {
        let plaintext = serde_json::to_vec(data)?;
        let bytes = match &self.key {
            Some(key) => seal(&plaintext, key)?,
            None => plaintext,
        };

        fs::create_dir_all(&self.root).await?;

        // Write atomically using temp file + rename
        let path = self.path_for(collection);
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &bytes).await?;
        fs::rename(&temp_path, &path).await?;

        debug!(
            collection,
            documents = data.len(),
            "Saved collection ({} bytes) to {:?}",
            bytes.len(),
            path
        );
        Ok(())
    }

    /// Read a collection from disk.
    ///
    /// Returns an empty collection if the file doesn't exist.
    pub async fn load(&self, collection: &str) -> Result<CollectionData, StoreError> {
        let path = self.path_for(collection);
        if !path.exists() {
            info!(collection, "Collection file not found at {:?}, starting empty", path);
            return Ok(CollectionData::new());
        }

        let bytes = fs::read(&path).await?;
        let plaintext = match &self.key {
            Some(key) => open(&bytes, key)?,
            None => bytes,
        };

        let data: CollectionData = serde_json::from_slice(&plaintext)?;
        if data.version != crate::types::DATA_VERSION {
            warn!(
                collection,
                version = data.version,
                "Collection written with a different format version"
            );
        }

        info!(
            collection,
            "Loaded collection with {} documents from {:?}",
            data.len(),
            path
        );
        Ok(data)
    }
}

/// Storage backend behind a client.
pub enum Persistence {
    /// Collection files under a directory
    File(FileStore),
    /// In-memory only (no persistence)
    Memory,
}

impl Persistence {
    /// Build the backend for a connection URI.
    pub fn from_uri(uri: &str, secret: Option<&SecretString>) -> Result<Self, StoreError> {
        if uri == "memory://" {
            if secret.is_some() {
                warn!("Encryption secret ignored for in-memory store");
            }
            return Ok(Persistence::Memory);
        }

        match uri.strip_prefix("file://") {
            Some(path) if !path.is_empty() => Ok(Persistence::File(FileStore::new(
                PathBuf::from(path),
                secret.map(derive_key),
            ))),
            _ => Err(StoreError::InvalidUri(uri.to_string())),
        }
    }

    pub async fn save(&self, collection: &str, data: &CollectionData) -> Result<(), StoreError> {
        match self {
            Persistence::File(s) => s.save(collection, data).await,
            Persistence::Memory => {
                debug!(collection, "Memory store: save is a no-op");
                Ok(())
            }
        }
    }

    pub async fn load(&self, collection: &str) -> Result<CollectionData, StoreError> {
        match self {
            Persistence::File(s) => s.load(collection).await,
            Persistence::Memory => Ok(CollectionData::new()),
        }
    }
}
