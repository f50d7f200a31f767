//! Account persistence in the document store.

use crate::account::{AccountInput, AccountRecord};
use crate::error::SignupError;
use crate::protocols::AccountStore;
use async_trait::async_trait;
use document_store::DocumentClient;
use tracing::{debug, instrument};

/// Collection holding account documents.
pub const ACCOUNTS_COLLECTION: &str = "accounts";

/// Stores accounts as documents in the `accounts` collection.
#[derive(Clone)]
pub struct AccountDocumentRepository {
    client: DocumentClient,
}

impl AccountDocumentRepository {
    pub fn new(client: DocumentClient) -> Self {
        Self { client }
    }

    /// Number of stored accounts.
    pub async fn count(&self) -> Result<usize, SignupError> {
        let collection = self.client.collection(ACCOUNTS_COLLECTION).await?;
        Ok(collection.count().await?)
    }
}

#[async_trait]
impl AccountStore for AccountDocumentRepository {
    #[instrument(skip(self, account))]
    async fn add(&self, account: AccountInput) -> Result<AccountRecord, SignupError> {
        let collection = self.client.collection(ACCOUNTS_COLLECTION).await?;
        let document = serde_json::to_value(&account)?;
        let id = collection.insert_one(document).await?;

        debug!(account_id = %id, "Stored account document");
        Ok(AccountRecord::new(id, account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use document_store::{ConnectOptions, StoreError};

    fn account() -> AccountInput {
        AccountInput {
            name: "Adoleta".into(),
            email: "adoleta@mail.com".into(),
            password: "hashed_password".into(),
        }
    }

    async fn memory_client() -> DocumentClient {
        DocumentClient::connect("memory://", ConnectOptions::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_add_returns_record_with_id() {
        let client = memory_client().await;
        let sut = AccountDocumentRepository::new(client.clone());

        let record = sut.add(account()).await.unwrap();

        assert!(!record.id.is_empty());
        assert_eq!(record.name, "Adoleta");
        assert_eq!(record.email, "adoleta@mail.com");
        assert_eq!(record.password, "hashed_password");

        let stored = client
            .collection(ACCOUNTS_COLLECTION)
            .await
            .unwrap()
            .find_by_id(&record.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored["email"], "adoleta@mail.com");
        assert_eq!(stored["password"], "hashed_password");
    }

    #[tokio::test]
    async fn test_count() {
        let sut = AccountDocumentRepository::new(memory_client().await);
        assert_eq!(sut.count().await.unwrap(), 0);

        sut.add(account()).await.unwrap();
        sut.add(account()).await.unwrap();

        assert_eq!(sut.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_add_fails_after_disconnect() {
        let client = memory_client().await;
        let sut = AccountDocumentRepository::new(client.clone());
        client.disconnect().await.unwrap();

        assert!(matches!(
            sut.add(account()).await,
            Err(SignupError::Database(StoreError::NotConnected))
        ));
    }
}
