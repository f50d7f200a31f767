//! Account creation use case.

use crate::account::{AccountInput, AccountRecord};
use crate::error::SignupError;
use crate::protocols::{AccountRepository, AccountStore, PasswordHasher};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

/// Hashes the password, then hands the account to the store.
pub struct DbAddAccount {
    hasher: Arc<dyn PasswordHasher>,
    store: Arc<dyn AccountStore>,
}

impl DbAddAccount {
    pub fn new(hasher: Arc<dyn PasswordHasher>, store: Arc<dyn AccountStore>) -> Self {
        Self { hasher, store }
    }
}

#[async_trait]
impl AccountRepository for DbAddAccount {
    #[instrument(skip(self, account))]
    async fn add(&self, account: AccountInput) -> Result<AccountRecord, SignupError> {
        let hashed = self.hasher.encrypt(&account.password).await?;

        self.store
            .add(AccountInput {
                password: hashed,
                ..account
            })
            .await
    }
}
