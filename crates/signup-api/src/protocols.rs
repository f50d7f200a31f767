//! Collaborator traits injected into the controller and use cases.

use crate::account::{AccountInput, AccountRecord};
use crate::error::SignupError;
use async_trait::async_trait;

/// Email format check.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailValidator: Send + Sync {
    async fn is_valid(&self, email: &str) -> Result<bool, SignupError>;
}

/// Account creation as seen by the controller.
///
/// Implementations assign the id and may hash the password first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn add(&self, account: AccountInput) -> Result<AccountRecord, SignupError>;
}

/// One-way password hashing.
///
/// Failures of the underlying primitive must be returned, never swallowed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn encrypt(&self, plaintext: &str) -> Result<String, SignupError>;
}

/// Persistence of an account whose password is already hashed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn add(&self, account: AccountInput) -> Result<AccountRecord, SignupError>;
}
