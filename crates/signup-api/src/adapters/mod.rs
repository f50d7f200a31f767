//! Concrete collaborators.

mod account_repository;
mod argon2_hasher;
mod email_validator;

pub use account_repository::{AccountDocumentRepository, ACCOUNTS_COLLECTION};
pub use argon2_hasher::Argon2Hasher;
pub use email_validator::EmailValidatorAdapter;
