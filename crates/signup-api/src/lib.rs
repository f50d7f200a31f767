//! Account signup service.
//!
//! A single REST endpoint that:
//! - Checks the signup payload for missing or malformed fields
//! - Validates the email format and the password confirmation
//! - Hashes the password and stores the account in a document store

pub mod account;
pub mod adapters;
pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod protocols;
pub mod usecases;

pub use account::{AccountInput, AccountRecord};
pub use config::Config;
pub use controller::{ApiError, HttpRequest, HttpResponse, SignUpController};
pub use error::SignupError;
pub use protocols::{AccountRepository, AccountStore, EmailValidator, PasswordHasher};
pub use usecases::DbAddAccount;
