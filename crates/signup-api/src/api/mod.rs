//! HTTP API for the signup service.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::logging_middleware;
pub use types::*;

use crate::adapters::{AccountDocumentRepository, EmailValidatorAdapter};
use crate::controller::SignUpController;
use crate::protocols::PasswordHasher;
use crate::usecases::DbAddAccount;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use document_store::DocumentClient;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Signup controller
    pub signup: Arc<SignUpController>,
    /// Account storage, used for health reporting
    pub accounts: Arc<AccountDocumentRepository>,
}

impl AppState {
    /// Create new application state.
    pub fn new(signup: SignUpController, accounts: AccountDocumentRepository) -> Self {
        Self {
            signup: Arc::new(signup),
            accounts: Arc::new(accounts),
        }
    }

    /// Wire the production collaborators around an open database handle.
    pub fn from_client(client: DocumentClient, hasher: Arc<dyn PasswordHasher>) -> Self {
        let accounts = AccountDocumentRepository::new(client);
        let add_account = DbAddAccount::new(hasher, Arc::new(accounts.clone()));
        let signup = SignUpController::new(Arc::new(EmailValidatorAdapter), Arc::new(add_account));

        Self::new(signup, accounts)
    }
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/signup", post(handlers::signup))
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
