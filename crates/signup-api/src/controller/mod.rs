//! Signup request handling.

mod types;

pub use types::*;

use crate::protocols::{AccountRepository, EmailValidator};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Validates a signup payload and creates the account.
pub struct SignUpController {
    email_validator: Arc<dyn EmailValidator>,
    add_account: Arc<dyn AccountRepository>,
}

impl SignUpController {
    pub fn new(
        email_validator: Arc<dyn EmailValidator>,
        add_account: Arc<dyn AccountRepository>,
    ) -> Self {
        Self {
            email_validator,
            add_account,
        }
    }

    /// Handle one signup request.
    ///
    /// Checks run in a fixed order and stop at the first failure:
    /// field presence, password confirmation, email format, then account
    /// creation. Collaborator failures become an opaque 500.
    pub async fn handle(&self, request: HttpRequest) -> HttpResponse {
        let input = match SignUpInput::from_body(&request.body) {
            Ok(input) => input,
            Err(e) => {
                debug!(error = %e, "Rejected signup request");
                return HttpResponse::bad_request(e);
            }
        };

        if input.password != input.password_confirmation {
            debug!("Password confirmation does not match");
            return HttpResponse::bad_request(ApiError::invalid_param("passwordConfirmation"));
        }

        match self.email_validator.is_valid(&input.email).await {
            Ok(true) => {}
            Ok(false) => {
                debug!("Rejected signup with invalid email");
                return HttpResponse::bad_request(ApiError::invalid_param("email"));
            }
            Err(e) => {
                error!(error = %e, "Email validator failed");
                return HttpResponse::server_error();
            }
        }

        match self.add_account.add(input.into_account()).await {
            Ok(account) => {
                info!(account_id = %account.id, "Account created");
                HttpResponse::ok(account)
            }
            Err(e) => {
                error!(error = %e, "Account creation failed");
                HttpResponse::server_error()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{AccountInput, AccountRecord};
    use crate::error::SignupError;
    use crate::protocols::{MockAccountRepository, MockEmailValidator};
    use serde_json::{json, Value};

    fn valid_body() -> Value {
        json!({
            "name": "Adoleta",
            "email": "adoleta@mail.com",
            "password": "adoleta123",
            "passwordConfirmation": "adoleta123"
        })
    }

    fn without(field: &str) -> Value {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove(field);
        body
    }

    fn accepting_validator() -> MockEmailValidator {
        let mut validator = MockEmailValidator::new();
        validator.expect_is_valid().returning(|_| Ok(true));
        validator
    }

    fn echoing_repository() -> MockAccountRepository {
        let mut repository = MockAccountRepository::new();
        repository
            .expect_add()
            .returning(|account| Ok(AccountRecord::new("valid_id", account)));
        repository
    }

    fn make_sut(
        validator: MockEmailValidator,
        repository: MockAccountRepository,
    ) -> SignUpController {
        SignUpController::new(Arc::new(validator), Arc::new(repository))
    }

    async fn assert_missing(field: &str) {
        let mut validator = MockEmailValidator::new();
        validator.expect_is_valid().never();
        let mut repository = MockAccountRepository::new();
        repository.expect_add().never();

        let sut = make_sut(validator, repository);
        let response = sut.handle(HttpRequest::new(without(field))).await;

        assert_eq!(response.status_code, 400);
        assert_eq!(
            response.body,
            ResponseBody::Error(ApiError::missing_param(field))
        );
    }

    #[tokio::test]
    async fn test_returns_400_if_no_name() {
        assert_missing("name").await;
    }

    #[tokio::test]
    async fn test_returns_400_if_no_email() {
        assert_missing("email").await;
    }

    #[tokio::test]
    async fn test_returns_400_if_no_password() {
        assert_missing("password").await;
    }

    #[tokio::test]
    async fn test_returns_400_if_no_password_confirmation() {
        assert_missing("passwordConfirmation").await;
    }

    #[tokio::test]
    async fn test_missing_email_ignores_other_fields() {
        let sut = make_sut(accepting_validator(), echoing_repository());
        let body = json!({ "name": "Adoleta", "password": "a", "passwordConfirmation": "b" });

        let response = sut.handle(HttpRequest::new(body)).await;

        assert_eq!(response.status_code, 400);
        assert_eq!(
            response.body,
            ResponseBody::Error(ApiError::missing_param("email"))
        );
    }

    #[tokio::test]
    async fn test_returns_400_if_password_confirmation_fails() {
        // Validator must not be consulted once the confirmation mismatches
        let mut validator = MockEmailValidator::new();
        validator.expect_is_valid().never();
        let sut = make_sut(validator, MockAccountRepository::new());

        let mut body = valid_body();
        body["passwordConfirmation"] = json!("different_password");
        let response = sut.handle(HttpRequest::new(body)).await;

        assert_eq!(response.status_code, 400);
        assert_eq!(
            response.body,
            ResponseBody::Error(ApiError::invalid_param("passwordConfirmation"))
        );
    }

    #[tokio::test]
    async fn test_returns_400_if_invalid_email() {
        let mut validator = MockEmailValidator::new();
        validator.expect_is_valid().times(1).returning(|_| Ok(false));
        let mut repository = MockAccountRepository::new();
        repository.expect_add().never();
        let sut = make_sut(validator, repository);

        let mut body = valid_body();
        body["email"] = json!("invalid_email@mail.com");
        let response = sut.handle(HttpRequest::new(body)).await;

        assert_eq!(response.status_code, 400);
        assert_eq!(
            response.body,
            ResponseBody::Error(ApiError::invalid_param("email"))
        );
    }

    #[tokio::test]
    async fn test_calls_email_validator_with_correct_email() {
        let mut validator = MockEmailValidator::new();
        validator
            .expect_is_valid()
            .withf(|email| email == "adoleta@mail.com")
            .times(1)
            .returning(|_| Ok(true));
        let sut = make_sut(validator, echoing_repository());

        sut.handle(HttpRequest::new(valid_body())).await;
    }

    #[tokio::test]
    async fn test_returns_500_if_email_validator_fails() {
        let mut validator = MockEmailValidator::new();
        validator
            .expect_is_valid()
            .returning(|_| Err(SignupError::Internal("regex engine exploded".into())));
        let mut repository = MockAccountRepository::new();
        repository.expect_add().never();
        let sut = make_sut(validator, repository);

        let response = sut.handle(HttpRequest::new(valid_body())).await;

        assert_eq!(response.status_code, 500);
        assert_eq!(response.body, ResponseBody::Error(ApiError::ServerError));
    }

    #[tokio::test]
    async fn test_returns_500_if_add_account_fails() {
        let mut repository = MockAccountRepository::new();
        repository
            .expect_add()
            .returning(|_| Err(SignupError::Internal("disk full".into())));
        let sut = make_sut(accepting_validator(), repository);

        let response = sut.handle(HttpRequest::new(valid_body())).await;

        assert_eq!(response.status_code, 500);
        assert_eq!(response.body, ResponseBody::Error(ApiError::ServerError));

        // Internal detail never reaches the client
        let json = serde_json::to_string(&response.body).unwrap();
        assert!(!json.contains("disk full"));
    }

    #[tokio::test]
    async fn test_calls_add_account_with_correct_values() {
        let expected = AccountInput {
            name: "Adoleta".into(),
            email: "adoleta@mail.com".into(),
            password: "adoleta123".into(),
        };

        let mut repository = MockAccountRepository::new();
        repository
            .expect_add()
            .withf(move |account| *account == expected)
            .times(1)
            .returning(|account| Ok(AccountRecord::new("valid_id", account)));
        let sut = make_sut(accepting_validator(), repository);

        sut.handle(HttpRequest::new(valid_body())).await;
    }

    #[tokio::test]
    async fn test_returns_200_if_valid_data() {
        let sut = make_sut(accepting_validator(), echoing_repository());

        let response = sut.handle(HttpRequest::new(valid_body())).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(
            serde_json::to_value(&response.body).unwrap(),
            json!({
                "id": "valid_id",
                "name": "Adoleta",
                "email": "adoleta@mail.com",
                "password": "adoleta123"
            })
        );
    }

    #[tokio::test]
    async fn test_returns_400_if_field_is_not_a_string() {
        let sut = make_sut(MockEmailValidator::new(), MockAccountRepository::new());

        let mut body = valid_body();
        body["name"] = json!(["Adoleta"]);
        let response = sut.handle(HttpRequest::new(body)).await;

        assert_eq!(response.status_code, 400);
        assert_eq!(
            response.body,
            ResponseBody::Error(ApiError::invalid_param("name"))
        );
    }
}
