//! Email format validation backed by the `validator` crate.

use crate::error::SignupError;
use crate::protocols::EmailValidator;
use async_trait::async_trait;
use validator::ValidateEmail;

/// Checks addresses against the HTML5 email grammar.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmailValidatorAdapter;

#[async_trait]
impl EmailValidator for EmailValidatorAdapter {
    async fn is_valid(&self, email: &str) -> Result<bool, SignupError> {
        Ok(email.validate_email())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_accepts_valid_addresses() {
        let sut = EmailValidatorAdapter;
        assert!(sut.is_valid("adoleta@mail.com").await.unwrap());
        assert!(sut.is_valid("first.last+tag@sub.example.org").await.unwrap());
    }

    #[tokio::test]
    async fn test_rejects_invalid_addresses() {
        let sut = EmailValidatorAdapter;
        assert!(!sut.is_valid("").await.unwrap());
        assert!(!sut.is_valid("adoleta").await.unwrap());
        assert!(!sut.is_valid("adoleta@").await.unwrap());
        assert!(!sut.is_valid("@mail.com").await.unwrap());
        assert!(!sut.is_valid("ado leta@mail.com").await.unwrap());
    }
}
