//! Account model.

use serde::{Deserialize, Serialize};

/// Fields persisted for a new account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// A persisted account, as returned to the client on signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Identifier assigned by the repository
    pub id: String,
    pub name: String,
    pub email: String,
    /// Password as stored (hashed by the repository)
    pub password: String,
}

impl AccountRecord {
    /// Attach a repository-assigned id to the stored input.
    pub fn new(id: impl Into<String>, input: AccountInput) -> Self {
        Self {
            id: id.into(),
            name: input.name,
            email: input.email,
            password: input.password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serialization() {
        let record = AccountRecord::new(
            "valid_id",
            AccountInput {
                name: "Adoleta".into(),
                email: "adoleta@mail.com".into(),
                password: "adoleta123".into(),
            },
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "valid_id",
                "name": "Adoleta",
                "email": "adoleta@mail.com",
                "password": "adoleta123"
            })
        );
    }
}
