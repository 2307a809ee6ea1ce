//! Account domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Account domain entity.
///
/// Accounts are immutable once created: there is no update or delete path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Account response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccountResponse {
    /// Unique account identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Account email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            created_at: account.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_account() -> Account {
        Account {
            id: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            password_hash: "secret-hash".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_serialized_account_omits_password_hash() {
        let account = sample_account();
        let json = serde_json::to_value(&account).unwrap();

        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert!(keys.iter().all(|k| *k != "password_hash"));
        assert_eq!(json["email"], "a@x.com");
    }

    #[test]
    fn test_response_conversion_strips_hash() {
        let account = sample_account();
        let id = account.id;
        let response = AccountResponse::from(account);

        assert_eq!(response.id, id);
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}
