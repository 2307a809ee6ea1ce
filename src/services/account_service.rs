//! Account service - registration, login and account lookup.
//!
//! Orchestrates the password hasher, the account repository and the token
//! issuer. Collaborators are injected at construction time.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tokio::task;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{AccountResponse, Password};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::AccountRepository;
use crate::services::TokenIssuer;

/// Syntactically valid bcrypt hash that matches no password. Verified on
/// the unknown-email login path so that path performs the same amount of
/// work as a wrong-password login.
const DUMMY_HASH: &str = "$2b$12$abcdefghijklmnopqrstuuABCDEFGHIJKLMNOPQRSTUVWXYZabcde";

/// Response returned after successful login
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// The authenticated account
    pub user: AccountResponse,
}

/// Account service trait for dependency injection.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a new account
    async fn register(&self, email: String, password: String) -> AppResult<AccountResponse>;

    /// Login and return a bearer token with the account
    async fn login(&self, email: String, password: String) -> AppResult<LoginResponse>;

    /// List all accounts
    async fn list_accounts(&self) -> AppResult<Vec<AccountResponse>>;

    /// Get a single account by ID
    async fn get_account(&self, id: Uuid) -> AppResult<AccountResponse>;
}

/// Concrete implementation of AccountService.
pub struct AccountManager {
    repo: Arc<dyn AccountRepository>,
    issuer: TokenIssuer,
    hash_cost: u32,
}

impl AccountManager {
    /// Create new account service instance with explicit collaborators
    pub fn new(repo: Arc<dyn AccountRepository>, issuer: TokenIssuer, hash_cost: u32) -> Self {
        Self {
            repo,
            issuer,
            hash_cost,
        }
    }
}

#[async_trait]
impl AccountService for AccountManager {
    async fn register(&self, email: String, password: String) -> AppResult<AccountResponse> {
        // Pre-check is an optimization only; the store's unique constraint
        // is what guards against concurrent duplicate registrations.
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::EmailTaken);
        }

        // bcrypt is CPU-bound; keep it off the async worker threads
        let cost = self.hash_cost;
        let hashed = task::spawn_blocking(move || Password::new(&password, cost))
            .await
            .map_err(|e| AppError::internal(format!("Hashing task failed: {}", e)))??;

        let account = self.repo.create(email, hashed.into_string()).await?;
        tracing::info!(account_id = %account.id, "Account registered");

        Ok(AccountResponse::from(account))
    }

    async fn login(&self, email: String, password: String) -> AppResult<LoginResponse> {
        let found = self.repo.find_by_email(&email).await?;

        // Verify against a dummy hash when the account does not exist, so
        // unknown-email and wrong-password logins stay indistinguishable
        // in both response and timing.
        let stored = match &found {
            Some(account) => Password::from_hash(account.password_hash.clone()),
            None => Password::from_hash(DUMMY_HASH.to_string()),
        };

        let verified = task::spawn_blocking(move || stored.verify(&password))
            .await
            .map_err(|e| AppError::internal(format!("Verification task failed: {}", e)))?;

        let account = match (found, verified) {
            (Some(account), Ok(true)) => account,
            // A malformed stored hash is a server fault, not a bad login
            (Some(_), Err(e)) => return Err(e),
            _ => return Err(AppError::InvalidCredentials),
        };

        let token = self.issuer.issue(account.id, &account.email)?;

        Ok(LoginResponse {
            access_token: token,
            user: AccountResponse::from(account),
        })
    }

    async fn list_accounts(&self) -> AppResult<Vec<AccountResponse>> {
        let accounts = self.repo.list().await?;
        Ok(accounts.into_iter().map(AccountResponse::from).collect())
    }

    async fn get_account(&self, id: Uuid) -> AppResult<AccountResponse> {
        self.repo
            .find_by_id(id)
            .await?
            .map(AccountResponse::from)
            .ok_or_not_found()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Account;
    use crate::infra::repositories::MockAccountRepository;
    use chrono::Utc;

    const TEST_SECRET: &[u8] = b"test-secret-key-for-testing-only-32chars";
    const TEST_COST: u32 = 4;

    fn test_service(repo: MockAccountRepository) -> AccountManager {
        AccountManager::new(
            Arc::new(repo),
            TokenIssuer::new(TEST_SECRET, 24),
            TEST_COST,
        )
    }

    fn stored_account(email: &str, password: &str) -> Account {
        Account {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: Password::new(password, TEST_COST).unwrap().into_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create().returning(|email, hash| {
            Ok(Account {
                id: Uuid::new_v4(),
                email,
                password_hash: hash,
                created_at: Utc::now(),
            })
        });

        let service = test_service(repo);
        let response = service
            .register("a@x.com".to_string(), "secret1".to_string())
            .await
            .unwrap();

        assert_eq!(response.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_register_existing_email_fails() {
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(stored_account("a@x.com", "secret1"))));

        let service = test_service(repo);
        let result = service
            .register("a@x.com".to_string(), "secret1".to_string())
            .await;

        assert!(matches!(result, Err(AppError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_register_lost_race_surfaces_conflict() {
        // The pre-check misses, but the store reports the unique violation
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create().returning(|_, _| Err(AppError::EmailTaken));

        let service = test_service(repo);
        let result = service
            .register("a@x.com".to_string(), "secret1".to_string())
            .await;

        assert!(matches!(result, Err(AppError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_login_unknown_email_fails_with_invalid_credentials() {
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));

        let service = test_service(repo);
        let result = service
            .login("nobody@x.com".to_string(), "secret1".to_string())
            .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_wrong_password_fails_with_invalid_credentials() {
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(stored_account("a@x.com", "secret1"))));

        let service = test_service(repo);
        let result = service
            .login("a@x.com".to_string(), "wrong-password".to_string())
            .await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_success_issues_decodable_token() {
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(stored_account("a@x.com", "secret1"))));

        let service = test_service(repo);
        let response = service
            .login("a@x.com".to_string(), "secret1".to_string())
            .await
            .unwrap();

        let claims = TokenIssuer::new(TEST_SECRET, 24)
            .verify(&response.access_token)
            .unwrap();
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.sub, response.user.id);
    }

    #[tokio::test]
    async fn test_login_malformed_stored_hash_is_internal_error() {
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_email().returning(|_| {
            Ok(Some(Account {
                id: Uuid::new_v4(),
                email: "a@x.com".to_string(),
                password_hash: "garbage".to_string(),
                created_at: Utc::now(),
            }))
        });

        let service = test_service(repo);
        let result = service
            .login("a@x.com".to_string(), "secret1".to_string())
            .await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_get_account_not_found() {
        let mut repo = MockAccountRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = test_service(repo);
        let result = service.get_account(Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_accounts_strips_hashes() {
        let mut repo = MockAccountRepository::new();
        repo.expect_list().returning(|| {
            Ok(vec![
                stored_account("a@x.com", "secret1"),
                stored_account("b@x.com", "secret2"),
            ])
        });

        let service = test_service(repo);
        let accounts = service.list_accounts().await.unwrap();

        assert_eq!(accounts.len(), 2);
        let json = serde_json::to_value(&accounts).unwrap();
        for entry in json.as_array().unwrap() {
            assert!(entry.get("password_hash").is_none());
        }
    }
}
