//! Account repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};
use uuid::Uuid;

use super::entities::account::{self, ActiveModel, Entity as AccountEntity};
use crate::domain::Account;
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Account repository trait for dependency injection.
///
/// Accounts are append-only: there are no update or delete operations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find account by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>>;

    /// Find account by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Create a new account.
    ///
    /// Fails with `EmailTaken` when the email is already registered; the
    /// unique index makes this atomic with respect to concurrent creates.
    async fn create(&self, email: String, password_hash: String) -> AppResult<Account>;

    /// List all accounts in insertion order
    async fn list(&self) -> AppResult<Vec<Account>>;
}

/// Concrete implementation of AccountRepository backed by SeaORM
pub struct AccountStore {
    db: DatabaseConnection,
}

impl AccountStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountRepository for AccountStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        let result = AccountEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Account::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let result = AccountEntity::find()
            .filter(account::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Account::from))
    }

    async fn create(&self, email: String, password_hash: String) -> AppResult<Account> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            password_hash: Set(password_hash),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(|e| {
            // A lost race with a concurrent registration surfaces here as a
            // unique constraint violation.
            match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => AppError::EmailTaken,
                _ => AppError::from(e),
            }
        })?;

        Ok(Account::from(model))
    }

    async fn list(&self) -> AppResult<Vec<Account>> {
        let models = AccountEntity::find()
            .order_by_asc(account::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Account::from).collect())
    }
}
