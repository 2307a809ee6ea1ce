//! API boundary tests.
//!
//! These exercise the validation layer and error mapping without requiring
//! actual database or Redis connections.

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use account_service::api::handlers::account_handler::{LoginRequest, RegisterRequest};
use account_service::domain::AccountResponse;
use account_service::errors::{AppError, AppResult};
use account_service::services::{AccountService, LoginResponse};

// =============================================================================
// Mock Services for Testing
// =============================================================================

/// Mock account service that returns predefined responses
struct MockAccountService;

#[async_trait]
impl AccountService for MockAccountService {
    async fn register(&self, email: String, _password: String) -> AppResult<AccountResponse> {
        Ok(AccountResponse {
            id: Uuid::new_v4(),
            email,
            created_at: Utc::now(),
        })
    }

    async fn login(&self, email: String, _password: String) -> AppResult<LoginResponse> {
        Ok(LoginResponse {
            access_token: "mock-token".to_string(),
            user: AccountResponse {
                id: Uuid::new_v4(),
                email,
                created_at: Utc::now(),
            },
        })
    }

    async fn list_accounts(&self) -> AppResult<Vec<AccountResponse>> {
        Ok(vec![
            AccountResponse {
                id: Uuid::new_v4(),
                email: "user1@example.com".to_string(),
                created_at: Utc::now(),
            },
            AccountResponse {
                id: Uuid::new_v4(),
                email: "user2@example.com".to_string(),
                created_at: Utc::now(),
            },
        ])
    }

    async fn get_account(&self, _id: Uuid) -> AppResult<AccountResponse> {
        Err(AppError::NotFound)
    }
}

// =============================================================================
// Request Validation Tests
// =============================================================================

#[test]
fn test_register_request_accepts_valid_input() {
    let request = RegisterRequest {
        email: "a@x.com".to_string(),
        password: "secret1".to_string(),
    };

    assert!(request.validate().is_ok());
}

#[test]
fn test_register_request_rejects_invalid_email() {
    let request = RegisterRequest {
        email: "not-an-email".to_string(),
        password: "secret1".to_string(),
    };

    assert!(request.validate().is_err());
}

#[test]
fn test_register_request_rejects_empty_email() {
    let request = RegisterRequest {
        email: String::new(),
        password: "secret1".to_string(),
    };

    assert!(request.validate().is_err());
}

#[test]
fn test_register_request_rejects_short_password() {
    let request = RegisterRequest {
        email: "a@x.com".to_string(),
        password: "12345".to_string(),
    };

    assert!(request.validate().is_err());
}

#[test]
fn test_login_request_validates_like_register() {
    let bad_email = LoginRequest {
        email: "nope".to_string(),
        password: "secret1".to_string(),
    };
    let bad_password = LoginRequest {
        email: "a@x.com".to_string(),
        password: String::new(),
    };
    let ok = LoginRequest {
        email: "a@x.com".to_string(),
        password: "secret1".to_string(),
    };

    assert!(bad_email.validate().is_err());
    assert!(bad_password.validate().is_err());
    assert!(ok.validate().is_ok());
}

// =============================================================================
// Error Mapping Tests
// =============================================================================

#[test]
fn test_error_status_codes() {
    let cases = [
        (AppError::InvalidCredentials, StatusCode::UNAUTHORIZED),
        (AppError::NotFound, StatusCode::NOT_FOUND),
        (AppError::EmailTaken, StatusCode::CONFLICT),
        (
            AppError::validation("bad input"),
            StatusCode::BAD_REQUEST,
        ),
        (
            AppError::internal("boom"),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (error, expected) in cases {
        let response = error.into_response();
        assert_eq!(response.status(), expected);
    }
}

// =============================================================================
// Response Shape Tests
// =============================================================================

#[test]
fn test_login_response_shape() {
    let response = LoginResponse {
        access_token: "token".to_string(),
        user: AccountResponse {
            id: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            created_at: Utc::now(),
        },
    };

    let json = serde_json::to_value(&response).unwrap();
    assert!(json.get("access_token").is_some());
    assert_eq!(json["user"]["email"], "a@x.com");
    assert!(json["user"].get("id").is_some());
    assert!(json["user"].get("created_at").is_some());
    assert!(json["user"].get("password_hash").is_none());
}

// =============================================================================
// Mock Service Tests
// =============================================================================

#[tokio::test]
async fn test_mock_service_register() {
    let service = MockAccountService;
    let result = service
        .register("new@example.com".to_string(), "secret1".to_string())
        .await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().email, "new@example.com");
}

#[tokio::test]
async fn test_mock_service_login() {
    let service = MockAccountService;
    let result = service
        .login("a@x.com".to_string(), "secret1".to_string())
        .await;

    assert!(result.is_ok());
    let login = result.unwrap();
    assert!(!login.access_token.is_empty());
    assert_eq!(login.user.email, "a@x.com");
}

#[tokio::test]
async fn test_mock_service_get_account_not_found() {
    let service = MockAccountService;
    let result = service.get_account(Uuid::new_v4()).await;

    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_mock_service_list_accounts() {
    let service = MockAccountService;
    let accounts = service.list_accounts().await.unwrap();

    assert_eq!(accounts.len(), 2);
}
