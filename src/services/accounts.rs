use serde::Deserialize;
use validator::Validate;

use crate::{
    auth::{
        password::{hash_password, verify_password},
        TokenPair, TokenService, TokenType,
    },
    db::Store,
    error::{AppError, AppResult, FieldErrors},
    models::{normalize_email, NewUser, User},
};

const INVALID_CREDENTIALS: &str = "No active account found with the given credentials";

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(
        min = 1,
        max = 30,
        message = "Ensure this field has between 1 and 30 characters."
    ))]
    pub username: String,
    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 255, message = "Ensure this field has no more than 255 characters.")
    )]
    pub email: String,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub password: String,
    #[serde(default)]
    #[validate(length(max = 30, message = "Ensure this field has no more than 30 characters."))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 30, message = "Ensure this field has no more than 30 characters."))]
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Creates an account after validating the request and hashing the password
pub async fn register(
    store: &dyn Store,
    request: RegisterRequest,
    bcrypt_cost: u32,
) -> AppResult<User> {
    request.validate().map_err(FieldErrors::from)?;

    let password_hash = hash_password(request.password, bcrypt_cost).await?;
    let user = store
        .create_user(NewUser {
            username: request.username,
            email: normalize_email(&request.email),
            password_hash,
            first_name: request.first_name,
            last_name: request.last_name,
        })
        .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Registered user");

    Ok(user)
}

/// Exchanges credentials of an active user for a refresh/access token pair
pub async fn login(
    store: &dyn Store,
    tokens: &TokenService,
    request: LoginRequest,
) -> AppResult<TokenPair> {
    let user = store
        .find_user_by_username(&request.username)
        .await?
        .filter(|user| user.is_active)
        .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    if !verify_password(request.password, user.password_hash.clone()).await? {
        tracing::info!(username = %request.username, "Rejected login with bad password");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    tracing::info!(user_id = user.id, "User logged in");

    tokens.issue_pair(user.id)
}

/// Mints a new access token from a valid refresh token
pub fn refresh(tokens: &TokenService, request: RefreshRequest) -> AppResult<String> {
    let claims = tokens.verify(&request.refresh, TokenType::Refresh)?;
    tokens.issue_access(claims.user_id()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn register_request(username: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: format!("{}@Example.COM", username),
            password: password.to_string(),
            first_name: String::new(),
            last_name: String::new(),
        }
    }

    fn tokens() -> TokenService {
        TokenService::new("accounts-test", 300, 3600)
    }

    #[tokio::test]
    async fn test_register_normalizes_email_and_hashes_password() {
        let store = MemoryStore::new();
        let user = register(&store, register_request("maria", "pw"), 4)
            .await
            .unwrap();

        assert_eq!(user.email, "maria@example.com");
        assert_ne!(user.password_hash, "pw");
        assert!(user.is_active);
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_fields() {
        let store = MemoryStore::new();
        let mut request = register_request("", "");
        request.email = "not-an-email".to_string();

        match register(&store, request, 4).await.unwrap_err() {
            AppError::Validation(errors) => {
                assert!(errors.get("username").is_some());
                assert!(errors.get("email").is_some());
                assert!(errors.get("password").is_some());
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_login_and_refresh() {
        let store = MemoryStore::new();
        let tokens = tokens();
        let user = register(&store, register_request("omar", "secret"), 4)
            .await
            .unwrap();

        let pair = login(
            &store,
            &tokens,
            LoginRequest {
                username: "omar".to_string(),
                password: "secret".to_string(),
            },
        )
        .await
        .unwrap();

        let claims = tokens.verify(&pair.access, TokenType::Access).unwrap();
        assert_eq!(claims.user_id().unwrap(), user.id);

        let access = refresh(
            &tokens,
            RefreshRequest {
                refresh: pair.refresh,
            },
        )
        .unwrap();
        assert!(tokens.verify(&access, TokenType::Access).is_ok());
    }

    #[tokio::test]
    async fn test_login_with_wrong_password() {
        let store = MemoryStore::new();
        register(&store, register_request("lin", "right"), 4)
            .await
            .unwrap();

        let err = login(
            &store,
            &tokens(),
            LoginRequest {
                username: "lin".to_string(),
                password: "wrong".to_string(),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let store = MemoryStore::new();
        let err = login(
            &store,
            &tokens(),
            LoginRequest {
                username: "ghost".to_string(),
                password: "pw".to_string(),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_refresh_rejects_access_token() {
        let tokens = tokens();
        let access = tokens.issue_access(1).unwrap();

        let result = refresh(&tokens, RefreshRequest { refresh: access });
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }
}
