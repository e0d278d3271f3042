use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Purpose of a token; access tokens authorize requests, refresh tokens mint new access tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims carried by both token types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub token_type: TokenType,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl Claims {
    pub fn user_id(&self) -> AppResult<i64> {
        self.sub.parse().map_err(|_| {
            AppError::Unauthorized(
                "Token contained no recognizable user identification".to_string(),
            )
        })
    }
}

/// Tokens returned by a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub refresh: String,
    pub access: String,
}

/// Issues and verifies HS256-signed tokens
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl TokenService {
    pub fn new(secret: &str, access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }

    fn issue(&self, user_id: i64, token_type: TokenType) -> AppResult<String> {
        let ttl = match token_type {
            TokenType::Access => self.access_ttl_secs,
            TokenType::Refresh => self.refresh_ttl_secs,
        };

        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            token_type,
            iat: now,
            exp: now + ttl,
            jti: Uuid::new_v4().simple().to_string(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    pub fn issue_access(&self, user_id: i64) -> AppResult<String> {
        self.issue(user_id, TokenType::Access)
    }

    pub fn issue_pair(&self, user_id: i64) -> AppResult<TokenPair> {
        Ok(TokenPair {
            refresh: self.issue(user_id, TokenType::Refresh)?,
            access: self.issue(user_id, TokenType::Access)?,
        })
    }

    /// Verifies signature and expiry, and that the token is of the expected type
    pub fn verify(&self, token: &str, expected: TokenType) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!(error = %e, "Token verification failed");
            AppError::Unauthorized("Token is invalid or expired".to_string())
        })?;

        if data.claims.token_type != expected {
            return Err(AppError::Unauthorized("Token has wrong type".to_string()));
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret", 300, 3600)
    }

    #[test]
    fn test_access_token_verifies() {
        let tokens = service();
        let token = tokens.issue_access(42).unwrap();

        let claims = tokens.verify(&token, TokenType::Access).unwrap();
        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.exp - claims.iat, 300);
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let tokens = service();
        let pair = tokens.issue_pair(7).unwrap();

        assert!(tokens.verify(&pair.refresh, TokenType::Refresh).is_ok());
        assert!(matches!(
            tokens.verify(&pair.refresh, TokenType::Access),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let other = TokenService::new("other-secret", 300, 3600);
        let token = other.issue_access(1).unwrap();

        assert!(matches!(
            service().verify(&token, TokenType::Access),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let tokens = TokenService::new("test-secret", -10, 3600);
        let token = tokens.issue_access(1).unwrap();

        assert!(tokens.verify(&token, TokenType::Access).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(service().verify("not.a.jwt", TokenType::Access).is_err());
    }
}
