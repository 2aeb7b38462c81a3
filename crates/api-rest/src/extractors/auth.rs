//! Authentication extractor.
//!
//! Bearer tokens are HS256 JWTs. The subject is the judge's id for judges
//! and the configured admin email for the administrator.

use crate::{error::ApiError, middleware::request_id::current_request_id, state::AppState};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use scorecard_application::ServiceContext;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Who a token was issued to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The organiser
    Admin,
    /// A judge account
    Judge,
}

/// Claims stored in JWT token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (judge ID or admin email)
    pub sub: String,

    /// Role
    pub role: Role,

    /// Expiration time (as UTC timestamp)
    pub exp: usize,

    /// Issued at (as UTC timestamp)
    pub iat: usize,
}

impl Claims {
    /// Claims issued now, valid for `ttl_seconds`
    pub fn new(sub: impl Into<String>, role: Role, ttl_seconds: u64) -> Self {
        let now = Utc::now();
        let exp = i64::try_from(ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            sub: sub.into(),
            role,
            exp: exp.timestamp().max(0) as usize,
            iat: now.timestamp().max(0) as usize,
        }
    }

    /// Expiry as a timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp as i64, 0)
    }

    /// Sign the claims
    pub fn encode(&self, secret: &str) -> Result<String, ApiError> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| ApiError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Verify signature and expiry
    pub fn decode(token: &str, secret: &str) -> Result<Self, ApiError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| ApiError::InvalidToken(format!("Token validation failed: {}", e)))
    }
}

/// Authenticated caller extracted from the bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Token subject
    pub subject: String,

    /// Role
    pub role: Role,

    /// Request ID, used as the service correlation ID
    pub request_id: String,

    /// Original claims
    pub claims: Claims,
}

impl AuthenticatedUser {
    /// Check if user is admin
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Service context for this caller
    pub fn context(&self) -> ServiceContext {
        let ctx = ServiceContext::authenticated(self.subject.clone(), self.request_id.clone());
        if self.is_admin() {
            ctx.with_admin()
        } else {
            ctx
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::InvalidToken("Invalid authorization header format".to_string())
        })?;

        let claims = Claims::decode(token, state.jwt_secret())?;

        Ok(Self {
            subject: claims.sub.clone(),
            role: claims.role,
            request_id: current_request_id().unwrap_or_else(|| Uuid::new_v4().to_string()),
            claims,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-minimum-32-characters";

    #[test]
    fn test_claims_roundtrip_through_token() {
        let claims = Claims::new("admin@scorecard.local", Role::Admin, 3600);
        let token = claims.encode(SECRET).unwrap();

        let decoded = Claims::decode(&token, SECRET).unwrap();
        assert_eq!(decoded.sub, "admin@scorecard.local");
        assert_eq!(decoded.role, Role::Admin);
        assert_eq!(decoded.exp - decoded.iat, 3600);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = Claims::new("someone", Role::Judge, 60).encode(SECRET).unwrap();
        let err = Claims::decode(&token, "another-secret-key-minimum-32-chars!").unwrap_err();
        assert!(matches!(err, ApiError::InvalidToken(_)));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let mut claims = Claims::new("someone", Role::Judge, 60);
        claims.exp = claims.iat.saturating_sub(3600);
        let token = claims.encode(SECRET).unwrap();

        assert!(Claims::decode(&token, SECRET).is_err());
    }

    #[test]
    fn test_context_carries_role() {
        let claims = Claims::new("admin@scorecard.local", Role::Admin, 60);
        let user = AuthenticatedUser {
            subject: claims.sub.clone(),
            role: claims.role,
            request_id: "req-9".to_string(),
            claims,
        };

        let ctx = user.context();
        assert!(ctx.is_admin);
        assert_eq!(ctx.correlation_id, "req-9");
    }
}
