use axum::http::{HeaderMap, header};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{domain::user::entity::AuthenticatedUser, presentation::http::errors::AppError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    /// User id
    pub sub: String,
    pub account_id: String,
    pub exp: usize,
}

pub fn issue_user_token(
    user_id: i64,
    account_id: &str,
    secret: &str,
    expiry_hours: i64,
) -> Result<String, AppError> {
    let exp = (chrono::Utc::now() + chrono::Duration::hours(expiry_hours)).timestamp() as usize;
    let claims = UserClaims {
        sub: user_id.to_string(),
        account_id: account_id.to_string(),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string())
}

pub fn decode_optional_user_claims(headers: &HeaderMap, secret: &str) -> Option<UserClaims> {
    let token = extract_bearer_token(headers)?;
    decode::<UserClaims>(
        &token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()
    .map(|d| d.claims)
}

fn principal(claims: UserClaims) -> Option<AuthenticatedUser> {
    let id = claims.sub.parse::<i64>().ok()?;
    Some(AuthenticatedUser::new(id, claims.account_id))
}

/// Principal of the request, if a valid bearer token was sent.
pub fn optional_user(headers: &HeaderMap, secret: &str) -> Option<AuthenticatedUser> {
    decode_optional_user_claims(headers, secret).and_then(principal)
}

/// Principal of the request; 401 when the token is missing or invalid.
pub fn required_user(headers: &HeaderMap, secret: &str) -> Result<AuthenticatedUser, AppError> {
    optional_user(headers, secret)
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
}
