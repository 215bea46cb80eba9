use axum::{Json, extract::State, http::HeaderMap};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{
    application::user::dto::{LoginRequest, RegisterRequest},
    domain::{shared::errors::DomainError, user::entity::UserSummary},
    presentation::http::{
        errors::AppError,
        middleware::user::{issue_user_token, required_user},
        state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserSummary,
}

fn issue(state: &AppState, user: UserSummary) -> Result<Json<AuthResponse>, AppError> {
    let token = issue_user_token(
        user.id,
        &user.account_id,
        &state.config.jwt_secret,
        state.config.jwt_expiry_hours,
    )?;
    Ok(Json(AuthResponse { token, user }))
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = state.users.register(body).await?;
    issue(&state, user)
}

pub async fn login_user(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    // Bad credentials are an authentication failure, not a permission one.
    let user = state.users.login(body).await.map_err(|e| match e {
        DomainError::Unauthorized(msg) => AppError::Unauthorized(msg),
        other => other.into(),
    })?;
    issue(&state, user)
}

pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UserSummary>, AppError> {
    let user = required_user(&headers, &state.config.jwt_secret)?;
    Ok(Json(state.users.me(&user).await?))
}
