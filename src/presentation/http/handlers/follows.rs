use crate::{
    domain::{social::follow::FollowResponse, user::entity::UserSummary},
    presentation::http::{errors::AppError, middleware::user::required_user, state::AppState},
};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};

pub async fn follow(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<FollowResponse>), AppError> {
    let user = required_user(&headers, &state.config.jwt_secret)?;
    let response = state.follows.follow(&user, &account_id).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn unfollow(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let user = required_user(&headers, &state.config.jwt_secret)?;
    state.follows.unfollow(&user, &account_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_followers(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> Result<Json<Vec<UserSummary>>, AppError> {
    Ok(Json(state.follows.list_followers(&account_id).await?))
}

pub async fn list_followings(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> Result<Json<Vec<UserSummary>>, AppError> {
    Ok(Json(state.follows.list_following(&account_id).await?))
}
