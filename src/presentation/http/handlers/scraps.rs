use crate::{
    application::{review::dto::ReviewResponse, scrap::dto::ScrapResponse},
    presentation::http::{errors::AppError, middleware::user::required_user, state::AppState},
};
use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};

pub async fn add_scrap(
    State(state): State<AppState>,
    Path(review_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<ScrapResponse>, AppError> {
    let user = required_user(&headers, &state.config.jwt_secret)?;
    Ok(Json(state.scraps.add_scrap(&user, review_id).await?))
}

pub async fn remove_scrap(
    State(state): State<AppState>,
    Path(review_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<ScrapResponse>, AppError> {
    let user = required_user(&headers, &state.config.jwt_secret)?;
    Ok(Json(state.scraps.remove_scrap(&user, review_id).await?))
}

pub async fn list_my_scraps(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ReviewResponse>>, AppError> {
    let user = required_user(&headers, &state.config.jwt_secret)?;
    Ok(Json(state.scraps.list_user_scraps(&user).await?))
}
