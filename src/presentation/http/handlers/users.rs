use super::forms::read_single_image;
use crate::{
    domain::user::entity::UserSummary,
    presentation::http::{errors::AppError, middleware::user::required_user, state::AppState},
};
use axum::{
    Json,
    extract::{Multipart, State},
    http::HeaderMap,
};

pub async fn update_profile_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<UserSummary>, AppError> {
    let user = required_user(&headers, &state.config.jwt_secret)?;
    let image = read_single_image(multipart).await?;
    Ok(Json(state.users.update_profile_image(&user, image).await?))
}
