use crate::{
    application::reaction::dto::AddReactionRequest,
    domain::social::reaction::ReactionResponse,
    presentation::http::{
        errors::AppError,
        middleware::user::{optional_user, required_user},
        state::AppState,
    },
};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};

pub async fn get_reactions(
    State(state): State<AppState>,
    Path(review_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<Vec<ReactionResponse>>, AppError> {
    let viewer = optional_user(&headers, &state.config.jwt_secret);
    Ok(Json(
        state.reactions.get_reactions(viewer.as_ref(), review_id).await?,
    ))
}

pub async fn add_reaction(
    State(state): State<AppState>,
    Path(review_id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<AddReactionRequest>,
) -> Result<Json<Vec<ReactionResponse>>, AppError> {
    let user = required_user(&headers, &state.config.jwt_secret)?;
    Ok(Json(
        state.reactions.add_reaction(&user, review_id, &body.kind).await?,
    ))
}

pub async fn remove_reaction(
    State(state): State<AppState>,
    Path(review_id): Path<i64>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let user = required_user(&headers, &state.config.jwt_secret)?;
    state.reactions.remove_reaction(&user, review_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
