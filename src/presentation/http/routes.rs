use super::{
    handlers::{
        auth, comments, follows, health, projects, reactions, reviews, scraps, users,
    },
    middleware::request_id::request_id_middleware,
    state::AppState,
};
use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(health::health_check))
        .route("/api/v1/health", get(health::health_check))
        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login_user))
        .route("/api/v1/auth/me", get(auth::me))
        .route(
            "/api/v1/users/me/profile-image",
            post(users::update_profile_image),
        )
        // Projects
        .route(
            "/api/v1/projects",
            get(projects::list_my_projects).post(projects::register_project),
        )
        .route("/api/v1/projects/{id}", patch(projects::update_project))
        .route(
            "/api/v1/projects/{id}/reviews",
            get(reviews::list_project_reviews).post(reviews::create_project_review),
        )
        // Reviews
        .route(
            "/api/v1/reviews",
            get(reviews::list_reviews).post(reviews::create_review),
        )
        .route("/api/v1/reviews/search", get(reviews::search_reviews))
        .route(
            "/api/v1/reviews/{id}",
            get(reviews::get_review)
                .patch(reviews::update_review)
                .delete(reviews::delete_review),
        )
        .route("/api/v1/reviews/{id}/status", post(reviews::classify_review))
        // Comments
        .route(
            "/api/v1/reviews/{id}/comments",
            get(comments::get_comments).post(comments::add_comment),
        )
        .route(
            "/api/v1/comments/{id}",
            patch(comments::edit_comment).delete(comments::delete_comment),
        )
        // Reactions
        .route(
            "/api/v1/reviews/{id}/reactions",
            get(reactions::get_reactions)
                .post(reactions::add_reaction)
                .delete(reactions::remove_reaction),
        )
        // Scraps
        .route(
            "/api/v1/reviews/{id}/scrap",
            post(scraps::add_scrap).delete(scraps::remove_scrap),
        )
        .route("/api/v1/me/scraps", get(scraps::list_my_scraps))
        // Users and follows
        .route(
            "/api/v1/users/{account_id}/reviews",
            get(reviews::list_user_reviews),
        )
        .route(
            "/api/v1/users/{account_id}/follow",
            post(follows::follow).delete(follows::unfollow),
        )
        .route(
            "/api/v1/users/{account_id}/followers",
            get(follows::list_followers),
        )
        .route(
            "/api/v1/users/{account_id}/followings",
            get(follows::list_followings),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
