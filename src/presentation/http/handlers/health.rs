use crate::presentation::http::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
    file_storage: &'static str,
    version: &'static str,
}

/// Reports whether Postgres answers and the upload directory is present.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => "up",
        Err(e) => {
            tracing::error!("Health check failed: database unreachable: {}", e);
            "down"
        }
    };

    let file_storage = match tokio::fs::metadata(&state.config.file_dir).await {
        Ok(meta) if meta.is_dir() => "up",
        Ok(_) | Err(_) => {
            tracing::error!(
                "Health check failed: upload directory {} missing",
                state.config.file_dir
            );
            "down"
        }
    };

    let healthy = database == "up" && file_storage == "up";
    let code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "unhealthy" },
        database,
        file_storage,
        version: env!("CARGO_PKG_VERSION"),
    };

    (code, Json(response))
}
