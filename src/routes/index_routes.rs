use axum::{extract::State, routing::get, Extension, Json, Router};
use serde_json::{json, Value};

use crate::controllers::index_controller::IndexController;
use crate::dto::index_dto::IndexResponse;
use crate::middleware::CurrentSession;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_index_router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

pub fn create_health_router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn index(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
) -> Result<Json<IndexResponse>, AppError> {
    let controller = IndexController::new(state.pool.clone());
    let response = controller.index(&current.session_key).await?;
    Ok(Json(response))
}

async fn health(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    sqlx::query("SELECT 1").execute(&state.pool).await?;

    Ok(Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}
