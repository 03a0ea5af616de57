use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::{get, put},
    Json, Router,
};

use crate::controllers::manufacturer_controller::ManufacturerController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::manufacturer_dto::{
    ManufacturerForm, ManufacturerListResponse, ManufacturerSearchForm,
};
use crate::models::Manufacturer;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_manufacturer_router() -> Router<AppState> {
    Router::new()
        .route("/manufacturers", get(list_manufacturers).post(create_manufacturer))
        .route(
            "/manufacturers/:id",
            put(update_manufacturer).delete(delete_manufacturer),
        )
}

async fn list_manufacturers(
    State(state): State<AppState>,
    Query(search_form): Query<ManufacturerSearchForm>,
) -> Result<Json<ManufacturerListResponse>, AppError> {
    let controller = ManufacturerController::new(state.pool.clone());
    let response = controller.list(search_form).await?;
    Ok(Json(response))
}

async fn create_manufacturer(
    State(state): State<AppState>,
    payload: Result<Json<ManufacturerForm>, JsonRejection>,
) -> Result<Json<ApiResponse<Manufacturer>>, AppError> {
    let Json(form) = payload?;
    let controller = ManufacturerController::new(state.pool.clone());
    let response = controller.create(form).await?;
    Ok(Json(response))
}

async fn update_manufacturer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<ManufacturerForm>, JsonRejection>,
) -> Result<Json<ApiResponse<Manufacturer>>, AppError> {
    let Json(form) = payload?;
    let controller = ManufacturerController::new(state.pool.clone());
    let response = controller.update(id, form).await?;
    Ok(Json(response))
}

async fn delete_manufacturer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ManufacturerController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Manufacturer deleted successfully")))
}
