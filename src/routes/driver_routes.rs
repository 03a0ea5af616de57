use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::{get, put},
    Json, Router,
};

use crate::controllers::driver_controller::DriverController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::driver_dto::{
    DriverCreationForm, DriverDetailResponse, DriverLicenseUpdateForm, DriverListResponse,
    DriverSearchForm,
};
use crate::models::Driver;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/drivers", get(list_drivers).post(create_driver))
        .route("/drivers/:id", get(get_driver).delete(delete_driver))
        .route("/drivers/:id/license", put(update_license))
}

fn controller(state: &AppState) -> DriverController {
    DriverController::new(state.pool.clone(), state.config.password_hash_cost)
}

async fn list_drivers(
    State(state): State<AppState>,
    Query(search_form): Query<DriverSearchForm>,
) -> Result<Json<DriverListResponse>, AppError> {
    let response = controller(&state).list(search_form).await?;
    Ok(Json(response))
}

async fn get_driver(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DriverDetailResponse>, AppError> {
    let response = controller(&state).get_by_id(id).await?;
    Ok(Json(response))
}

async fn create_driver(
    State(state): State<AppState>,
    payload: Result<Json<DriverCreationForm>, JsonRejection>,
) -> Result<Json<ApiResponse<Driver>>, AppError> {
    let Json(form) = payload?;
    let response = controller(&state).create(form).await?;
    Ok(Json(response))
}

async fn update_license(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<DriverLicenseUpdateForm>, JsonRejection>,
) -> Result<Json<ApiResponse<Driver>>, AppError> {
    let Json(form) = payload?;
    let response = controller(&state).update_license(id, form).await?;
    Ok(Json(response))
}

async fn delete_driver(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    controller(&state).delete(id).await?;
    Ok(Json(ApiResponse::message("Driver deleted successfully")))
}
