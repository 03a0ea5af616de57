use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::car_controller::CarController;
use crate::dto::car_dto::{
    CarDetailResponse, CarForm, CarListResponse, CarSearchForm, ToggleAssignResponse,
};
use crate::dto::common_dto::ApiResponse;
use crate::middleware::CurrentSession;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_car_router() -> Router<AppState> {
    Router::new()
        .route("/cars", get(list_cars).post(create_car))
        .route("/cars/:id", get(get_car).put(update_car).delete(delete_car))
        .route("/cars/:id/toggle-assign", post(toggle_assign))
}

async fn list_cars(
    State(state): State<AppState>,
    Query(search_form): Query<CarSearchForm>,
) -> Result<Json<CarListResponse>, AppError> {
    let controller = CarController::new(state.pool.clone());
    let response = controller.list(search_form).await?;
    Ok(Json(response))
}

async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CarDetailResponse>, AppError> {
    let controller = CarController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn create_car(
    State(state): State<AppState>,
    payload: Result<Json<CarForm>, JsonRejection>,
) -> Result<Json<ApiResponse<CarDetailResponse>>, AppError> {
    let Json(form) = payload?;
    let controller = CarController::new(state.pool.clone());
    let response = controller.create(form).await?;
    Ok(Json(response))
}

async fn update_car(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<CarForm>, JsonRejection>,
) -> Result<Json<ApiResponse<CarDetailResponse>>, AppError> {
    let Json(form) = payload?;
    let controller = CarController::new(state.pool.clone());
    let response = controller.update(id, form).await?;
    Ok(Json(response))
}

async fn delete_car(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = CarController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Car deleted successfully")))
}

async fn toggle_assign(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Path(id): Path<i64>,
) -> Result<Json<ToggleAssignResponse>, AppError> {
    let controller = CarController::new(state.pool.clone());
    let response = controller.toggle_assign(id, &current.driver).await?;
    Ok(Json(response))
}
