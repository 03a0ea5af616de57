use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, HeaderValue},
    routing::post,
    Extension, Json, Router,
};

use crate::dto::auth_dto::{LoginForm, LoginResponse};
use crate::dto::common_dto::ApiResponse;
use crate::middleware::{CurrentSession, SESSION_COOKIE_NAME};
use crate::services::AuthService;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas públicas de autenticación
pub fn create_login_router() -> Router<AppState> {
    Router::new().route("/accounts/login", post(login))
}

/// Rutas de autenticación que requieren sesión
pub fn create_logout_router() -> Router<AppState> {
    Router::new().route("/accounts/logout", post(logout))
}

/// Construir el header Set-Cookie de la sesión
fn session_cookie(value: &str, max_age: u64, secure: bool) -> Result<HeaderValue, AppError> {
    let mut cookie = format!(
        "{}={}; HttpOnly; Path=/; Max-Age={}; SameSite=Lax",
        SESSION_COOKIE_NAME, value, max_age
    );
    if secure {
        cookie.push_str("; Secure");
    }

    HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::Internal(format!("Invalid session cookie: {}", e)))
}

async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginForm>, JsonRejection>,
) -> Result<(HeaderMap, Json<LoginResponse>), AppError> {
    let Json(form) = payload?;
    let service = AuthService::new(state.pool.clone(), &state.config);
    let response = service.login(form).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        session_cookie(
            &response.token,
            state.config.session_cookie_age,
            state.config.is_production(),
        )?,
    );

    Ok((headers, Json(response)))
}

async fn logout(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
) -> Result<(HeaderMap, Json<ApiResponse<()>>), AppError> {
    let service = AuthService::new(state.pool.clone(), &state.config);
    service.logout(&current).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        session_cookie("", 0, state.config.is_production())?,
    );

    Ok((headers, Json(ApiResponse::message("Logged out"))))
}
