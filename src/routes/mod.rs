//! Rutas HTTP
//!
//! Cada entidad declara su router con rutas completas; aquí se combinan
//! y se separan las rutas públicas de las que requieren sesión.

pub mod auth_routes;
pub mod car_routes;
pub mod driver_routes;
pub mod index_routes;
pub mod manufacturer_routes;

use axum::{middleware::from_fn_with_state, Router};
use tower_http::trace::TraceLayer;

use crate::middleware::{cors_layer, require_login};
use crate::state::AppState;

/// Router completo de la aplicación
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(index_routes::create_index_router())
        .merge(auth_routes::create_logout_router())
        .merge(manufacturer_routes::create_manufacturer_router())
        .merge(car_routes::create_car_router())
        .merge(driver_routes::create_driver_router())
        .route_layer(from_fn_with_state(state.clone(), require_login));

    let public = Router::new()
        .merge(index_routes::create_health_router())
        .merge(auth_routes::create_login_router());

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config))
        .with_state(state)
}
