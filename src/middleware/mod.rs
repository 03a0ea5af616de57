//! Middleware del sistema
//!
//! Este módulo contiene el middleware de sesión (login requerido) y CORS.

pub mod auth;
pub mod cors;

pub use auth::{require_login, CurrentSession, SESSION_COOKIE_NAME};
pub use cors::cors_layer;
