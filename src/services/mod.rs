//! Servicios de negocio
//!
//! Este módulo contiene la lógica de autenticación y sesiones.

pub mod auth_service;

pub use auth_service::AuthService;
