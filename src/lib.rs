//! Servicio de gestión de flota de taxis
//!
//! Manufacturers, cars y drivers con búsqueda, asignación de conductores
//! a cars y sesiones con contador de visitas.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
