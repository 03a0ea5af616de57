//! Repositorios
//!
//! Cada repositorio es dueño del SQL de una tabla y mapea filas con `FromRow`.

pub mod car_repository;
pub mod driver_repository;
pub mod manufacturer_repository;
pub mod session_repository;

pub use car_repository::CarRepository;
pub use driver_repository::{DriverRepository, NewDriver};
pub use manufacturer_repository::ManufacturerRepository;
pub use session_repository::SessionRepository;

/// Patrón LIKE de subcadena, con `%`, `_` y `\` escapados (usar con `ESCAPE '\'`)
pub(crate) fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
