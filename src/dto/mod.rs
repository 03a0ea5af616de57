//! Formularios y respuestas de la API
//!
//! Los formularios se validan con `validator`; las respuestas reproducen el
//! contexto que cada vista expone al cliente.

pub mod auth_dto;
pub mod car_dto;
pub mod common_dto;
pub mod driver_dto;
pub mod index_dto;
pub mod manufacturer_dto;

/// Valor limpio de un campo de búsqueda; vacío significa "sin filtro"
pub(crate) fn search_term(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
