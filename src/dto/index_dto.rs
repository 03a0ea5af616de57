use serde::Serialize;

// Contexto de la vista index
#[derive(Debug, Clone, Serialize)]
pub struct IndexResponse {
    pub num_drivers: i64,
    pub num_cars: i64,
    pub num_manufacturers: i64,
    pub num_visits: i64,
}
