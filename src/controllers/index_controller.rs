use sqlx::SqlitePool;

use crate::dto::index_dto::IndexResponse;
use crate::models::session::NUM_VISITS_KEY;
use crate::repositories::{
    CarRepository, DriverRepository, ManufacturerRepository, SessionRepository,
};
use crate::utils::errors::AppError;

pub struct IndexController {
    drivers: DriverRepository,
    cars: CarRepository,
    manufacturers: ManufacturerRepository,
    sessions: SessionRepository,
}

impl IndexController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            drivers: DriverRepository::new(pool.clone()),
            cars: CarRepository::new(pool.clone()),
            manufacturers: ManufacturerRepository::new(pool.clone()),
            sessions: SessionRepository::new(pool),
        }
    }

    /// Contadores de entidades y visita registrada en la sesión
    pub async fn index(&self, session_key: &str) -> Result<IndexResponse, AppError> {
        let num_visits = self.sessions.increment(session_key, NUM_VISITS_KEY).await?;

        Ok(IndexResponse {
            num_drivers: self.drivers.count().await?,
            num_cars: self.cars.count().await?,
            num_manufacturers: self.manufacturers.count().await?,
            num_visits,
        })
    }
}
