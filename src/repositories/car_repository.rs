use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::models::{Car, CarWithManufacturer};
use crate::utils::errors::AppError;

use super::contains_pattern;

const CAR_WITH_MANUFACTURER: &str = r#"
    SELECT c.id, c.model, c.manufacturer_id,
           m.name AS manufacturer_name, m.country AS manufacturer_country
    FROM cars c
    JOIN manufacturers m ON m.id = c.manufacturer_id
"#;

pub struct CarRepository {
    pool: SqlitePool,
}

async fn replace_drivers(
    tx: &mut Transaction<'_, Sqlite>,
    car_id: i64,
    driver_ids: &[i64],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM car_drivers WHERE car_id = ?")
        .bind(car_id)
        .execute(&mut **tx)
        .await?;

    for driver_id in driver_ids {
        sqlx::query("INSERT OR IGNORE INTO car_drivers (car_id, driver_id) VALUES (?, ?)")
            .bind(car_id)
            .bind(driver_id)
            .execute(&mut **tx)
            .await?;
    }

    Ok(())
}

impl CarRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Crear un car con sus conductores en una transacción
    pub async fn create(
        &self,
        model: &str,
        manufacturer_id: i64,
        driver_ids: &[i64],
    ) -> Result<Car, AppError> {
        let mut tx = self.pool.begin().await?;

        let car = sqlx::query_as::<_, Car>(
            "INSERT INTO cars (model, manufacturer_id) VALUES (?, ?) RETURNING *",
        )
        .bind(model)
        .bind(manufacturer_id)
        .fetch_one(&mut *tx)
        .await?;

        replace_drivers(&mut tx, car.id, driver_ids).await?;
        tx.commit().await?;

        Ok(car)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<CarWithManufacturer>, AppError> {
        let car = sqlx::query_as::<_, CarWithManufacturer>(&format!(
            "{} WHERE c.id = ?",
            CAR_WITH_MANUFACTURER
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(car)
    }

    /// Listar cars con su manufacturer, filtrando por modelo
    pub async fn list(&self, model: Option<&str>) -> Result<Vec<CarWithManufacturer>, AppError> {
        let cars = sqlx::query_as::<_, CarWithManufacturer>(&format!(
            r#"{} WHERE ?1 IS NULL OR c.model LIKE ?1 ESCAPE '\' ORDER BY c.id"#,
            CAR_WITH_MANUFACTURER
        ))
        .bind(model.map(contains_pattern))
        .fetch_all(&self.pool)
        .await?;

        Ok(cars)
    }

    /// Cars asignados a un conductor
    pub async fn list_by_driver(&self, driver_id: i64) -> Result<Vec<CarWithManufacturer>, AppError> {
        let cars = sqlx::query_as::<_, CarWithManufacturer>(&format!(
            "{} JOIN car_drivers cd ON cd.car_id = c.id WHERE cd.driver_id = ? ORDER BY c.id",
            CAR_WITH_MANUFACTURER
        ))
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(cars)
    }

    /// Actualizar modelo, manufacturer y conductores; `None` si el car no existe
    pub async fn update(
        &self,
        id: i64,
        model: &str,
        manufacturer_id: i64,
        driver_ids: &[i64],
    ) -> Result<Option<Car>, AppError> {
        let mut tx = self.pool.begin().await?;

        let car = sqlx::query_as::<_, Car>(
            "UPDATE cars SET model = ?, manufacturer_id = ? WHERE id = ? RETURNING *",
        )
        .bind(model)
        .bind(manufacturer_id)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(car) = car else {
            return Ok(None);
        };

        replace_drivers(&mut tx, car.id, driver_ids).await?;
        tx.commit().await?;

        Ok(Some(car))
    }

    /// Asignar el conductor si no lo está, o quitarlo si ya lo está.
    ///
    /// Devuelve `true` cuando el conductor queda asignado.
    pub async fn toggle_driver(&self, car_id: i64, driver_id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM car_drivers WHERE car_id = ? AND driver_id = ?")
            .bind(car_id)
            .bind(driver_id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;

        if !removed {
            sqlx::query("INSERT INTO car_drivers (car_id, driver_id) VALUES (?, ?)")
                .bind(car_id)
                .bind(driver_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(!removed)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM cars WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cars")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
