use sqlx::SqlitePool;

use crate::models::Manufacturer;
use crate::utils::errors::{conflict_error, unique_violation_or, AppError};

use super::contains_pattern;

pub struct ManufacturerRepository {
    pool: SqlitePool,
}

impl ManufacturerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: &str, country: &str) -> Result<Manufacturer, AppError> {
        let manufacturer = sqlx::query_as::<_, Manufacturer>(
            "INSERT INTO manufacturers (name, country) VALUES (?, ?) RETURNING *",
        )
        .bind(name)
        .bind(country)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_violation_or(e, || conflict_error("Manufacturer", "name", name)))?;

        Ok(manufacturer)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Manufacturer>, AppError> {
        let manufacturer =
            sqlx::query_as::<_, Manufacturer>("SELECT * FROM manufacturers WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(manufacturer)
    }

    /// Listar manufacturers, filtrando por nombre (subcadena, sin distinguir mayúsculas)
    pub async fn list(&self, name: Option<&str>) -> Result<Vec<Manufacturer>, AppError> {
        let manufacturers = sqlx::query_as::<_, Manufacturer>(
            r#"
            SELECT * FROM manufacturers
            WHERE ?1 IS NULL OR name LIKE ?1 ESCAPE '\'
            ORDER BY name, id
            "#,
        )
        .bind(name.map(contains_pattern))
        .fetch_all(&self.pool)
        .await?;

        Ok(manufacturers)
    }

    pub async fn update(
        &self,
        id: i64,
        name: &str,
        country: &str,
    ) -> Result<Option<Manufacturer>, AppError> {
        let manufacturer = sqlx::query_as::<_, Manufacturer>(
            "UPDATE manufacturers SET name = ?, country = ? WHERE id = ? RETURNING *",
        )
        .bind(name)
        .bind(country)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| unique_violation_or(e, || conflict_error("Manufacturer", "name", name)))?;

        Ok(manufacturer)
    }

    /// Eliminar un manufacturer; sus cars se eliminan en cascada
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM manufacturers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM manufacturers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
