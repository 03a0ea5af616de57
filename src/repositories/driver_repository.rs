use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::models::Driver;
use crate::utils::errors::{unique_violation_or, AppError};

use super::contains_pattern;

/// Datos para insertar un conductor; el hash ya viene calculado
#[derive(Debug, Clone)]
pub struct NewDriver {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub license_number: Option<String>,
}

pub struct DriverRepository {
    pool: SqlitePool,
}

impl DriverRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, driver: NewDriver) -> Result<Driver, AppError> {
        let created = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (username, password_hash, first_name, last_name, license_number, is_active, date_joined)
            VALUES (?, ?, ?, ?, ?, 1, ?)
            RETURNING *
            "#,
        )
        .bind(&driver.username)
        .bind(&driver.password_hash)
        .bind(&driver.first_name)
        .bind(&driver.last_name)
        .bind(&driver.license_number)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            unique_violation_or(e, || {
                AppError::Conflict(format!(
                    "Driver with username '{}' or license number already exists",
                    driver.username
                ))
            })
        })?;

        Ok(created)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    /// Buscar varios conductores por id; los ids desconocidos se omiten
    pub async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Driver>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT * FROM drivers WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY username, id");

        let drivers = builder
            .build_query_as::<Driver>()
            .fetch_all(&self.pool)
            .await?;

        Ok(drivers)
    }

    /// Listar conductores, filtrando por username (subcadena, sin distinguir mayúsculas)
    pub async fn list(&self, username: Option<&str>) -> Result<Vec<Driver>, AppError> {
        let drivers = sqlx::query_as::<_, Driver>(
            r#"
            SELECT * FROM drivers
            WHERE ?1 IS NULL OR username LIKE ?1 ESCAPE '\'
            ORDER BY username, id
            "#,
        )
        .bind(username.map(contains_pattern))
        .fetch_all(&self.pool)
        .await?;

        Ok(drivers)
    }

    /// Conductores asignados a un car
    pub async fn list_by_car(&self, car_id: i64) -> Result<Vec<Driver>, AppError> {
        let drivers = sqlx::query_as::<_, Driver>(
            r#"
            SELECT d.* FROM drivers d
            JOIN car_drivers cd ON cd.driver_id = d.id
            WHERE cd.car_id = ?
            ORDER BY d.username, d.id
            "#,
        )
        .bind(car_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(drivers)
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM drivers WHERE username = ?)",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Verificar si otro conductor ya usa el número de licencia
    pub async fn license_number_exists(
        &self,
        license_number: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM drivers WHERE license_number = ? AND (? IS NULL OR id <> ?))",
        )
        .bind(license_number)
        .bind(exclude_id)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn update_license_number(
        &self,
        id: i64,
        license_number: &str,
    ) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>(
            "UPDATE drivers SET license_number = ? WHERE id = ? RETURNING *",
        )
        .bind(license_number)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            unique_violation_or(e, || {
                AppError::Conflict(format!(
                    "Driver with license number '{}' already exists",
                    license_number
                ))
            })
        })?;

        Ok(driver)
    }

    pub async fn touch_last_login(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE drivers SET last_login = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Eliminar un conductor; sus asignaciones y sesiones se eliminan en cascada
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM drivers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
