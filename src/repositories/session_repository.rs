use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::Session;
use crate::utils::errors::AppError;

pub struct SessionRepository {
    pool: SqlitePool,
}

fn json_path(key: &str) -> String {
    format!("$.\"{}\"", key.replace('"', ""))
}

impl SessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Crear una sesión vacía con clave aleatoria
    pub async fn create(
        &self,
        driver_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, AppError> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (session_key, driver_id, data, expires_at)
            VALUES (?, ?, '{}', ?)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(driver_id)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(session)
    }

    pub async fn find(&self, session_key: &str) -> Result<Option<Session>, AppError> {
        let session = sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE session_key = ?")
            .bind(session_key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(session)
    }

    /// Incrementar un contador de la sesión en una sola sentencia y devolver el nuevo valor
    pub async fn increment(&self, session_key: &str, key: &str) -> Result<i64, AppError> {
        let value = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE sessions
            SET data = json_set(data, ?1, COALESCE(json_extract(data, ?1), 0) + 1)
            WHERE session_key = ?2
            RETURNING json_extract(data, ?1)
            "#,
        )
        .bind(json_path(key))
        .bind(session_key)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Session not found".to_string()))?;

        Ok(value)
    }

    /// Guardar un valor arbitrario en la sesión
    pub async fn set_value(
        &self,
        session_key: &str,
        key: &str,
        value: &Value,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE sessions SET data = json_set(data, ?1, json(?2)) WHERE session_key = ?3",
        )
        .bind(json_path(key))
        .bind(value.to_string())
        .bind(session_key)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Session '{}' not found", session_key)));
        }

        Ok(())
    }

    pub async fn delete(&self, session_key: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM sessions WHERE session_key = ?")
            .bind(session_key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Eliminar sesiones expiradas
    pub async fn purge_expired(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
