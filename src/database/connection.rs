//! Conexión a SQLite
//!
//! Este módulo abre el pool de conexiones y aplica el esquema embebido.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::info;

use crate::config::database::DatabaseConfig;

/// Conexión a la base de datos con el esquema ya aplicado
#[derive(Clone)]
pub struct DatabaseConnection {
    pool: SqlitePool,
}

impl DatabaseConnection {
    /// Abrir el pool y ejecutar migraciones
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!("🔗 Conectando a la base de datos: {}", config.url);

        let pool = config
            .create_pool()
            .await
            .with_context(|| format!("Error conectando a {}", config.url))?;

        let connection = Self { pool };
        connection.run_migrations().await?;

        info!("✅ Base de datos lista");
        Ok(connection)
    }

    /// Base de datos en memoria con el esquema aplicado, para tests
    pub async fn in_memory() -> Result<Self> {
        let pool = DatabaseConfig::create_test_pool().await?;
        let connection = Self { pool };
        connection.run_migrations().await?;
        Ok(connection)
    }

    /// Ejecutar migraciones de la base de datos
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Error ejecutando migraciones")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
