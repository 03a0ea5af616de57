//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Duración por defecto de la sesión: dos semanas
pub const DEFAULT_SESSION_COOKIE_AGE: u64 = 1_209_600;

/// Duración máxima aceptada para la sesión: diez años
pub const MAX_SESSION_COOKIE_AGE: u64 = 315_360_000;

const DEVELOPMENT_SECRET_KEY: &str = "taxi-service-development-secret";

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub database_url: String,
    pub secret_key: String,
    pub session_cookie_age: u64,
    pub password_hash_cost: u32,
    pub cors_origins: Vec<String>,
    pub log_level: tracing::Level,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 8000,
            host: "0.0.0.0".to_string(),
            database_url: "sqlite://taxi.db?mode=rwc".to_string(),
            secret_key: DEVELOPMENT_SECRET_KEY.to_string(),
            session_cookie_age: DEFAULT_SESSION_COOKIE_AGE,
            password_hash_cost: bcrypt::DEFAULT_COST,
            cors_origins: Vec::new(),
            log_level: tracing::Level::INFO,
            admin_username: None,
            admin_password: None,
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid value, got '{}'", name, value)),
        Err(_) => Ok(default),
    }
}

/// Validar la duración de la sesión en segundos
fn check_session_cookie_age(age: u64) -> Result<u64> {
    if age == 0 || age > MAX_SESSION_COOKIE_AGE {
        bail!(
            "SESSION_COOKIE_AGE must be between 1 and {} seconds, got {}",
            MAX_SESSION_COOKIE_AGE,
            age
        );
    }
    Ok(age)
}

impl EnvironmentConfig {
    /// Cargar configuración desde variables de entorno
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let environment = env::var("ENVIRONMENT").unwrap_or(defaults.environment);

        let secret_key = match env::var("SECRET_KEY") {
            Ok(key) if !key.trim().is_empty() => key,
            _ if environment == "development" => defaults.secret_key,
            _ => bail!("SECRET_KEY must be set outside development"),
        };

        let log_level = match env::var("LOG_LEVEL") {
            Ok(level) => tracing::Level::from_str(level.trim())
                .map_err(|_| anyhow::anyhow!("LOG_LEVEL must be a tracing level, got '{}'", level))?,
            Err(_) => defaults.log_level,
        };

        Ok(Self {
            port: parse_var("PORT", defaults.port)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            secret_key,
            session_cookie_age: check_session_cookie_age(parse_var(
                "SESSION_COOKIE_AGE",
                defaults.session_cookie_age,
            )?)?,
            password_hash_cost: parse_var("PASSWORD_HASH_COST", defaults.password_hash_cost)?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            log_level,
            admin_username: env::var("ADMIN_USERNAME").ok().filter(|s| !s.is_empty()),
            admin_password: env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty()),
            environment,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
