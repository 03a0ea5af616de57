//! Servicio de autenticación
//!
//! Login con usuario/contraseña contra la tabla drivers, sesiones del lado
//! servidor y verificación de los tokens de sesión firmados.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{LoginForm, LoginResponse};
use crate::middleware::auth::CurrentSession;
use crate::models::Driver;
use crate::repositories::{DriverRepository, NewDriver, SessionRepository};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::jwt::{generate_session_token, verify_session_token, JwtConfig};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Calcular hash bcrypt fuera del runtime async
pub async fn hash_password(password: String, cost: u32) -> AppResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
        .map_err(|e| AppError::Hash(e.to_string()))
}

/// Verificar contraseña fuera del runtime async
pub async fn verify_password(password: String, password_hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
        .await
        .map_err(|e| AppError::Internal(format!("Verification task failed: {}", e)))?
        .map_err(|e| AppError::Hash(e.to_string()))
}

pub struct AuthService {
    drivers: DriverRepository,
    sessions: SessionRepository,
    jwt: JwtConfig,
}

impl AuthService {
    pub fn new(pool: SqlitePool, config: &EnvironmentConfig) -> Self {
        Self {
            drivers: DriverRepository::new(pool.clone()),
            sessions: SessionRepository::new(pool),
            jwt: JwtConfig::from(config),
        }
    }

    /// Autenticar credenciales y abrir una sesión nueva
    pub async fn login(&self, form: LoginForm) -> AppResult<LoginResponse> {
        form.validate()?;

        let driver = self
            .drivers
            .find_by_username(form.username.trim())
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        if !driver.is_active {
            return Err(AppError::Unauthorized("This account is inactive".to_string()));
        }

        if !verify_password(form.password, driver.password_hash.clone()).await? {
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let purged = self.sessions.purge_expired().await?;
        if purged > 0 {
            debug!("🧹 {} sesiones expiradas eliminadas", purged);
        }

        let expires_at = Utc::now() + self.jwt.lifetime();
        let session = self.sessions.create(driver.id, expires_at).await?;
        self.drivers.touch_last_login(driver.id).await?;

        let token = generate_session_token(driver.id, &session.session_key, &self.jwt)?;

        info!("🔑 Login correcto: {}", driver);
        Ok(LoginResponse::new(
            token,
            driver.id,
            driver.username,
            self.jwt.expiration,
        ))
    }

    /// Cerrar la sesión actual
    pub async fn logout(&self, current: &CurrentSession) -> AppResult<()> {
        self.sessions.delete(&current.session_key).await?;
        info!("👋 Logout: {}", current.driver.username);
        Ok(())
    }

    /// Resolver un token de sesión a la sesión y su conductor
    pub async fn authenticate(&self, token: &str) -> AppResult<CurrentSession> {
        let claims = verify_session_token(token, &self.jwt)?;
        let driver_id = claims.driver_id()?;

        let session = self
            .sessions
            .find(&claims.sid)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Session not found".to_string()))?;

        if session.driver_id != driver_id {
            warn!("⚠️ Token de sesión con conductor distinto al de la sesión");
            return Err(AppError::Unauthorized("Session does not match token".to_string()));
        }

        if session.is_expired() {
            self.sessions.delete(&session.session_key).await?;
            return Err(AppError::Unauthorized("Session expired".to_string()));
        }

        let driver = self
            .drivers
            .find_by_id(driver_id)
            .await?
            .filter(|driver| driver.is_active)
            .ok_or_else(|| AppError::Unauthorized("Driver not found or inactive".to_string()))?;

        Ok(CurrentSession {
            session_key: session.session_key,
            driver,
        })
    }

    /// Crear el conductor inicial cuando la tabla está vacía
    pub async fn ensure_admin(
        &self,
        username: &str,
        password: &str,
        cost: u32,
    ) -> AppResult<Option<Driver>> {
        if self.drivers.count().await? > 0 {
            return Ok(None);
        }

        let password_hash = hash_password(password.to_string(), cost).await?;
        let driver = self
            .drivers
            .create(NewDriver {
                username: username.to_string(),
                password_hash,
                first_name: String::new(),
                last_name: String::new(),
                license_number: None,
            })
            .await?;

        info!("👤 Conductor inicial creado: {}", driver.username);
        Ok(Some(driver))
    }
}
