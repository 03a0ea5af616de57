//! Modelo de Driver
//!
//! Un Driver es la identidad de usuario del sistema: credenciales,
//! nombre y número de licencia.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Driver - mapea exactamente a la tabla drivers
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Driver {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub license_number: Option<String>,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl Driver {
    /// URL canónica del detalle del conductor
    pub fn absolute_url(&self) -> String {
        format!("/drivers/{}", self.id)
    }

    /// Verificar contraseña contra el hash bcrypt almacenado
    pub fn check_password(&self, password: &str) -> bool {
        bcrypt::verify(password, &self.password_hash).unwrap_or(false)
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.username, self.first_name, self.last_name)
    }
}
