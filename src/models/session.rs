//! Modelo de Session
//!
//! Sesión del lado servidor: clave aleatoria, conductor propietario
//! y un diccionario JSON de valores (por ejemplo `num_visits`).

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::{types::Json, FromRow};

/// Clave de sesión del contador de visitas del índice
pub const NUM_VISITS_KEY: &str = "num_visits";

pub type SessionData = Map<String, Value>;

/// Session - mapea a la tabla sessions
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub session_key: String,
    pub driver_id: i64,
    pub data: Json<SessionData>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.data.get(key).and_then(Value::as_i64)
    }

    pub fn num_visits(&self) -> i64 {
        self.get_i64(NUM_VISITS_KEY).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session(data: Value, expires_in: i64) -> Session {
        Session {
            session_key: "key".to_string(),
            driver_id: 1,
            data: Json(data.as_object().cloned().unwrap_or_default()),
            expires_at: Utc::now() + chrono::Duration::seconds(expires_in),
        }
    }

    #[test]
    fn test_num_visits_defaults_to_zero() {
        assert_eq!(session(json!({}), 60).num_visits(), 0);
        assert_eq!(session(json!({"num_visits": 5}), 60).num_visits(), 5);
        assert_eq!(session(json!({"num_visits": "x"}), 60).num_visits(), 0);
    }

    #[test]
    fn test_is_expired() {
        assert!(!session(json!({}), 60).is_expired());
        assert!(session(json!({}), -1).is_expired());
    }
}
