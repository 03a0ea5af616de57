//! Utilidades JWT para tokens de sesión
//!
//! El token firmado viaja en la cookie `sessionid` (o en `Authorization: Bearer`)
//! y referencia la fila de la tabla `sessions` mediante el claim `sid`.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    config::environment::{EnvironmentConfig, MAX_SESSION_COOKIE_AGE},
    utils::errors::AppError,
};

/// Claims del token de sesión
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String, // driver_id
    pub sid: String, // session_key
    pub exp: usize,
    pub iat: usize,
}

impl SessionClaims {
    pub fn driver_id(&self) -> Result<i64, AppError> {
        self.sub
            .parse()
            .map_err(|_| AppError::Jwt("Invalid subject claim".to_string()))
    }
}

/// Configuración de JWT
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration: u64,
}

impl JwtConfig {
    /// Vida del token y de la sesión, acotada a `MAX_SESSION_COOKIE_AGE`
    pub fn lifetime(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.expiration.min(MAX_SESSION_COOKIE_AGE) as i64)
    }
}

impl From<&EnvironmentConfig> for JwtConfig {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            secret: config.secret_key.clone(),
            expiration: config.session_cookie_age,
        }
    }
}

/// Generar token de sesión para un conductor
pub fn generate_session_token(
    driver_id: i64,
    session_key: &str,
    config: &JwtConfig,
) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expires_at = now + config.lifetime();

    let claims = SessionClaims {
        sub: driver_id.to_string(),
        sid: session_key.to_string(),
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    let encoding_key = EncodingKey::from_secret(config.secret.as_ref());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AppError::Jwt(format!("Error generating token: {}", e)))
}

/// Verificar y decodificar token de sesión
pub fn verify_session_token(token: &str, config: &JwtConfig) -> Result<SessionClaims, AppError> {
    let decoding_key = DecodingKey::from_secret(config.secret.as_ref());

    let token_data = decode::<SessionClaims>(token, &decoding_key, &Validation::default())
        .map_err(|e| AppError::Jwt(format!("Invalid token: {}", e)))?;

    Ok(token_data.claims)
}

/// Extraer token del header Authorization
pub fn extract_token_from_header(auth_header: &str) -> Result<&str, AppError> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Jwt("Authorization header must start with 'Bearer '".to_string()))?;

    if token.is_empty() {
        return Err(AppError::Jwt("Token cannot be empty".to_string()));
    }

    Ok(token)
}

/// Extraer el valor de una cookie del header Cookie
pub fn extract_cookie<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            expiration: 3600,
        }
    }

    #[test]
    fn test_token_roundtrip_keeps_session_key() {
        let token = generate_session_token(42, "abc-key", &config()).unwrap();
        let claims = verify_session_token(&token, &config()).unwrap();
        assert_eq!(claims.driver_id().unwrap(), 42);
        assert_eq!(claims.sid, "abc-key");
    }

    #[test]
    fn test_token_with_wrong_secret_is_rejected() {
        let token = generate_session_token(1, "key", &config()).unwrap();
        let other = JwtConfig {
            secret: "another-secret".to_string(),
            expiration: 3600,
        };
        assert!(verify_session_token(&token, &other).is_err());
    }

    #[test]
    fn test_lifetime_is_bounded() {
        let huge = JwtConfig {
            secret: "test-secret".to_string(),
            expiration: u64::MAX,
        };
        assert_eq!(
            huge.lifetime(),
            chrono::Duration::seconds(MAX_SESSION_COOKIE_AGE as i64)
        );
        assert!(generate_session_token(1, "key", &huge).is_ok());
        assert_eq!(config().lifetime(), chrono::Duration::seconds(3600));
    }

    #[test]
    fn test_extract_token_from_header() {
        assert_eq!(extract_token_from_header("Bearer abc").unwrap(), "abc");
        assert!(extract_token_from_header("Basic abc").is_err());
        assert!(extract_token_from_header("Bearer ").is_err());
    }

    #[test]
    fn test_extract_cookie() {
        let header = "csrftoken=xyz; sessionid=tok.en.value; theme=dark";
        assert_eq!(extract_cookie(header, "sessionid"), Some("tok.en.value"));
        assert_eq!(extract_cookie(header, "missing"), None);
        assert_eq!(extract_cookie("sessionid=", "sessionid"), None);
    }
}
