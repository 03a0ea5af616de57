//! Middleware de autenticación por sesión
//!
//! Lee el token de sesión de la cookie `sessionid` o del header
//! `Authorization: Bearer`, lo resuelve contra la tabla `sessions`
//! e inyecta la sesión actual en las extensions de la request.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::{
    models::Driver,
    services::AuthService,
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_cookie, extract_token_from_header},
    },
};

/// Nombre de la cookie que transporta el token de sesión
pub const SESSION_COOKIE_NAME: &str = "sessionid";

/// Sesión autenticada que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub session_key: String,
    pub driver: Driver,
}

/// Tokens de sesión candidatos, en orden: cookie `sessionid` y después
/// `Authorization: Bearer`
pub fn session_tokens(headers: &HeaderMap) -> Result<Vec<&str>, AppError> {
    let mut tokens: Vec<&str> = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookies| extract_cookie(cookies, SESSION_COOKIE_NAME))
        .into_iter()
        .collect();

    match headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
    {
        Some(auth_header) => match extract_token_from_header(auth_header) {
            Ok(token) => tokens.push(token),
            Err(e) if tokens.is_empty() => return Err(e),
            Err(_) => {}
        },
        None if tokens.is_empty() => {
            return Err(AppError::Unauthorized(
                "Authentication credentials were not provided".to_string(),
            ))
        }
        None => {}
    }

    Ok(tokens)
}

/// Middleware de login requerido.
///
/// Un token de cookie caducado o inválido no impide autenticarse con el header.
pub async fn require_login(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let tokens: Vec<String> = session_tokens(request.headers())?
        .into_iter()
        .map(str::to_string)
        .collect();

    let service = AuthService::new(state.pool.clone(), &state.config);
    let mut last_error = None;
    let mut current = None;
    for token in &tokens {
        match service.authenticate(token).await {
            Ok(session) => {
                current = Some(session);
                break;
            }
            Err(e) => last_error = Some(e),
        }
    }

    let current = current.ok_or_else(|| {
        last_error.unwrap_or_else(|| AppError::Unauthorized("Invalid session".to_string()))
    })?;

    // Inyectar sesión autenticada en las extensions
    request.extensions_mut().insert(current);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_tokens_cookie_then_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("sessionid=from-cookie"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(
            session_tokens(&headers).unwrap(),
            vec!["from-cookie", "from-header"]
        );
    }

    #[test]
    fn test_session_tokens_bearer_only() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("csrftoken=abc"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(session_tokens(&headers).unwrap(), vec!["from-header"]);
    }

    #[test]
    fn test_session_tokens_ignores_malformed_header_with_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("sessionid=from-cookie"));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(session_tokens(&headers).unwrap(), vec!["from-cookie"]);

        headers.remove(header::COOKIE);
        assert!(matches!(session_tokens(&headers), Err(AppError::Jwt(_))));
    }

    #[test]
    fn test_session_tokens_missing() {
        assert!(matches!(
            session_tokens(&HeaderMap::new()),
            Err(AppError::Unauthorized(_))
        ));
    }
}
