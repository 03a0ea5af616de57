#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use taxi_service::config::EnvironmentConfig;
use taxi_service::database::DatabaseConnection;
use taxi_service::models::{Car, Driver, Manufacturer};
use taxi_service::repositories::{
    CarRepository, DriverRepository, ManufacturerRepository, NewDriver,
};
use taxi_service::services::auth_service::hash_password;
use taxi_service::utils::jwt::{verify_session_token, JwtConfig};
use taxi_service::{create_router, AppState};

pub const TEST_PASSWORD: &str = "test123pass";

pub struct TestApp {
    pub state: AppState,
    router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub set_cookie: Option<String>,
    pub body: Value,
}

impl TestApp {
    pub async fn new() -> Self {
        let connection = DatabaseConnection::in_memory().await.unwrap();
        let config = EnvironmentConfig {
            password_hash_cost: 4,
            ..EnvironmentConfig::default()
        };
        let state = AppState::new(connection.pool().clone(), config);

        Self {
            router: create_router(state.clone()),
            state,
        }
    }

    pub async fn create_driver(&self, username: &str, license_number: Option<&str>) -> Driver {
        let password_hash = hash_password(TEST_PASSWORD.to_string(), 4).await.unwrap();
        DriverRepository::new(self.state.pool.clone())
            .create(NewDriver {
                username: username.to_string(),
                password_hash,
                first_name: "First".to_string(),
                last_name: "Last".to_string(),
                license_number: license_number.map(str::to_string),
            })
            .await
            .unwrap()
    }

    pub async fn create_manufacturer(&self, name: &str, country: &str) -> Manufacturer {
        ManufacturerRepository::new(self.state.pool.clone())
            .create(name, country)
            .await
            .unwrap()
    }

    pub async fn create_car(&self, model: &str, manufacturer: &Manufacturer, drivers: &[i64]) -> Car {
        CarRepository::new(self.state.pool.clone())
            .create(model, manufacturer.id, drivers)
            .await
            .unwrap()
    }

    /// Login y devolver el par `sessionid=<token>` para el header Cookie
    pub async fn login(&self, username: &str) -> String {
        let response = self
            .request(
                Method::POST,
                "/accounts/login",
                None,
                Some(json!({"username": username, "password": TEST_PASSWORD})),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);

        response
            .set_cookie
            .and_then(|cookie| cookie.split(';').next().map(str::to_string))
            .unwrap()
    }

    /// Clave de la sesión referenciada por la cookie
    pub fn session_key(&self, cookie: &str) -> String {
        let token = cookie.trim_start_matches("sessionid=");
        verify_session_token(token, &JwtConfig::from(&self.state.config))
            .unwrap()
            .sid
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, cookie, None).await
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let headers: Vec<(header::HeaderName, &str)> = cookie
            .map(|cookie| (header::COOKIE, cookie))
            .into_iter()
            .collect();
        self.request_with_headers(method, uri, &headers, body.map(|b| b.to_string()))
            .await
    }

    /// Request con headers arbitrarios y cuerpo JSON en crudo
    pub async fn request_with_headers(
        &self,
        method: Method,
        uri: &str,
        headers: &[(header::HeaderName, &str)],
        body: Option<String>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(name.clone(), *value);
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body)),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse {
            status,
            set_cookie,
            body,
        }
    }
}
