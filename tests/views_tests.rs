mod common;

use axum::http::{header, Method, StatusCode};
use serde_json::{json, Value};

use common::TestApp;
use taxi_service::models::session::NUM_VISITS_KEY;
use taxi_service::repositories::SessionRepository;

fn names(list: &Value, field: &str) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|item| item[field].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new().await;
    let response = app.get("/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_login_required_for_list_views() {
    let app = TestApp::new().await;

    for uri in ["/", "/manufacturers", "/cars", "/drivers"] {
        let response = app.get(uri, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{}", uri);
    }
}

#[tokio::test]
async fn test_invalid_session_cookie_is_rejected() {
    let app = TestApp::new().await;
    let response = app.get("/manufacturers", Some("sessionid=not-a-token")).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bearer_token_used_when_cookie_is_stale() {
    let app = TestApp::new().await;
    app.create_driver("testuser", None).await;
    let stale = app.login("testuser").await;
    let fresh = app.login("testuser").await;

    let logout = app
        .request(Method::POST, "/accounts/logout", Some(&stale), None)
        .await;
    assert_eq!(logout.status, StatusCode::OK);

    let bearer = format!("Bearer {}", fresh.trim_start_matches("sessionid="));
    let response = app
        .request_with_headers(
            Method::GET,
            "/manufacturers",
            &[
                (header::COOKIE, stale.as_str()),
                (header::AUTHORIZATION, bearer.as_str()),
            ],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let cookie_only = app.get("/manufacturers", Some(&stale)).await;
    assert_eq!(cookie_only.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = TestApp::new().await;
    app.create_driver("testuser", None).await;

    let response = app
        .request(
            Method::POST,
            "/accounts/login",
            None,
            Some(json!({"username": "testuser", "password": "wrong-password"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.set_cookie.is_none());
}

#[tokio::test]
async fn test_login_sets_http_only_cookie() {
    let app = TestApp::new().await;
    app.create_driver("testuser", None).await;

    let response = app
        .request(
            Method::POST,
            "/accounts/login",
            None,
            Some(json!({"username": "testuser", "password": common::TEST_PASSWORD})),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let cookie = response.set_cookie.unwrap();
    assert!(cookie.starts_with("sessionid="));
    assert!(cookie.contains("HttpOnly"));
    assert_eq!(response.body["username"], "testuser");
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = TestApp::new().await;
    app.create_driver("testuser", None).await;
    let cookie = app.login("testuser").await;

    let response = app
        .request(Method::POST, "/accounts/logout", Some(&cookie), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.set_cookie.unwrap().contains("Max-Age=0"));

    let after = app.get("/manufacturers", Some(&cookie)).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_retrieve_manufacturers() {
    let app = TestApp::new().await;
    app.create_driver("testuser", None).await;
    app.create_manufacturer("Toyota", "Japan").await;
    app.create_manufacturer("Honda", "Japan").await;
    let cookie = app.login("testuser").await;

    let response = app.get("/manufacturers", Some(&cookie)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        names(&response.body["manufacturer_list"], "name"),
        vec!["Honda", "Toyota"]
    );
    assert_eq!(response.body["search_form"]["name"], "");

    let empty_filter = app.get("/manufacturers?name=", Some(&cookie)).await;
    assert_eq!(empty_filter.status, StatusCode::OK);
    assert_eq!(
        names(&empty_filter.body["manufacturer_list"], "name"),
        vec!["Honda", "Toyota"]
    );
}

#[tokio::test]
async fn test_search_manufacturers() {
    let app = TestApp::new().await;
    app.create_driver("testuser", None).await;
    app.create_manufacturer("Toyota", "Japan").await;
    app.create_manufacturer("Honda", "Japan").await;
    let cookie = app.login("testuser").await;

    let response = app.get("/manufacturers?name=toy", Some(&cookie)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(names(&response.body["manufacturer_list"], "name"), vec!["Toyota"]);
    assert_eq!(response.body["search_form"]["name"], "toy");
}

#[tokio::test]
async fn test_manufacturer_crud() {
    let app = TestApp::new().await;
    app.create_driver("testuser", None).await;
    let cookie = app.login("testuser").await;

    let created = app
        .request(
            Method::POST,
            "/manufacturers",
            Some(&cookie),
            Some(json!({"name": "Lincoln", "country": "USA"})),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK);
    let id = created.body["data"]["id"].as_i64().unwrap();

    let duplicate = app
        .request(
            Method::POST,
            "/manufacturers",
            Some(&cookie),
            Some(json!({"name": "Lincoln", "country": "Canada"})),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let updated = app
        .request(
            Method::PUT,
            &format!("/manufacturers/{}", id),
            Some(&cookie),
            Some(json!({"name": "Lincoln", "country": "United States"})),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["country"], "United States");

    let deleted = app
        .request(Method::DELETE, &format!("/manufacturers/{}", id), Some(&cookie), None)
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let missing = app
        .request(Method::DELETE, &format!("/manufacturers/{}", id), Some(&cookie), None)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_retrieve_and_search_cars() {
    let app = TestApp::new().await;
    app.create_driver("testuser", None).await;
    let toyota = app.create_manufacturer("Toyota", "Japan").await;
    let honda = app.create_manufacturer("Honda", "Japan").await;
    app.create_car("Corolla", &toyota, &[]).await;
    app.create_car("Civic", &honda, &[]).await;
    let cookie = app.login("testuser").await;

    let all = app.get("/cars", Some(&cookie)).await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body["car_list"].as_array().unwrap().len(), 2);

    let empty_filter = app.get("/cars?model=", Some(&cookie)).await;
    assert_eq!(empty_filter.status, StatusCode::OK);
    assert_eq!(empty_filter.body["car_list"].as_array().unwrap().len(), 2);

    let filtered = app.get("/cars?model=Corolla", Some(&cookie)).await;
    assert_eq!(filtered.status, StatusCode::OK);
    let cars = filtered.body["car_list"].as_array().unwrap();
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0]["model"], "Corolla");
    assert_eq!(cars[0]["manufacturer"]["name"], "Toyota");
    assert_eq!(cars[0]["absolute_url"], format!("/cars/{}", cars[0]["id"]));
}

#[tokio::test]
async fn test_retrieve_and_search_drivers() {
    let app = TestApp::new().await;
    app.create_driver("driver1", Some("ABC12345")).await;
    app.create_driver("driver2", Some("DEF67890")).await;
    let cookie = app.login("driver1").await;

    let all = app.get("/drivers", Some(&cookie)).await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(
        names(&all.body["driver_list"], "username"),
        vec!["driver1", "driver2"]
    );

    let empty_filter = app.get("/drivers?username=", Some(&cookie)).await;
    assert_eq!(
        names(&empty_filter.body["driver_list"], "username"),
        vec!["driver1", "driver2"]
    );

    let filtered = app.get("/drivers?username=driver1", Some(&cookie)).await;
    assert_eq!(filtered.status, StatusCode::OK);
    assert_eq!(names(&filtered.body["driver_list"], "username"), vec!["driver1"]);
    assert!(filtered.body["driver_list"][0].get("password_hash").is_none());
}

#[tokio::test]
async fn test_index_counts_and_visits() {
    let app = TestApp::new().await;
    let driver = app.create_driver("testuser", None).await;
    let toyota = app.create_manufacturer("Toyota", "Japan").await;
    app.create_car("Corolla", &toyota, &[driver.id]).await;
    let cookie = app.login("testuser").await;

    let first = app.get("/", Some(&cookie)).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["num_drivers"], 1);
    assert_eq!(first.body["num_cars"], 1);
    assert_eq!(first.body["num_manufacturers"], 1);
    assert_eq!(first.body["num_visits"], 1);

    let second = app.get("/", Some(&cookie)).await;
    assert_eq!(second.body["num_visits"], 2);
}

#[tokio::test]
async fn test_index_increments_stored_visits() {
    let app = TestApp::new().await;
    app.create_driver("testuser", None).await;
    let cookie = app.login("testuser").await;

    let sessions = SessionRepository::new(app.state.pool.clone());
    let session_key = app.session_key(&cookie);
    sessions
        .set_value(&session_key, NUM_VISITS_KEY, &json!(5))
        .await
        .unwrap();

    let response = app.get("/", Some(&cookie)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["num_visits"], 6);

    let stored = sessions.find(&session_key).await.unwrap().unwrap();
    assert_eq!(stored.num_visits(), 6);
}

#[tokio::test]
async fn test_car_detail_and_toggle_assign() {
    let app = TestApp::new().await;
    let driver = app.create_driver("testuser", None).await;
    let toyota = app.create_manufacturer("Toyota", "Japan").await;
    let car = app.create_car("Corolla", &toyota, &[]).await;
    let cookie = app.login("testuser").await;
    let toggle_uri = format!("/cars/{}/toggle-assign", car.id);

    let assigned = app
        .request(Method::POST, &toggle_uri, Some(&cookie), None)
        .await;
    assert_eq!(assigned.status, StatusCode::OK);
    assert_eq!(assigned.body["assigned"], true);
    assert_eq!(assigned.body["car"]["drivers"][0]["id"], driver.id);

    let detail = app.get(&format!("/cars/{}", car.id), Some(&cookie)).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.body["manufacturer"]["name"], "Toyota");
    assert_eq!(detail.body["drivers"].as_array().unwrap().len(), 1);

    let removed = app
        .request(Method::POST, &toggle_uri, Some(&cookie), None)
        .await;
    assert_eq!(removed.body["assigned"], false);
    assert!(removed.body["car"]["drivers"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_driver_detail() {
    let app = TestApp::new().await;
    let driver = app.create_driver("testuser", Some("ABC12345")).await;
    let toyota = app.create_manufacturer("Toyota", "Japan").await;
    app.create_car("Corolla", &toyota, &[driver.id]).await;
    let cookie = app.login("testuser").await;

    let response = app.get(&format!("/drivers/{}", driver.id), Some(&cookie)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["driver"]["username"], "testuser");
    assert_eq!(response.body["absolute_url"], format!("/drivers/{}", driver.id));
    assert_eq!(response.body["cars"][0]["model"], "Corolla");

    let missing = app.get("/drivers/9999", Some(&cookie)).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}
