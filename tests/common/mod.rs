#![allow(dead_code)]

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use serde_json::{json, Value};
use taskgate::{db, routes, AppState, AuthMode, Config};

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn test_config(mode: AuthMode) -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        db_max_connections: 1,
        server_port: 0,
        server_host: "127.0.0.1".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        token_ttl_secs: 3600,
        // Lowest cost bcrypt accepts, to keep the suite fast.
        bcrypt_cost: 4,
        mode,
    }
}

/// Fresh in-memory database with the schema applied and the state built on it.
pub async fn test_state(mode: AuthMode) -> web::Data<AppState> {
    let config = test_config(mode);
    let pool = db::connect(&config.database_url, config.db_max_connections)
        .await
        .expect("Failed to open in-memory database");
    db::migrate(&pool).await.expect("Failed to create schema");
    let state = AppState::build(pool, &config)
        .await
        .expect("Failed to build application state");
    web::Data::new(state)
}

pub async fn init_app(
    state: web::Data<AppState>,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    let mode = state.mode();
    test::init_service(
        App::new()
            .app_data(state)
            .wrap(Logger::default())
            .configure(move |cfg| routes::config(cfg, mode)),
    )
    .await
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Sends `req` and returns the status with the body parsed as JSON
/// (`Value::Null` for an empty body).
pub async fn send(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    req: Request,
) -> (StatusCode, Value) {
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|e| {
            panic!(
                "Response body is not JSON ({}): {:?}",
                e,
                String::from_utf8_lossy(&body)
            )
        })
    };
    (status, json)
}

pub async fn register(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    username: &str,
    password: &str,
) -> (StatusCode, Value) {
    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    send(app, req).await
}

pub async fn login(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    username: &str,
    password: &str,
) -> (StatusCode, Value) {
    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    send(app, req).await
}

/// Registers `username` and logs in, returning `(user_id, token)`.
pub async fn register_and_login(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    username: &str,
    password: &str,
) -> (i64, String) {
    let (status, body) = register(app, username, password).await;
    assert_eq!(status, StatusCode::CREATED, "Registration failed: {}", body);
    let user_id = body["id"].as_i64().expect("id in registration response");

    let (status, body) = login(app, username, password).await;
    assert_eq!(status, StatusCode::OK, "Login failed: {}", body);
    let token = body["token"]
        .as_str()
        .expect("token in login response")
        .to_string();

    (user_id, token)
}

pub async fn create_task(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    token: &str,
    description: &str,
) -> Value {
    let req = test::TestRequest::post()
        .uri("/tasks")
        .insert_header(bearer(token))
        .set_json(json!({ "description": description }))
        .to_request();
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::CREATED, "Create task failed: {}", body);
    body
}

pub async fn list_tasks(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    token: &str,
) -> Vec<Value> {
    let req = test::TestRequest::get()
        .uri("/tasks")
        .insert_header(bearer(token))
        .to_request();
    let (status, body) = send(app, req).await;
    assert_eq!(status, StatusCode::OK, "List tasks failed: {}", body);
    body.as_array().cloned().expect("task list is an array")
}
