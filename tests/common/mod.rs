//! Test helpers for the JSON API tests.
//!
//! Builds the full router over an in-memory database and wraps the
//! register/login round trips most tests start with.

#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::{json, Value};

use socialfeed::{Config, Database, WebServer};

/// Secret used by every test server.
pub const TEST_SECRET: &str = "test-secret-key-for-testing-only";

/// Password used by [`register_and_login`].
pub const TEST_PASSWORD: &str = "password123";

/// Create a test configuration with cheap password hashing.
pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.web.host = "127.0.0.1".to_string();
    config.web.port = 0;
    config.web.jwt_secret = TEST_SECRET.to_string();
    config.auth.argon2_memory_kib = 1024;
    config.auth.argon2_iterations = 1;
    config.auth.argon2_parallelism = 1;
    config
}

/// Create a test server with an in-memory database.
pub async fn create_test_server() -> (TestServer, Database) {
    let config = create_test_config();

    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    let web = WebServer::new(&config, db.clone()).expect("Failed to create web server");
    let server = TestServer::new(web.router()).expect("Failed to create test server");

    (server, db)
}

/// Register a user and return the response body.
pub async fn register_user(server: &TestServer, username: &str, password: &str) -> Value {
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "username": username,
            "password": password
        }))
        .await;

    response.json::<Value>()
}

/// Log in and return the response body.
pub async fn login_user(server: &TestServer, username: &str, password: &str) -> Value {
    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "username": username,
            "password": password
        }))
        .await;

    response.json::<Value>()
}

/// Register a user with [`TEST_PASSWORD`] and return a fresh token.
pub async fn register_and_login(server: &TestServer, username: &str) -> String {
    register_user(server, username, TEST_PASSWORD).await;
    let body = login_user(server, username, TEST_PASSWORD).await;

    body["data"]["token"]
        .as_str()
        .expect("No token in login response")
        .to_string()
}

/// Format a bearer header value.
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
