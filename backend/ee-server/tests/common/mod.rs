#![allow(dead_code)]

//! Test infrastructure for ee-server API tests

use ee_auth::{CredentialVerifier, StaticKeySource};
use ee_config::AuthConfig;
use ee_server::AppState;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tower::ServiceExt;

pub const SESSION_SECRET: &str = "integration-session-secret-at-least-32-bytes";
pub const PROVIDER_SECRET: &[u8] = b"integration-provider-secret-at-least-32-bytes";
pub const PROJECT_ID: &str = "test-project";

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    ee_db::connect_in_memory()
        .await
        .expect("Failed to create test database")
}

pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        session_secret: Some(SESSION_SECRET.to_string()),
        ..AuthConfig::default()
    }
}

pub fn provider_verifier() -> CredentialVerifier {
    CredentialVerifier::with_issuer(
        format!("https://securetoken.google.com/{}", PROJECT_ID),
        PROJECT_ID,
        Arc::new(StaticKeySource::from_secret(PROVIDER_SECRET)),
    )
}

/// AppState with a working identity provider
pub async fn create_test_app_state() -> AppState {
    let pool = create_test_pool().await;
    AppState::new(pool, provider_verifier(), &test_auth_config())
}

/// AppState with a working provider and the development fallback enabled
pub async fn create_dev_fallback_app_state() -> AppState {
    let pool = create_test_pool().await;
    let auth = AuthConfig {
        dev_fallback: true,
        ..test_auth_config()
    };
    let state = AppState::new(pool, provider_verifier(), &auth);
    state
        .ensure_development_user()
        .await
        .expect("Failed to ensure development user");
    state
}

/// AppState whose provider is not configured
pub async fn create_unavailable_app_state(dev_fallback: bool) -> AppState {
    let pool = create_test_pool().await;
    let auth = AuthConfig {
        dev_fallback,
        ..test_auth_config()
    };
    let state = AppState::new(pool, CredentialVerifier::unavailable(), &auth);
    state
        .ensure_development_user()
        .await
        .expect("Failed to ensure development user");
    state
}

/// Provider-signed token expiring `exp_offset_secs` from now
pub fn provider_token(sub: &str, email: Option<&str>, exp_offset_secs: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let mut claims = json!({
        "sub": sub,
        "iat": now,
        "exp": now + exp_offset_secs,
        "iss": format!("https://securetoken.google.com/{}", PROJECT_ID),
        "aud": PROJECT_ID,
        "name": "Provider User",
    });
    if let Some(email) = email {
        claims["email"] = json!(email);
    }

    encode(
        &Header::new(Algorithm::HS384),
        &claims,
        &EncodingKey::from_secret(PROVIDER_SECRET),
    )
    .expect("Failed to sign provider token")
}

/// Register a password user and log in, returning the session token
pub async fn register_and_login(app: &Router, name: &str, email: &str) -> String {
    let (status, _) = send(
        app,
        "POST",
        "/auth/register",
        None,
        Some(json!({ "name": name, "email": email, "password": "password123" })),
    )
    .await;
    assert_eq!(status, 201, "registration failed for {email}");

    let (status, body) = send(
        app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": "password123" })),
    )
    .await;
    assert_eq!(status, 200, "login failed for {email}");

    body["access_token"].as_str().unwrap().to_string()
}

/// Create an event as the token's owner, returning its id
pub async fn create_event(app: &Router, token: &str, title: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/events/create",
        Some(token),
        Some(json!({
            "title": title,
            "description": "Bring snacks",
            "date": "2026-06-08T18:30:00Z",
            "location": "Main hall",
        })),
    )
    .await;
    assert_eq!(status, 201, "event creation failed: {body}");

    body["id"].as_i64().unwrap()
}

/// Send a request through the router and decode the JSON response
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    bearer: Option<&str>,
    body: Option<Value>,
) -> (u16, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    read_json(response).await
}

pub async fn read_json(response: Response<Body>) -> (u16, Value) {
    let status = response.status().as_u16();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}
